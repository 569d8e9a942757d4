use std::{fmt, path::PathBuf};

use url::Url;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATASET_PATH: &str = "./addresses.json";
pub const DEFAULT_STREAM_CHUNK_BYTES: usize = 64 * 1024;

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub auth: AuthConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin used for `resultsUrl` links instead of the request's Host.
    pub public_base_url: Option<Url>,
    /// Honour `X-Forwarded-Proto` when building links.
    pub trust_proxy_headers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Read size for the raw dataset download.
    pub stream_chunk_bytes: usize,
}

#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Shared secret every request must present as a bearer token.
    pub access_token: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Where the configuration came from, for startup logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
