use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::{
    models::{
        AuthConfig, Config, ConfigMetadata, DEFAULT_DATASET_PATH, DEFAULT_HOST,
        DEFAULT_PORT, DEFAULT_STREAM_CHUNK_BYTES, DatasetConfig, ServerConfig,
    },
    sources::{EnvConfig, FileConfig},
    util::non_empty,
    validation::ConfigWarnings,
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("geoscope.toml"),
        PathBuf::from("config/geoscope.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to load .env file")]
    EnvFile(#[from] dotenvy::Error),
    #[error("ACCESS_TOKEN_SECRET (or auth.access_token) must be set")]
    MissingAccessToken,
    #[error("invalid public base URL '{value}': {reason}")]
    InvalidPublicBaseUrl { value: String, reason: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    /// Loads `.env`, reads the process environment and composes the config.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Composes the config from an explicit environment view without
    /// touching `.env` or the process environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        self.compose_config(file_config, env, config_path)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingConfig { path });
                }
                path
            }
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        debug!(path = %path.display(), "reading configuration file");
        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| {
                ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if config_path.is_none() {
            warnings.push_with_hint(
                "No geoscope.toml detected; using environment variables and defaults",
                "Set GEOSCOPE_CONFIG or pass --config to point at a file",
            );
        }

        let FileConfig {
            server: file_server,
            dataset: file_dataset,
            auth: file_auth,
        } = file_config.unwrap_or_default();

        let public_base_url = env
            .public_base_url
            .or(non_empty(file_server.public_base_url))
            .map(|raw| parse_base_url(&raw))
            .transpose()?;

        let server = ServerConfig {
            host: env
                .server_host
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
            public_base_url,
            trust_proxy_headers: env
                .trust_proxy_headers
                .or(file_server.trust_proxy_headers)
                .unwrap_or(false),
        };

        let dataset = DatasetConfig {
            path: env
                .dataset_path
                .or(file_dataset.path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH)),
            stream_chunk_bytes: env
                .stream_chunk_bytes
                .or(file_dataset.stream_chunk_bytes)
                .unwrap_or(DEFAULT_STREAM_CHUNK_BYTES),
        };

        if dataset.stream_chunk_bytes == 0 {
            return Err(ConfigLoadError::Invalid(
                "dataset.stream_chunk_bytes must be greater than zero".into(),
            ));
        }

        if !dataset.path.exists() {
            warnings.push_with_hint(
                format!("dataset {} does not exist yet", dataset.path.display()),
                "Set ADDRESSES_PATH or dataset.path to the addresses JSON file",
            );
        }

        let access_token = env
            .access_token
            .or(non_empty(file_auth.access_token))
            .ok_or(ConfigLoadError::MissingAccessToken)?;

        let config = Config {
            server,
            dataset,
            auth: AuthConfig { access_token },
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded: false,
            },
        };

        Ok(ConfigLoad { config, warnings })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigLoadError> {
    let invalid = |reason: String| ConfigLoadError::InvalidPublicBaseUrl {
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("must be an absolute http(s) URL".into()));
    }

    Ok(url)
}
