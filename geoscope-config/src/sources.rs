use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util::{non_empty, parse_bool};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub dataset: FileDatasetConfig,
    #[serde(default)]
    pub auth: FileAuthConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_proxy_headers: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileDatasetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_chunk_bytes: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileAuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Values read from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub public_base_url: Option<String>,
    pub trust_proxy_headers: Option<bool>,
    pub dataset_path: Option<PathBuf>,
    pub stream_chunk_bytes: Option<usize>,
    pub access_token: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the environment view from an arbitrary lookup, so callers can
    /// feed a map instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| non_empty(lookup(name));

        Self {
            config_path: var("GEOSCOPE_CONFIG").map(PathBuf::from),
            server_host: var("SERVER_HOST"),
            server_port: var("SERVER_PORT").and_then(|s| s.parse().ok()),
            public_base_url: var("PUBLIC_BASE_URL"),
            trust_proxy_headers: var("TRUST_PROXY_HEADERS")
                .and_then(|s| parse_bool(&s)),
            dataset_path: var("ADDRESSES_PATH").map(PathBuf::from),
            stream_chunk_bytes: var("STREAM_CHUNK_BYTES")
                .and_then(|s| s.parse().ok()),
            access_token: var("ACCESS_TOKEN_SECRET"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn from_lookup_parses_typed_values_and_skips_blanks() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SERVER_PORT", "9090"),
            ("TRUST_PROXY_HEADERS", "yes"),
            ("STREAM_CHUNK_BYTES", "not-a-number"),
            ("ACCESS_TOKEN_SECRET", "   "),
            ("ADDRESSES_PATH", "/data/addresses.json"),
        ]);

        let env = EnvConfig::from_lookup(|name| {
            vars.get(name).map(|v| v.to_string())
        });

        assert_eq!(env.server_port, Some(9090));
        assert_eq!(env.trust_proxy_headers, Some(true));
        assert_eq!(env.stream_chunk_bytes, None);
        assert_eq!(env.access_token, None);
        assert_eq!(
            env.dataset_path,
            Some(PathBuf::from("/data/addresses.json"))
        );
    }

    #[test]
    fn file_config_rejects_unknown_keys() {
        let parsed = toml::from_str::<FileConfig>("[server]\nhots = \"x\"\n");
        assert!(parsed.is_err());
    }
}
