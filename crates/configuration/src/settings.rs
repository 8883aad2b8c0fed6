use crate::error::ConfigError;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";

/// Process-level settings for the HTTP surface, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// `MA_BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `CORS_ORIGINS`, comma-separated. `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// `DATABASE_URL`. Without it status checks are kept in memory.
    pub database_url: Option<String>,
    /// `LOG_DIR`. When set, logs are also written to a daily rolling file.
    pub log_dir: Option<PathBuf>,
    /// `MA_DATA_DIR`. Overrides the bundled reference datasets.
    pub data_dir: Option<PathBuf>,
    /// `MA_DEAL_CONFIG`. Path to a deal.toml.
    pub deal_config: Option<PathBuf>,
}

impl ServerSettings {
    /// Reads the settings from the process environment.
    ///
    /// Callers load `.env` with `dotenvy` beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let raw_addr = non_empty("MA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.trim().parse::<SocketAddr>().map_err(|e| {
            ConfigError::ValidationError(format!("MA_BIND_ADDR '{raw_addr}' is not a socket address: {e}"))
        })?;

        let cors_origins = non_empty("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec!["*".to_string()]);

        Ok(Self {
            bind_addr,
            cors_origins,
            database_url: non_empty("DATABASE_URL"),
            log_dir: non_empty("LOG_DIR").map(PathBuf::from),
            data_dir: non_empty("MA_DATA_DIR").map(PathBuf::from),
            deal_config: non_empty("MA_DEAL_CONFIG").map(PathBuf::from),
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<ServerSettings, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let settings = settings_from(&[]).unwrap();
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(settings.cors_origins, vec!["*".to_string()]);
        assert!(settings.allows_any_origin());
        assert_eq!(settings.database_url, None);
        assert_eq!(settings.log_dir, None);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let settings = settings_from(&[(
            "CORS_ORIGINS",
            "http://localhost:3000, https://deals.example.com ,",
        )])
        .unwrap();
        assert_eq!(
            settings.cors_origins,
            vec!["http://localhost:3000".to_string(), "https://deals.example.com".to_string()]
        );
        assert!(!settings.allows_any_origin());
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let settings = settings_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(settings.database_url, None);
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let err = settings_from(&[("MA_BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
