//! Process configuration read from the environment.

use std::env;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid number: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// Extra origins allowed by CORS, from a comma separated `CORS_ALLOWED_ORIGINS`.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let cors_origins: Vec<String> = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed_env("PORT", 8080)?,
            database_url,
            max_connections: parsed_env("DB_MAX_CONNECTIONS", 5)?,
            cors_origins,
        })
    }
}

fn parsed_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for k in ["DATABASE_URL", "HOST", "PORT", "DB_MAX_CONNECTIONS", "CORS_ALLOWED_ORIGINS"] {
            env::remove_var(k);
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_only_database_url_is_set() {
        clear();
        env::set_var("DATABASE_URL", "postgres://localhost/blog");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.max_connections, 5);
        assert!(cfg.cors_origins.is_empty());
        clear();
    }

    #[test]
    #[serial]
    fn database_url_is_required() {
        clear();
        assert_eq!(AppConfig::from_env().unwrap_err(), ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    #[serial]
    fn bad_port_is_reported() {
        clear();
        env::set_var("DATABASE_URL", "postgres://localhost/blog");
        env::set_var("PORT", "eighty");
        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
        clear();
    }

    #[test]
    #[serial]
    fn cors_origins_are_split_and_trimmed() {
        clear();
        env::set_var("DATABASE_URL", "postgres://localhost/blog");
        env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,,");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.cors_origins, vec!["http://a.test", "http://b.test"]);
        clear();
    }
}
