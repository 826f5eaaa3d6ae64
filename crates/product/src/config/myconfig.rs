use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_conn: u32,
    pub max_conn: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub run_migrations: bool,
    pub port: u16,
    pub otel_endpoint: Option<String>,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let run_migrations = parse_flag("RUN_MIGRATIONS", var("RUN_MIGRATIONS"), true)?;

        let port = var("PORT")
            .map(|v| v.parse::<u16>())
            .transpose()
            .context("PORT must be a valid u16 integer")?
            .unwrap_or(8080);

        let database = match var("DATABASE_URL") {
            Some(url) => {
                let min_conn = var("DB_MIN_CONN")
                    .map(|v| v.parse::<u32>())
                    .transpose()
                    .context("DB_MIN_CONN must be a valid u32 integer")?
                    .unwrap_or(1);

                let max_conn = var("DB_MAX_CONN")
                    .map(|v| v.parse::<u32>())
                    .transpose()
                    .context("DB_MAX_CONN must be a valid u32 integer")?
                    .unwrap_or(5);

                if max_conn == 0 || min_conn > max_conn {
                    return Err(anyhow!(
                        "DB_MIN_CONN ({min_conn}) must not exceed DB_MAX_CONN ({max_conn}), and DB_MAX_CONN must be positive"
                    ));
                }

                Some(DatabaseConfig {
                    url,
                    min_conn,
                    max_conn,
                })
            }
            None => None,
        };

        let is_dev = parse_flag("DEV_MODE", var("DEV_MODE"), false)?;
        let enable_file_log = parse_flag("ENABLE_FILE_LOG", var("ENABLE_FILE_LOG"), false)?;

        Ok(Self {
            database,
            run_migrations,
            port,
            otel_endpoint: var("OTEL_ENDPOINT"),
            is_dev,
            enable_file_log,
        })
    }
}

fn parse_flag(key: &str, value: Option<String>, default: bool) -> Result<bool> {
    match value.as_deref() {
        None => Ok(default),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.database, None);
        assert!(config.run_migrations);
        assert_eq!(config.port, 8080);
        assert_eq!(config.otel_endpoint, None);
        assert!(!config.is_dev);
        assert!(!config.enable_file_log);
    }

    #[test]
    fn database_url_enables_pool_settings() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/products"),
            ("DB_MAX_CONN", "10"),
            ("PORT", "5000"),
            ("RUN_MIGRATIONS", "false"),
            ("DEV_MODE", "true"),
            ("ENABLE_FILE_LOG", "true"),
        ])
        .unwrap();

        assert_eq!(
            config.database,
            Some(DatabaseConfig {
                url: "postgres://localhost/products".into(),
                min_conn: 1,
                max_conn: 10,
            })
        );
        assert_eq!(config.port, 5000);
        assert!(!config.run_migrations);
        assert!(config.is_dev);
        assert!(config.enable_file_log);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("RUN_MIGRATIONS", "yes")]).is_err());
        assert!(config_from(&[("DEV_MODE", "yes")]).is_err());
        assert!(config_from(&[("ENABLE_FILE_LOG", "1")]).is_err());
        assert!(
            config_from(&[
                ("DATABASE_URL", "postgres://localhost/products"),
                ("DB_MIN_CONN", "6"),
                ("DB_MAX_CONN", "5"),
            ])
            .is_err()
        );
    }
}
