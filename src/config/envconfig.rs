use std::collections::HashMap;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Configuration read from `APP_`-prefixed environment variables, with `__`
/// between nesting levels (`APP_DATABASE__URL` sets `database.url`). A
/// `.env` file in the working directory is loaded first when present.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Err(err) if !err.not_found() => {
                return Err(err).context("failed to read .env file");
            }
            _ => {}
        }
        Self::from_source(None)
    }

    /// Reads from `vars` instead of the process environment when given.
    fn from_source(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let environment = config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .try_parsing(true)
            .source(vars);

        let cfg = config_rs::Config::builder()
            .add_source(environment)
            .build()
            .context("failed to read config from environment")?
            .try_deserialize::<Self>()
            .context("failed to deserialize config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::EnvConfig;
    use crate::config::AppConfig;

    fn vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn nested_keys_override_defaults() {
        let cfg = AppConfig::from_source(vars(&[
            ("APP_GENERAL__PORT", "8088"),
            ("APP_DATABASE__URL", "postgres://localhost/shopping"),
            ("APP_DATABASE__MAX_CONNECTIONS", "4"),
        ]))
        .expect("config should load");

        assert_eq!(cfg.general.port, 8088);
        assert_eq!(cfg.general.host, "127.0.0.1");
        assert_eq!(cfg.database.url, "postgres://localhost/shopping");
        assert_eq!(cfg.database.max_connections, 4);
        assert_eq!(cfg.database.min_idle, 2);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = AppConfig::from_source(vars(&[
            ("APP_DATABASE__MAX_CONNECTIONS", "1"),
            ("APP_DATABASE__MIN_IDLE", "3"),
        ]))
        .expect_err("min_idle above max_connections should fail");

        assert!(err.to_string().contains("database.min_idle (3)"));
    }
}
