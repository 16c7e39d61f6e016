use anyhow::{Context, Result};
use platform_db::DatabaseSettings;
use platform_obs::ObsConfig;

const DEFAULT_TITLE: &str = "Employee Directory";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub database: DatabaseSettings,
    pub obs: ObsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let database = DatabaseSettings::from_env().context("invalid database configuration")?;
        let title = std::env::var("APP_TITLE")
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.into());

        Ok(Self {
            title,
            database,
            obs: ObsConfig::from_env(),
        })
    }
}
