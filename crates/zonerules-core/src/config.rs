use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Root of the encoded zone data, one sub-directory per data version.
    pub directory: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub zone: Option<String>,
    pub from_year: i32,
    pub to_year: i32,
}

impl ReportConfig {
    /// ## Summary
    /// Checks that the report window is not inverted.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if `from_year` is after `to_year`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.from_year > self.to_year {
            return Err(CoreError::InvalidConfiguration(format!(
                "report.from_year {} is after report.to_year {}",
                self.from_year, self.to_year
            )));
        }
        Ok(())
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `config.toml` into a `Settings`.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("data.directory", "zonedata")?
            .set_default("logging.level", "info")?
            .set_default("report.from_year", 2020)?
            .set_default("report.to_year", 2030)?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.report.validate()?;
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
