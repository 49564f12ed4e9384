// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::collections::HashSet;
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{InstrumentConfig, Settings, StorageBackend};

/// Loads the application settings from a configuration directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `production.toml`).
/// 3. Merges settings from environment variables (e.g., `APP_STORAGE__URL=...`).
pub fn load_settings_from(dir: &Path) -> Result<Settings> {
    load_layers(dir, environment_overrides())
}

/// `APP_` prefix, `__` between nested keys: `APP_STORAGE__URL` -> `storage.url`.
fn environment_overrides() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
}

fn load_layers(dir: &Path, overrides: Environment) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::from(dir.join("base")))
        .add_source(File::from(dir.join(&environment)).required(false))
        .add_source(overrides)
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}

impl Settings {
    /// Rejects settings the engine cannot run with. A missing database URL is
    /// not an error here: it disables persistence instead.
    pub fn validate(&self) -> Result<()> {
        if !(self.portfolio.initial_capital.is_finite() && self.portfolio.initial_capital > 0.0) {
            return Err(Error::Invalid(format!(
                "portfolio.initial_capital must be positive, got {}",
                self.portfolio.initial_capital
            )));
        }

        let mut seen = HashSet::new();
        for instrument in &self.instruments {
            if instrument.symbol.trim().is_empty() {
                return Err(Error::Invalid("instrument symbol must not be empty".to_string()));
            }
            if instrument.entry_window == 0 || instrument.exit_window == 0 {
                return Err(Error::Invalid(format!(
                    "{}: entry and exit windows must be at least 1",
                    instrument.symbol
                )));
            }
            if !seen.insert(instrument.symbol.as_str()) {
                return Err(Error::Invalid(format!("{} is configured twice", instrument.symbol)));
            }
        }

        let indicators = &self.strategies.indicators;
        if indicators.atr_window == 0 || indicators.adx_window == 0 {
            return Err(Error::Invalid("indicator windows must be at least 1".to_string()));
        }
        if self.strategies.mean_reversion.window < 2 {
            return Err(Error::Invalid(
                "mean_reversion.window must be at least 2 for a sample deviation".to_string(),
            ));
        }
        Ok(())
    }
}
