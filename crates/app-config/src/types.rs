// In crates/app-config/src/types.rs

use core_types::Symbol;
use risk::types::RiskSettings;
use serde::Deserialize;
use std::path::PathBuf;
use strategies::types::{StrategySettings, TurtleWindows};

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub server: ServerSettings,
    /// Where the portfolio ledger is persisted.
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub market_data: MarketDataSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub portfolio: PortfolioSettings,
    #[serde(default)]
    pub risk: RiskSettings,
    #[serde(default)]
    pub strategies: StrategySettings,
    #[serde(default = "default_instruments")]
    pub instruments: Vec<InstrumentConfig>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    File,
    Memory,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// The connection URL for the PostgreSQL database. Usually supplied as
    /// `APP_STORAGE__URL` rather than written to a file.
    pub url: Option<String>,
    /// Ledger file for the `file` backend.
    pub path: PathBuf,
    pub collection: String,
    pub document: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: None,
            path: PathBuf::from("data/portfolio_state.json"),
            collection: "trading_bot".to_string(),
            document: "portfolio_state".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MarketDataSettings {
    /// Base URL of the chart API; the symbol is appended as a path segment.
    pub base_url: String,
    pub timeout_secs: u64,
    /// Calendar days of daily history requested per instrument.
    pub history_lookback_days: u32,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            timeout_secs: 10,
            history_lookback_days: 300,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NotificationSettings {
    /// Chat webhook receiving `{"content": "..."}` posts. Disabled when unset.
    pub webhook_url: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PortfolioSettings {
    /// Cash in a freshly created ledger.
    pub initial_capital: f64,
    /// Charged on both sides of every trade.
    pub commission_rate: f64,
}

impl Default for PortfolioSettings {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            commission_rate: 0.001,
        }
    }
}

/// One tradable instrument and its Turtle channel lengths.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct InstrumentConfig {
    pub symbol: String,
    pub entry_window: usize,
    pub exit_window: usize,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl InstrumentConfig {
    pub fn new(symbol: &str, entry_window: usize, exit_window: usize) -> Self {
        Self {
            symbol: symbol.to_string(),
            entry_window,
            exit_window,
            enabled: true,
        }
    }

    pub fn symbol(&self) -> Symbol {
        Symbol(self.symbol.clone())
    }

    pub fn windows(&self) -> TurtleWindows {
        TurtleWindows {
            entry_window: self.entry_window,
            exit_window: self.exit_window,
        }
    }
}

/// Helper functions for serde defaults
fn default_enabled() -> bool {
    true
}

pub fn default_instruments() -> Vec<InstrumentConfig> {
    vec![
        InstrumentConfig::new("WDC", 50, 20),
        InstrumentConfig::new("STX", 65, 35),
        InstrumentConfig::new("HOOD", 20, 10),
        InstrumentConfig::new("CAH", 40, 30),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            market_data: MarketDataSettings::default(),
            notifications: NotificationSettings::default(),
            portfolio: PortfolioSettings::default(),
            risk: RiskSettings::default(),
            strategies: StrategySettings::default(),
            instruments: default_instruments(),
        }
    }
}

impl Settings {
    /// Default settings trading only `instruments`.
    pub fn with_instruments(instruments: Vec<InstrumentConfig>) -> Self {
        Self {
            instruments,
            ..Default::default()
        }
    }

    /// The instruments that take part in a cycle, in configuration order.
    pub fn active_instruments(&self) -> impl Iterator<Item = &InstrumentConfig> {
        self.instruments.iter().filter(|instrument| instrument.enabled)
    }
}
