use std::path::PathBuf;

use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory holding the flat-file JSON store (default: "data")
    pub data_dir: PathBuf,

    /// Directory holding uploaded letter templates (default: "templates")
    pub template_dir: PathBuf,

    /// TCP port the API server binds to (default: 3000)
    pub port: u16,

    /// First heading line printed on every generated letter
    pub agency_header: String,

    /// Second heading line (unit name) printed on every generated letter
    pub agency_unit: String,

    /// City used in the letter date line ("City, 1 January 2026")
    pub letter_city: String,

    /// Optional JSON file with an initial exchange contact list
    pub exchange_seed_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            template_dir: std::env::var("TEMPLATE_DIR")
                .unwrap_or_else(|_| "templates".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid u16"))?,
            agency_header: std::env::var("AGENCY_HEADER")
                .unwrap_or_else(|_| "FINANCIAL CRIMES ENFORCEMENT COMMAND".to_string()),
            agency_unit: std::env::var("AGENCY_UNIT")
                .unwrap_or_else(|_| "CRYPTOCURRENCY UNIT".to_string()),
            letter_city: std::env::var("LETTER_CITY").unwrap_or_else(|_| "Rome".to_string()),
            exchange_seed_file: std::env::var("EXCHANGE_SEED_FILE").ok().map(PathBuf::from),
        })
    }
}
