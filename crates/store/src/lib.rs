//! Flat-file JSON record store.
//!
//! Three files under the data directory hold the application's state:
//! `exchanges.json`, `reports.json` and `settings.json`. Every mutation
//! rewrites the owning file in full; the last write wins. There is no schema
//! versioning and no durability guarantee beyond the filesystem's.

pub mod exchanges;
pub mod reports;
pub mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;

use chainletter_common::error::AppError;
use chainletter_common::types::{Exchange, Report, Settings};

const EXCHANGES_FILE: &str = "exchanges.json";
const REPORTS_FILE: &str = "reports.json";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Default)]
struct StoreData {
    exchanges: Vec<Exchange>,
    reports: Vec<Report>,
    settings: Settings,
}

/// File-backed record store shared across request handlers.
pub struct Store {
    data_dir: PathBuf,
    inner: RwLock<StoreData>,
}

impl Store {
    /// Open the store, creating the data directory if needed and loading any
    /// existing record files. Absent files mean empty state.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;

        let data = StoreData {
            exchanges: load_file(&data_dir.join(EXCHANGES_FILE))?.unwrap_or_default(),
            reports: load_file(&data_dir.join(REPORTS_FILE))?.unwrap_or_default(),
            settings: load_file(&data_dir.join(SETTINGS_FILE))?.unwrap_or_default(),
        };

        tracing::info!(
            data_dir = %data_dir.display(),
            exchanges = data.exchanges.len(),
            reports = data.reports.len(),
            "Store opened"
        );

        Ok(Self {
            data_dir,
            inner: RwLock::new(data),
        })
    }

    fn save(&self, file: &str, value: &impl Serialize) -> Result<(), AppError> {
        let path = self.data_dir.join(file);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)?;
        Ok(())
    }
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&contents)?))
}
