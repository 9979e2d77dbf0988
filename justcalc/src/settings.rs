//! Persisted settings and the application context built from them

use std::path::{Path, PathBuf};

use justcore::storage::{self, config_dir};
use justcore::CalcTheme;
use serde::{Deserialize, Serialize};

use crate::accumulator::Accumulator;
use crate::format::NumberFormat;

/// Settings stored in `settings.json`. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Dark window theme
    pub dark_theme: bool,
    /// Decimal places shown for fractional results (capped at 15)
    pub max_decimals: usize,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_theme: true,
            max_decimals: 10,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        config_dir("justcalc").join("settings.json")
    }

    pub fn read(path: &Path) -> storage::Result<Self> {
        storage::load_json(path)
    }

    pub fn save_to(&self, path: &Path) -> storage::Result<()> {
        storage::save_json(path, self)
    }

    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::new(self.max_decimals)
    }
}

/// Everything the window needs, built once in `main` and handed to the app.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub theme: CalcTheme,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        let theme = CalcTheme::new(settings.dark_theme);
        Self { settings, theme }
    }

    /// A fresh accumulator using the configured number format
    pub fn accumulator(&self) -> Accumulator {
        Accumulator::with_format(self.settings.number_format())
    }
}
