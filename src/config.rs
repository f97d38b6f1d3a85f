use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::search::SearchConfig;

/// Number of rows (and columns) in the default square grid.
pub const DEFAULT_ROWS: usize = 50;
/// Default pixel extent of the grid along each axis.
pub const DEFAULT_WIDTH: u32 = 800;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_width")]
    pub width: u32,
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}
fn default_width() -> u32 {
    DEFAULT_WIDTH
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            rows: DEFAULT_ROWS,
            width: DEFAULT_WIDTH,
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> ConfigResult<Config> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file, failing if it is missing or invalid.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Config> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::from_toml_str(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads a configuration file, or uses defaults if it cannot be read or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Config {
        match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using default configuration");
                Config::default()
            }
        }
    }

    /// Each cell needs at least one pixel, so the width may not be smaller than the row count.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.grid.rows == 0 {
            return Err(ConfigError::Invalid("rows must be positive".to_owned()));
        }
        if (self.grid.width as usize) < self.grid.rows {
            return Err(ConfigError::Invalid(format!(
                "width {} is smaller than the row count {}",
                self.grid.width, self.grid.rows
            )));
        }
        Ok(())
    }
}
