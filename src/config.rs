//! Run settings, layered as built-in defaults, then an optional TOML file,
//! then `PA_WASTE_*` environment variables, then command-line overrides.

use crate::error::{ProcessingError, Result};
use crate::readers::resolve_encoding;
use crate::utils::constants::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_SUBTITLE, DEFAULT_CHART_WIDTH, DEFAULT_CONFIG_FILE,
    DEFAULT_ENCODING, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_DIR, ENV_PREFIX,
};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_path: PathBuf,
    /// WHATWG label for the source text encoding
    pub encoding: String,
    pub use_mmap: bool,
    pub output_dir: PathBuf,
    /// Appended to chart titles, e.g. "Liquid Waste Disposal Methods - PA 2018"
    pub chart_subtitle: String,
    pub chart_width: u32,
    pub chart_height: u32,
    pub max_workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            encoding: DEFAULT_ENCODING.to_string(),
            use_mmap: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chart_subtitle: DEFAULT_CHART_SUBTITLE.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
            max_workers: num_cpus::get(),
        }
    }
}

impl Settings {
    /// Load settings from an explicit file, or from `pa-waste.toml` in the
    /// working directory when it exists
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        let file = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ProcessingError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => Some(default_path).filter(|p| p.exists()),
        };

        match &file {
            Some(path) => info!("Using config file: {}", path.display()),
            None => debug!("No config file found, using defaults and environment variables"),
        }

        Self::load_from(file.as_deref(), Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(file: Option<&Path>, environment: Environment) -> Result<Self> {
        let defaults = Config::try_from(&Settings::default())?;
        let mut builder = Config::builder().add_source(defaults);
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(ProcessingError::Config(
                "max_workers must be at least 1".to_string(),
            ));
        }
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ProcessingError::Config(format!(
                "Chart dimensions must be positive, got {}x{}",
                self.chart_width, self.chart_height
            )));
        }
        resolve_encoding(&self.encoding)
            .map_err(|e| ProcessingError::Config(e.to_string()))?;
        Ok(())
    }
}
