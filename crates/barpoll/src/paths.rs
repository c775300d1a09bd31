use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Location of the barpoll configuration file.
#[derive(Debug, Clone)]
pub struct BarpollPaths {
    config_file: PathBuf,
    /// Whether the file was asked for explicitly, in which case it has to exist.
    explicit: bool,
}

impl BarpollPaths {
    pub fn from_config_file<P: AsRef<Path>>(config_file: P) -> Result<Self> {
        let config_file = config_file.as_ref();
        if config_file.is_dir() {
            bail!("Please provide the path to the config file, not the directory containing it")
        }
        if !config_file.exists() {
            bail!("Configuration file {} does not exist", config_file.display());
        }
        Ok(BarpollPaths { config_file: config_file.canonicalize()?, explicit: true })
    }

    pub fn default() -> Result<Self> {
        let config_dir = match std::env::var("XDG_CONFIG_HOME") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => PathBuf::from(std::env::var("HOME").context("Neither XDG_CONFIG_HOME nor HOME is set")?).join(".config"),
        };
        Ok(BarpollPaths { config_file: config_dir.join("barpoll").join("config.json"), explicit: false })
    }

    pub fn get_config_file(&self) -> &Path {
        self.config_file.as_path()
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit
    }
}

impl std::fmt::Display for BarpollPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config-file: {}", self.config_file.display())
    }
}
