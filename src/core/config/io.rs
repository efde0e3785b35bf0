use crate::core::config::data::{path_display, Config};
use directories::ProjectDirs;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Name of the configuration file, both in the working directory and in the
/// platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while locating, loading or creating configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No platform configuration directory could be determined.
    NoConfigDir,

    /// Failed to read the configuration file from disk.
    Read {
        /// Path to the configuration file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or lacks a required key.
    Parse {
        /// Path to the offending configuration file.
        path: PathBuf,
        /// The TOML deserialization error.
        source: toml::de::Error,
    },

    /// Failed to write the default configuration file.
    Write {
        path: PathBuf,
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ConfigError {
    fn display_path(path: &Path) -> String {
        path_display(path)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => {
                write!(f, "Could not determine a configuration directory")
            }
            ConfigError::Read { path, source } => {
                write!(
                    f,
                    "Failed to read config at {}: {}",
                    Self::display_path(path),
                    source
                )
            }
            ConfigError::Parse { path, source } => {
                write!(
                    f,
                    "Failed to parse config at {}: {}",
                    Self::display_path(path),
                    source
                )
            }
            ConfigError::Write { path, source } => {
                write!(
                    f,
                    "Failed to write default config at {}: {}",
                    Self::display_path(path),
                    source
                )
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Write { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Where the configuration will be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// A file that already exists.
    Existing(PathBuf),
    /// Nothing exists yet; a default file should be created here.
    Create(PathBuf),
}

impl ConfigLocation {
    pub fn path(&self) -> &Path {
        match self {
            ConfigLocation::Existing(path) | ConfigLocation::Create(path) => path,
        }
    }
}

impl Config {
    /// Locate, and if necessary create, the configuration file, then load it.
    pub fn load() -> Result<Config, ConfigError> {
        let working_dir = std::env::current_dir().ok();
        let location = Self::locate(working_dir.as_deref(), Self::platform_config_path())?;
        Self::load_from_location(&location)
    }

    /// A `config.toml` in the working directory wins; otherwise the platform
    /// config directory is used, whether or not the file exists there yet.
    pub fn locate(
        working_dir: Option<&Path>,
        platform_path: Option<PathBuf>,
    ) -> Result<ConfigLocation, ConfigError> {
        if let Some(local) = working_dir.map(|dir| dir.join(CONFIG_FILE_NAME)) {
            if local.is_file() {
                return Ok(ConfigLocation::Existing(local));
            }
        }

        let platform = platform_path.ok_or(ConfigError::NoConfigDir)?;
        if platform.is_file() {
            Ok(ConfigLocation::Existing(platform))
        } else {
            Ok(ConfigLocation::Create(platform))
        }
    }

    pub fn load_from_location(location: &ConfigLocation) -> Result<Config, ConfigError> {
        if let ConfigLocation::Create(path) = location {
            Config::default()
                .save_to_path(path)
                .map_err(|source| ConfigError::Write {
                    path: path.clone(),
                    source,
                })?;
            info!(path = %path_display(path), "created default configuration");
        }
        Self::load_from_path(location.path())
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })?;
        debug!(path = %path_display(config_path), endpoint = %config.api_endpoint, "loaded configuration");
        Ok(config)
    }

    pub(crate) fn save_to_path(
        &self,
        config_path: &Path,
    ) -> Result<(), Box<dyn StdError + Send + Sync>> {
        let parent = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file
            .persist(config_path)
            .map_err(|err| -> Box<dyn StdError + Send + Sync> { Box::new(err) })?;
        Ok(())
    }

    pub(crate) fn platform_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "glitchat", "glitchat")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
