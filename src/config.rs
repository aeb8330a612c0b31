//! Application configuration management.
//!
//! Settings are layered with figment, later layers overriding earlier ones:
//!
//! 1. Built-in defaults (`.mp4`/`.mkv`, 64 KiB blocks, `hashmyfiles.db`)
//! 2. A TOML file: `--config <PATH>`, or `config.toml` in the platform
//!    config directory when present
//! 3. `HASHMYFILES_*` environment variables
//!
//! CLI flags are applied on top by the caller (see [`Config::with_extensions`]).
//!
//! ```toml
//! extensions = [".mp4", ".mkv", ".webm"]
//! block_size = 131072
//! store_name = "hashmyfiles.db"
//! follow_symlinks = false
//! ```

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scanner::{matches_extension, DEFAULT_BLOCK_SIZE};
use crate::store::DEFAULT_STORE_NAME;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "HASHMYFILES_";

const CONFIG_KEYS: [&str; 4] = ["extensions", "block_size", "store_name", "follow_symlinks"];

/// Errors raised while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    /// A provider produced a value of the wrong shape.
    #[error("Invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    /// The extension list is empty.
    #[error("At least one media extension must be configured")]
    NoExtensions,

    /// An extension entry is the empty string, which would match every file.
    #[error("Media extensions must not be empty strings")]
    EmptyExtension,

    /// The read block size is zero.
    #[error("Block size must be greater than zero")]
    ZeroBlockSize,

    /// The store name is empty or is not a plain file name.
    #[error("Invalid store file name '{0}': must be a plain, non-empty file name")]
    InvalidStoreName(String),

    /// The store file would itself be picked up as a media file.
    #[error("Store file name '{name}' ends with media extension '{extension}'")]
    StoreNameMatchesExtension {
        /// Configured store file name
        name: String,
        /// Extension it collides with
        extension: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File name suffixes treated as media files (case-sensitive).
    pub extensions: Vec<String>,
    /// Read block size for hashing, in bytes.
    pub block_size: usize,
    /// File name of the hash store inside the target directory.
    pub store_name: String,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec![".mp4".to_string(), ".mkv".to_string()],
            block_size: DEFAULT_BLOCK_SIZE,
            store_name: DEFAULT_STORE_NAME.to_string(),
            follow_symlinks: false,
        }
    }
}

impl Config {
    /// Load and validate the layered configuration.
    ///
    /// # Errors
    ///
    /// Fails if `config_file` is given but missing, if any layer holds a
    /// malformed value, or if the merged result does not validate.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
        }

        let config: Config = Self::figment(config_file)
            .extract()
            .map_err(Box::new)?;
        config.validate()?;

        log::debug!("Loaded configuration: {:?}", config);
        if let Some(name) = config.store_name_override() {
            log::info!(
                "Using hash store '{}' instead of '{}'",
                name,
                DEFAULT_STORE_NAME
            );
        }
        Ok(config)
    }

    /// The store file name, if a config layer changed it from the default.
    #[must_use]
    pub fn store_name_override(&self) -> Option<&str> {
        (self.store_name != DEFAULT_STORE_NAME).then_some(self.store_name.as_str())
    }

    /// Build the provider stack without extracting it.
    #[must_use]
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        let file = config_file
            .map(Path::to_path_buf)
            .or_else(|| Self::default_config_path().filter(|p| p.is_file()));
        if let Some(path) = file {
            log::debug!("Reading config file {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).only(&CONFIG_KEYS))
    }

    /// Replace the extension list.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Check the invariants the orchestrator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        if self.extensions.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyExtension);
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }

        let name = self.store_name.as_str();
        let plain = Path::new(name).file_name().is_some_and(|f| f == name);
        if name.is_empty() || !plain || name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidStoreName(self.store_name.clone()));
        }

        if matches_extension(name, &self.extensions) {
            let extension = self
                .extensions
                .iter()
                .find(|ext| name.ends_with(ext.as_str()))
                .cloned()
                .unwrap_or_default();
            return Err(ConfigError::StoreNameMatchesExtension {
                name: self.store_name.clone(),
                extension,
            });
        }

        Ok(())
    }

    /// Default platform-specific config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "hashmyfiles", "hashmyfiles")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
