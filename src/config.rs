use crate::error::{ReleaseError, Result};
use crate::version_file::{DEFAULT_VERSION_CONSTANT, DEFAULT_VERSION_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the repository root
pub const CONFIG_FILE_NAME: &str = "releasetag.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE_NAME: &str = ".releasetag.toml";

/// Represents the complete configuration for release-tag.
///
/// Every section is optional; a missing file yields the defaults. Unknown
/// keys are rejected so a misspelled setting is not silently ignored.
///
/// Pushing is never configured here: a release is only pushed when `--push`
/// names a remote.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub version_file: VersionFileConfig,
}

fn default_version_file_path() -> PathBuf {
    PathBuf::from(DEFAULT_VERSION_FILE)
}

fn default_version_constant() -> String {
    DEFAULT_VERSION_CONSTANT.to_string()
}

/// Location of the version file and the constant it assigns.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VersionFileConfig {
    /// Repository-relative path
    #[serde(default = "default_version_file_path")]
    pub path: PathBuf,

    #[serde(default = "default_version_constant")]
    pub constant: String,
}

impl Default for VersionFileConfig {
    fn default() -> Self {
        VersionFileConfig {
            path: default_version_file_path(),
            constant: default_version_constant(),
        }
    }
}

impl Config {
    /// Rejects settings that would let the rewrite escape the repository.
    pub fn validate(&self) -> Result<()> {
        let path = &self.version_file.path;
        if path.as_os_str().is_empty() || path.is_absolute() {
            return Err(ReleaseError::config(format!(
                "version_file.path must be a relative path, got '{}'",
                path.display()
            )));
        }
        if path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(ReleaseError::config(format!(
                "version_file.path must stay inside the repository, got '{}'",
                path.display()
            )));
        }
        if self.version_file.constant.trim().is_empty() {
            return Err(ReleaseError::config("version_file.constant must not be empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasetag.toml` in the repository root
/// 3. `.releasetag.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_root` - Working tree root of the repository being released
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&Path>, repo_root: &Path) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if repo_root.join(CONFIG_FILE_NAME).exists() {
        repo_root.join(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE_NAME);
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("Invalid {}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}
