/*
 * Error Module
 *
 * Error types for the few operations that can fail: loading the
 * configuration, starting ambient audio and grabbing the pointer.
 * Generation and the per-frame update are infallible.
 */

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while loading or validating the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    Io(std::io::Error),
    /// The config file is not valid YAML for `StarfieldParams`.
    Parse(serde_yaml::Error),
    /// A parameter is outside its accepted range.
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config file: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid value for {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors that can occur when starting ambient audio playback.
#[derive(Debug)]
pub enum AudioError {
    /// Audio was turned off in the configuration.
    Disabled,
    /// The audio file does not exist.
    MissingFile(PathBuf),
    /// No player command was configured.
    NoPlayer,
    /// The player process could not be started.
    Spawn { player: String, source: std::io::Error },
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Disabled => write!(f, "Audio playback is disabled"),
            AudioError::MissingFile(path) => {
                write!(f, "Audio file not found: {}", path.display())
            }
            AudioError::NoPlayer => write!(f, "No audio player command configured"),
            AudioError::Spawn { player, source } => {
                write!(f, "Failed to start audio player '{}': {}", player, source)
            }
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors that can occur when grabbing the pointer for look-around.
#[derive(Debug)]
pub enum PointerLockError {
    /// The windowing system refused the grab.
    Rejected(String),
}

impl fmt::Display for PointerLockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerLockError::Rejected(msg) => write!(f, "Pointer lock rejected: {}", msg),
        }
    }
}

impl std::error::Error for PointerLockError {}
