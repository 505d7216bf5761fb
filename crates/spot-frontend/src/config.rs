//! Application configuration
//!
//! Read once at startup from a RON file. Every section is optional; anything
//! left out keeps the built-in demo settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use spot_core::SceneConfig;
use spot_renderer::RendererConfig;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "SPOT_CONFIG";

/// Configuration file used when [`CONFIG_ENV`] is unset
pub const DEFAULT_CONFIG_FILE: &str = "spot.ron";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Native window settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner size in logical points
    pub inner_size: [f32; 2],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Spot Light".to_string(),
            inner_size: [1280.0, 720.0],
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub scene: SceneConfig,
    pub renderer: RendererConfig,
    pub window: WindowConfig,
}

impl AppConfig {
    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `path`, falling back to defaults
    ///
    /// A missing file is not an error. An unreadable or malformed file is
    /// logged and ignored.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load from the path in `SPOT_CONFIG`, or `spot.ron` in the working directory
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_or_default(path)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(
            "(scene: (plane_size: 10.0), renderer: (camera: (fov_degrees: 60.0)))",
        );
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.scene.plane_size, 10.0);
        assert_eq!(config.scene.cube_size, SceneConfig::default().cube_size);
        assert_eq!(config.renderer.camera.fov_degrees, 60.0);
        assert_eq!(config.renderer.camera.near_plane, 0.1);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let file = write_config("(scene: (plane_size: \"wide\"))");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        assert_eq!(AppConfig::load_or_default(file.path()), AppConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ron");

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }

    #[test]
    fn test_window_section() {
        let file = write_config("(window: (title: \"Demo\", inner_size: (800.0, 600.0)))");
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.inner_size, [800.0, 600.0]);
    }
}
