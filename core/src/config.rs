//! Configuration management (kub.toml)
//!
//! Handles loading, saving, and providing defaults for editor settings.
//! Settings are stored in TOML format in the platform-specific config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "kub.toml";

/// Error type for configuration files
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// Editor configuration.
///
/// Contains all user-configurable settings organized into sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct KubConfig {
    /// Persisted data document settings
    #[serde(default)]
    pub data: DataConfig,
    /// Texture lookup settings
    #[serde(default)]
    pub textures: TextureConfig,
    /// Debug inspector settings
    #[serde(default)]
    pub inspector: InspectorConfig,
}

/// Where the persistence tree lives and how it is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Data document path (default: data.json)
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
    /// Indent the written document (default: true)
    #[serde(default = "default_true")]
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TextureConfig {
    /// Directory texture paths are checked against (default: none, accept all)
    #[serde(default)]
    pub asset_root: Option<PathBuf>,
}

/// Slider bounds for a range control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl RangeConfig {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }
}

/// Debug inspector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Show the inspector on startup (default: false)
    #[serde(default)]
    pub visible: bool,
    /// Toggle inspector panel (default: F3)
    #[serde(default = "default_panel_toggle")]
    pub panel_toggle: String,
    /// Bounds for fractional controls (default: -1..1, step 0.05)
    #[serde(default = "default_float_range")]
    pub float_range: RangeConfig,
    /// Bounds for integer controls (default: -3..3, step 1)
    #[serde(default = "default_int_range")]
    pub int_range: RangeConfig,
}

fn default_save_path() -> PathBuf {
    PathBuf::from("data.json")
}
fn default_panel_toggle() -> String {
    "F3".to_string()
}
fn default_float_range() -> RangeConfig {
    RangeConfig::new(-1.0, 1.0, 0.05)
}
fn default_int_range() -> RangeConfig {
    RangeConfig::new(-3.0, 3.0, 1.0)
}
fn default_true() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            pretty: default_true(),
        }
    }
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            visible: false,
            panel_toggle: default_panel_toggle(),
            float_range: default_float_range(),
            int_range: default_int_range(),
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Kub\config`
/// On macOS: `~/Library/Application Support/io.kub.Kub`
/// On Linux: `~/.config/kub`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.kub", "", "Kub").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of `kub.toml` in the platform config directory
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from the platform config directory.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> KubConfig {
    let Some(path) = config_path() else {
        return KubConfig::default();
    };
    match load_from(&path) {
        Ok(config) => config,
        Err(ConfigError::Io { .. }) => KubConfig::default(),
        Err(e) => {
            tracing::warn!("Ignoring {}: {}", path.display(), e);
            KubConfig::default()
        }
    }
}

/// Saves the configuration to the platform config directory.
///
/// Returns the path written.
pub fn save(config: &KubConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    save_to(&path, config)?;
    Ok(path)
}

/// Render a configuration as it is stored
pub fn to_toml(config: &KubConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Reads a configuration file.
pub fn load_from(path: &Path) -> Result<KubConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Writes a configuration file.
pub fn save_to(path: &Path, config: &KubConfig) -> Result<(), ConfigError> {
    let content = to_toml(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a key string to a key name for comparison.
///
/// Returns the uppercase key name if valid, or None if not recognized.
pub fn parse_key_name(s: &str) -> Option<&'static str> {
    match s.to_uppercase().as_str() {
        "F1" => Some("F1"),
        "F2" => Some("F2"),
        "F3" => Some("F3"),
        "F4" => Some("F4"),
        "F5" => Some("F5"),
        "F6" => Some("F6"),
        "F7" => Some("F7"),
        "F8" => Some("F8"),
        "F9" => Some("F9"),
        "F10" => Some("F10"),
        "F11" => Some("F11"),
        "F12" => Some("F12"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = KubConfig::default();
        assert_eq!(config.data.save_path, PathBuf::from("data.json"));
        assert!(config.data.pretty);
        assert_eq!(config.textures.asset_root, None);
        assert_eq!(config.inspector.int_range, RangeConfig::new(-3.0, 3.0, 1.0));
        assert_eq!(config.inspector.float_range, RangeConfig::new(-1.0, 1.0, 0.05));
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: KubConfig = toml::from_str("").unwrap();
        assert_eq!(config, KubConfig::default());
    }

    #[test]
    fn test_config_deserialize_partial_inspector() {
        let toml_str = r#"
[inspector]
visible = true

[inspector.int_range]
min = 0.0
max = 16.0
step = 2.0
"#;
        let config: KubConfig = toml::from_str(toml_str).unwrap();
        assert!(config.inspector.visible);
        assert_eq!(config.inspector.panel_toggle, "F3");
        assert_eq!(config.inspector.int_range, RangeConfig::new(0.0, 16.0, 2.0));
        assert_eq!(config.inspector.float_range, default_float_range());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = KubConfig {
            data: DataConfig {
                save_path: PathBuf::from("scenes/fog.json"),
                pretty: false,
            },
            textures: TextureConfig {
                asset_root: Some(PathBuf::from("public")),
            },
            inspector: InspectorConfig::default(),
        };

        save_to(&path, &config).unwrap();
        assert_eq!(load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(load_from(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[data\nsave_path = 3").unwrap();
        assert!(matches!(load_from(&broken), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_to_toml_reads_back() {
        let mut config = KubConfig::default();
        config.inspector.panel_toggle = "F9".to_string();
        let text = to_toml(&config).unwrap();
        assert!(text.contains("panel_toggle = \"F9\""));
        assert_eq!(toml::from_str::<KubConfig>(&text).unwrap(), config);
    }

    #[test]
    fn test_parse_key_name() {
        assert_eq!(parse_key_name("f3"), Some("F3"));
        assert_eq!(parse_key_name("space"), None);
    }
}
