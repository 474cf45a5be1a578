//! User-configurable settings stored in ~/.config/escape-dialog/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub texts: TextsConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextsConfig {
    /// Stay-button label while the evade button hides underneath it
    pub hint: String,
    /// Follow-up label shown after `taunt_delay_ms`
    pub taunt: String,
}

impl Default for TextsConfig {
    fn default() -> Self {
        Self {
            hint: "It's under me".to_string(),
            taunt: "Can't click me".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Spacing between buttons and around the dialog edges, in pixels
    pub margin: i32,
    /// A swap needs a 1 to come up on a die with this many faces
    pub swap_odds: i32,
    /// Evasions that must happen before swapping becomes possible
    pub calm_evasions: u32,
    /// Evasions required between two swaps
    pub swap_cooldown: u32,
    /// Last evasion count that still uses the confined one-step motion
    pub confined_evasions: u32,
    pub hide_period: u32,
    /// Count (modulo `hide_period`) at which the button hides under the stay button
    pub hide_phase: u32,
    pub taunt_delay_ms: u64,
    pub restore_delay_ms: u64,
    pub rehide_min_ms: i32,
    pub rehide_max_ms: i32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            margin: 10,
            swap_odds: 20,
            calm_evasions: 10,
            swap_cooldown: 5,
            confined_evasions: 3,
            hide_period: 100,
            hide_phase: 50,
            taunt_delay_ms: 3000,
            restore_delay_ms: 6000,
            rehide_min_ms: 6000,
            rehide_max_ms: 12000,
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("escape-dialog")
        .join("config.toml")
}

impl Config {
    /// Load config from the default location.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, returning defaults for any missing keys or
    /// if the file does not exist.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read config {} ({e}), using defaults", path.display());
                return Self::default();
            }
        };

        Self::parse(&content).unwrap_or_else(|e| {
            log::warn!("Config parse error in {} ({e}), using defaults", path.display());
            Self::default()
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Write these settings to `path` as an editable starting point.
    /// An existing file is left untouched.
    pub fn write_template(&self, path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::Exists(path.to_path_buf()));
        }
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(ConfigError::Io)?;
        }

        let body = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        let content = format!("{TEMPLATE_HEADER}\n{body}");

        // Stage next to the target so a crash never leaves half a file.
        let staged = path.with_extension("toml.part");
        std::fs::write(&staged, content).map_err(ConfigError::Io)?;
        std::fs::rename(&staged, path).map_err(ConfigError::Io)
    }
}

const TEMPLATE_HEADER: &str = "# escape-dialog settings. Delete a key to fall back to its default.";

#[derive(Debug)]
pub enum ConfigError {
    Exists(PathBuf),
    Io(std::io::Error),
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exists(path) => write!(f, "{} already exists", path.display()),
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Serialize(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            [texts]
            taunt = "Nope"

            [behavior]
            margin = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.texts.taunt, "Nope");
        assert_eq!(config.texts.hint, "It's under me");
        assert_eq!(config.behavior.margin, 6);
        assert_eq!(config.behavior.swap_odds, 20);
        assert_eq!(config.behavior.hide_phase, 50);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir()
            .join("escape-dialog-tests")
            .join("does-not-exist.toml");
        let config = Config::load_from(&path);
        assert_eq!(config.behavior.margin, 10);
        assert_eq!(config.behavior.rehide_max_ms, 12000);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = std::env::temp_dir().join(format!("escape-dialog-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[behavior\nmargin = ").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.behavior.margin, 10);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn template_loads_back_and_is_not_overwritten() {
        let dir = std::env::temp_dir().join(format!("escape-dialog-template-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.toml");

        let mut config = Config::default();
        config.behavior.swap_odds = 3;
        config.texts.hint = "Down here".to_string();
        config.write_template(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# escape-dialog settings"));
        let loaded = Config::load_from(&path);
        assert_eq!(loaded.behavior.swap_odds, 3);
        assert_eq!(loaded.texts.hint, "Down here");
        assert!(!path.with_extension("toml.part").exists());

        let again = Config::default().write_template(&path);
        assert!(matches!(again, Err(ConfigError::Exists(_))));
        assert_eq!(Config::load_from(&path).behavior.swap_odds, 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
