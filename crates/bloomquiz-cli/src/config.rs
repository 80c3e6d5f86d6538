//! Console configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level bloomquiz configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BloomquizConfig {
    /// Upper bound accepted for a question's estimated minutes.
    #[serde(default = "default_max_minutes")]
    pub max_minutes: u32,
    /// Upper bound accepted for a question's year.
    #[serde(default = "default_max_year")]
    pub max_year: u32,
    /// Characters of question text shown in listings before "...".
    #[serde(default = "default_summary_width")]
    pub summary_width: usize,
    /// Clear the terminal before each screen.
    #[serde(default = "default_true")]
    pub clear_screen: bool,
    /// Wait for Enter after each screen.
    #[serde(default = "default_true")]
    pub pause_after_action: bool,
}

fn default_max_minutes() -> u32 {
    60
}
fn default_max_year() -> u32 {
    2100
}
fn default_summary_width() -> usize {
    50
}
fn default_true() -> bool {
    true
}

impl Default for BloomquizConfig {
    fn default() -> Self {
        Self {
            max_minutes: default_max_minutes(),
            max_year: default_max_year(),
            summary_width: default_summary_width(),
            clear_screen: true,
            pause_after_action: true,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `path`, which must exist when given
/// 2. `bloomquiz.toml` in the current directory
/// 3. `~/.config/bloomquiz/config.toml`
///
/// Environment variable overrides: `BLOOMQUIZ_CLEAR_SCREEN`, `BLOOMQUIZ_PAUSE`.
pub fn load_config_from(path: Option<&Path>) -> Result<BloomquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("bloomquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(&path)?
        }
        None => BloomquizConfig::default(),
    };

    if let Some(flag) = env_flag("BLOOMQUIZ_CLEAR_SCREEN") {
        config.clear_screen = flag;
    }
    if let Some(flag) = env_flag("BLOOMQUIZ_PAUSE") {
        config.pause_after_action = flag;
    }

    validate_config(&config)?;
    Ok(config)
}

fn parse_config(path: &Path) -> Result<BloomquizConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<BloomquizConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn validate_config(config: &BloomquizConfig) -> Result<()> {
    anyhow::ensure!(config.max_minutes >= 1, "max_minutes must be at least 1");
    anyhow::ensure!(config.summary_width >= 1, "summary_width must be at least 1");
    Ok(())
}

/// Interpret an on/off environment variable. Unset or unrecognised values are ignored.
fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    parse_flag(&value)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("bloomquiz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BloomquizConfig::default();
        assert_eq!(config.max_minutes, 60);
        assert_eq!(config.max_year, 2100);
        assert_eq!(config.summary_width, 50);
        assert!(config.clear_screen);
        assert!(config.pause_after_action);
    }

    #[test]
    fn parse_partial_config() {
        let config: BloomquizConfig = toml::from_str("max_minutes = 90\nclear_screen = false\n").unwrap();
        assert_eq!(config.max_minutes, 90);
        assert!(!config.clear_screen);
        assert_eq!(config.max_year, 2100);
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "summary_width = 20\n").unwrap();

        let config = load_config_from(Some(path.as_path())).unwrap();
        assert_eq!(config.summary_width, 20);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/bloomquiz.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "max_minutes = 0\n").unwrap();
        assert!(load_config_from(Some(path.as_path())).is_err());

        std::fs::write(&path, "max_minutes = \"lots\"\n").unwrap();
        let err = load_config_from(Some(path.as_path())).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn flag_values() {
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}
