use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the temp file. None = per-user cache dir.
    pub temp_dir: Option<PathBuf>,
    /// Name of the temp file inside `temp_dir`.
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How often the UI checks for a finished operation, in milliseconds
    pub tick_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// tracing filter directive; RUST_LOG takes precedence
    pub level: String,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            temp_dir:  None,
            file_name: "diskfill.tmp".into(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_ms: 150 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

// ── Load ─────────────────────────────────────────────────────────────

impl Config {
    /// Load the user config, falling back to defaults when it is missing or
    /// unreadable. Nothing is ever written back.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| Self::load_from(&p).ok())
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&text)?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("diskfill").join("diskfill.toml"))
    }

    /// Directory for the temp file: explicit override, then config, then the
    /// per-user cache dir, then the system temp dir.
    pub fn temp_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        if let Some(dir) = &self.general.temp_dir {
            return dir.clone();
        }
        dirs::cache_dir()
            .map(|p| p.join("diskfill"))
            .unwrap_or_else(|| std::env::temp_dir().join("diskfill"))
    }

    pub fn tick_ms(&self) -> u64 {
        self.ui.tick_ms.max(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.general.file_name, "diskfill.tmp");
        assert_eq!(cfg.general.temp_dir, None);
        assert_eq!(cfg.ui.tick_ms, 150);
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("diskfill.toml");
        fs::write(&path, "[general]\ntemp_dir = \"/var/tmp/fill\"\n\n[ui]\ntick_ms = 10\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.general.temp_dir, Some(PathBuf::from("/var/tmp/fill")));
        assert_eq!(cfg.general.file_name, "diskfill.tmp");
        assert_eq!(cfg.tick_ms(), 50);
        assert_eq!(cfg.log, LogConfig::default());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("diskfill.toml");
        fs::write(&path, "[general\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn temp_dir_precedence() {
        let mut cfg = Config::default();
        let cli = PathBuf::from("/from/cli");
        cfg.general.temp_dir = Some(PathBuf::from("/from/config"));

        assert_eq!(cfg.temp_dir(Some(&cli)), cli);
        assert_eq!(cfg.temp_dir(None), PathBuf::from("/from/config"));

        cfg.general.temp_dir = None;
        assert!(cfg.temp_dir(None).ends_with("diskfill"));
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), cfg);
    }
}
