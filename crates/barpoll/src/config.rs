use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use status_render::{RendererSettings, DEFAULT_ICON, MAX_CHAR, PROGRESS_BAR_WIDTH};

use crate::{opts::PlayerArgs, paths::BarpollPaths};

/// Settings read from `config.json`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// playerctl name of the player to follow, i.e. `spotify`. Without it, whatever playerctl picks is shown.
    pub player: Option<String>,
    pub label: Option<String>,
    #[default(DEFAULT_ICON.to_string())]
    pub icon: String,
    #[default(MAX_CHAR)]
    pub max_chars: usize,
    #[default(PROGRESS_BAR_WIDTH)]
    pub bar_width: usize,
    #[default(200)]
    pub scroll_interval_ms: u64,
    #[default(1000)]
    pub idle_interval_ms: u64,
    #[default(2000)]
    pub command_timeout_ms: u64,
}

impl Config {
    /// Read the config file. A missing file is only acceptable if it was not asked for explicitly.
    pub fn read(paths: &BarpollPaths) -> Result<Self> {
        let path = paths.get_config_file();
        if !paths.is_explicit() && !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Command-line flags take precedence over the file.
    pub fn apply_overrides(&mut self, args: &PlayerArgs) {
        if let Some(player) = &args.player {
            self.player = Some(player.clone());
        }
        if let Some(label) = &args.label {
            self.label = Some(label.clone());
        }
        if let Some(icon) = &args.icon {
            self.icon = icon.clone();
        }
        if let Some(max_chars) = args.max_chars {
            self.max_chars = max_chars;
        }
        if let Some(interval) = args.scroll_interval_ms {
            self.scroll_interval_ms = interval;
        }
    }

    pub fn renderer_settings(&self) -> RendererSettings {
        RendererSettings {
            max_chars: self.max_chars,
            bar_width: self.bar_width,
            icon: self.icon.clone(),
            player: self.player.clone(),
            label: self.label.clone(),
        }
    }

    pub fn scroll_interval(&self) -> Duration {
        Duration::from_millis(self.scroll_interval_ms)
    }

    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
        assert_eq!(Config::default().max_chars, 12);
        assert_eq!(Config::default().scroll_interval(), Duration::from_millis(200));
        assert_eq!(Config::default().idle_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse(r#"{ "player": "spotify", "max_chars": 20 }"#).unwrap();
        assert_eq!(config.player.as_deref(), Some("spotify"));
        assert_eq!(config.max_chars, 20);
        assert_eq!(config.bar_width, PROGRESS_BAR_WIDTH);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(Config::parse(r#"{ "max_char": 20 }"#).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::parse(r#"{ "player": "spotify", "label": "Spotify" }"#).unwrap();
        config.apply_overrides(&PlayerArgs { player: Some("mpv".to_string()), max_chars: Some(8), ..PlayerArgs::default() });
        assert_eq!(config.player.as_deref(), Some("mpv"));
        assert_eq!(config.label.as_deref(), Some("Spotify"));
        assert_eq!(config.renderer_settings().max_chars, 8);
    }

    #[test]
    fn test_read_explicit_file() {
        let file = std::env::temp_dir().join(format!("barpoll-test-config-{}.json", std::process::id()));
        std::fs::write(&file, r#"{ "player": "ncspot", "idle_interval_ms": 500 }"#).unwrap();
        let config = Config::read(&BarpollPaths::from_config_file(&file).unwrap());
        std::fs::remove_file(&file).unwrap();

        let config = config.unwrap();
        assert_eq!(config.player.as_deref(), Some("ncspot"));
        assert_eq!(config.idle_interval(), Duration::from_millis(500));
    }
}
