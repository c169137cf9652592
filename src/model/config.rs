use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Endpoint the dashboard imports recommended links from
pub const DEFAULT_REMOTE_ENDPOINT: &str = "https://test1.250221.xyz/";

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted documents (default: XDG data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            enabled: true,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_REMOTE_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Built-in colour presets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    Midnight,
}

impl ThemeName {
    /// Next preset in the cycle dark → light → midnight → dark
    pub fn next(self) -> ThemeName {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Midnight,
            ThemeName::Midnight => ThemeName::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
            ThemeName::Midnight => "midnight",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeName,
    /// Initial state of the add form's auto-https toggle
    #[serde(default)]
    pub auto_https: bool,
    /// Hex colour overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Program used to open links (default: the platform opener)
    #[serde(default)]
    pub opener: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.storage.data_dir.is_none());
        assert!(config.remote.enabled);
        assert_eq!(config.remote.endpoint, DEFAULT_REMOTE_ENDPOINT);
        assert_eq!(config.remote.timeout_secs, 10);
        assert_eq!(config.ui.theme, ThemeName::Dark);
        assert!(!config.ui.auto_https);
        assert!(config.ui.opener.is_none());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let config: Config = toml::from_str(
            r##"
[remote]
enabled = false

[ui]
theme = "midnight"
auto_https = true

[ui.colors]
highlight = "#FF0000"
"##,
        )
        .unwrap();
        assert!(!config.remote.enabled);
        assert_eq!(config.remote.endpoint, DEFAULT_REMOTE_ENDPOINT);
        assert_eq!(config.ui.theme, ThemeName::Midnight);
        assert!(config.ui.auto_https);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#FF0000");
    }

    #[test]
    fn theme_cycle_wraps() {
        assert_eq!(ThemeName::Dark.next(), ThemeName::Light);
        assert_eq!(ThemeName::Light.next(), ThemeName::Midnight);
        assert_eq!(ThemeName::Midnight.next(), ThemeName::Dark);
    }
}
