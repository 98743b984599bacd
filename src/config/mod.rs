//! Configuration management for the Gazette TUI.
//!
//! Configuration is read from `~/.config/gazette/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod keybindings;

pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use url::Url;

use crate::domain::Source;

/// Horizontal placement of the article pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URLs of the news indexes to read, in display order.
    pub sites: Vec<String>,
    /// Article pane width as a percentage of the terminal width.
    pub width: u16,
    pub align: Align,
    pub keybindings: KeybindingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sites: vec!["https://text.npr.org".to_string()],
            width: 40,
            align: Align::Center,
            keybindings: KeybindingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Parse the configured site URLs into [`Source`]s.
    ///
    /// An empty site list or an unparseable URL is a fatal configuration
    /// error, surfaced before the main loop starts.
    pub fn sources(&self) -> Result<Vec<Source>, ConfigError> {
        if self.sites.is_empty() {
            return Err(ConfigError::NoSites);
        }
        self.sites
            .iter()
            .map(|site| {
                Url::parse(site)
                    .map(Source::new)
                    .map_err(|e| ConfigError::InvalidSite {
                        url: site.clone(),
                        source: e,
                    })
            })
            .collect()
    }

    /// Get the default config file path: `~/.config/gazette/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gazette").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Gazette Configuration
#
# Sites must publish a plain-HTML article index (a single list of links)
# and article pages in the text.npr.org paragraph layout.
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"
#
# Digit keys 1-9 and 0 always jump to rows 1-10 and are not remappable.

# News indexes to read, in display order.
sites = ["https://text.npr.org"]

# Article pane width as a percentage of the terminal width (min 70 columns).
width = 40

# Article pane placement: "left", "center", or "right".
align = "center"

[keybindings]
# Navigation
quit = ["q", "Q", "Ctrl+c"]
back = ["b", "Esc"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
page_up = ["Ctrl+b", "PageUp"]
page_down = ["Ctrl+f", "PageDown"]

# Actions
select = ["Enter"]
refresh = ["r"]
open_in_browser = ["o"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("No sites configured")]
    NoSites,

    #[error("Invalid site URL {url}: {source}")]
    InvalidSite {
        url: String,
        source: url::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.sites, vec!["https://text.npr.org"]);
        assert_eq!(config.width, 40);
        assert_eq!(config.align, Align::Center);
        assert_eq!(config.keybindings.quit, vec!["q", "Q", "Ctrl+c"]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
width = 55
align = "left"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.width, 55);
        assert_eq!(config.align, Align::Left);
        // Default values fill the rest.
        assert_eq!(config.sites, vec!["https://text.npr.org"]);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.align, Align::Center);
        assert_eq!(config.width, 40);
    }

    #[test]
    fn test_sources_parse() {
        let config = Config::default();
        let sources = config.sources().unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "text.npr.org");
    }

    #[test]
    fn test_invalid_site_is_an_error() {
        let config = Config {
            sites: vec!["not a url".into()],
            ..Config::default()
        };
        assert!(matches!(
            config.sources(),
            Err(ConfigError::InvalidSite { .. })
        ));
    }

    #[test]
    fn test_empty_sites_is_an_error() {
        let config = Config {
            sites: vec![],
            ..Config::default()
        };
        assert!(matches!(config.sources(), Err(ConfigError::NoSites)));
    }
}
