//! Application configuration
//!
//! Configuration is read once at startup from several sources, lowest to highest priority:
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (optional, local overrides)
//! 3. Environment variables (`STARFIELD_SECTION__KEY`)
//!
//! Missing keys fall back to the built-in defaults, and so do `[field]` values
//! that are out of range or not finite. TOML has no null, so an optional
//! entry (a social link, the music URL) is switched off with an empty string.

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::params::FieldParams;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub field: FieldParams,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory next to the working directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            log::info!("Loading configuration from {}", default_path.display());
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            log::info!("Applying user overrides from {}", user_path.display());
            figment = figment.merge(Toml::file(&user_path));
        }

        // STARFIELD_PROFILE__NAME=Nova -> profile.name = "Nova"
        figment = figment.merge(Env::prefixed("STARFIELD_").split("__"));

        Ok(Self::sanitized(figment.extract()?))
    }

    /// Parse a single TOML document; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(Self::sanitized(Figment::from(Toml::string(source)).extract()?))
    }

    // Out-of-range field values fall back to their defaults
    fn sanitized(mut config: Self) -> Self {
        config.field.sanitize();
        config
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Starfield".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Profile card contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    #[serde(alias = "avatarUrl")]
    pub avatar_url: String,
    pub name: String,
    pub subtitle: String,
    pub socials: Socials,
    /// Background music URL; no music means no audio toggle.
    pub music: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            avatar_url: "https://images.unsplash.com/photo-1521572267360-ee0c2909d518?auto=format&fit=crop&w=300&q=80"
                .to_string(),
            name: "Nova Drift".to_string(),
            subtitle: "developer | gamer | creator".to_string(),
            socials: Socials {
                steam: Some("https://steamcommunity.com/id/example".to_string()),
                spotify: Some("https://open.spotify.com/user/example".to_string()),
                discord_user: Some("https://discordapp.com/users/000000000000000000".to_string()),
                discord_server: Some("https://discord.gg/example".to_string()),
            },
            music: Some(
                "https://cdn.pixabay.com/download/audio/2022/03/30/audio_3ca0165d66.mp3?filename=ambient-112054.mp3"
                    .to_string(),
            ),
        }
    }
}

/// Social links by channel. Absent entries hide their link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Socials {
    pub steam: Option<String>,
    pub spotify: Option<String>,
    #[serde(alias = "discordUser")]
    pub discord_user: Option<String>,
    #[serde(alias = "discordServer")]
    pub discord_server: Option<String>,
}

/// Debug configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Show the debug overlay at startup (toggle with F3)
    pub show_overlay: bool,
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Extract(#[from] figment::Error),
}
