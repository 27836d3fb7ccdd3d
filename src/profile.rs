/*
 * Profile Module
 *
 * Turns the profile section of the configuration into the view state shown by
 * the overlay: avatar, name, subtitle, one entry per social channel and the
 * music source. Missing optional values are not errors; the matching element
 * is simply hidden.
 */

use crate::config::ProfileConfig;

// Volume applied to the background music at startup
pub const MUSIC_VOLUME: f32 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Steam,
    Spotify,
    DiscordUser,
    DiscordServer,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Steam,
        Channel::Spotify,
        Channel::DiscordUser,
        Channel::DiscordServer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Steam => "Steam",
            Channel::Spotify => "Spotify",
            Channel::DiscordUser => "Discord",
            Channel::DiscordServer => "Discord Server",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocialLink {
    pub channel: Channel,
    pub href: Option<String>,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub avatar: Avatar,
    pub name: String,
    pub subtitle: String,
    pub links: Vec<SocialLink>,
    pub music: Option<String>,
    pub volume: f32,
}

impl ProfileView {
    // Populate every element once from the configuration
    pub fn from_config(config: &ProfileConfig) -> Self {
        let links = Channel::ALL
            .iter()
            .map(|&channel| {
                let href = present(match channel {
                    Channel::Steam => &config.socials.steam,
                    Channel::Spotify => &config.socials.spotify,
                    Channel::DiscordUser => &config.socials.discord_user,
                    Channel::DiscordServer => &config.socials.discord_server,
                });
                SocialLink {
                    channel,
                    visible: href.is_some(),
                    href,
                }
            })
            .collect();

        Self {
            avatar: Avatar {
                src: config.avatar_url.clone(),
                alt: format!("{} avatar", config.name),
            },
            name: config.name.clone(),
            subtitle: config.subtitle.clone(),
            links,
            music: present(&config.music),
            volume: MUSIC_VOLUME,
        }
    }

    pub fn link(&self, channel: Channel) -> Option<&SocialLink> {
        self.links.iter().find(|link| link.channel == channel)
    }

    pub fn visible_links(&self) -> impl Iterator<Item = &SocialLink> {
        self.links.iter().filter(|link| link.visible)
    }

    /// The audio toggle only exists when there is something to play.
    pub fn has_music(&self) -> bool {
        self.music.is_some()
    }
}

// Blank strings count as absent
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Socials;

    fn config(socials: Socials, music: Option<&str>) -> ProfileConfig {
        ProfileConfig {
            avatar_url: "https://example.com/a.png".to_string(),
            name: "Nova".to_string(),
            subtitle: "creator".to_string(),
            socials,
            music: music.map(str::to_string),
        }
    }

    #[test]
    fn present_channel_is_visible_absent_channel_is_hidden() {
        let view = ProfileView::from_config(&config(
            Socials {
                steam: Some("https://x".to_string()),
                spotify: None,
                ..Socials::default()
            },
            None,
        ));

        let steam = view.link(Channel::Steam).unwrap();
        assert!(steam.visible);
        assert_eq!(steam.href.as_deref(), Some("https://x"));

        let spotify = view.link(Channel::Spotify).unwrap();
        assert!(!spotify.visible);
        assert_eq!(spotify.href, None);

        assert_eq!(view.visible_links().count(), 1);
    }

    #[test]
    fn every_channel_gets_an_element() {
        let view = ProfileView::from_config(&config(Socials::default(), None));
        assert_eq!(view.links.len(), 4);
        assert!(view.links.iter().all(|link| !link.visible));
    }

    #[test]
    fn blank_entries_are_hidden() {
        let view = ProfileView::from_config(&config(
            Socials {
                discord_server: Some("   ".to_string()),
                ..Socials::default()
            },
            Some(""),
        ));
        assert!(!view.link(Channel::DiscordServer).unwrap().visible);
        assert!(!view.has_music());
    }

    #[test]
    fn text_avatar_and_volume_come_from_config() {
        let view = ProfileView::from_config(&config(Socials::default(), Some("https://m.mp3")));
        assert_eq!(view.name, "Nova");
        assert_eq!(view.subtitle, "creator");
        assert_eq!(view.avatar.src, "https://example.com/a.png");
        assert_eq!(view.avatar.alt, "Nova avatar");
        assert_eq!(view.music.as_deref(), Some("https://m.mp3"));
        assert_eq!(view.volume, 0.55);
    }
}
