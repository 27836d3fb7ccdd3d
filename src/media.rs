/*
 * Media Module
 *
 * Picks the MediaElement backend for the profile's music:
 * - Local files (plain paths or file:// URLs) play through RodioMedia in the
 *   output module when the `audio` feature is on and a device opens
 * - Anything else gets SilentMedia; remote sources are never fetched
 */

use std::path::PathBuf;

use crate::audio::{configure_media, MediaElement, MediaEvent, PlaybackError};
use crate::profile::ProfileView;

/// Path of a source that can be played from disk, or `None` for remote URLs.
pub fn local_source(source: &str) -> Option<PathBuf> {
    let source = source.trim();
    if source.is_empty() {
        return None;
    }
    if let Some(path) = source.strip_prefix("file://") {
        return (!path.is_empty()).then(|| PathBuf::from(path));
    }
    if source.contains("://") {
        return None;
    }
    Some(PathBuf::from(source))
}

/// Media element for the profile's music, already configured with its source
/// and volume.
pub fn open_media(profile: &ProfileView) -> Box<dyn MediaElement> {
    let mut media: Box<dyn MediaElement> = match profile.music.as_deref() {
        Some(music) if local_source(music).is_some() => open_output(),
        Some(music) => {
            log::info!("Music source {} is remote and will not be streamed", music);
            Box::new(SilentMedia::new())
        }
        None => Box::new(SilentMedia::new()),
    };

    configure_media(media.as_mut(), profile);
    media
}

#[cfg(feature = "audio")]
fn open_output() -> Box<dyn MediaElement> {
    match crate::output::RodioMedia::open() {
        Ok(media) => Box::new(media),
        Err(err) => {
            log::warn!("No audio output ({}), background music is off", err);
            Box::new(SilentMedia::new())
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_output() -> Box<dyn MediaElement> {
    log::warn!("Built without the audio feature, background music is off");
    Box::new(SilentMedia::new())
}

/// Media element for hosts without an audio output. It keeps the source and
/// volume it is given but refuses to play, so the toggle stays paused.
#[derive(Debug, Default)]
pub struct SilentMedia {
    source: Option<String>,
    volume: f32,
    position: f64,
}

impl SilentMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn position(&self) -> f64 {
        self.position
    }
}

impl MediaElement for SilentMedia {
    fn set_source(&mut self, source: Option<&str>) {
        self.source = source.map(str::to_string);
    }

    fn has_source(&self) -> bool {
        self.source.is_some()
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.source.is_none() {
            return Err(PlaybackError::NoSource);
        }
        Err(PlaybackError::Rejected("no audio output available".to_string()))
    }

    fn pause(&mut self) {}

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds.max(0.0);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        None
    }
}
