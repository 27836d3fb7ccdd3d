/*
 * Audio Module
 *
 * Play/pause state for the single background track.
 *
 * The track itself lives behind the MediaElement trait; the backends are in
 * the media module. AudioToggle keeps the visual state of the toggle button
 * in sync with it:
 * - The first pointer press or the first unmodified key press starts playback
 *   once (autoplay policies usually require a user gesture)
 * - Pressing the toggle pauses a playing track and starts a paused one
 * - Play/pause/ended notifications from the media update the state; an ended
 *   track rewinds and starts again
 *
 * Starting playback can be refused. The refusal is logged and leaves the
 * toggle paused; it never reaches the caller.
 */

use thiserror::Error;

use crate::profile::ProfileView;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The media refused to start, e.g. an autoplay policy or a missing device.
    #[error("playback rejected: {0}")]
    Rejected(String),
    #[error("no audio source configured")]
    NoSource,
    /// The source could not be opened or decoded.
    #[error("audio source unavailable: {0}")]
    Unavailable(String),
}

/// Notifications emitted by a media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
}

/// A playable track.
pub trait MediaElement {
    fn set_source(&mut self, source: Option<&str>);
    fn has_source(&self) -> bool;
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f32);
    /// Next pending notification, oldest first.
    fn poll_event(&mut self) -> Option<MediaEvent>;
}

/// Point a media element at the profile's music with the startup volume.
pub fn configure_media<M: MediaElement + ?Sized>(media: &mut M, profile: &ProfileView) {
    media.set_source(profile.music.as_deref());
    media.set_volume(profile.volume);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Playing,
    Paused,
}

#[derive(Debug)]
pub struct AudioToggle {
    state: ToggleState,
    initialized: bool,
    // One-shot gesture listeners
    pointer_gesture_armed: bool,
    key_gesture_armed: bool,
}

impl AudioToggle {
    pub fn new() -> Self {
        Self {
            state: ToggleState::Paused,
            initialized: false,
            pointer_gesture_armed: true,
            key_gesture_armed: true,
        }
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == ToggleState::Playing
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // Try to play; a refusal leaves the toggle paused
    pub fn start<M: MediaElement + ?Sized>(&mut self, media: &mut M) {
        if !media.has_source() {
            return;
        }
        match media.play() {
            Ok(()) => self.set_state(ToggleState::Playing),
            Err(err) => {
                log::warn!("Background music did not start: {}", err);
                self.set_state(ToggleState::Paused);
            }
        }
    }

    pub fn pause<M: MediaElement + ?Sized>(&mut self, media: &mut M) {
        media.pause();
        self.set_state(ToggleState::Paused);
    }

    /// Start playback the first time this is called. Returns whether this call
    /// did the initialisation.
    pub fn ensure_initialized<M: MediaElement + ?Sized>(&mut self, media: &mut M) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        self.start(media);
        true
    }

    // Toggle button pressed
    pub fn toggle<M: MediaElement + ?Sized>(&mut self, media: &mut M) {
        // The first press only initialises, which already starts playback
        if self.ensure_initialized(media) {
            return;
        }
        if self.is_playing() {
            self.pause(media);
        } else {
            self.start(media);
        }
    }

    // First pointer press anywhere in the window
    pub fn on_pointer_down<M: MediaElement + ?Sized>(&mut self, media: &mut M) {
        if !self.pointer_gesture_armed {
            return;
        }
        self.pointer_gesture_armed = false;
        log::info!("First pointer gesture, unlocking audio");
        self.ensure_initialized(media);
    }

    // First key press; a press with Ctrl/Cmd held uses up the gesture without starting audio
    pub fn on_key_down<M: MediaElement + ?Sized>(&mut self, media: &mut M, command_modifier: bool) {
        if !self.key_gesture_armed {
            return;
        }
        self.key_gesture_armed = false;
        if !self.initialized && !command_modifier {
            log::info!("First key gesture, unlocking audio");
            self.ensure_initialized(media);
        }
    }

    pub fn handle_event<M: MediaElement + ?Sized>(&mut self, media: &mut M, event: MediaEvent) {
        match event {
            MediaEvent::Play => self.set_state(ToggleState::Playing),
            MediaEvent::Pause => self.set_state(ToggleState::Paused),
            MediaEvent::Ended => {
                media.set_current_time(0.0);
                self.start(media);
            }
        }
    }

    // Drain the media's pending notifications
    pub fn sync<M: MediaElement + ?Sized>(&mut self, media: &mut M) {
        while let Some(event) = media.poll_event() {
            self.handle_event(media, event);
        }
    }

    fn set_state(&mut self, state: ToggleState) {
        if self.state != state {
            log::debug!("Audio toggle {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

impl Default for AudioToggle {
    fn default() -> Self {
        Self::new()
    }
}
