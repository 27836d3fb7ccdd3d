/*
 * Output Module
 *
 * rodio-backed MediaElement that plays a local audio file on the default
 * output device. Play, pause and end of track are reported as MediaEvents.
 */

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::audio::{MediaElement, MediaEvent, PlaybackError};
use crate::media::local_source;

/// Plays a local audio file on the default output device.
pub struct RodioMedia {
    // Sinks fall silent once the stream is dropped
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    volume: f32,
    playing: bool,
    events: VecDeque<MediaEvent>,
}

impl RodioMedia {
    pub fn open() -> Result<Self, PlaybackError> {
        let (stream, handle) = OutputStream::try_default().map_err(|e| PlaybackError::Rejected(e.to_string()))?;
        log::info!("Opened default audio output");

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            source: None,
            volume: 1.0,
            playing: false,
            events: VecDeque::new(),
        })
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    // A paused sink holding the track from `offset` onwards
    fn load(&self, offset: Duration) -> Result<Sink, PlaybackError> {
        let path = self.source.as_ref().ok_or(PlaybackError::NoSource)?;
        let unavailable = |e: &dyn std::fmt::Display| PlaybackError::Unavailable(format!("{}: {}", path.display(), e));

        let file = File::open(path).map_err(|e| unavailable(&e))?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| unavailable(&e))?;
        let sink = Sink::try_new(&self.handle).map_err(|e| PlaybackError::Rejected(e.to_string()))?;

        sink.pause();
        sink.set_volume(self.volume);
        sink.append(decoder.skip_duration(offset));
        Ok(sink)
    }

    fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            self.playing = playing;
            self.events
                .push_back(if playing { MediaEvent::Play } else { MediaEvent::Pause });
        }
    }
}

impl MediaElement for RodioMedia {
    fn set_source(&mut self, source: Option<&str>) {
        self.source = source.and_then(local_source);
        self.sink = None;
        self.playing = false;
    }

    fn has_source(&self) -> bool {
        self.source.is_some()
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        // A finished track plays again from the start
        if self.sink.as_ref().map_or(true, Sink::empty) {
            self.sink = Some(self.load(Duration::ZERO)?);
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
        self.set_playing(true);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.set_playing(false);
    }

    // Decoders only play forwards, so seeking reloads the track at the offset
    fn set_current_time(&mut self, seconds: f64) {
        let offset = if seconds.is_finite() && seconds > 0.0 {
            Duration::from_secs_f64(seconds)
        } else {
            Duration::ZERO
        };

        match self.load(offset) {
            Ok(sink) => {
                if self.playing {
                    sink.play();
                }
                self.sink = Some(sink);
            }
            Err(err) => {
                log::warn!("Could not seek background music: {}", err);
                self.sink = None;
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        if self.playing && self.sink.as_ref().map_or(false, Sink::empty) {
            self.playing = false;
            self.events.push_back(MediaEvent::Ended);
        }
        self.events.pop_front()
    }
}
