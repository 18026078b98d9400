//! Speech playback for assistant replies
//!
//! Wraps a rodio output stream and an exclusively owned sink. At most
//! one playback session is live at a time: starting a new one stops and
//! drops the previous sink before the new source is queued.

use crate::{CharlaError, Result};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use std::io::Cursor;
use tracing::{debug, info};

pub struct AudioPlayback {
    stream: OutputStream,
    sink: Option<Sink>,
}

impl AudioPlayback {
    /// Create a playback handle on the default output device
    pub fn new() -> Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream().map_err(|e| {
            CharlaError::AudioDeviceError(format!("No output device available: {}", e))
        })?;

        info!("Audio output stream opened");

        Ok(Self { stream, sink: None })
    }

    /// Decode the fetched payload and start playing it, superseding any
    /// session still running
    pub fn play(&mut self, bytes: Vec<u8>) -> Result<()> {
        // Exclusivity: tear down the prior session first
        self.stop();

        let source = Decoder::new(Cursor::new(bytes))
            .map_err(|e| CharlaError::AudioDecodeError(format!("Undecodable payload: {}", e)))?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        self.sink = Some(sink);

        debug!("Playback started");
        Ok(())
    }

    /// Stop any active playback; safe to call when nothing is playing
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            debug!("Playback stopped");
        }
    }

    /// Whether a session is live and its sink still has queued audio
    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().map(|s| !s.empty()).unwrap_or(false)
    }
}

impl Drop for AudioPlayback {
    fn drop(&mut self) {
        self.stop();
    }
}
