use std::path::PathBuf;

use crate::assets::image::FrameRgb;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::SyncResult;

/// Configuration provided to a [`FrameSink`] at the start of a render.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Optional audio track to mux alongside the frames.
    pub audio: Option<AudioInput>,
}

/// Audio input for sinks that support audio muxing.
#[derive(Debug, Clone)]
pub enum AudioInput {
    /// An encoded audio file (mp3, wav, ...) decodable by the sink.
    Encoded {
        /// Source file path.
        path: PathBuf,
    },
    /// Raw interleaved little-endian `f32` PCM with an explicit layout.
    RawPcm {
        /// Path to the `.f32le` data.
        path: PathBuf,
        /// Sample rate in Hz.
        sample_rate: u32,
        /// Channel count.
        channels: u16,
    },
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing
/// `FrameIndex` order within a single `begin`/`end` pair.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SyncResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> SyncResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SyncResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRgb)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRgb)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SyncResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> SyncResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SyncResult<()> {
        Ok(())
    }
}
