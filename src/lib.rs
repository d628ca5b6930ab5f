//! SyncMotion turns a still photo into a short animated MP4.
//!
//! One of five canned motion presets warps the photo frame by frame, an
//! optional cartoon filter stylizes it first, and the frame sequence is muxed
//! with an audio track (preset music or an uploaded waveform) through the
//! system `ffmpeg`:
//!
//! - Build a [`RenderRequest`] from an image, an [`Action`], and an audio source
//! - Hand it to a [`RenderPipeline`]
//! - Get back a [`RenderedVideo`] path or a typed [`SyncError`]
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod audio;
pub mod encode;
pub mod motion;
pub mod pipeline;
pub mod stylize;

pub use crate::foundation::core::{Fps, FrameIndex};
pub use crate::foundation::error::{SyncError, SyncResult};

pub use crate::assets::image::{FrameRgb, decode_image, load_image, save_png};
pub use crate::assets::music::MusicLibrary;
pub use crate::audio::resolve::{ResolvedAudio, UploadedAudio, resolve};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{AudioInput, FrameSink, InMemorySink, SinkConfig};
pub use crate::motion::action::Action;
pub use crate::motion::synth::synthesize;
pub use crate::motion::warp::{Border, warp_affine};
pub use crate::pipeline::render::{RenderPipeline, RenderRequest, RenderStats, RenderedVideo};
pub use crate::stylize::cartoon::cartoonify;
