use std::path::PathBuf;

use crate::assets::image::FrameRgb;
use crate::assets::music::MusicLibrary;
use crate::audio::resolve::{UploadedAudio, resolve};
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SyncError, SyncResult};
use crate::motion::action::Action;
use crate::motion::synth::synthesize;
use crate::stylize::cartoon::cartoonify;

/// Everything needed to render one video. Fully determines the output; no
/// state is carried between requests.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    /// The still photo to animate.
    pub image: FrameRgb,
    /// Optional uploaded waveform audio. Takes precedence over presets.
    pub audio: Option<UploadedAudio>,
    /// Preset music name, or "None"/absent for no preset.
    pub music_choice: Option<String>,
    /// Motion preset.
    pub action: Action,
    /// Apply the cartoon stylization filter before animating.
    pub cartoon: bool,
}

/// A successfully produced video file.
#[derive(Clone, Debug)]
pub struct RenderedVideo {
    /// Path of the muxed MP4.
    pub path: PathBuf,
    /// Number of video frames encoded.
    pub frames: u64,
    /// Video duration in seconds.
    pub duration_secs: f64,
}

/// Frame statistics from a sink-level render.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderStats {
    /// Frames pushed into the sink.
    pub frames: u64,
    /// Video duration in seconds.
    pub duration_secs: f64,
}

/// The resolve -> stylize -> synthesize -> encode pipeline.
///
/// One render runs to completion per call; there is no internal parallelism
/// and no state survives a request. Output files get request-scoped unique
/// names inside the configured output directory, so simultaneous callers
/// never race on a shared path.
pub struct RenderPipeline {
    music: MusicLibrary,
    out_dir: PathBuf,
    fps: Fps,
}

/// Fixed output frame rate of the pipeline.
const PIPELINE_FPS: Fps = Fps { num: 15, den: 1 };

impl RenderPipeline {
    /// Create a pipeline writing videos into `out_dir`.
    pub fn new(music: MusicLibrary, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            music,
            out_dir: out_dir.into(),
            fps: PIPELINE_FPS,
        }
    }

    /// The pipeline's fixed output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// The preset music library this pipeline resolves against.
    pub fn music(&self) -> &MusicLibrary {
        &self.music
    }

    /// Render a request to a new MP4 file.
    ///
    /// All-or-nothing: on any failure the partial output file (if ffmpeg got
    /// far enough to create one) is removed and only the error is returned.
    #[tracing::instrument(skip(self, req), fields(action = %req.action, cartoon = req.cartoon))]
    pub fn render(&self, req: &RenderRequest) -> SyncResult<RenderedVideo> {
        let out_path = self.out_dir.join(format!(
            "animated_{}_{}.mp4",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ));

        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out_path.clone()));
        match self.render_into(req, &mut sink) {
            Ok(stats) => Ok(RenderedVideo {
                path: out_path,
                frames: stats.frames,
                duration_secs: stats.duration_secs,
            }),
            Err(e) => {
                let _ = std::fs::remove_file(&out_path);
                Err(e)
            }
        }
    }

    /// Render a request into an arbitrary frame sink.
    ///
    /// Steps run strictly in order: stylize, resolve audio, synthesize frames
    /// for the resolved duration, stream into the sink. The materialized
    /// upload audio (if any) outlives the sink's `end`.
    pub fn render_into(
        &self,
        req: &RenderRequest,
        sink: &mut dyn FrameSink,
    ) -> SyncResult<RenderStats> {
        let image = if req.cartoon {
            cartoonify(&req.image)?
        } else {
            req.image.clone()
        };

        let resolved = resolve(req.audio.as_ref(), req.music_choice.as_deref(), &self.music)?;

        let frames = synthesize(&image, req.action, self.fps, resolved.duration_secs)?;
        if frames.is_empty() {
            return Err(SyncError::empty_result(format!(
                "no frames generated for {:.3}s of audio at {} fps",
                resolved.duration_secs,
                self.fps.as_f64()
            )));
        }

        sink.begin(SinkConfig {
            width: image.width,
            height: image.height,
            fps: self.fps,
            audio: Some(resolved.input.clone()),
        })?;
        for (i, frame) in frames.iter().enumerate() {
            sink.push_frame(FrameIndex(i as u64), frame)?;
        }
        sink.end()?;

        Ok(RenderStats {
            frames: frames.len() as u64,
            duration_secs: self.fps.frames_to_secs(frames.len() as u64),
        })
    }
}
