use std::path::{Path, PathBuf};

use crate::assets::media::probe_audio_duration;
use crate::assets::music::MusicLibrary;
use crate::encode::sink::AudioInput;
use crate::foundation::error::{SyncError, SyncResult};

/// User-supplied waveform audio: a sample rate plus interleaved `f32` samples.
#[derive(Clone, Debug)]
pub struct UploadedAudio {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved `f32` PCM samples.
    pub samples: Vec<f32>,
}

impl UploadedAudio {
    /// Decoded duration in seconds: `samples / (rate * channels)`.
    pub fn duration_secs(&self) -> f64 {
        let frames = self.samples.len() as f64 / f64::from(self.channels);
        frames / f64::from(self.sample_rate)
    }
}

/// Deletes the wrapped file when dropped.
///
/// Holds materialized upload temp files alive for exactly as long as the
/// encode that reads them.
#[derive(Debug)]
struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(p) = self.0.take() {
            let _ = std::fs::remove_file(p);
        }
    }
}

/// A playable audio source plus its duration.
///
/// When the source was materialized from an upload, the backing temp file is
/// removed when this value is dropped; keep it alive until encoding finishes.
#[derive(Debug)]
pub struct ResolvedAudio {
    /// Sink-ready audio input.
    pub input: AudioInput,
    /// Duration in seconds, > 0.
    pub duration_secs: f64,
    _temp: Option<TempFileGuard>,
}

/// Resolve the audio source for a render request.
///
/// Resolution order: a known preset name wins when no upload is present; an
/// upload is materialized to a request-scoped temp PCM file; otherwise the
/// request fails with an `Input` error. The literal choice "None" means no
/// preset was selected.
pub fn resolve(
    upload: Option<&UploadedAudio>,
    music_choice: Option<&str>,
    library: &MusicLibrary,
) -> SyncResult<ResolvedAudio> {
    let preset = music_choice
        .filter(|c| *c != "None")
        .and_then(|c| library.lookup(c));

    if upload.is_none()
        && let Some(path) = preset
    {
        let duration_secs = probe_audio_duration(&path)?;
        return Ok(ResolvedAudio {
            input: AudioInput::Encoded { path },
            duration_secs,
            _temp: None,
        });
    }

    if let Some(up) = upload {
        return materialize_upload(up);
    }

    Err(SyncError::input("no valid audio provided"))
}

fn materialize_upload(up: &UploadedAudio) -> SyncResult<ResolvedAudio> {
    if up.sample_rate == 0 {
        return Err(SyncError::input("uploaded audio sample rate must be > 0"));
    }
    if up.channels == 0 {
        return Err(SyncError::input("uploaded audio channel count must be > 0"));
    }
    if up.samples.is_empty() {
        return Err(SyncError::input("uploaded audio has no samples"));
    }
    if !up.samples.len().is_multiple_of(usize::from(up.channels)) {
        return Err(SyncError::input(
            "uploaded audio sample count is not aligned to its channel count",
        ));
    }

    let path = std::env::temp_dir().join(format!(
        "syncmotion_upload_{}_{}.f32le",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    ));
    write_f32le_file(&up.samples, &path)?;

    Ok(ResolvedAudio {
        input: AudioInput::RawPcm {
            path: path.clone(),
            sample_rate: up.sample_rate,
            channels: up.channels,
        },
        duration_secs: up.duration_secs(),
        _temp: Some(TempFileGuard(Some(path))),
    })
}

/// Write interleaved `f32` PCM samples to a raw little-endian `.f32le` file.
fn write_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> SyncResult<()> {
    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        SyncError::encoding(format!(
            "failed to write uploaded audio file '{}': {e}",
            out_path.display()
        ))
    })
}
