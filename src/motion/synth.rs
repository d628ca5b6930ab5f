use kurbo::Affine;

use crate::assets::image::FrameRgb;
use crate::foundation::core::Fps;
use crate::foundation::error::{SyncError, SyncResult};
use crate::motion::action::Action;
use crate::motion::warp::warp_affine;

/// Synthesize the warped frame sequence for a motion preset.
///
/// Produces exactly `floor(fps * duration)` frames, each the source image
/// warped by the preset's transform at `t = i / fps` seconds. Every frame is
/// derived from the original image, never from the previous frame, so motion
/// cannot drift or accumulate.
pub fn synthesize(
    image: &FrameRgb,
    action: Action,
    fps: Fps,
    duration_secs: f64,
) -> SyncResult<Vec<FrameRgb>> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(SyncError::validation("synthesize duration must be > 0"));
    }

    let num_frames = fps.secs_to_frames_floor(duration_secs);
    let border = action.border();

    let mut frames = Vec::with_capacity(num_frames as usize);
    for i in 0..num_frames {
        let t = (i as f64) * fps.frame_duration_secs();
        let transform = frame_transform(action, t, image.width, image.height);
        frames.push(warp_affine(image, transform, border)?);
    }
    Ok(frames)
}

/// The affine transform applied to the source image at `t` seconds.
pub(crate) fn frame_transform(action: Action, t: f64, width: u32, height: u32) -> Affine {
    let m = action.motion_at(t);
    if m.scale != 1.0 {
        // Scale about the integer image center.
        let cx = f64::from(width / 2);
        let cy = f64::from(height / 2);
        Affine::translate((cx, cy)) * Affine::scale(m.scale) * Affine::translate((-cx, -cy))
    } else {
        Affine::translate((f64::from(m.dx), f64::from(m.dy)))
    }
}
