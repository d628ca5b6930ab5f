use std::f64::consts::PI;

use crate::motion::warp::Border;

/// The five canned motion presets.
///
/// A closed enum keeps action dispatch exhaustive at compile time; unknown
/// action names are rejected wherever strings are parsed and never reach the
/// synthesizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Action {
    /// Single up-down bounce, period 1s.
    Jump,
    /// Lateral sway plus double-bounce stride.
    Run,
    /// Fast repeated bounce.
    Hop,
    /// Pure lateral slide, no vertical motion.
    Slide,
    /// Breathing zoom about the image center.
    Pulse,
}

/// Per-frame transform parameters: integer pixel translation plus a uniform
/// scale about the image center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameMotion {
    /// Horizontal translation in pixels (positive moves content right).
    pub dx: i32,
    /// Vertical translation in pixels (negative moves content up).
    pub dy: i32,
    /// Uniform scale about the image center.
    pub scale: f64,
}

impl Action {
    /// All presets in presentation order.
    pub const ALL: [Action; 5] = [
        Action::Jump,
        Action::Run,
        Action::Hop,
        Action::Slide,
        Action::Pulse,
    ];

    /// The preset's display name.
    pub fn name(self) -> &'static str {
        match self {
            Action::Jump => "Jump",
            Action::Run => "Run",
            Action::Hop => "Hop",
            Action::Slide => "Slide",
            Action::Pulse => "Pulse",
        }
    }

    /// Parse a display name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }

    /// Transform parameters at `t` seconds into the clip.
    ///
    /// Sub-pixel offsets are truncated toward zero to whole pixels before the
    /// transform is built. This produces visible stepping at low frame rates
    /// and is kept as-is for compatibility with the reference motion tables.
    pub fn motion_at(self, t: f64) -> FrameMotion {
        let (dx, dy, scale) = match self {
            Action::Jump => (0.0, -40.0 * (PI * t).sin().abs(), 1.0),
            Action::Run => (
                15.0 * (2.0 * PI * t).sin(),
                -5.0 * (4.0 * PI * t).sin().abs(),
                1.0,
            ),
            Action::Hop => (0.0, -25.0 * (5.0 * PI * t).sin().abs(), 1.0),
            Action::Slide => (50.0 * (PI * t).sin(), 0.0, 1.0),
            Action::Pulse => (0.0, 0.0, 1.0 + 0.05 * (2.0 * PI * t).sin()),
        };
        FrameMotion {
            dx: dx as i32,
            dy: dy as i32,
            scale,
        }
    }

    /// Border synthesis mode used when the warp exposes off-image pixels.
    pub fn border(self) -> Border {
        match self {
            Action::Pulse => Border::Replicate,
            _ => Border::Reflect,
        }
    }
}

impl std::str::FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::from_name(s).ok_or_else(|| {
            format!(
                "unknown action '{s}' (expected one of: Jump, Run, Hop, Slide, Pulse)"
            )
        })
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
