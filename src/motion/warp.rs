use kurbo::{Affine, Point};

use crate::assets::image::FrameRgb;
use crate::foundation::error::{SyncError, SyncResult};

/// How off-image pixels are synthesized when a warp samples past the border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    /// Mirror across the edge, edge pixel included (`cba|abc|cba`).
    Reflect,
    /// Repeat the edge pixel (`aaa|abc|ccc`).
    Replicate,
}

impl Border {
    /// Map an out-of-range coordinate into `[0, n)`.
    #[inline]
    fn resolve(self, i: i64, n: i64) -> i64 {
        debug_assert!(n > 0);
        match self {
            Border::Replicate => i.clamp(0, n - 1),
            Border::Reflect => {
                let period = 2 * n;
                let m = i.rem_euclid(period);
                if m < n { m } else { period - 1 - m }
            }
        }
    }
}

/// Warp a frame through an affine transform.
///
/// Every output pixel is inverse-mapped through `transform` and sampled
/// bilinearly from the source; samples past the border are synthesized
/// according to `border`, so no warp exposes empty pixels. The output frame
/// keeps the source dimensions. Integer translations land exactly on the
/// source grid and degenerate to bit-exact shifts.
pub fn warp_affine(src: &FrameRgb, transform: Affine, border: Border) -> SyncResult<FrameRgb> {
    if transform.determinant().abs() < 1e-12 {
        return Err(SyncError::validation("warp transform is not invertible"));
    }
    let inv = transform.inverse();

    let w = src.width as i64;
    let h = src.height as i64;
    let mut out = vec![0u8; src.data.len()];

    for y in 0..src.height {
        for x in 0..src.width {
            let p = inv * Point::new(f64::from(x), f64::from(y));
            let px = sample_bilinear(src, p.x, p.y, w, h, border);
            let i = src.pixel_offset(x, y);
            out[i..i + 3].copy_from_slice(&px);
        }
    }

    FrameRgb::from_raw(src.width, src.height, out)
}

#[inline]
fn sample_bilinear(src: &FrameRgb, sx: f64, sy: f64, w: i64, h: i64, border: Border) -> [u8; 3] {
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let x0 = x0 as i64;
    let y0 = y0 as i64;

    let xa = border.resolve(x0, w) as u32;
    let xb = border.resolve(x0 + 1, w) as u32;
    let ya = border.resolve(y0, h) as u32;
    let yb = border.resolve(y0 + 1, h) as u32;

    let p00 = src.pixel(xa, ya);
    let p10 = src.pixel(xb, ya);
    let p01 = src.pixel(xa, yb);
    let p11 = src.pixel(xb, yb);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
        let bot = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
        let v = top * (1.0 - fy) + bot * fy;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}
