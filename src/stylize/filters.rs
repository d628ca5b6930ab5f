use crate::assets::image::FrameRgb;
use crate::foundation::error::{SyncError, SyncResult};

/// Convert an RGB frame to a single-channel luminance buffer (Rec.601 weights).
pub fn grayscale(src: &FrameRgb) -> Vec<u8> {
    src.data
        .chunks_exact(3)
        .map(|px| {
            let v = 0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2]);
            v.round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

/// Median filter over a square `ksize` window, edge pixels replicated.
pub fn median_filter(src: &[u8], width: u32, height: u32, ksize: u32) -> SyncResult<Vec<u8>> {
    check_gray_len(src, width, height)?;
    if ksize == 0 || ksize.is_multiple_of(2) {
        return Err(SyncError::validation("median ksize must be odd"));
    }
    if ksize == 1 {
        return Ok(src.to_vec());
    }

    let r = (ksize / 2) as i64;
    let w = width as i64;
    let h = height as i64;
    let mut window = Vec::with_capacity((ksize * ksize) as usize);
    let mut out = vec![0u8; src.len()];

    for y in 0..h {
        for x in 0..w {
            window.clear();
            for dy in -r..=r {
                let sy = (y + dy).clamp(0, h - 1);
                for dx in -r..=r {
                    let sx = (x + dx).clamp(0, w - 1);
                    window.push(src[(sy * w + sx) as usize]);
                }
            }
            window.sort_unstable();
            out[(y * w + x) as usize] = window[window.len() / 2];
        }
    }
    Ok(out)
}

/// Adaptive mean threshold: 255 where the pixel exceeds its local block mean
/// minus `c`, 0 elsewhere. Edge pixels replicated.
pub fn adaptive_mean_threshold(
    src: &[u8],
    width: u32,
    height: u32,
    block: u32,
    c: f64,
) -> SyncResult<Vec<u8>> {
    check_gray_len(src, width, height)?;
    if block < 3 || block.is_multiple_of(2) {
        return Err(SyncError::validation("threshold block must be odd and >= 3"));
    }

    let r = (block / 2) as i64;
    let w = width as i64;
    let h = height as i64;
    let count = f64::from(block * block);
    let mut out = vec![0u8; src.len()];

    for y in 0..h {
        for x in 0..w {
            let mut sum = 0u64;
            for dy in -r..=r {
                let sy = (y + dy).clamp(0, h - 1);
                for dx in -r..=r {
                    let sx = (x + dx).clamp(0, w - 1);
                    sum += u64::from(src[(sy * w + sx) as usize]);
                }
            }
            let mean = sum as f64 / count;
            let i = (y * w + x) as usize;
            out[i] = if f64::from(src[i]) > mean - c { 255 } else { 0 };
        }
    }
    Ok(out)
}

/// Edge-preserving bilateral filter over a circular neighborhood of
/// `diameter`, weighting neighbors by spatial distance and L1 color distance.
pub fn bilateral_filter(
    src: &FrameRgb,
    diameter: u32,
    sigma_color: f64,
    sigma_space: f64,
) -> SyncResult<FrameRgb> {
    if diameter == 0 || diameter.is_multiple_of(2) {
        return Err(SyncError::validation("bilateral diameter must be odd"));
    }
    if sigma_color <= 0.0 || sigma_space <= 0.0 {
        return Err(SyncError::validation("bilateral sigmas must be > 0"));
    }

    let r = (diameter / 2) as i64;
    let w = src.width as i64;
    let h = src.height as i64;
    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let space_coeff = -0.5 / (sigma_space * sigma_space);

    // Precompute spatial weights over the circular mask.
    let mut offsets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            let d2 = (dx * dx + dy * dy) as f64;
            if d2 > (r * r) as f64 {
                continue;
            }
            offsets.push((dx, dy, (d2 * space_coeff).exp()));
        }
    }

    let mut out = vec![0u8; src.data.len()];
    for y in 0..h {
        for x in 0..w {
            let center = src.pixel(x as u32, y as u32);
            let mut acc = [0.0f64; 3];
            let mut wsum = 0.0f64;
            for &(dx, dy, sw) in &offsets {
                let sx = (x + dx).clamp(0, w - 1) as u32;
                let sy = (y + dy).clamp(0, h - 1) as u32;
                let px = src.pixel(sx, sy);
                let dc = f64::from(px[0].abs_diff(center[0]))
                    + f64::from(px[1].abs_diff(center[1]))
                    + f64::from(px[2].abs_diff(center[2]));
                let weight = sw * (dc * dc * color_coeff).exp();
                wsum += weight;
                for c in 0..3 {
                    acc[c] += weight * f64::from(px[c]);
                }
            }
            let i = src.pixel_offset(x as u32, y as u32);
            for c in 0..3 {
                out[i + c] = (acc[c] / wsum).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    FrameRgb::from_raw(src.width, src.height, out)
}

fn check_gray_len(src: &[u8], width: u32, height: u32) -> SyncResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| SyncError::validation("gray buffer size overflow"))?;
    if src.len() != expected {
        return Err(SyncError::validation(
            "gray buffer length does not match width*height",
        ));
    }
    Ok(())
}
