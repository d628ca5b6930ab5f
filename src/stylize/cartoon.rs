use crate::assets::image::FrameRgb;
use crate::foundation::error::SyncResult;
use crate::stylize::filters::{
    adaptive_mean_threshold, bilateral_filter, grayscale, median_filter,
};

const MEDIAN_KSIZE: u32 = 5;
const THRESHOLD_BLOCK: u32 = 9;
const THRESHOLD_C: f64 = 9.0;
const BILATERAL_DIAMETER: u32 = 9;
const BILATERAL_SIGMA: f64 = 300.0;

/// Cartoon-stylize an image.
///
/// Grayscale, median-smooth, adaptive-mean-threshold into a binary edge mask,
/// bilateral-smooth the color image, then mask: pixels on detected edges turn
/// black, everything else takes the flattened color. Pure function of the
/// input pixels, no randomness.
pub fn cartoonify(image: &FrameRgb) -> SyncResult<FrameRgb> {
    let gray = grayscale(image);
    let smoothed = median_filter(&gray, image.width, image.height, MEDIAN_KSIZE)?;
    let edges = adaptive_mean_threshold(
        &smoothed,
        image.width,
        image.height,
        THRESHOLD_BLOCK,
        THRESHOLD_C,
    )?;
    let color = bilateral_filter(image, BILATERAL_DIAMETER, BILATERAL_SIGMA, BILATERAL_SIGMA)?;

    let mut out = color.data;
    for (px, &mask) in out.chunks_exact_mut(3).zip(edges.iter()) {
        if mask == 0 {
            px.fill(0);
        }
    }
    FrameRgb::from_raw(image.width, image.height, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_like_frame(w: u32, h: u32) -> FrameRgb {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                // Smooth gradient with one hard-edged dark block.
                let base = ((x * 5 + y * 3) % 200) as u8;
                if x > w / 2 && y > h / 2 {
                    data.extend_from_slice(&[10, 10, 10]);
                } else {
                    data.extend_from_slice(&[base, base.wrapping_add(30), 200]);
                }
            }
        }
        FrameRgb::from_raw(w, h, data).unwrap()
    }

    #[test]
    fn cartoonify_is_deterministic() {
        let img = photo_like_frame(16, 12);
        let a = cartoonify(&img).unwrap();
        let b = cartoonify(&img).unwrap();
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn cartoonify_keeps_dimensions() {
        let img = photo_like_frame(11, 7);
        let out = cartoonify(&img).unwrap();
        assert_eq!((out.width, out.height), (11, 7));
    }

    #[test]
    fn flat_image_has_no_edges_and_keeps_color() {
        let img = FrameRgb::from_raw(8, 8, vec![120; 8 * 8 * 3]).unwrap();
        let out = cartoonify(&img).unwrap();
        // No edge pixels on a flat image; bilateral of a constant is itself.
        assert_eq!(out.data, img.data);
    }

    #[test]
    fn edges_become_black_lines() {
        let img = photo_like_frame(16, 16);
        let out = cartoonify(&img).unwrap();
        let blacks = out
            .data
            .chunks_exact(3)
            .filter(|px| px == &[0, 0, 0])
            .count();
        assert!(blacks > 0, "expected some masked edge pixels");
        assert!(
            blacks < (16 * 16),
            "mask must not blank the whole image"
        );
    }
}
