use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SyncError, SyncResult};

/// An RGB8 pixel frame, tightly packed, row-major.
///
/// Every stage of the pipeline consumes and produces opaque RGB frames; there
/// is no alpha anywhere between photo decode and video encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB8 bytes, `width * height * 3` long.
    pub data: Vec<u8>,
}

impl FrameRgb {
    /// Create a frame from raw RGB8 bytes, validating the buffer length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> SyncResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| SyncError::validation("frame buffer size overflow"))?;
        if data.len() != expected {
            return Err(SyncError::validation(format!(
                "frame buffer length {} does not match {}x{}x3",
                data.len(),
                width,
                height
            )));
        }
        if width == 0 || height == 0 {
            return Err(SyncError::validation("frame dimensions must be non-zero"));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Byte offset of the pixel at `(x, y)`.
    #[inline]
    pub(crate) fn pixel_offset(&self, x: u32, y: u32) -> usize {
        ((y as usize * self.width as usize) + x as usize) * 3
    }

    /// The `[r, g, b]` triple at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.pixel_offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Decode an image (PNG, JPEG, ...) from memory into an RGB8 frame.
pub fn decode_image(bytes: &[u8]) -> SyncResult<FrameRgb> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgb = dyn_img.to_rgb8();
    let (width, height) = rgb.dimensions();
    FrameRgb::from_raw(width, height, rgb.into_raw())
}

/// Load and decode an image file into an RGB8 frame.
pub fn load_image(path: &Path) -> SyncResult<FrameRgb> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Write a frame as a PNG file.
pub fn save_png(frame: &FrameRgb, path: &Path) -> SyncResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
