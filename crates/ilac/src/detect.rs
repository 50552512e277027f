use crate::core::{BoundsError, HueImage, HueImageView};

/// Errors produced when adapting raw pixel buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageInputError {
    #[error("invalid RGB image buffer length (expected {expected} bytes, got {got})")]
    InvalidRgbBuffer { expected: usize, got: usize },

    #[error("invalid RGB image dimensions (width={width}, height={height})")]
    InvalidRgbDimensions { width: u32, height: u32 },
}

/// Hue in degrees `[0, 360)` of one 8-bit RGB pixel; gray pixels map to 0.
pub fn rgb_to_hue(r: u8, g: u8, b: u8) -> f32 {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta <= 0.0 {
        return 0.0;
    }
    let h = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let h = h.rem_euclid(360.0);
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Convert an `image::RgbImage` into a hue plane.
pub fn hue_plane_from_rgb(img: &::image::RgbImage) -> HueImage {
    let data = img
        .pixels()
        .map(|p| rgb_to_hue(p.0[0], p.0[1], p.0[2]))
        .collect();
    HueImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data,
    }
}

/// Borrow a single-channel `f32` image holding hues as a [`HueImageView`].
pub fn hue_view(
    img: &::image::ImageBuffer<::image::Luma<f32>, Vec<f32>>,
) -> Result<HueImageView<'_>, BoundsError> {
    let width = img.width() as usize;
    HueImageView::from_slice(width, img.height() as usize, width, img.as_raw())
}

/// Build a hue plane from a raw interleaved RGB8 buffer.
pub fn hue_plane_from_rgb_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<HueImage, ImageInputError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(ImageInputError::InvalidRgbDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h).and_then(|n| n.checked_mul(3)) else {
        return Err(ImageInputError::InvalidRgbDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(ImageInputError::InvalidRgbBuffer {
            expected,
            got: pixels.len(),
        });
    }
    let img = ::image::RgbImage::from_raw(width, height, pixels.to_vec())
        .ok_or(ImageInputError::InvalidRgbDimensions { width, height })?;
    Ok(hue_plane_from_rgb(&img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn primaries_and_secondaries() {
        let cases = [
            ((255, 0, 0), 0.0),
            ((255, 255, 0), 60.0),
            ((0, 255, 0), 120.0),
            ((0, 255, 255), 180.0),
            ((0, 0, 255), 240.0),
            ((255, 0, 255), 300.0),
            ((128, 128, 128), 0.0),
        ];
        for ((r, g, b), hue) in cases {
            assert_abs_diff_eq!(rgb_to_hue(r, g, b), hue, epsilon = 1e-4);
        }
        // Slightly blue red wraps below 360.
        let h = rgb_to_hue(255, 0, 1);
        assert!(h > 359.0 && h < 360.0, "{h}");
    }

    #[test]
    fn slice_adapter_checks_length() {
        assert_eq!(
            hue_plane_from_rgb_slice(2, 2, &[0; 11]).unwrap_err(),
            ImageInputError::InvalidRgbBuffer {
                expected: 12,
                got: 11
            }
        );
        let plane = hue_plane_from_rgb_slice(2, 1, &[0, 255, 0, 0, 0, 255]).expect("plane");
        assert_eq!(plane.width, 2);
        assert_abs_diff_eq!(plane.data[0], 120.0, epsilon = 1e-4);
        assert_abs_diff_eq!(plane.data[1], 240.0, epsilon = 1e-4);
    }

    #[test]
    fn luma_f32_view_shares_samples() {
        let img = ::image::ImageBuffer::<::image::Luma<f32>, Vec<f32>>::from_fn(4, 3, |x, y| {
            ::image::Luma([(x + 10 * y) as f32])
        });
        let view = hue_view(&img).expect("view");
        assert_eq!((view.width(), view.height()), (4, 3));
        assert_eq!(view.get(3, 2), Some(23.0));
    }
}
