//! Borrowed views over packed float pixel buffers.

use crate::error::{OcioError, OcioResult};

/// A `width x height` image of interleaved `f32` channels (RGB or RGBA),
/// borrowed mutably from the caller.
#[derive(Debug)]
pub struct PackedImageDesc<'a> {
    data: &'a mut [f32],
    width: usize,
    height: usize,
    channels: usize,
}

impl<'a> PackedImageDesc<'a> {
    /// Wraps `data` as a packed image.
    ///
    /// `channels` must be 3 or 4 and `data` must hold exactly
    /// `width * height * channels` values.
    pub fn new(data: &'a mut [f32], width: usize, height: usize, channels: usize) -> OcioResult<Self> {
        if !(3..=4).contains(&channels) {
            return Err(OcioError::InvalidImage {
                reason: format!("{channels} channels, expected 3 or 4"),
            });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| OcioError::InvalidImage {
                reason: format!("{width}x{height}x{channels} overflows"),
            })?;
        if data.len() != expected {
            return Err(OcioError::InvalidImage {
                reason: format!("buffer holds {} values, layout needs {expected}", data.len()),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The pixel values, row-major and interleaved.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        self.data
    }
}
