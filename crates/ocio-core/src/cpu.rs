//! CPU processor: the optimized, executable form of a [`Processor`].
//!
//! [`Processor`]: crate::Processor

use crate::image::PackedImageDesc;
use crate::processor::ProcessorOp;

/// Optimized op list applied pixel by pixel.
///
/// Applying takes `&self` and allocates nothing, so one processor can serve
/// several threads working on disjoint buffers.
#[derive(Debug, Clone)]
pub struct CpuProcessor {
    ops: Vec<ProcessorOp>,
}

impl CpuProcessor {
    pub(crate) fn from_ops(ops: Vec<ProcessorOp>) -> Self {
        Self { ops }
    }

    /// Number of operations left after optimization.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Checks if applying would leave pixels unchanged.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    #[inline]
    fn apply_pixel(&self, px: &mut [f32; 4]) {
        for op in &self.ops {
            op.apply(px);
        }
    }

    /// Applies in place to a packed image.
    ///
    /// 3-channel pixels are processed with alpha 1.0, which is not stored.
    pub fn apply(&self, image: &mut PackedImageDesc<'_>) {
        if self.ops.is_empty() {
            return;
        }
        let channels = image.channels();
        for chunk in image.data_mut().chunks_exact_mut(channels) {
            let mut px = [chunk[0], chunk[1], chunk[2], chunk.get(3).copied().unwrap_or(1.0)];
            self.apply_pixel(&mut px);
            chunk.copy_from_slice(&px[..channels]);
        }
    }

    /// Applies to RGBA pixels in place.
    pub fn apply_rgba(&self, pixels: &mut [[f32; 4]]) {
        for px in pixels {
            self.apply_pixel(px);
        }
    }

    /// Applies to RGB pixels in place.
    pub fn apply_rgb(&self, pixels: &mut [[f32; 3]]) {
        for px in pixels {
            let mut rgba = [px[0], px[1], px[2], 1.0];
            self.apply_pixel(&mut rgba);
            *px = [rgba[0], rgba[1], rgba[2]];
        }
    }
}
