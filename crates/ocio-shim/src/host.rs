//! Safe host-side wrapper over the exported C functions.
//!
//! Goes through the same `ocio_*` entry points a foreign host loads, with
//! one process-wide context created on first use.

use std::ffi::{CStr, CString, c_int};
use std::ptr::NonNull;
use std::sync::OnceLock;

use crate::exports::*;
use crate::handle::{OcioContext, OcioProcessor};

static CONTEXT: OnceLock<Option<GlobalContext>> = OnceLock::new();

/// Process-wide context. Never destroyed: it lives as long as the process.
struct GlobalContext(NonNull<OcioContext>);

// The context is only read after creation.
unsafe impl Send for GlobalContext {}
unsafe impl Sync for GlobalContext {}

/// Entry point for listing color spaces and creating processors.
pub struct ColorSpaceManager;

impl ColorSpaceManager {
    fn context() -> Option<NonNull<OcioContext>> {
        CONTEXT
            .get_or_init(|| match NonNull::new(ocio_create_context()) {
                Some(ctx) => {
                    tracing::info!("OCIO context created successfully");
                    Some(GlobalContext(ctx))
                }
                None => {
                    tracing::warn!("OCIO context unavailable; color management disabled");
                    None
                }
            })
            .as_ref()
            .map(|g| g.0)
    }

    /// Checks if a config was loaded.
    pub fn is_available() -> bool {
        Self::context().is_some()
    }

    /// Names of the active color spaces; empty without a config.
    pub fn available_colorspaces() -> Vec<String> {
        let Some(ctx) = Self::context() else {
            return Vec::new();
        };
        let count = unsafe { ocio_get_num_colorspaces(ctx.as_ptr()) };
        (0..count)
            .filter_map(|i| colorspace_name(ctx, i))
            .collect()
    }

    /// Creates a processor from `src` to `dst`, or `None` if it cannot be built.
    pub fn create_processor(src: &str, dst: &str) -> Option<RgbaProcessor> {
        let ctx = Self::context()?;
        let (Ok(c_src), Ok(c_dst)) = (CString::new(src), CString::new(dst)) else {
            tracing::error!(src, dst, "color space names contain NUL bytes");
            return None;
        };
        let ptr = unsafe { ocio_create_processor(ctx.as_ptr(), c_src.as_ptr(), c_dst.as_ptr()) };
        match NonNull::new(ptr) {
            Some(ptr) => Some(RgbaProcessor { ptr }),
            None => {
                tracing::error!("failed to create processor for {} -> {}", src, dst);
                None
            }
        }
    }
}

fn colorspace_name(ctx: NonNull<OcioContext>, index: c_int) -> Option<String> {
    let ptr = unsafe { ocio_get_colorspace_name(ctx.as_ptr(), index) };
    if ptr.is_null() {
        return None;
    }
    let name = unsafe { CStr::from_ptr(ptr) };
    name.to_str().ok().map(str::to_string)
}

/// Owned processor handle, destroyed on drop.
pub struct RgbaProcessor {
    ptr: NonNull<OcioProcessor>,
}

// Applying only reads the processor.
unsafe impl Send for RgbaProcessor {}
unsafe impl Sync for RgbaProcessor {}

impl Drop for RgbaProcessor {
    fn drop(&mut self) {
        unsafe { ocio_destroy_processor(self.ptr.as_ptr()) }
    }
}

impl RgbaProcessor {
    /// Transforms interleaved RGBA floats in place.
    ///
    /// A trailing partial pixel is left untouched.
    pub fn apply_rgba_f32(&self, pixels: &mut [f32]) {
        let max_chunk = (c_int::MAX as usize).saturating_mul(4);
        let whole = pixels.len() - pixels.len() % 4;
        for chunk in pixels[..whole].chunks_mut(max_chunk) {
            let count = (chunk.len() / 4) as c_int;
            unsafe { ocio_apply_transform(self.ptr.as_ptr(), chunk.as_mut_ptr(), count) }
        }
    }

    /// Transforms 8-bit RGBA, returning a new buffer.
    ///
    /// Values are normalized to `[0, 1]`, transformed, then rounded and
    /// clamped back to 8 bits.
    pub fn apply_rgba(&self, pixels: &[u8]) -> Vec<u8> {
        let mut floats: Vec<f32> = pixels.iter().map(|&b| b as f32 / 255.0).collect();
        self.apply_rgba_f32(&mut floats);
        floats
            .into_iter()
            .map(|f| (f * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect()
    }
}
