//! Exported C functions.
//!
//! Every function tolerates null handles and never unwinds: failures are
//! logged through `tracing` and reported as null, 0, or a no-op.

use std::ffi::{c_char, c_int};
use std::ptr;
use std::slice;

use ocio_core::{Config, PackedImageDesc};

use crate::error::ShimResult;
use crate::handle::{ContextInner, OcioContext, OcioProcessor, ProcessorInner, guard, read_name};

/// Create a context from the config named by the `OCIO` environment variable.
///
/// `OCIO` may be a path to a `.ocio` file or an `ocio://` URI.
/// `OCIO_INACTIVE_COLORSPACES` hides color spaces from enumeration.
///
/// # Returns
/// A context to free with [`ocio_destroy_context()`], or null if no config
/// could be loaded (including when `OCIO` is unset).
#[unsafe(no_mangle)]
pub extern "C" fn ocio_create_context() -> *mut OcioContext {
    guard("ocio_create_context", ptr::null_mut(), || {
        match Config::from_env().map(ContextInner::new) {
            Ok(inner) => {
                tracing::debug!(colorspaces = inner.num_colorspaces(), "OCIO context created");
                inner.into_raw()
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create OCIO context");
                ptr::null_mut()
            }
        }
    })
}

/// Free a context. Null is ignored.
///
/// Processors created from it remain valid.
///
/// # Safety
/// - `ctx` must be null or a pointer returned by [`ocio_create_context()`]
/// - `ctx` must not have been freed already
/// - Names returned by [`ocio_get_colorspace_name()`] for `ctx` become invalid
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ocio_destroy_context(ctx: *mut OcioContext) {
    guard("ocio_destroy_context", (), || unsafe { ContextInner::free(ctx) })
}

/// Number of active color spaces, or 0 for a null context.
///
/// # Safety
/// - `ctx` must be null or a live context
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ocio_get_num_colorspaces(ctx: *mut OcioContext) -> c_int {
    guard("ocio_get_num_colorspaces", 0, || {
        match unsafe { ContextInner::from_ptr(ctx) } {
            Some(inner) => c_int::try_from(inner.num_colorspaces()).unwrap_or(c_int::MAX),
            None => 0,
        }
    })
}

/// Name of the active color space at `index`.
///
/// Indices follow the config file: color spaces in the order they are
/// declared, with the `colorspaces` and `display_colorspaces` sections
/// taken in the order they appear. A name containing a NUL byte is cut at
/// that byte.
///
/// # Returns
/// A NUL-terminated name owned by the context, the empty string for an
/// out-of-range index, or null for a null context. The pointer is valid
/// until the context is destroyed.
///
/// # Safety
/// - `ctx` must be null or a live context
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ocio_get_colorspace_name(ctx: *mut OcioContext, index: c_int) -> *const c_char {
    guard("ocio_get_colorspace_name", ptr::null(), || {
        match unsafe { ContextInner::from_ptr(ctx) } {
            Some(inner) => inner.colorspace_name(index).as_ptr(),
            None => ptr::null(),
        }
    })
}

/// Create a processor converting from `src` to `dst`.
///
/// Names may be color space names, aliases or roles, matched ignoring ASCII
/// case.
///
/// # Returns
/// A processor to free with [`ocio_destroy_processor()`], or null if either
/// name is unknown or the conversion cannot be built.
///
/// # Safety
/// - `ctx` must be null or a live context
/// - `src` and `dst` must be null or NUL-terminated strings
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ocio_create_processor(
    ctx: *mut OcioContext,
    src: *const c_char,
    dst: *const c_char,
) -> *mut OcioProcessor {
    guard("ocio_create_processor", ptr::null_mut(), || {
        let Some(inner) = (unsafe { ContextInner::from_ptr(ctx) }) else {
            return ptr::null_mut();
        };
        match unsafe { build_processor(inner, src, dst) } {
            Ok(processor) => processor.into_raw(),
            Err(e) => {
                tracing::error!(error = %e, "failed to create OCIO processor");
                ptr::null_mut()
            }
        }
    })
}

/// # Safety
/// `src` and `dst` must be null or NUL-terminated strings.
unsafe fn build_processor(
    ctx: &ContextInner,
    src: *const c_char,
    dst: *const c_char,
) -> ShimResult<ProcessorInner> {
    let src = unsafe { read_name(src, "src") }?;
    let dst = unsafe { read_name(dst, "dst") }?;
    let inner = ProcessorInner::new(ctx.config.processor(src, dst)?);
    tracing::debug!(
        src,
        dst,
        identity = inner.processor.is_identity(),
        ops = inner.cpu.num_ops(),
        "OCIO processor created"
    );
    Ok(inner)
}

/// Free a processor. Null is ignored.
///
/// # Safety
/// - `proc_` must be null or a pointer returned by [`ocio_create_processor()`]
/// - `proc_` must not have been freed already
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ocio_destroy_processor(proc_: *mut OcioProcessor) {
    guard("ocio_destroy_processor", (), || unsafe { ProcessorInner::free(proc_) })
}

/// Transform `count` RGBA pixels in place.
///
/// Does nothing for a null processor, a null buffer, or `count <= 0`.
///
/// # Safety
/// - `proc_` must be null or a live processor
/// - `pixels` must be null or valid for reads and writes of `count * 4`
///   floats, not aliased for the duration of the call
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ocio_apply_transform(proc_: *mut OcioProcessor, pixels: *mut f32, count: c_int) {
    guard("ocio_apply_transform", (), || {
        let Some(inner) = (unsafe { ProcessorInner::from_ptr(proc_) }) else {
            return;
        };
        if pixels.is_null() || count <= 0 {
            return;
        }
        // count > 0 was checked above.
        let width = count as usize;
        let Some(len) = width.checked_mul(4) else {
            return;
        };
        let data = unsafe { slice::from_raw_parts_mut(pixels, len) };
        match PackedImageDesc::new(data, width, 1, 4) {
            Ok(mut image) => inner.cpu.apply(&mut image),
            Err(e) => tracing::error!(error = %e, "rejected pixel buffer"),
        }
    })
}
