//! Opaque handle types and their Rust-side contents.
//!
//! A handle is a boxed inner struct leaked to the caller as a pointer to a
//! zero-sized `#[repr(C)]` type. The caller owns it until the matching
//! destroy call.

use std::ffi::{CStr, CString, c_char, c_int};
use std::panic::{self, AssertUnwindSafe};

use ocio_core::{Config, CpuProcessor, Processor};

use crate::error::{ShimError, ShimResult};

/// Opaque context handle: a loaded config.
///
/// - Created with [`ocio_create_context()`](crate::ocio_create_context)
/// - Freed with [`ocio_destroy_context()`](crate::ocio_destroy_context)
#[repr(C)]
pub struct OcioContext {
    _private: [u8; 0],
}

/// Opaque processor handle: a compiled conversion between two color spaces.
///
/// Owns everything it needs, so it stays usable after its context is
/// destroyed.
#[repr(C)]
pub struct OcioProcessor {
    _private: [u8; 0],
}

pub(crate) struct ContextInner {
    pub(crate) config: Config,
    /// Active names in enumeration order, NUL-terminated for the caller.
    names: Vec<CString>,
}

impl ContextInner {
    pub(crate) fn new(config: Config) -> Self {
        let names = config.active_colorspace_names().map(c_name).collect();
        Self { config, names }
    }

    #[inline]
    pub(crate) fn num_colorspaces(&self) -> usize {
        self.names.len()
    }

    /// Borrowed name at `index`; empty when out of range.
    pub(crate) fn colorspace_name(&self, index: c_int) -> &CStr {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.names.get(i))
            .map_or(c"", CString::as_c_str)
    }

    pub(crate) fn into_raw(self) -> *mut OcioContext {
        Box::into_raw(Box::new(self)) as *mut OcioContext
    }

    /// # Safety
    /// `ptr` must be null or a live pointer from [`ContextInner::into_raw`].
    pub(crate) unsafe fn from_ptr<'a>(ptr: *mut OcioContext) -> Option<&'a ContextInner> {
        unsafe { (ptr as *const ContextInner).as_ref() }
    }

    /// # Safety
    /// `ptr` must be null or a live pointer from [`ContextInner::into_raw`],
    /// not used again afterwards.
    pub(crate) unsafe fn free(ptr: *mut OcioContext) {
        if !ptr.is_null() {
            unsafe { drop(Box::from_raw(ptr as *mut ContextInner)) };
        }
    }
}

pub(crate) struct ProcessorInner {
    pub(crate) processor: Processor,
    pub(crate) cpu: CpuProcessor,
}

impl ProcessorInner {
    pub(crate) fn new(processor: Processor) -> Self {
        let cpu = processor.default_cpu_processor();
        Self { processor, cpu }
    }

    pub(crate) fn into_raw(self) -> *mut OcioProcessor {
        Box::into_raw(Box::new(self)) as *mut OcioProcessor
    }

    /// # Safety
    /// `ptr` must be null or a live pointer from [`ProcessorInner::into_raw`].
    pub(crate) unsafe fn from_ptr<'a>(ptr: *mut OcioProcessor) -> Option<&'a ProcessorInner> {
        unsafe { (ptr as *const ProcessorInner).as_ref() }
    }

    /// # Safety
    /// `ptr` must be null or a live pointer from [`ProcessorInner::into_raw`],
    /// not used again afterwards.
    pub(crate) unsafe fn free(ptr: *mut OcioProcessor) {
        if !ptr.is_null() {
            unsafe { drop(Box::from_raw(ptr as *mut ProcessorInner)) };
        }
    }
}

/// Converts a name for the caller, cut at the first NUL as a C reader sees it.
fn c_name(name: &str) -> CString {
    let head = name.split('\0').next().unwrap_or_default();
    if head.len() != name.len() {
        tracing::warn!(name, "color space name contains a NUL byte; truncated");
    }
    CString::new(head).unwrap_or_default()
}

/// Reads a caller-supplied C string as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn read_name<'a>(ptr: *const c_char, what: &'static str) -> ShimResult<&'a str> {
    if ptr.is_null() {
        return Err(ShimError::NullArgument { what });
    }
    let name = unsafe { CStr::from_ptr(ptr) };
    name.to_str().map_err(|_| ShimError::InvalidUtf8 { what })
}

/// Runs `f`, turning a panic into `fallback` so nothing unwinds into C.
pub(crate) fn guard<T>(export: &'static str, fallback: T, f: impl FnOnce() -> T) -> T {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        tracing::error!(export, "panic caught at the C boundary");
        fallback
    })
}
