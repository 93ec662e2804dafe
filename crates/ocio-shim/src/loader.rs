//! Loads the built shim as a dynamic library and resolves its exports by
//! name, the way a foreign host does.

use std::ffi::{OsStr, c_char, c_int};

use libloading::Library;

use crate::error::ShimResult;
use crate::handle::{OcioContext, OcioProcessor};

/// `ocio_create_context`
pub type FnCreateContext = unsafe extern "C" fn() -> *mut OcioContext;
/// `ocio_destroy_context`
pub type FnDestroyContext = unsafe extern "C" fn(*mut OcioContext);
/// `ocio_get_num_colorspaces`
pub type FnGetNumColorspaces = unsafe extern "C" fn(*mut OcioContext) -> c_int;
/// `ocio_get_colorspace_name`
pub type FnGetColorspaceName = unsafe extern "C" fn(*mut OcioContext, c_int) -> *const c_char;
/// `ocio_create_processor`
pub type FnCreateProcessor =
    unsafe extern "C" fn(*mut OcioContext, *const c_char, *const c_char) -> *mut OcioProcessor;
/// `ocio_destroy_processor`
pub type FnDestroyProcessor = unsafe extern "C" fn(*mut OcioProcessor);
/// `ocio_apply_transform`
pub type FnApplyTransform = unsafe extern "C" fn(*mut OcioProcessor, *mut f32, c_int);

/// Every export of the shim, resolved up front.
#[derive(Clone, Copy)]
pub struct ShimApi {
    /// Creates a context from `OCIO`.
    pub create_context: FnCreateContext,
    /// Frees a context.
    pub destroy_context: FnDestroyContext,
    /// Counts active color spaces.
    pub get_num_colorspaces: FnGetNumColorspaces,
    /// Names an active color space.
    pub get_colorspace_name: FnGetColorspaceName,
    /// Builds a processor.
    pub create_processor: FnCreateProcessor,
    /// Frees a processor.
    pub destroy_processor: FnDestroyProcessor,
    /// Transforms RGBA pixels in place.
    pub apply_transform: FnApplyTransform,
}

/// Symbol names in the order of [`ShimApi`]'s fields.
pub const SYMBOLS: [&str; 7] = [
    "ocio_create_context",
    "ocio_destroy_context",
    "ocio_get_num_colorspaces",
    "ocio_get_colorspace_name",
    "ocio_create_processor",
    "ocio_destroy_processor",
    "ocio_apply_transform",
];

/// A loaded shim library with its resolved exports.
///
/// The function pointers in [`api()`](Self::api) are valid while this value
/// is alive.
pub struct ShimLibrary {
    api: ShimApi,
    _lib: Library,
}

impl ShimLibrary {
    /// Loads the library at `path` and resolves all seven exports.
    ///
    /// Fails if the file cannot be loaded or any symbol is missing.
    ///
    /// # Safety
    /// `path` must name a build of this shim. Loading runs the library's
    /// initializers, and the resolved symbols are called with the signatures
    /// above.
    pub unsafe fn open(path: impl AsRef<OsStr>) -> ShimResult<Self> {
        let lib = unsafe { Library::new(path.as_ref()) }?;
        let api = unsafe {
            ShimApi {
                create_context: *lib.get::<FnCreateContext>(b"ocio_create_context\0")?,
                destroy_context: *lib.get::<FnDestroyContext>(b"ocio_destroy_context\0")?,
                get_num_colorspaces: *lib.get::<FnGetNumColorspaces>(b"ocio_get_num_colorspaces\0")?,
                get_colorspace_name: *lib.get::<FnGetColorspaceName>(b"ocio_get_colorspace_name\0")?,
                create_processor: *lib.get::<FnCreateProcessor>(b"ocio_create_processor\0")?,
                destroy_processor: *lib.get::<FnDestroyProcessor>(b"ocio_destroy_processor\0")?,
                apply_transform: *lib.get::<FnApplyTransform>(b"ocio_apply_transform\0")?,
            }
        };
        tracing::debug!(path = ?path.as_ref(), "loaded OCIO shim library");
        Ok(Self { api, _lib: lib })
    }

    /// The resolved exports.
    pub fn api(&self) -> &ShimApi {
        &self.api
    }
}

impl ShimApi {
    /// The exports linked into this binary.
    pub fn linked() -> Self {
        Self {
            create_context: crate::exports::ocio_create_context,
            destroy_context: crate::exports::ocio_destroy_context,
            get_num_colorspaces: crate::exports::ocio_get_num_colorspaces,
            get_colorspace_name: crate::exports::ocio_get_colorspace_name,
            create_processor: crate::exports::ocio_create_processor,
            destroy_processor: crate::exports::ocio_destroy_processor,
            apply_transform: crate::exports::ocio_apply_transform,
        }
    }
}

/// Platform file name of the shim library, e.g. `libshim.so`.
pub fn library_filename() -> std::ffi::OsString {
    libloading::library_filename("shim")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_fails() {
        let result = unsafe { ShimLibrary::open("/no/such/dir/libshim.so") };
        assert!(matches!(result, Err(crate::ShimError::Load(_))));
    }

    #[test]
    fn linked_api_tolerates_null() {
        let api = ShimApi::linked();
        unsafe {
            assert_eq!((api.get_num_colorspaces)(std::ptr::null_mut()), 0);
            (api.destroy_context)(std::ptr::null_mut());
            (api.destroy_processor)(std::ptr::null_mut());
        }
    }
}
