//! C-linkage shim over `ocio-core`.
//!
//! Built as `shim` (a `cdylib`), this library exports seven functions a host
//! can resolve by name at runtime:
//!
//! ```c
//! OcioContext*   ocio_create_context(void);
//! void           ocio_destroy_context(OcioContext*);
//! int            ocio_get_num_colorspaces(OcioContext*);
//! const char*    ocio_get_colorspace_name(OcioContext*, int index);
//! OcioProcessor* ocio_create_processor(OcioContext*, const char* src, const char* dst);
//! void           ocio_destroy_processor(OcioProcessor*);
//! void           ocio_apply_transform(OcioProcessor*, float* rgba, int count);
//! ```
//!
//! The config comes from the `OCIO` environment variable. Every entry point
//! accepts null handles, reports failure as null or 0, and never lets a
//! panic cross into the caller.
//!
//! Rust hosts can use [`host`] instead of the raw functions, or
//! [`loader`] to resolve them from the built library at runtime.

#![warn(missing_docs)]

mod error;
mod exports;
mod handle;

pub mod host;
pub mod loader;

pub use error::{ShimError, ShimResult};
pub use exports::{
    ocio_apply_transform, ocio_create_context, ocio_create_processor, ocio_destroy_context,
    ocio_destroy_processor, ocio_get_colorspace_name, ocio_get_num_colorspaces,
};
pub use handle::{OcioContext, OcioProcessor};
