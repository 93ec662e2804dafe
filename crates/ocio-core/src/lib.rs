//! OpenColorIO-compatible config loading and CPU color processing.
//!
//! This crate covers the part of OCIO a host needs to convert pixels
//! between named color spaces:
//! - Load `.ocio` configs from `$OCIO`, a file, or a built-in `ocio://` URI
//! - Enumerate active color spaces and resolve names, aliases and roles
//! - Build a [`Processor`] between two color spaces
//! - Apply its optimized [`CpuProcessor`] to packed float images
//!
//! # Quick Start
//!
//! ```
//! use ocio_core::{Config, PackedImageDesc};
//!
//! let config = Config::from_location("ocio://default").unwrap();
//!
//! // Access by role name
//! let linear = config.colorspace("scene_linear").unwrap();
//! assert_eq!(linear.name(), "ACEScg");
//!
//! let processor = config.processor("ACEScg", "sRGB - Display").unwrap();
//! let cpu = processor.default_cpu_processor();
//!
//! let mut pixels = vec![0.18_f32, 0.18, 0.18, 1.0];
//! let mut image = PackedImageDesc::new(&mut pixels, 1, 1, 4).unwrap();
//! cpu.apply(&mut image);
//! ```
//!
//! # Loading From The Environment
//!
//! ```ignore
//! use ocio_core::Config;
//!
//! // $OCIO names a file or ocio:// URI; unset is an error.
//! let config = Config::from_env()?;
//! for name in config.active_colorspace_names() {
//!     println!("{name}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod colorspace;
mod config;
mod cpu;
mod error;
mod image;
mod processor;
mod role;
mod transform;

pub mod builtin;
pub mod env;

// Re-exports
pub use colorspace::{ColorSpace, ColorSpaceBuilder, Encoding, ReferenceSpace};
pub use config::{Config, ConfigVersion, ViewTransform};
pub use cpu::CpuProcessor;
pub use env::{EnvSource, ProcessEnv};
pub use error::{OcioError, OcioResult};
pub use image::PackedImageDesc;
pub use processor::{LogParams, OptimizationLevel, Processor, ProcessorOp};
pub use role::{names as role_names, Roles};
pub use transform::{
    BuiltinTransform, CdlStyle, CdlTransform, ColorSpaceTransform, ExponentTransform,
    ExponentWithLinearTransform, FileTransform, GroupTransform, LogAffineTransform,
    LogCameraTransform, LogTransform, MatrixTransform, NegativeStyle, RangeStyle, RangeTransform,
    Transform, TransformDirection, UnsupportedTransform,
};
