//! Error types for config loading and processor construction.
//!
//! Every fallible operation in this crate returns [`OcioResult`]. Callers
//! that cannot carry rich errors (the C shim) collapse these into sentinels.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for OCIO operations.
pub type OcioResult<T> = Result<T, OcioError>;

/// Errors that can occur during OCIO operations.
#[derive(Debug, Error)]
pub enum OcioError {
    /// I/O error reading config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The environment does not name a config.
    #[error("environment variable {var} is not set")]
    EnvNotSet {
        /// Name of the variable that was consulted.
        var: &'static str,
    },

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// `ocio://` URI that names no built-in config.
    #[error("unknown built-in config: {uri}")]
    UnknownBuiltinConfig {
        /// The URI as given.
        uri: String,
    },

    /// Invalid config version.
    #[error("unsupported config version: {version} (supported: 1.x, 2.x)")]
    UnsupportedVersion {
        /// Version string from config.
        version: String,
    },

    /// Color space not found in config.
    #[error("color space not found: {name}")]
    ColorSpaceNotFound {
        /// Name of the missing color space.
        name: String,
    },

    /// Two color spaces share a name or alias.
    #[error("duplicate color space name: {name}")]
    DuplicateColorSpace {
        /// The clashing name.
        name: String,
    },

    /// Role points at a color space the config does not define.
    #[error("role '{role}' refers to unknown color space '{colorspace}'")]
    RoleTargetMissing {
        /// Role name.
        role: String,
        /// Color space the role maps to.
        colorspace: String,
    },

    /// Invalid transform definition.
    #[error("invalid transform: {reason}")]
    InvalidTransform {
        /// Description of what's wrong.
        reason: String,
    },

    /// Transform that parses but cannot be evaluated on the CPU path.
    #[error("unsupported transform: {name}")]
    UnsupportedTransform {
        /// Transform kind or built-in style.
        name: String,
    },

    /// Circular reference detected in transforms.
    #[error("circular reference detected: {chain}")]
    CircularReference {
        /// Description of the circular chain.
        chain: String,
    },

    /// Scene and display reference spaces cannot be bridged.
    #[error("no view transform available to convert from {from} to {to} reference")]
    MissingViewTransform {
        /// Source reference space.
        from: &'static str,
        /// Destination reference space.
        to: &'static str,
    },

    /// Buffer does not match the requested image layout.
    #[error("invalid image description: {reason}")]
    InvalidImage {
        /// Description of the mismatch.
        reason: String,
    },

    /// Built-in pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Transform processing error.
    #[error("transform error: {0}")]
    Transform(String),
}
