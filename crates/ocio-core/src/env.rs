//! Environment lookup for [`Config::from_env`](crate::Config::from_env).
//!
//! Variables are read through [`EnvSource`] so a config can be built from
//! an explicit map in tests instead of the process environment.

use std::collections::HashMap;
use std::env;

use crate::error::{OcioError, OcioResult};

/// Variable naming the config file or `ocio://` URI.
pub const OCIO_ENV: &str = "OCIO";

/// Variable overriding the config's `inactive_colorspaces`.
pub const INACTIVE_COLORSPACES_ENV: &str = "OCIO_INACTIVE_COLORSPACES";

/// Source of environment variables.
pub trait EnvSource {
    /// Returns the value of `name`, if set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Config selection read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// Config file path or `ocio://` URI.
    pub location: String,
    /// Inactive color space override, when the variable is set and non-empty.
    pub inactive_colorspaces: Option<Vec<String>>,
}

impl EnvConfig {
    /// Reads the config selection.
    ///
    /// An unset or blank `OCIO` is an error: no config is implied.
    pub fn read(env: &impl EnvSource) -> OcioResult<Self> {
        let location = env
            .var(OCIO_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(OcioError::EnvNotSet { var: OCIO_ENV })?;

        let inactive_colorspaces = env
            .var(INACTIVE_COLORSPACES_ENV)
            .map(|v| split_list(&v))
            .filter(|list| !list.is_empty());

        Ok(Self {
            location,
            inactive_colorspaces,
        })
    }

    /// Returns true if the location names a built-in config.
    #[inline]
    pub fn is_builtin(&self) -> bool {
        self.location.starts_with("ocio://")
    }
}

/// Splits a comma or colon separated name list, dropping blanks.
pub(crate) fn split_list(s: &str) -> Vec<String> {
    s.split([',', ':'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_ocio_is_error() {
        let err = EnvConfig::read(&env(&[])).unwrap_err();
        assert!(matches!(err, OcioError::EnvNotSet { var: "OCIO" }));
        assert!(EnvConfig::read(&env(&[("OCIO", "  ")])).is_err());
    }

    #[test]
    fn reads_location_and_inactive() {
        let cfg = EnvConfig::read(&env(&[
            ("OCIO", "/studio/config.ocio"),
            ("OCIO_INACTIVE_COLORSPACES", "Raw, ACEScct,,"),
        ]))
        .unwrap();
        assert_eq!(cfg.location, "/studio/config.ocio");
        assert!(!cfg.is_builtin());
        assert_eq!(
            cfg.inactive_colorspaces,
            Some(vec!["Raw".to_string(), "ACEScct".to_string()])
        );
    }

    #[test]
    fn blank_inactive_is_no_override() {
        let cfg = EnvConfig::read(&env(&[
            ("OCIO", "ocio://default"),
            ("OCIO_INACTIVE_COLORSPACES", " , "),
        ]))
        .unwrap();
        assert!(cfg.is_builtin());
        assert_eq!(cfg.inactive_colorspaces, None);
    }
}
