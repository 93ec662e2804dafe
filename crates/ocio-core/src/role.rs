//! Color space roles.
//!
//! Roles name a color space by purpose (`scene_linear`, `data`, ...) so
//! hosts can address spaces without knowing a config's naming. Role names
//! are matched ignoring ASCII case, like color space names.

/// Standard OCIO role names.
pub mod names {
    /// Default input color space.
    pub const DEFAULT: &str = "default";
    /// Non-color data (normals, masks).
    pub const DATA: &str = "data";
    /// Scene-referred linear working space.
    pub const SCENE_LINEAR: &str = "scene_linear";
    /// ACES interchange scene-referred.
    pub const ACES_INTERCHANGE: &str = "aces_interchange";
    /// CIE XYZ interchange (D65).
    pub const CIE_XYZ_D65_INTERCHANGE: &str = "cie_xyz_d65_interchange";
}

/// Role to color space mapping, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Roles {
    mapping: Vec<(String, String)>,
}

impl Roles {
    /// Creates an empty roles mapping.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a role mapping, replacing an existing one of the same name.
    pub fn define(&mut self, role: impl Into<String>, colorspace: impl Into<String>) {
        let role = role.into();
        let colorspace = colorspace.into();
        match self.mapping.iter_mut().find(|(r, _)| r.eq_ignore_ascii_case(&role)) {
            Some(entry) => entry.1 = colorspace,
            None => self.mapping.push((role, colorspace)),
        }
    }

    /// Gets the color space name for a role.
    pub fn get(&self, role: &str) -> Option<&str> {
        self.mapping
            .iter()
            .find(|(r, _)| r.eq_ignore_ascii_case(role))
            .map(|(_, cs)| cs.as_str())
    }

    /// Returns all defined roles.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mapping.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of defined roles.
    #[inline]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Checks if no roles are defined.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
