//! Color space definition and properties.
//!
//! A color space defines how to convert to and from its reference space,
//! plus the metadata a host shows in menus (family, description, aliases).
//!
//! # Example
//!
//! ```
//! use ocio_core::{ColorSpace, Encoding, ReferenceSpace};
//!
//! let cs = ColorSpace::builder("ACEScg")
//!     .alias("lin_ap1")
//!     .encoding(Encoding::SceneLinear)
//!     .reference_space(ReferenceSpace::Scene)
//!     .build();
//!
//! assert!(cs.matches_name("LIN_AP1"));
//! ```

use crate::transform::Transform;

/// Color encoding type, from the v2 `encoding` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Scene-referred linear.
    SceneLinear,
    /// Display-referred linear.
    DisplayLinear,
    /// Logarithmic encoding.
    Log,
    /// OETF-encoded (sRGB, Rec.709, etc.).
    Sdr,
    /// HDR display encoding (PQ, HLG).
    Hdr,
    /// Non-color data (normals, masks).
    Data,
    /// Unknown/unspecified encoding.
    #[default]
    Unknown,
}

impl Encoding {
    /// Parses encoding from OCIO config string.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "scene-linear" | "scene_linear" => Self::SceneLinear,
            "display-linear" | "display_linear" => Self::DisplayLinear,
            "log" => Self::Log,
            "sdr-video" | "sdr_video" => Self::Sdr,
            "hdr-video" | "hdr_video" => Self::Hdr,
            "data" => Self::Data,
            _ => Self::Unknown,
        }
    }
}

/// Which reference space a color space converts through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceSpace {
    /// Scene-referred (`colorspaces` section).
    #[default]
    Scene,
    /// Display-referred (`display_colorspaces` section).
    Display,
}

impl ReferenceSpace {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Scene => "scene",
            Self::Display => "display",
        }
    }
}

/// Color space definition.
#[derive(Debug, Clone)]
pub struct ColorSpace {
    name: String,
    aliases: Vec<String>,
    family: String,
    description: String,
    encoding: Encoding,
    is_data: bool,
    reference_space: ReferenceSpace,
    to_reference: Option<Transform>,
    from_reference: Option<Transform>,
}

impl ColorSpace {
    /// Creates a scene-referred color space with no transforms.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            family: String::new(),
            description: String::new(),
            encoding: Encoding::default(),
            is_data: false,
            reference_space: ReferenceSpace::default(),
            to_reference: None,
            from_reference: None,
        }
    }

    /// Creates a builder for constructing color spaces.
    #[inline]
    pub fn builder(name: impl Into<String>) -> ColorSpaceBuilder {
        ColorSpaceBuilder {
            inner: ColorSpace::new(name),
        }
    }

    /// Returns the color space name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all aliases.
    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the family, `/`-separated in most configs.
    #[inline]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the encoding type.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Checks if this is a data (non-color) space.
    #[inline]
    pub fn is_data(&self) -> bool {
        self.is_data
    }

    /// Returns the reference space this color space belongs to.
    #[inline]
    pub fn reference_space(&self) -> ReferenceSpace {
        self.reference_space
    }

    /// Returns the transform to reference space.
    #[inline]
    pub fn to_reference(&self) -> Option<&Transform> {
        self.to_reference.as_ref()
    }

    /// Returns the transform from reference space.
    #[inline]
    pub fn from_reference(&self) -> Option<&Transform> {
        self.from_reference.as_ref()
    }

    /// Checks if a name or alias matches, ignoring ASCII case.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Builder for constructing color spaces.
#[derive(Debug)]
pub struct ColorSpaceBuilder {
    inner: ColorSpace,
}

impl ColorSpaceBuilder {
    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.inner.aliases.push(alias.into());
        self
    }

    /// Sets the family.
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.inner.family = family.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.inner.description = desc.into();
        self
    }

    /// Sets the encoding.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.inner.encoding = encoding;
        self
    }

    /// Marks as data space.
    pub fn is_data(mut self, is_data: bool) -> Self {
        self.inner.is_data = is_data;
        self
    }

    /// Sets the reference space.
    pub fn reference_space(mut self, space: ReferenceSpace) -> Self {
        self.inner.reference_space = space;
        self
    }

    /// Sets the transform to reference.
    pub fn to_reference(mut self, transform: Transform) -> Self {
        self.inner.to_reference = Some(transform);
        self
    }

    /// Sets the transform from reference.
    pub fn from_reference(mut self, transform: Transform) -> Self {
        self.inner.from_reference = Some(transform);
        self
    }

    /// Builds the color space.
    pub fn build(self) -> ColorSpace {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let cs = ColorSpace::builder("Raw")
            .family("Utility")
            .description("non-color")
            .is_data(true)
            .reference_space(ReferenceSpace::Display)
            .build();
        assert_eq!(cs.name(), "Raw");
        assert_eq!(cs.family(), "Utility");
        assert!(cs.is_data());
        assert_eq!(cs.reference_space(), ReferenceSpace::Display);
        assert!(cs.to_reference().is_none());
    }

    #[test]
    fn name_match_ignores_case() {
        let cs = ColorSpace::builder("sRGB - Texture").alias("srgb_tx").build();
        assert!(cs.matches_name("srgb - texture"));
        assert!(cs.matches_name("SRGB_TX"));
        assert!(!cs.matches_name("srgb"));
    }

    #[test]
    fn encoding_parse() {
        assert_eq!(Encoding::parse("scene-linear"), Encoding::SceneLinear);
        assert_eq!(Encoding::parse("SDR-VIDEO"), Encoding::Sdr);
        assert_eq!(Encoding::parse("mystery"), Encoding::Unknown);
    }
}
