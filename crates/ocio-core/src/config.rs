//! OCIO configuration file parsing and management.
//!
//! This module handles loading `.ocio` configuration files in YAML format
//! (v1 and v2), enumerating their active color spaces, and building
//! processors between any two color spaces.
//!
//! # Example
//!
//! ```ignore
//! use ocio_core::Config;
//!
//! // Load from $OCIO
//! let config = Config::from_env()?;
//!
//! // Enumerate active color spaces
//! for i in 0..config.num_colorspaces() as i32 {
//!     println!("{}", config.colorspace_name_by_index(i));
//! }
//!
//! // Create processor
//! let proc = config.processor("ACEScg", "sRGB - Display")?;
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Deserialize;
use serde_yaml::Value;

use crate::builtin;
use crate::colorspace::{ColorSpace, Encoding, ReferenceSpace};
use crate::env::{EnvConfig, EnvSource, ProcessEnv};
use crate::error::{OcioError, OcioResult};
use crate::processor::Processor;
use crate::role::Roles;
use crate::transform::{Transform, TransformDirection};

/// OCIO writes verbatim tags (`!<MatrixTransform>`) that serde_yaml does
/// not map onto structs.
static VERBATIM_TAG: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"!<([A-Za-z][A-Za-z0-9_]*)>"));

/// Config format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigVersion {
    /// OCIO v1.x.
    #[default]
    V1,
    /// OCIO v2.x.
    V2,
}

/// View transform bridging the scene and display reference spaces.
#[derive(Debug, Clone)]
pub struct ViewTransform {
    name: String,
    description: String,
    to_scene_reference: Option<Transform>,
    from_scene_reference: Option<Transform>,
}

impl ViewTransform {
    /// Returns the view transform name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Scene reference to display reference.
    fn scene_to_display(&self) -> Option<Transform> {
        self.from_scene_reference
            .clone()
            .or_else(|| self.to_scene_reference.clone().map(Transform::inverse))
    }

    /// Display reference to scene reference.
    fn display_to_scene(&self) -> Option<Transform> {
        self.to_scene_reference
            .clone()
            .or_else(|| self.from_scene_reference.clone().map(Transform::inverse))
    }
}

/// OCIO configuration.
///
/// Immutable once loaded except for the inactive color space list.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    description: String,
    version: ConfigVersion,
    search_paths: Vec<PathBuf>,
    working_dir: PathBuf,
    /// Declaration order: the `colorspaces` and `display_colorspaces`
    /// sections in the order they appear in the file.
    colorspaces: Vec<ColorSpace>,
    roles: Roles,
    view_transforms: Vec<ViewTransform>,
    default_view_transform: Option<String>,
    inactive_colorspaces: Vec<String>,
    /// Indices into `colorspaces` that are not inactive.
    active: Vec<usize>,
}

impl Config {
    /// Loads the config named by the `OCIO` environment variable.
    pub fn from_env() -> OcioResult<Self> {
        Self::from_env_source(&ProcessEnv)
    }

    /// Loads the config named by `env`, applying `OCIO_INACTIVE_COLORSPACES`.
    pub fn from_env_source(env: &impl EnvSource) -> OcioResult<Self> {
        let env_config = EnvConfig::read(env)?;
        let mut config = Self::from_location(&env_config.location)?;
        if let Some(inactive) = env_config.inactive_colorspaces {
            config.set_inactive_colorspaces(inactive);
        }
        tracing::debug!(
            location = %env_config.location,
            colorspaces = config.num_colorspaces(),
            "loaded OCIO config from environment"
        );
        Ok(config)
    }

    /// Loads a config from a file path or an `ocio://` URI.
    pub fn from_location(location: &str) -> OcioResult<Self> {
        if location.starts_with("ocio://") {
            builtin::config(location)
        } else {
            Self::from_file(location)
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> OcioResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(OcioError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let working_dir = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_yaml_str(&content, working_dir)
    }

    /// Loads configuration from YAML string.
    pub fn from_yaml_str(yaml: &str, working_dir: PathBuf) -> OcioResult<Self> {
        let yaml = normalize_tags(yaml)?;
        let doc: Value = serde_yaml::from_str(&yaml)?;
        let display_first = display_section_first(&doc);
        let mut raw: RawConfig = serde_yaml::from_value(doc)?;
        raw.display_first = display_first;
        Self::from_raw(raw, working_dir)
    }

    fn from_raw(raw: RawConfig, working_dir: PathBuf) -> OcioResult<Self> {
        let version = parse_version(&raw.ocio_profile_version)?;

        let search_paths = match raw.search_path {
            Some(Value::String(s)) => s.split(':').map(String::from).collect(),
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        };

        let scene = (raw.colorspaces.unwrap_or_default(), ReferenceSpace::Scene);
        let display = (raw.display_colorspaces.unwrap_or_default(), ReferenceSpace::Display);
        let sections = if raw.display_first {
            [display, scene]
        } else {
            [scene, display]
        };
        let mut colorspaces = Vec::new();
        for (section, reference) in sections {
            for raw_cs in section {
                colorspaces.push(raw_cs.into_colorspace(reference)?);
            }
        }

        let mut roles = Roles::new();
        let mut role_pairs: Vec<_> = raw.roles.unwrap_or_default().into_iter().collect();
        role_pairs.sort();
        for (role, cs) in role_pairs {
            roles.define(role, cs);
        }

        let view_transforms = raw
            .view_transforms
            .unwrap_or_default()
            .into_iter()
            .map(RawViewTransform::into_view_transform)
            .collect::<OcioResult<Vec<_>>>()?;

        let mut config = Self {
            name: raw.name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            version,
            search_paths: search_paths
                .iter()
                .filter(|p| !p.is_empty())
                .map(|p| working_dir.join(p))
                .collect(),
            working_dir,
            colorspaces,
            roles,
            view_transforms,
            default_view_transform: raw.default_view_transform,
            inactive_colorspaces: Vec::new(),
            active: Vec::new(),
        };
        config.validate()?;

        let inactive = match raw.inactive_colorspaces {
            Some(Value::String(s)) => crate::env::split_list(&s),
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        };
        config.set_inactive_colorspaces(inactive);

        tracing::debug!(
            name = %config.name,
            colorspaces = config.colorspaces.len(),
            active = config.active.len(),
            "parsed OCIO config"
        );
        Ok(config)
    }

    fn validate(&self) -> OcioResult<()> {
        let mut seen = HashSet::new();
        for cs in &self.colorspaces {
            for name in std::iter::once(cs.name()).chain(cs.aliases().iter().map(String::as_str)) {
                if !seen.insert(name.to_ascii_lowercase()) {
                    return Err(OcioError::DuplicateColorSpace { name: name.to_string() });
                }
            }
        }

        for (role, target) in self.roles.iter() {
            if self.find_colorspace(target).is_none() {
                return Err(OcioError::RoleTargetMissing {
                    role: role.to_string(),
                    colorspace: target.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns config name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns config description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns config version.
    #[inline]
    pub fn version(&self) -> ConfigVersion {
        self.version
    }

    /// Returns the working directory.
    #[inline]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Returns all search paths.
    #[inline]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Returns all color spaces, active or not.
    #[inline]
    pub fn colorspaces(&self) -> &[ColorSpace] {
        &self.colorspaces
    }

    /// Returns the roles mapping.
    #[inline]
    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    /// Returns view transforms in file order.
    #[inline]
    pub fn view_transforms(&self) -> &[ViewTransform] {
        &self.view_transforms
    }

    /// Returns the inactive color space names.
    #[inline]
    pub fn inactive_colorspaces(&self) -> &[String] {
        &self.inactive_colorspaces
    }

    /// Replaces the inactive color space list.
    ///
    /// Inactive spaces are hidden from enumeration but stay usable by name.
    pub fn set_inactive_colorspaces(&mut self, names: Vec<String>) {
        for name in &names {
            if self.find_colorspace(name).is_none() {
                tracing::warn!(colorspace = %name, "inactive color space is not defined in the config");
            }
        }
        self.active = self
            .colorspaces
            .iter()
            .enumerate()
            .filter(|(_, cs)| !names.iter().any(|n| cs.matches_name(n)))
            .map(|(i, _)| i)
            .collect();
        self.inactive_colorspaces = names;
    }

    /// Number of active color spaces.
    #[inline]
    pub fn num_colorspaces(&self) -> usize {
        self.active.len()
    }

    /// Name of the active color space at `index`, or `""` when out of range.
    pub fn colorspace_name_by_index(&self, index: i32) -> &str {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.active.get(i))
            .and_then(|&i| self.colorspaces.get(i))
            .map_or("", ColorSpace::name)
    }

    /// Names of all active color spaces, in enumeration order.
    pub fn active_colorspace_names(&self) -> impl Iterator<Item = &str> {
        self.active
            .iter()
            .filter_map(|&i| self.colorspaces.get(i))
            .map(ColorSpace::name)
    }

    /// Gets a color space by name, alias or role.
    pub fn colorspace(&self, name: &str) -> Option<&ColorSpace> {
        self.find_colorspace(name)
            .or_else(|| self.roles.get(name).and_then(|cs| self.find_colorspace(cs)))
    }

    fn find_colorspace(&self, name: &str) -> Option<&ColorSpace> {
        self.colorspaces.iter().find(|cs| cs.matches_name(name))
    }

    fn require(&self, name: &str) -> OcioResult<&ColorSpace> {
        self.colorspace(name)
            .ok_or_else(|| OcioError::ColorSpaceNotFound { name: name.into() })
    }

    /// Creates a processor for conversion between two color spaces.
    ///
    /// Same space, or a data space on either side, gives the identity.
    pub fn processor(&self, src: &str, dst: &str) -> OcioResult<Processor> {
        let src_cs = self.require(src)?;
        let dst_cs = self.require(dst)?;

        if std::ptr::eq(src_cs, dst_cs) || src_cs.is_data() || dst_cs.is_data() {
            tracing::debug!(src, dst, "identity processor");
            return Ok(Processor::identity());
        }

        let mut stack = Vec::new();
        let chain = self.conversion_chain(src_cs, dst_cs, &mut stack)?;
        let processor = Processor::from_transform(&Transform::group(chain), TransformDirection::Forward)?;
        tracing::debug!(src, dst, ops = processor.ops().len(), "created processor");
        Ok(processor)
    }

    /// `src -> reference [-> other reference] -> dst`, fully resolved.
    fn conversion_chain(
        &self,
        src: &ColorSpace,
        dst: &ColorSpace,
        stack: &mut Vec<String>,
    ) -> OcioResult<Vec<Transform>> {
        let mut chain = Vec::new();

        if let Some(t) = to_reference(src) {
            chain.push(self.resolve(&t, stack)?);
        }

        if src.reference_space() != dst.reference_space() {
            let bridge = self.reference_bridge(src.reference_space(), dst.reference_space())?;
            chain.push(self.resolve(&bridge, stack)?);
        }

        if let Some(t) = from_reference(dst) {
            chain.push(self.resolve(&t, stack)?);
        }

        Ok(chain)
    }

    /// Expands `ColorSpaceTransform` references into concrete transforms.
    fn resolve(&self, transform: &Transform, stack: &mut Vec<String>) -> OcioResult<Transform> {
        match transform {
            Transform::ColorSpace(cst) => {
                let src = self.require(&cst.src)?;
                let dst = self.require(&cst.dst)?;

                let key = format!("{} -> {}", src.name(), dst.name());
                if stack.iter().any(|k| k.eq_ignore_ascii_case(&key)) {
                    stack.push(key);
                    return Err(OcioError::CircularReference { chain: stack.join(", ") });
                }

                let resolved = if std::ptr::eq(src, dst) || (cst.data_bypass && (src.is_data() || dst.is_data())) {
                    Transform::group(Vec::new())
                } else {
                    stack.push(key);
                    let chain = self.conversion_chain(src, dst, stack)?;
                    stack.pop();
                    Transform::group(chain)
                };

                Ok(match cst.direction {
                    TransformDirection::Forward => resolved,
                    TransformDirection::Inverse => resolved.inverse(),
                })
            }
            Transform::Group(group) => {
                let transforms = group
                    .transforms
                    .iter()
                    .map(|t| self.resolve(t, stack))
                    .collect::<OcioResult<Vec<_>>>()?;
                let resolved = Transform::group(transforms);
                Ok(match group.direction {
                    TransformDirection::Forward => resolved,
                    TransformDirection::Inverse => resolved.inverse(),
                })
            }
            other => Ok(other.clone()),
        }
    }

    /// Transform between the scene and display reference spaces.
    ///
    /// Uses the default view transform, else the first one with a scene side.
    fn reference_bridge(&self, from: ReferenceSpace, to: ReferenceSpace) -> OcioResult<Transform> {
        let pick = |vt: &ViewTransform| match (from, to) {
            (ReferenceSpace::Scene, ReferenceSpace::Display) => vt.scene_to_display(),
            _ => vt.display_to_scene(),
        };

        let default = self
            .default_view_transform
            .as_deref()
            .and_then(|name| self.view_transforms.iter().find(|vt| vt.name.eq_ignore_ascii_case(name)))
            .and_then(pick);

        default
            .or_else(|| self.view_transforms.iter().find_map(pick))
            .ok_or(OcioError::MissingViewTransform {
                from: from.as_str(),
                to: to.as_str(),
            })
    }
}

fn to_reference(cs: &ColorSpace) -> Option<Transform> {
    cs.to_reference()
        .cloned()
        .or_else(|| cs.from_reference().cloned().map(Transform::inverse))
}

fn from_reference(cs: &ColorSpace) -> Option<Transform> {
    cs.from_reference()
        .cloned()
        .or_else(|| cs.to_reference().cloned().map(Transform::inverse))
}

/// True when `display_colorspaces` comes before `colorspaces` in the file.
fn display_section_first(doc: &Value) -> bool {
    let Some(map) = doc.as_mapping() else {
        return false;
    };
    let position = |key: &str| map.keys().position(|k| k.as_str() == Some(key));
    match (position("display_colorspaces"), position("colorspaces")) {
        (Some(display), Some(scene)) => display < scene,
        _ => false,
    }
}

/// Rewrites OCIO verbatim tags: transform tags become local tags, structural
/// tags (`!<ColorSpace>`, `!<View>`, ...) are dropped.
fn normalize_tags(yaml: &str) -> OcioResult<String> {
    let re = VERBATIM_TAG.as_ref().map_err(|e| OcioError::Pattern(e.clone()))?;
    let out = re
        .replace_all(yaml, |caps: &Captures<'_>| {
            let kind = &caps[1];
            let is_transform = kind.ends_with("Transform") && kind != "ViewTransform" && kind != "NamedTransform";
            if is_transform {
                format!("!{kind}")
            } else {
                String::new()
            }
        })
        .into_owned();
    Ok(out)
}

fn parse_version(v: &Value) -> OcioResult<ConfigVersion> {
    let text = match v {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => format!("{other:?}"),
    };
    match text.split('.').next() {
        Some("1") => Ok(ConfigVersion::V1),
        Some("2") => Ok(ConfigVersion::V2),
        _ => Err(OcioError::UnsupportedVersion { version: text }),
    }
}

fn parse_transform(node: Option<Value>) -> OcioResult<Option<Transform>> {
    node.filter(|v| !v.is_null())
        .map(|v| Transform::from_yaml(&v))
        .transpose()
}

// ============================================================================
// Raw YAML structures for serde
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawConfig {
    ocio_profile_version: Value,
    name: Option<String>,
    description: Option<String>,
    search_path: Option<Value>,
    roles: Option<HashMap<String, String>>,
    inactive_colorspaces: Option<Value>,
    default_view_transform: Option<String>,
    view_transforms: Option<Vec<RawViewTransform>>,
    colorspaces: Option<Vec<RawColorSpace>>,
    display_colorspaces: Option<Vec<RawColorSpace>>,
    #[serde(skip)]
    display_first: bool,
}

#[derive(Debug, Deserialize)]
struct RawColorSpace {
    name: String,
    description: Option<String>,
    family: Option<String>,
    encoding: Option<String>,
    isdata: Option<bool>,
    aliases: Option<Vec<String>>,
    to_reference: Option<Value>,
    from_reference: Option<Value>,
    to_scene_reference: Option<Value>,
    from_scene_reference: Option<Value>,
    to_display_reference: Option<Value>,
    from_display_reference: Option<Value>,
}

impl RawColorSpace {
    fn into_colorspace(self, space: ReferenceSpace) -> OcioResult<ColorSpace> {
        // v1 configs only have the unqualified keys.
        let (to, from) = match space {
            ReferenceSpace::Scene => (self.to_scene_reference, self.from_scene_reference),
            ReferenceSpace::Display => (self.to_display_reference, self.from_display_reference),
        };
        let to = parse_transform(to.or(self.to_reference))?;
        let from = parse_transform(from.or(self.from_reference))?;

        let mut builder = ColorSpace::builder(self.name)
            .family(self.family.unwrap_or_default())
            .description(self.description.unwrap_or_default().trim().to_string())
            .is_data(self.isdata.unwrap_or(false))
            .reference_space(space);
        if let Some(encoding) = self.encoding {
            builder = builder.encoding(Encoding::parse(&encoding));
        }
        for alias in self.aliases.unwrap_or_default() {
            builder = builder.alias(alias);
        }
        if let Some(t) = to {
            builder = builder.to_reference(t);
        }
        if let Some(t) = from {
            builder = builder.from_reference(t);
        }
        Ok(builder.build())
    }
}

#[derive(Debug, Deserialize)]
struct RawViewTransform {
    name: String,
    description: Option<String>,
    to_scene_reference: Option<Value>,
    from_scene_reference: Option<Value>,
}

impl RawViewTransform {
    fn into_view_transform(self) -> OcioResult<ViewTransform> {
        Ok(ViewTransform {
            name: self.name,
            description: self.description.unwrap_or_default(),
            to_scene_reference: parse_transform(self.to_scene_reference)?,
            from_scene_reference: parse_transform(self.from_scene_reference)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const MINIMAL_CONFIG: &str = r#"
ocio_profile_version: 2

roles:
  scene_linear: Linear
  default: sRGB
  data: Raw

inactive_colorspaces: [Hidden]

colorspaces:
  - !<ColorSpace>
    name: Linear
    family: Scene
    encoding: scene-linear
    description: Linear reference

  - !<ColorSpace>
    name: sRGB
    aliases: [srgb_tx]
    family: Display
    encoding: sdr-video
    to_scene_reference: !<ExponentWithLinearTransform> {gamma: 2.4, offset: 0.055}

  - !<ColorSpace>
    name: Doubled
    from_scene_reference: !<MatrixTransform> {matrix: [2, 0, 0, 0, 0, 2, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1]}

  - !<ColorSpace>
    name: Hidden
    to_scene_reference: !<ColorSpaceTransform> {src: Doubled, dst: Linear}

  - !<ColorSpace>
    name: Raw
    isdata: true
"#;

    fn minimal() -> Config {
        Config::from_yaml_str(MINIMAL_CONFIG, PathBuf::from(".")).unwrap()
    }

    fn convert(config: &Config, src: &str, dst: &str, rgb: [f32; 3]) -> [f32; 3] {
        let mut px = [rgb];
        config
            .processor(src, dst)
            .unwrap()
            .default_cpu_processor()
            .apply_rgb(&mut px);
        px[0]
    }

    #[test]
    fn parse_minimal_config() {
        let config = minimal();
        assert_eq!(config.version(), ConfigVersion::V2);
        assert_eq!(config.colorspaces().len(), 5);
        assert_eq!(config.num_colorspaces(), 4);
        assert_eq!(config.colorspace_name_by_index(0), "Linear");
        assert_eq!(config.colorspace_name_by_index(3), "Raw");
    }

    #[test]
    fn out_of_range_index_is_empty() {
        let config = minimal();
        assert_eq!(config.colorspace_name_by_index(4), "");
        assert_eq!(config.colorspace_name_by_index(-1), "");
        assert_eq!(config.colorspace_name_by_index(i32::MAX), "");
    }

    #[test]
    fn roles_and_aliases_lookup() {
        let config = minimal();
        assert_eq!(config.colorspace("scene_linear").unwrap().name(), "Linear");
        assert_eq!(config.colorspace("SRGB_TX").unwrap().name(), "sRGB");
        assert_eq!(config.colorspace("linear").unwrap().name(), "Linear");
        assert!(config.colorspace("nope").is_none());
    }

    #[test]
    fn inactive_space_still_usable() {
        let config = minimal();
        assert!(!config.active_colorspace_names().any(|n| n == "Hidden"));
        let out = convert(&config, "Hidden", "Linear", [0.5, 0.25, 1.0]);
        // Hidden -> Linear runs Doubled -> Linear, a halving.
        assert_abs_diff_eq!(out[0], 0.25, epsilon = 1e-6);
    }

    #[test]
    fn inactive_override() {
        let mut config = minimal();
        config.set_inactive_colorspaces(vec!["raw".into(), "sRGB".into()]);
        let names: Vec<_> = config.active_colorspace_names().collect();
        assert_eq!(names, ["Linear", "Doubled", "Hidden"]);
    }

    #[test]
    fn missing_to_reference_uses_inverse() {
        let config = minimal();
        let out = convert(&config, "Doubled", "Linear", [0.5, 0.5, 0.5]);
        assert_abs_diff_eq!(out[0], 0.25, epsilon = 1e-6);
        let out = convert(&config, "Linear", "Doubled", [0.5, 0.5, 0.5]);
        assert_abs_diff_eq!(out[0], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn srgb_decode_through_config() {
        let config = minimal();
        let out = convert(&config, "sRGB", "Linear", [0.5, 0.5, 0.5]);
        assert_abs_diff_eq!(out[0], 0.2140, epsilon = 1e-3);
    }

    #[test]
    fn data_and_same_space_are_identity() {
        let config = minimal();
        assert!(config.processor("Raw", "sRGB").unwrap().is_identity());
        assert!(config.processor("sRGB", "srgb_tx").unwrap().is_identity());
    }

    #[test]
    fn display_section_order_is_kept() {
        let yaml = r#"
ocio_profile_version: 2
view_transforms:
  - !<ViewTransform>
    name: pass
    from_scene_reference: !<MatrixTransform> {}
display_colorspaces:
  - !<ColorSpace>
    name: Display Linear
colorspaces:
  - !<ColorSpace>
    name: Scene Linear
"#;
        let config = Config::from_yaml_str(yaml, PathBuf::from(".")).unwrap();
        assert_eq!(config.colorspace_name_by_index(0), "Display Linear");
        assert_eq!(config.colorspace_name_by_index(1), "Scene Linear");
        assert_eq!(
            config.colorspace("Display Linear").unwrap().reference_space(),
            ReferenceSpace::Display
        );
    }

    #[test]
    fn unknown_transform_kind_only_breaks_its_space() {
        let yaml = format!(
            "{MINIMAL_CONFIG}
  - !<ColorSpace>
    name: HSV
    to_scene_reference: !<FixedFunctionTransform> {{style: RGB_TO_HSV}}
"
        );
        let config = Config::from_yaml_str(&yaml, PathBuf::from(".")).unwrap();
        assert!(config.active_colorspace_names().any(|n| n == "HSV"));
        assert!(config.processor("Linear", "Doubled").is_ok());
        assert!(config.processor("HSV", "HSV").unwrap().is_identity());
        assert!(matches!(
            config.processor("HSV", "Linear"),
            Err(OcioError::UnsupportedTransform { .. })
        ));
        assert!(config.processor("Linear", "HSV").is_err());
    }

    #[test]
    fn colorspace_not_found() {
        let result = minimal().processor("NonExistent", "sRGB");
        assert!(matches!(result, Err(OcioError::ColorSpaceNotFound { .. })));
    }

    #[test]
    fn circular_reference_rejected() {
        let yaml = r#"
ocio_profile_version: 2
colorspaces:
  - !<ColorSpace>
    name: ref
  - !<ColorSpace>
    name: a
    to_scene_reference: !<ColorSpaceTransform> {src: b, dst: ref}
  - !<ColorSpace>
    name: b
    to_scene_reference: !<ColorSpaceTransform> {src: a, dst: ref}
"#;
        let config = Config::from_yaml_str(yaml, PathBuf::from(".")).unwrap();
        assert!(matches!(
            config.processor("a", "ref"),
            Err(OcioError::CircularReference { .. })
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let yaml = "ocio_profile_version: 2\ncolorspaces:\n  - name: A\n  - name: B\n    aliases: [a]\n";
        assert!(matches!(
            Config::from_yaml_str(yaml, PathBuf::from(".")),
            Err(OcioError::DuplicateColorSpace { .. })
        ));
    }

    #[test]
    fn dangling_role_rejected() {
        let yaml = "ocio_profile_version: 1\nroles:\n  default: Missing\ncolorspaces:\n  - name: A\n";
        assert!(matches!(
            Config::from_yaml_str(yaml, PathBuf::from(".")),
            Err(OcioError::RoleTargetMissing { .. })
        ));
    }

    #[test]
    fn unsupported_version() {
        let yaml = "ocio_profile_version: 3\ncolorspaces: []\n";
        assert!(matches!(
            Config::from_yaml_str(yaml, PathBuf::from(".")),
            Err(OcioError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn scene_to_display_needs_view_transform() {
        let yaml = r#"
ocio_profile_version: 2
colorspaces:
  - name: scene
display_colorspaces:
  - name: display
"#;
        let config = Config::from_yaml_str(yaml, PathBuf::from(".")).unwrap();
        assert!(matches!(
            config.processor("scene", "display"),
            Err(OcioError::MissingViewTransform { from: "scene", to: "display" })
        ));
    }

    #[test]
    fn builtin_config_scene_to_display() {
        let config = Config::from_location("ocio://default").unwrap();
        // 18% gray in ACEScg encodes to about 0.46 in sRGB.
        let out = convert(&config, "ACEScg", "sRGB - Display", [0.18, 0.18, 0.18]);
        for v in out {
            assert_abs_diff_eq!(v, 0.4614, epsilon = 2e-3);
        }
        let back = convert(&config, "sRGB - Display", "ACEScg", out);
        for v in back {
            assert_abs_diff_eq!(v, 0.18, epsilon = 1e-4);
        }
    }

    #[test]
    fn builtin_config_texture_roundtrip() {
        let config = Config::from_location("ocio://default").unwrap();
        let lin = convert(&config, "srgb_tx", "lin_rec709", [0.5, 0.2, 0.8]);
        assert_abs_diff_eq!(lin[0], 0.2140, epsilon = 1e-3);
        let back = convert(&config, "ACEScct", "sRGB - Texture", convert(&config, "sRGB - Texture", "ACEScct", [0.5, 0.2, 0.8]));
        assert_abs_diff_eq!(back[0], 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(back[1], 0.2, epsilon = 1e-4);
        assert_abs_diff_eq!(back[2], 0.8, epsilon = 1e-4);
    }

    #[test]
    fn env_source_selects_config() {
        let mut env = HashMap::new();
        assert!(matches!(Config::from_env_source(&env), Err(OcioError::EnvNotSet { .. })));

        env.insert("OCIO".to_string(), "ocio://default".to_string());
        env.insert("OCIO_INACTIVE_COLORSPACES".to_string(), "Raw".to_string());
        let config = Config::from_env_source(&env).unwrap();
        assert!(!config.active_colorspace_names().any(|n| n == "Raw"));
        assert!(config.colorspace("Raw").is_some());

        env.insert("OCIO".to_string(), "/definitely/not/here.ocio".to_string());
        assert!(matches!(
            Config::from_env_source(&env),
            Err(OcioError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn normalize_keeps_transform_tags() {
        let out = normalize_tags("- !<ColorSpace>\n  to: !<MatrixTransform> {}\n  v: !<ViewTransform>\n").unwrap();
        assert_eq!(out, "- \n  to: !MatrixTransform {}\n  v: \n");
    }
}
