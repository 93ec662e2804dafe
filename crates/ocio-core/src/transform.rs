//! Transform definitions for color space conversions.
//!
//! Transforms are the building blocks of a config: each color space
//! describes how to reach its reference space as a transform (or a group of
//! them). They are parsed from the tagged YAML nodes of an `.ocio` file:
//!
//! ```text
//! to_scene_reference: !<MatrixTransform> {matrix: [...], offset: [...]}
//! ```
//!
//! A transform is only a description. [`Processor`](crate::Processor)
//! compiles it into operations.

use serde_yaml::{Mapping, Value};

use crate::error::{OcioError, OcioResult};

/// Transform application direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformDirection {
    /// Forward transform.
    #[default]
    Forward,
    /// Inverse transform.
    Inverse,
}

impl TransformDirection {
    /// Returns the opposite direction.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
        }
    }

    /// Combines a transform's own direction with the direction it is applied in.
    #[inline]
    pub fn combine(self, applied: Self) -> Self {
        if applied == Self::Inverse {
            self.inverse()
        } else {
            self
        }
    }

    fn parse(s: &str) -> OcioResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "inverse" => Ok(Self::Inverse),
            other => Err(OcioError::InvalidTransform {
                reason: format!("unknown direction '{other}'"),
            }),
        }
    }
}

/// Handling of negative values in power functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegativeStyle {
    /// Clamp negatives to zero.
    #[default]
    Clamp,
    /// Mirror the curve around the origin.
    Mirror,
    /// Pass negatives through unchanged.
    PassThru,
    /// Continue the linear segment into negatives.
    Linear,
}

impl NegativeStyle {
    fn parse(s: &str) -> OcioResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "mirror" => Ok(Self::Mirror),
            "pass_thru" | "passthru" => Ok(Self::PassThru),
            "linear" => Ok(Self::Linear),
            other => Err(OcioError::InvalidTransform {
                reason: format!("unknown negative style '{other}'"),
            }),
        }
    }
}

/// Range transform clamping behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeStyle {
    /// Clamp to the output bounds.
    #[default]
    Clamp,
    /// Scale and offset only.
    NoClamp,
}

/// CDL clamping behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CdlStyle {
    /// ASC CDL v1.2: results clamped to [0, 1].
    #[default]
    AscCdl,
    /// No clamping, negatives bypass the power.
    NoClamp,
}

/// 4x4 matrix with offset, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTransform {
    /// Row-major 4x4 matrix.
    pub matrix: [f64; 16],
    /// RGBA offset added after the matrix.
    pub offset: [f64; 4],
    /// Direction.
    pub direction: TransformDirection,
}

/// Pure power function per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentTransform {
    /// RGBA exponents.
    pub value: [f64; 4],
    /// Negative handling.
    pub negative_style: NegativeStyle,
    /// Direction.
    pub direction: TransformDirection,
}

/// Power function with a linear toe (sRGB, Rec.709, L*).
///
/// Forward decodes: `((x + offset) / (1 + offset))^gamma` above the break.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentWithLinearTransform {
    /// RGB gamma.
    pub gamma: [f64; 3],
    /// RGB offset.
    pub offset: [f64; 3],
    /// Negative handling, `Linear` or `Mirror`.
    pub negative_style: NegativeStyle,
    /// Direction.
    pub direction: TransformDirection,
}

/// Plain logarithm. Forward is linear to log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogTransform {
    /// Logarithm base.
    pub base: f64,
    /// Direction.
    pub direction: TransformDirection,
}

/// `log_side_slope * log(lin_side_slope * x + lin_side_offset) + log_side_offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogAffineTransform {
    /// Logarithm base.
    pub base: f64,
    /// Per-channel log-side slope.
    pub log_side_slope: [f64; 3],
    /// Per-channel log-side offset.
    pub log_side_offset: [f64; 3],
    /// Per-channel linear-side slope.
    pub lin_side_slope: [f64; 3],
    /// Per-channel linear-side offset.
    pub lin_side_offset: [f64; 3],
    /// Direction.
    pub direction: TransformDirection,
}

/// Log affine curve with a linear segment below `lin_side_break`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogCameraTransform {
    /// Log parameters shared with [`LogAffineTransform`].
    pub affine: LogAffineTransform,
    /// Per-channel break point on the linear side.
    pub lin_side_break: [f64; 3],
    /// Slope of the linear segment; derived for C1 continuity when absent.
    pub linear_slope: Option<[f64; 3]>,
}

/// Affine remap with optional clamping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeTransform {
    /// Input lower bound.
    pub min_in: Option<f64>,
    /// Input upper bound.
    pub max_in: Option<f64>,
    /// Output lower bound.
    pub min_out: Option<f64>,
    /// Output upper bound.
    pub max_out: Option<f64>,
    /// Clamping style.
    pub style: RangeStyle,
    /// Direction.
    pub direction: TransformDirection,
}

/// ASC Color Decision List (slope, offset, power, saturation).
#[derive(Debug, Clone, PartialEq)]
pub struct CdlTransform {
    /// RGB slope.
    pub slope: [f64; 3],
    /// RGB offset.
    pub offset: [f64; 3],
    /// RGB power.
    pub power: [f64; 3],
    /// Saturation.
    pub saturation: f64,
    /// Clamping style.
    pub style: CdlStyle,
    /// Direction.
    pub direction: TransformDirection,
}

impl Default for CdlTransform {
    fn default() -> Self {
        Self {
            slope: [1.0; 3],
            offset: [0.0; 3],
            power: [1.0; 3],
            saturation: 1.0,
            style: CdlStyle::default(),
            direction: TransformDirection::Forward,
        }
    }
}

/// Named transform from the built-in catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinTransform {
    /// Style name, e.g. `ACEScct_to_ACES2065-1`.
    pub style: String,
    /// Direction.
    pub direction: TransformDirection,
}

/// Conversion between two color spaces of the same config.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpaceTransform {
    /// Source color space.
    pub src: String,
    /// Destination color space.
    pub dst: String,
    /// Skip the conversion when either side is a data space.
    pub data_bypass: bool,
    /// Direction.
    pub direction: TransformDirection,
}

/// External LUT reference.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTransform {
    /// File path as written in the config.
    pub src: String,
    /// Direction.
    pub direction: TransformDirection,
}

/// Transform kind this crate does not implement, kept so the config still
/// loads. Building a processor through it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedTransform {
    /// Tag name as written, e.g. `FixedFunctionTransform`.
    pub kind: String,
    /// Direction.
    pub direction: TransformDirection,
}

/// Ordered chain of transforms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupTransform {
    /// Children, applied in order when forward.
    pub transforms: Vec<Transform>,
    /// Direction.
    pub direction: TransformDirection,
}

/// Color transform definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// 4x4 matrix with offset.
    Matrix(MatrixTransform),
    /// Pure power.
    Exponent(ExponentTransform),
    /// Power with linear toe.
    ExponentWithLinear(ExponentWithLinearTransform),
    /// Logarithm.
    Log(LogTransform),
    /// Log affine.
    LogAffine(LogAffineTransform),
    /// Log camera.
    LogCamera(LogCameraTransform),
    /// Range remap.
    Range(RangeTransform),
    /// CDL.
    Cdl(CdlTransform),
    /// Built-in catalog transform.
    Builtin(BuiltinTransform),
    /// Reference to another color space pair.
    ColorSpace(ColorSpaceTransform),
    /// External file.
    File(FileTransform),
    /// Unrecognized transform kind.
    Unsupported(UnsupportedTransform),
    /// Chain.
    Group(GroupTransform),
}

impl Transform {
    /// Creates a forward matrix transform without offset.
    pub fn matrix(m: [f64; 16]) -> Self {
        Self::Matrix(MatrixTransform {
            matrix: m,
            offset: [0.0; 4],
            direction: TransformDirection::Forward,
        })
    }

    /// Creates a forward group transform.
    pub fn group(transforms: Vec<Transform>) -> Self {
        Self::Group(GroupTransform {
            transforms,
            direction: TransformDirection::Forward,
        })
    }

    /// Creates a forward built-in transform.
    pub fn builtin(style: impl Into<String>) -> Self {
        Self::Builtin(BuiltinTransform {
            style: style.into(),
            direction: TransformDirection::Forward,
        })
    }

    /// Returns this transform's own direction.
    pub fn direction(&self) -> TransformDirection {
        match self {
            Self::Matrix(t) => t.direction,
            Self::Exponent(t) => t.direction,
            Self::ExponentWithLinear(t) => t.direction,
            Self::Log(t) => t.direction,
            Self::LogAffine(t) => t.direction,
            Self::LogCamera(t) => t.affine.direction,
            Self::Range(t) => t.direction,
            Self::Cdl(t) => t.direction,
            Self::Builtin(t) => t.direction,
            Self::ColorSpace(t) => t.direction,
            Self::File(t) => t.direction,
            Self::Unsupported(t) => t.direction,
            Self::Group(t) => t.direction,
        }
    }

    fn direction_mut(&mut self) -> &mut TransformDirection {
        match self {
            Self::Matrix(t) => &mut t.direction,
            Self::Exponent(t) => &mut t.direction,
            Self::ExponentWithLinear(t) => &mut t.direction,
            Self::Log(t) => &mut t.direction,
            Self::LogAffine(t) => &mut t.direction,
            Self::LogCamera(t) => &mut t.affine.direction,
            Self::Range(t) => &mut t.direction,
            Self::Cdl(t) => &mut t.direction,
            Self::Builtin(t) => &mut t.direction,
            Self::ColorSpace(t) => &mut t.direction,
            Self::File(t) => &mut t.direction,
            Self::Unsupported(t) => &mut t.direction,
            Self::Group(t) => &mut t.direction,
        }
    }

    /// Returns the inverse of this transform.
    pub fn inverse(mut self) -> Self {
        let dir = self.direction_mut();
        *dir = dir.inverse();
        self
    }

    /// Parses a transform from a config YAML node.
    ///
    /// Accepts a tagged mapping (`!MatrixTransform {...}`) or a sequence,
    /// which is read as a group.
    pub fn from_yaml(node: &Value) -> OcioResult<Self> {
        match node {
            Value::Sequence(items) => {
                let transforms = items
                    .iter()
                    .map(Self::from_yaml)
                    .collect::<OcioResult<Vec<_>>>()?;
                Ok(Self::group(transforms))
            }
            Value::Tagged(tagged) => {
                let tag = tagged.tag.to_string();
                let kind = tag.trim_start_matches('!');
                let empty = Mapping::new();
                let body = match &tagged.value {
                    Value::Mapping(m) => m,
                    Value::Null => &empty,
                    _ if !is_known_kind(kind) => &empty,
                    _ => {
                        return Err(OcioError::InvalidTransform {
                            reason: format!("{kind} body must be a mapping"),
                        })
                    }
                };
                parse_tagged(kind, &Fields(body))
            }
            _ => Err(OcioError::InvalidTransform {
                reason: "expected a tagged transform or a list of transforms".into(),
            }),
        }
    }
}

const KNOWN_KINDS: [&str; 12] = [
    "MatrixTransform",
    "ExponentTransform",
    "ExponentWithLinearTransform",
    "LogTransform",
    "LogAffineTransform",
    "LogCameraTransform",
    "RangeTransform",
    "CDLTransform",
    "BuiltinTransform",
    "ColorSpaceTransform",
    "FileTransform",
    "GroupTransform",
];

fn is_known_kind(kind: &str) -> bool {
    KNOWN_KINDS.contains(&kind)
}

fn parse_tagged(kind: &str, f: &Fields<'_>) -> OcioResult<Transform> {
    if !is_known_kind(kind) {
        tracing::debug!(kind, "keeping unsupported transform");
        return Ok(Transform::Unsupported(UnsupportedTransform {
            kind: kind.to_string(),
            direction: f.direction().unwrap_or_default(),
        }));
    }
    let direction = f.direction()?;
    let t = match kind {
        "MatrixTransform" => Transform::Matrix(MatrixTransform {
            matrix: f.array_or("matrix", IDENTITY_4X4)?,
            offset: f.array_or("offset", [0.0; 4])?,
            direction,
        }),
        "ExponentTransform" => Transform::Exponent(ExponentTransform {
            value: f.channels_or("value", [1.0; 4])?,
            negative_style: f.negative_style(NegativeStyle::Clamp)?,
            direction,
        }),
        "ExponentWithLinearTransform" => {
            let gamma: [f64; 4] = f.channels_or("gamma", [1.0; 4])?;
            let offset: [f64; 4] = f.channels_or("offset", [0.0; 4])?;
            let negative_style = f.negative_style(NegativeStyle::Linear)?;
            if !matches!(negative_style, NegativeStyle::Linear | NegativeStyle::Mirror) {
                return Err(OcioError::InvalidTransform {
                    reason: "ExponentWithLinearTransform supports only linear or mirror style".into(),
                });
            }
            Transform::ExponentWithLinear(ExponentWithLinearTransform {
                gamma: [gamma[0], gamma[1], gamma[2]],
                offset: [offset[0], offset[1], offset[2]],
                negative_style,
                direction,
            })
        }
        "LogTransform" => Transform::Log(LogTransform {
            base: f.number_or("base", 2.0)?,
            direction,
        }),
        "LogAffineTransform" => Transform::LogAffine(parse_log_affine(f, direction)?),
        "LogCameraTransform" => {
            let lin_side_break = f.channels("lin_side_break")?.ok_or_else(|| {
                OcioError::InvalidTransform {
                    reason: "LogCameraTransform requires lin_side_break".into(),
                }
            })?;
            Transform::LogCamera(LogCameraTransform {
                affine: parse_log_affine(f, direction)?,
                lin_side_break,
                linear_slope: f.channels("linear_slope")?,
            })
        }
        "RangeTransform" => Transform::Range(RangeTransform {
            min_in: f.number("min_in_value")?,
            max_in: f.number("max_in_value")?,
            min_out: f.number("min_out_value")?,
            max_out: f.number("max_out_value")?,
            style: match f.string("style")? {
                Some(s) if s.eq_ignore_ascii_case("noclamp") => RangeStyle::NoClamp,
                _ => RangeStyle::Clamp,
            },
            direction,
        }),
        "CDLTransform" => Transform::Cdl(CdlTransform {
            slope: f.array_or("slope", [1.0; 3])?,
            offset: f.array_or("offset", [0.0; 3])?,
            power: f.array_or("power", [1.0; 3])?,
            saturation: f.number_or("sat", 1.0)?,
            style: match f.string("style")? {
                Some(s) if s.eq_ignore_ascii_case("noclamp") => CdlStyle::NoClamp,
                _ => CdlStyle::AscCdl,
            },
            direction,
        }),
        "BuiltinTransform" => Transform::Builtin(BuiltinTransform {
            style: f.required_string("style", kind)?,
            direction,
        }),
        "ColorSpaceTransform" => Transform::ColorSpace(ColorSpaceTransform {
            src: f.required_string("src", kind)?,
            dst: f.required_string("dst", kind)?,
            data_bypass: f.boolean("data_bypass")?.unwrap_or(true),
            direction,
        }),
        "FileTransform" => Transform::File(FileTransform {
            src: f.required_string("src", kind)?,
            direction,
        }),
        "GroupTransform" => {
            let children = match f.0.get("children") {
                Some(Value::Sequence(items)) => items
                    .iter()
                    .map(Transform::from_yaml)
                    .collect::<OcioResult<Vec<_>>>()?,
                Some(_) => {
                    return Err(OcioError::InvalidTransform {
                        reason: "GroupTransform children must be a list".into(),
                    })
                }
                None => Vec::new(),
            };
            Transform::Group(GroupTransform { transforms: children, direction })
        }
        other => {
            return Err(OcioError::UnsupportedTransform { name: other.to_string() });
        }
    };
    Ok(t)
}

fn parse_log_affine(f: &Fields<'_>, direction: TransformDirection) -> OcioResult<LogAffineTransform> {
    Ok(LogAffineTransform {
        base: f.number_or("base", 2.0)?,
        log_side_slope: f.channels_or("log_side_slope", [1.0; 3])?,
        log_side_offset: f.channels_or("log_side_offset", [0.0; 3])?,
        lin_side_slope: f.channels_or("lin_side_slope", [1.0; 3])?,
        lin_side_offset: f.channels_or("lin_side_offset", [0.0; 3])?,
        direction,
    })
}

pub(crate) const IDENTITY_4X4: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// Typed accessors over a transform's YAML body.
struct Fields<'a>(&'a Mapping);

impl Fields<'_> {
    fn invalid(key: &str, what: &str) -> OcioError {
        OcioError::InvalidTransform {
            reason: format!("'{key}' must be {what}"),
        }
    }

    fn number(&self, key: &str) -> OcioResult<Option<f64>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v.as_f64().map(Some).ok_or_else(|| Self::invalid(key, "a number")),
        }
    }

    fn number_or(&self, key: &str, default: f64) -> OcioResult<f64> {
        Ok(self.number(key)?.unwrap_or(default))
    }

    fn string(&self, key: &str) -> OcioResult<Option<String>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(Self::invalid(key, "a string")),
        }
    }

    fn required_string(&self, key: &str, kind: &str) -> OcioResult<String> {
        self.string(key)?.ok_or_else(|| OcioError::InvalidTransform {
            reason: format!("{kind} requires '{key}'"),
        })
    }

    fn boolean(&self, key: &str) -> OcioResult<Option<bool>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(Self::invalid(key, "a boolean")),
        }
    }

    fn direction(&self) -> OcioResult<TransformDirection> {
        self.string("direction")?
            .map_or(Ok(TransformDirection::Forward), |s| TransformDirection::parse(&s))
    }

    fn negative_style(&self, default: NegativeStyle) -> OcioResult<NegativeStyle> {
        self.string("style")?
            .map_or(Ok(default), |s| NegativeStyle::parse(&s))
    }

    /// Exactly `N` numbers.
    fn array_or<const N: usize>(&self, key: &str, default: [f64; N]) -> OcioResult<[f64; N]> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Sequence(items)) if items.len() == N => {
                let mut out = [0.0; N];
                for (slot, item) in out.iter_mut().zip(items) {
                    *slot = item
                        .as_f64()
                        .ok_or_else(|| Self::invalid(key, "a list of numbers"))?;
                }
                Ok(out)
            }
            Some(_) => Err(Self::invalid(key, &format!("a list of {N} numbers"))),
        }
    }

    /// A scalar broadcast to all channels, or `N` numbers. A 4-channel key
    /// also accepts 3 numbers with alpha left at the default.
    fn channels<const N: usize>(&self, key: &str) -> OcioResult<Option<[f64; N]>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Sequence(items)) if N == 4 && items.len() == 3 => {
                let rgb: [f64; 3] = self.array_or(key, [0.0; 3])?;
                let mut out = [1.0; N];
                out[..3].copy_from_slice(&rgb);
                Ok(Some(out))
            }
            Some(Value::Sequence(_)) => self.array_or(key, [0.0; N]).map(Some),
            Some(v) => {
                let x = v.as_f64().ok_or_else(|| Self::invalid(key, "a number or list"))?;
                let mut out = [x; N];
                if N == 4 {
                    if let Some(alpha) = out.get_mut(3) {
                        *alpha = 1.0;
                    }
                }
                Ok(Some(out))
            }
        }
    }

    fn channels_or<const N: usize>(&self, key: &str, default: [f64; N]) -> OcioResult<[f64; N]> {
        Ok(self.channels(key)?.unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> OcioResult<Transform> {
        let node: Value = serde_yaml::from_str(yaml).unwrap();
        Transform::from_yaml(&node)
    }

    #[test]
    fn matrix_with_offset() {
        let t = parse(
            "!MatrixTransform {matrix: [2, 0, 0, 0, 0, 2, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1], offset: [0.1, 0, 0, 0]}",
        )
        .unwrap();
        let Transform::Matrix(m) = t else { panic!("expected matrix") };
        assert_eq!(m.matrix[0], 2.0);
        assert_eq!(m.offset[0], 0.1);
        assert_eq!(m.direction, TransformDirection::Forward);
    }

    #[test]
    fn scalar_exponent_keeps_alpha() {
        let t = parse("!ExponentTransform {value: 2.2, direction: inverse}").unwrap();
        let Transform::Exponent(e) = t else { panic!("expected exponent") };
        assert_eq!(e.value, [2.2, 2.2, 2.2, 1.0]);
        assert_eq!(e.direction, TransformDirection::Inverse);
    }

    #[test]
    fn sequence_is_group() {
        let t = parse("[!LogTransform {base: 10}, !BuiltinTransform {style: IDENTITY}]").unwrap();
        let Transform::Group(g) = t else { panic!("expected group") };
        assert_eq!(g.transforms.len(), 2);
    }

    #[test]
    fn group_children() {
        let t = parse("!GroupTransform {children: [!LogTransform {}], direction: inverse}").unwrap();
        let Transform::Group(g) = t else { panic!("expected group") };
        assert_eq!(g.transforms.len(), 1);
        assert_eq!(g.direction, TransformDirection::Inverse);
    }

    #[test]
    fn log_camera_requires_break() {
        assert!(parse("!LogCameraTransform {base: 10}").is_err());
        let t = parse("!LogCameraTransform {base: 2, lin_side_break: 0.0078125, log_side_slope: 0.0570776}")
            .unwrap();
        let Transform::LogCamera(c) = t else { panic!("expected log camera") };
        assert_eq!(c.lin_side_break, [0.0078125; 3]);
        assert!(c.linear_slope.is_none());
    }

    #[test]
    fn unknown_tag_parses_as_unsupported() {
        let t = parse("!FixedFunctionTransform {style: RGB_TO_HSV, direction: inverse}").unwrap();
        let Transform::Unsupported(u) = t else { panic!("expected unsupported") };
        assert_eq!(u.kind, "FixedFunctionTransform");
        assert_eq!(u.direction, TransformDirection::Inverse);

        let t = parse("!Lut3DTransform [1, 2, 3]").unwrap();
        assert!(matches!(t, Transform::Unsupported(_)));
        assert!(parse("!MatrixTransform [1, 2, 3]").is_err());
    }

    #[test]
    fn bad_direction_rejected() {
        assert!(parse("!LogTransform {direction: sideways}").is_err());
    }

    #[test]
    fn inverse_flips_direction() {
        let t = Transform::builtin("IDENTITY").inverse();
        assert_eq!(t.direction(), TransformDirection::Inverse);
        assert_eq!(t.inverse().direction(), TransformDirection::Forward);
    }
}
