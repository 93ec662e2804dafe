//! Built-in transforms and configs.
//!
//! [`expand`] resolves a `BuiltinTransform` style into plain transforms, so
//! configs can reference ACES conversions without LUT files. [`config`]
//! returns the configs addressed by `ocio://` URIs.
//!
//! Style names match case-insensitively and ignore separators, so
//! `ACEScg_to_ACES2065-1` and `acescg to aces20651` are the same style.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{OcioError, OcioResult};
use crate::transform::*;

/// AP0 (ACES 2065-1) to AP1 (ACEScg).
pub const AP0_TO_AP1: [f64; 16] = [
    1.4514393161, -0.2365107469, -0.2149285693, 0.0,
    -0.0765537734, 1.1762296998, -0.0996759264, 0.0,
    0.0083161484, -0.0060324498, 0.9977163014, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// AP1 (ACEScg) to AP0 (ACES 2065-1).
pub const AP1_TO_AP0: [f64; 16] = [
    0.6954522414, 0.1406786965, 0.1638690622, 0.0,
    0.0447945634, 0.8596711185, 0.0955343182, 0.0,
    -0.0055258826, 0.0040252103, 1.0015006723, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// AP0 to CIE XYZ, Bradford-adapted from the ACES white to D65.
pub const AP0_TO_XYZ_D65_BFD: [f64; 16] = [
    0.938279849239, -0.004451445067, 0.016627523144, 0.0,
    0.337368890823, 0.729521566372, -0.066890457195, 0.0,
    0.001173294215, -0.003710797625, 1.091594354378, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// Linear Rec.709 to CIE XYZ D65.
pub const REC709_TO_XYZ_D65: [f64; 16] = [
    0.4124564, 0.3575761, 0.1804375, 0.0,
    0.2126729, 0.7151522, 0.0721750, 0.0,
    0.0193339, 0.1191920, 0.9503041, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// CIE XYZ D65 to linear Rec.709.
pub const XYZ_D65_TO_REC709: [f64; 16] = [
    3.2404542, -1.5371385, -0.4985314, 0.0,
    -0.9692660, 1.8760108, 0.0415560, 0.0,
    0.0556434, -0.2040259, 1.0572252, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// Style names understood by [`expand`].
pub const STYLES: &[&str] = &[
    "IDENTITY",
    "ACEScct_to_ACES2065-1",
    "ACEScg_to_ACES2065-1",
    "CURVE - ACEScct-LOG_to_LINEAR",
    "CURVE - LINEAR_to_ACEScct-LOG",
    "UTILITY - ACES-AP0_to_CIE-XYZ-D65_BFD",
    "UTILITY - ACES-AP1_to_CIE-XYZ-D65_BFD",
    "UTILITY - ACES-AP1_to_LINEAR-REC709_BFD",
    "DISPLAY - CIE-XYZ-D65_to_sRGB",
    "DISPLAY - CIE-XYZ-D65_to_REC.1886-REC.709",
];

fn normalize(style: &str) -> String {
    style
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// ACEScct encoding: linear to log, with a linear toe below 2^-7.
fn linear_to_acescct() -> Transform {
    Transform::LogCamera(LogCameraTransform {
        affine: LogAffineTransform {
            base: 2.0,
            log_side_slope: [1.0 / 17.52; 3],
            log_side_offset: [9.72 / 17.52; 3],
            lin_side_slope: [1.0; 3],
            lin_side_offset: [0.0; 3],
            direction: TransformDirection::Forward,
        },
        lin_side_break: [0.0078125; 3],
        linear_slope: None,
    })
}

/// sRGB piecewise encoding curve, forward decodes.
fn srgb_curve() -> Transform {
    Transform::ExponentWithLinear(ExponentWithLinearTransform {
        gamma: [2.4; 3],
        offset: [0.055; 3],
        negative_style: NegativeStyle::Linear,
        direction: TransformDirection::Forward,
    })
}

/// Expands a built-in style into transforms, forward direction.
///
/// Fails with [`OcioError::UnsupportedTransform`] for unknown styles.
pub fn expand(style: &str) -> OcioResult<Transform> {
    let t = match normalize(style).as_str() {
        "identity" => Transform::group(Vec::new()),
        "acescgtoaces20651" => Transform::matrix(AP1_TO_AP0),
        "curveacescctlogtolinear" => linear_to_acescct().inverse(),
        "curvelineartoacescctlog" => linear_to_acescct(),
        "acesccttoaces20651" => Transform::group(vec![
            linear_to_acescct().inverse(),
            Transform::matrix(AP1_TO_AP0),
        ]),
        "utilityacesap0tociexyzd65bfd" => Transform::matrix(AP0_TO_XYZ_D65_BFD),
        "utilityacesap1tociexyzd65bfd" => Transform::group(vec![
            Transform::matrix(AP1_TO_AP0),
            Transform::matrix(AP0_TO_XYZ_D65_BFD),
        ]),
        "utilityacesap1tolinearrec709bfd" => Transform::group(vec![
            Transform::matrix(AP1_TO_AP0),
            Transform::matrix(AP0_TO_XYZ_D65_BFD),
            Transform::matrix(XYZ_D65_TO_REC709),
        ]),
        "displayciexyzd65tosrgb" => Transform::group(vec![
            Transform::matrix(XYZ_D65_TO_REC709),
            srgb_curve().inverse(),
        ]),
        "displayciexyzd65torec1886rec709" => Transform::group(vec![
            Transform::matrix(XYZ_D65_TO_REC709),
            Transform::Exponent(ExponentTransform {
                value: [2.4, 2.4, 2.4, 1.0],
                negative_style: NegativeStyle::Clamp,
                direction: TransformDirection::Inverse,
            }),
        ]),
        _ => {
            return Err(OcioError::UnsupportedTransform {
                name: format!("BuiltinTransform style '{style}'"),
            });
        }
    };
    Ok(t)
}

/// URIs accepted by [`config`].
pub fn available_configs() -> &'static [&'static str] {
    &["ocio://default", "ocio://cg-config-latest"]
}

/// Loads a built-in config by `ocio://` URI.
pub fn config(uri: &str) -> OcioResult<Config> {
    match uri.trim().to_ascii_lowercase().as_str() {
        "ocio://default" | "ocio://cg-config-latest" => Config::from_yaml_str(CG_CONFIG, PathBuf::from(".")),
        _ => Err(OcioError::UnknownBuiltinConfig { uri: uri.to_string() }),
    }
}

const CG_CONFIG: &str = r#"ocio_profile_version: 2.1

name: cg-config-minimal
description: Minimal scene-linear CG config with an ACES2065-1 reference.

roles:
  aces_interchange: ACES2065-1
  cie_xyz_d65_interchange: CIE-XYZ-D65
  color_picking: sRGB - Texture
  color_timing: ACEScct
  compositing_log: ACEScct
  data: Raw
  default: sRGB - Texture
  matte_paint: sRGB - Texture
  rendering: ACEScg
  scene_linear: ACEScg
  texture_paint: ACEScct

default_view_transform: Un-tone-mapped

view_transforms:
  - !<ViewTransform>
    name: Un-tone-mapped
    from_scene_reference: !<BuiltinTransform> {style: UTILITY - ACES-AP0_to_CIE-XYZ-D65_BFD}

display_colorspaces:
  - !<ColorSpace>
    name: CIE-XYZ-D65
    aliases: [cie_xyz_d65]
    family: ""
    description: The CIE XYZ (D65) display connection colorspace.
    isdata: false

  - !<ColorSpace>
    name: sRGB - Display
    aliases: [srgb_display]
    family: Display
    description: Convert CIE XYZ (D65 white) to sRGB (piecewise EOTF)
    isdata: false
    from_display_reference: !<BuiltinTransform> {style: DISPLAY - CIE-XYZ-D65_to_sRGB}

colorspaces:
  - !<ColorSpace>
    name: ACES2065-1
    aliases: [aces2065_1, ACES - ACES2065-1, lin_ap0]
    family: ACES
    description: The Academy Color Encoding System reference color space
    isdata: false

  - !<ColorSpace>
    name: ACEScg
    aliases: [ACES - ACEScg, lin_ap1]
    family: ACES
    description: ACEScg working space
    isdata: false
    to_scene_reference: !<BuiltinTransform> {style: ACEScg_to_ACES2065-1}

  - !<ColorSpace>
    name: ACEScct
    aliases: [ACES - ACEScct, acescct_ap1]
    family: ACES
    description: ACEScct to ACES2065-1
    isdata: false
    to_scene_reference: !<BuiltinTransform> {style: ACEScct_to_ACES2065-1}

  - !<ColorSpace>
    name: Linear Rec.709 (sRGB)
    aliases: [lin_rec709_srgb, lin_rec709, lin_srgb]
    family: Utility
    description: Linear Rec.709 (sRGB)
    isdata: false
    to_scene_reference: !<GroupTransform>
      children:
        - !<MatrixTransform> {matrix: [0.4124564, 0.3575761, 0.1804375, 0, 0.2126729, 0.7151522, 0.0721750, 0, 0.0193339, 0.1191920, 0.9503041, 0, 0, 0, 0, 1]}
        - !<BuiltinTransform> {style: UTILITY - ACES-AP0_to_CIE-XYZ-D65_BFD, direction: inverse}

  - !<ColorSpace>
    name: sRGB - Texture
    aliases: [srgb_tx, srgb_texture, srgb]
    family: Utility
    description: Convert ACES2065-1 to sRGB
    isdata: false
    to_scene_reference:
      - !<ExponentWithLinearTransform> {gamma: 2.4, offset: 0.055}
      - !<ColorSpaceTransform> {src: Linear Rec.709 (sRGB), dst: ACES2065-1}

  - !<ColorSpace>
    name: Raw
    aliases: [Utility - Raw]
    family: Utility
    equalitygroup: ""
    description: The utility "Raw" colorspace.
    isdata: true
"#;
