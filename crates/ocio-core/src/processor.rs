//! Transform processor for applying color conversions.
//!
//! A [`Processor`] is a transform chain compiled into a flat list of
//! [`ProcessorOp`]s. Its [`CpuProcessor`] is the optimized form used for
//! pixel application.
//!
//! # Example
//!
//! ```
//! use ocio_core::{Processor, Transform, TransformDirection};
//!
//! let t = Transform::builtin("ACEScg_to_ACES2065-1");
//! let processor = Processor::from_transform(&t, TransformDirection::Forward).unwrap();
//! let cpu = processor.default_cpu_processor();
//!
//! let mut pixels = [[0.18_f32, 0.18, 0.18, 1.0]];
//! cpu.apply_rgba(&mut pixels);
//! ```

use crate::builtin;
use crate::cpu::CpuProcessor;
use crate::error::{OcioError, OcioResult};
use crate::transform::*;

/// Rec.709 luma weights used by CDL saturation.
const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Optimization level for CPU processors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationLevel {
    /// No optimization.
    None,
    /// Lossless optimization only (identity removal, matrix combination).
    #[default]
    Lossless,
}

/// Compiled operation.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum ProcessorOp {
    /// 4x4 matrix + offset over RGBA.
    Matrix { matrix: [f32; 16], offset: [f32; 4] },
    /// Power over RGBA.
    Exponent { value: [f32; 4], negative_style: NegativeStyle },
    /// Power with linear toe over RGB.
    MonCurve {
        gamma: [f32; 3],
        offset: [f32; 3],
        mirror: bool,
        forward: bool,
    },
    /// Logarithm over RGB.
    Log { base: f32, forward: bool },
    /// Log affine over RGB.
    LogAffine { params: LogParams, forward: bool },
    /// Log camera over RGB.
    LogCamera {
        params: LogParams,
        lin_side_break: [f32; 3],
        linear_slope: [f32; 3],
        linear_offset: [f32; 3],
        forward: bool,
    },
    /// Scale, offset and clamp over RGB.
    Range {
        scale: f32,
        offset: f32,
        clamp_min: Option<f32>,
        clamp_max: Option<f32>,
    },
    /// CDL over RGB.
    Cdl {
        slope: [f32; 3],
        offset: [f32; 3],
        power: [f32; 3],
        saturation: f32,
        style: CdlStyle,
        forward: bool,
    },
}

/// Per-channel log parameters, base stored as its natural log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogParams {
    /// `ln(base)`.
    pub ln_base: f32,
    /// Log-side slope.
    pub log_side_slope: [f32; 3],
    /// Log-side offset.
    pub log_side_offset: [f32; 3],
    /// Linear-side slope.
    pub lin_side_slope: [f32; 3],
    /// Linear-side offset.
    pub lin_side_offset: [f32; 3],
}

impl LogParams {
    fn from_affine(t: &LogAffineTransform) -> OcioResult<Self> {
        if t.base <= 0.0 || t.base == 1.0 {
            return Err(OcioError::InvalidTransform {
                reason: format!("log base {} is not usable", t.base),
            });
        }
        if t.log_side_slope.contains(&0.0) || t.lin_side_slope.contains(&0.0) {
            return Err(OcioError::InvalidTransform {
                reason: "log transform slopes must be non-zero".into(),
            });
        }
        Ok(Self {
            ln_base: t.base.ln() as f32,
            log_side_slope: t.log_side_slope.map(|v| v as f32),
            log_side_offset: t.log_side_offset.map(|v| v as f32),
            lin_side_slope: t.lin_side_slope.map(|v| v as f32),
            lin_side_offset: t.lin_side_offset.map(|v| v as f32),
        })
    }

    #[inline]
    fn lin_to_log(&self, c: usize, x: f32) -> f32 {
        let lin = (self.lin_side_slope[c] * x + self.lin_side_offset[c]).max(f32::MIN_POSITIVE);
        self.log_side_slope[c] * lin.ln() / self.ln_base + self.log_side_offset[c]
    }

    #[inline]
    fn log_to_lin(&self, c: usize, y: f32) -> f32 {
        let exp = (y - self.log_side_offset[c]) / self.log_side_slope[c];
        ((exp * self.ln_base).exp() - self.lin_side_offset[c]) / self.lin_side_slope[c]
    }
}

impl ProcessorOp {
    /// Returns true if this operation is an identity (no-op).
    pub fn is_identity(&self) -> bool {
        const EPS: f32 = 1e-6;
        match self {
            ProcessorOp::Matrix { matrix, offset } => {
                matrix
                    .iter()
                    .zip(IDENTITY_4X4.iter())
                    .all(|(a, b)| (a - *b as f32).abs() < EPS)
                    && offset.iter().all(|v| v.abs() < EPS)
            }
            ProcessorOp::Exponent { value, .. } => value.iter().all(|v| (*v - 1.0).abs() < EPS),
            ProcessorOp::Range { scale, offset, clamp_min, clamp_max } => {
                (*scale - 1.0).abs() < EPS
                    && offset.abs() < EPS
                    && clamp_min.is_none()
                    && clamp_max.is_none()
            }
            ProcessorOp::Cdl { slope, offset, power, saturation, style, .. } => {
                *style == CdlStyle::NoClamp
                    && slope.iter().all(|v| (*v - 1.0).abs() < EPS)
                    && offset.iter().all(|v| v.abs() < EPS)
                    && power.iter().all(|v| (*v - 1.0).abs() < EPS)
                    && (*saturation - 1.0).abs() < EPS
            }
            _ => false,
        }
    }

    /// Applies this operation to one RGBA pixel.
    #[inline]
    pub fn apply(&self, px: &mut [f32; 4]) {
        match self {
            ProcessorOp::Matrix { matrix, offset } => {
                let [r, g, b, a] = *px;
                for (i, out) in px.iter_mut().enumerate() {
                    let row = &matrix[i * 4..i * 4 + 4];
                    *out = row[0] * r + row[1] * g + row[2] * b + row[3] * a + offset[i];
                }
            }

            ProcessorOp::Exponent { value, negative_style } => {
                for (v, e) in px.iter_mut().zip(value) {
                    *v = match negative_style {
                        NegativeStyle::Clamp => v.max(0.0).powf(*e),
                        NegativeStyle::Mirror => v.signum() * v.abs().powf(*e),
                        NegativeStyle::PassThru if *v < 0.0 => *v,
                        _ => v.powf(*e),
                    };
                }
            }

            ProcessorOp::MonCurve { gamma, offset, mirror, forward } => {
                for c in 0..3 {
                    let v = px[c];
                    px[c] = if *mirror {
                        v.signum() * moncurve(v.abs(), gamma[c], offset[c], *forward)
                    } else {
                        moncurve(v, gamma[c], offset[c], *forward)
                    };
                }
            }

            ProcessorOp::Log { base, forward } => {
                for v in px.iter_mut().take(3) {
                    *v = if *forward {
                        v.max(f32::MIN_POSITIVE).log(*base)
                    } else {
                        base.powf(*v)
                    };
                }
            }

            ProcessorOp::LogAffine { params, forward } => {
                for c in 0..3 {
                    px[c] = if *forward {
                        params.lin_to_log(c, px[c])
                    } else {
                        params.log_to_lin(c, px[c])
                    };
                }
            }

            ProcessorOp::LogCamera { params, lin_side_break, linear_slope, linear_offset, forward } => {
                for c in 0..3 {
                    let v = px[c];
                    px[c] = if *forward {
                        if v <= lin_side_break[c] {
                            linear_slope[c] * v + linear_offset[c]
                        } else {
                            params.lin_to_log(c, v)
                        }
                    } else {
                        let log_break = linear_slope[c] * lin_side_break[c] + linear_offset[c];
                        if v <= log_break {
                            (v - linear_offset[c]) / linear_slope[c]
                        } else {
                            params.log_to_lin(c, v)
                        }
                    };
                }
            }

            ProcessorOp::Range { scale, offset, clamp_min, clamp_max } => {
                for v in px.iter_mut().take(3) {
                    *v = *v * scale + offset;
                    if let Some(min) = clamp_min {
                        *v = v.max(*min);
                    }
                    if let Some(max) = clamp_max {
                        *v = v.min(*max);
                    }
                }
            }

            ProcessorOp::Cdl { slope, offset, power, saturation, style, forward } => {
                let clamp = *style == CdlStyle::AscCdl;
                if *forward {
                    for c in 0..3 {
                        let mut v = px[c] * slope[c] + offset[c];
                        if clamp {
                            v = v.clamp(0.0, 1.0);
                        }
                        px[c] = if v < 0.0 { v } else { v.powf(power[c]) };
                    }
                    apply_saturation(px, *saturation, clamp);
                } else {
                    apply_saturation(px, 1.0 / saturation, clamp);
                    for c in 0..3 {
                        let v = px[c];
                        let v = if v < 0.0 { v } else { v.powf(1.0 / power[c]) };
                        let v = (v - offset[c]) / slope[c];
                        px[c] = if clamp { v.clamp(0.0, 1.0) } else { v };
                    }
                }
            }
        }
    }
}

#[inline]
fn apply_saturation(px: &mut [f32; 4], saturation: f32, clamp: bool) {
    if saturation == 1.0 {
        return;
    }
    let luma = px[0] * LUMA[0] + px[1] * LUMA[1] + px[2] * LUMA[2];
    for v in px.iter_mut().take(3) {
        *v = luma + (*v - luma) * saturation;
        if clamp {
            *v = v.clamp(0.0, 1.0);
        }
    }
}

/// Power curve with a linear toe, continuous in value and slope.
///
/// Forward decodes (`((x + off) / (1 + off))^g`), inverse encodes. With a
/// zero offset it degrades to a pure power clamped at zero.
#[inline]
fn moncurve(x: f32, g: f32, off: f32, forward: bool) -> f32 {
    if off <= 0.0 || g <= 1.0 {
        let x = x.max(0.0);
        return if forward { x.powf(g) } else { x.powf(1.0 / g) };
    }
    let break_enc = off / (g - 1.0);
    let slope = ((g - 1.0) / off) * ((off * g) / ((g - 1.0) * (1.0 + off))).powf(g);
    if forward {
        if x >= break_enc {
            ((x + off) / (1.0 + off)).powf(g)
        } else {
            x * slope
        }
    } else {
        let break_lin = break_enc * slope;
        if x >= break_lin {
            (1.0 + off) * x.powf(1.0 / g) - off
        } else {
            x / slope
        }
    }
}

/// Inverts a row-major 4x4 matrix with offset. Fails on singular input.
pub(crate) fn invert_matrix(m: &[f64; 16], offset: &[f64; 4]) -> OcioResult<([f64; 16], [f64; 4])> {
    // glam is column-major; transpose in and out to keep row-major storage.
    let mat = glam::DMat4::from_cols_array(m).transpose();
    if mat.determinant().abs() < 1e-12 {
        return Err(OcioError::Transform(
            "cannot invert singular matrix (determinant near zero)".into(),
        ));
    }
    let inv = mat.inverse();
    let inv_offset = inv * glam::DVec4::from_array(*offset);
    Ok((inv.transpose().to_cols_array(), (-inv_offset).to_array()))
}

/// Compiled transform processor.
///
/// Holds the transform it was built from and the unoptimized op list.
/// The processor owns everything it needs: it stays valid after the
/// config that produced it is dropped.
#[derive(Debug, Clone)]
pub struct Processor {
    transform: Transform,
    ops: Vec<ProcessorOp>,
}

impl Processor {
    /// Creates a processor that leaves pixels unchanged.
    pub fn identity() -> Self {
        Self {
            transform: Transform::group(Vec::new()),
            ops: Vec::new(),
        }
    }

    /// Creates a processor from a transform.
    ///
    /// The transform must not contain unresolved color space references;
    /// [`Config::processor`](crate::Config::processor) expands them.
    pub fn from_transform(transform: &Transform, direction: TransformDirection) -> OcioResult<Self> {
        let mut ops = Vec::new();
        compile(transform, direction, &mut ops)?;
        let transform = match direction {
            TransformDirection::Forward => transform.clone(),
            TransformDirection::Inverse => transform.clone().inverse(),
        };
        Ok(Self { transform, ops })
    }

    /// Returns the transform this processor was compiled from.
    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Returns the compiled operations.
    #[inline]
    pub fn ops(&self) -> &[ProcessorOp] {
        &self.ops
    }

    /// Checks if processor is identity (no ops after optimization).
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(ProcessorOp::is_identity)
    }

    /// Returns the optimized CPU form with the default optimization level.
    pub fn default_cpu_processor(&self) -> CpuProcessor {
        self.cpu_processor(OptimizationLevel::default())
    }

    /// Returns a CPU processor optimized at `level`.
    pub fn cpu_processor(&self, level: OptimizationLevel) -> CpuProcessor {
        let mut ops = self.ops.clone();
        optimize(&mut ops, level);
        CpuProcessor::from_ops(ops)
    }
}

fn optimize(ops: &mut Vec<ProcessorOp>, level: OptimizationLevel) {
    if level == OptimizationLevel::None {
        return;
    }
    ops.retain(|op| !op.is_identity());
    combine_matrices(ops);
    // Combining can yield an identity (a matrix followed by its inverse).
    ops.retain(|op| !op.is_identity());
}

/// Combines adjacent matrix operations into single matrix.
fn combine_matrices(ops: &mut Vec<ProcessorOp>) {
    if ops.len() < 2 {
        return;
    }

    let mut result = Vec::with_capacity(ops.len());
    let mut pending: Option<([f32; 16], [f32; 4])> = None;

    for op in ops.drain(..) {
        if let ProcessorOp::Matrix { matrix, offset } = &op {
            pending = Some(match pending.take() {
                // new_m * prev_m, new_m * prev_o + new_o
                Some((prev_m, prev_o)) => {
                    let m = mat4_mul(matrix, &prev_m);
                    let o = mat4_apply(matrix, &prev_o);
                    (m, [o[0] + offset[0], o[1] + offset[1], o[2] + offset[2], o[3] + offset[3]])
                }
                None => (*matrix, *offset),
            });
        } else {
            if let Some((matrix, offset)) = pending.take() {
                result.push(ProcessorOp::Matrix { matrix, offset });
            }
            result.push(op);
        }
    }

    if let Some((matrix, offset)) = pending {
        result.push(ProcessorOp::Matrix { matrix, offset });
    }

    *ops = result;
}

/// 4x4 matrix multiply (row-major [f32; 16] layout)
fn mat4_mul(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut r = [0.0; 16];
    for i in 0..4 {
        for j in 0..4 {
            r[i * 4 + j] = a[i * 4] * b[j]
                + a[i * 4 + 1] * b[4 + j]
                + a[i * 4 + 2] * b[8 + j]
                + a[i * 4 + 3] * b[12 + j];
        }
    }
    r
}

/// Apply 4x4 matrix to 4-vector (row-major [f32; 16] layout)
fn mat4_apply(m: &[f32; 16], v: &[f32; 4]) -> [f32; 4] {
    [
        m[0] * v[0] + m[1] * v[1] + m[2] * v[2] + m[3] * v[3],
        m[4] * v[0] + m[5] * v[1] + m[6] * v[2] + m[7] * v[3],
        m[8] * v[0] + m[9] * v[1] + m[10] * v[2] + m[11] * v[3],
        m[12] * v[0] + m[13] * v[1] + m[14] * v[2] + m[15] * v[3],
    ]
}

/// Compiles a transform into operations.
fn compile(transform: &Transform, applied: TransformDirection, ops: &mut Vec<ProcessorOp>) -> OcioResult<()> {
    let dir = transform.direction().combine(applied);
    let forward = dir == TransformDirection::Forward;

    match transform {
        Transform::Matrix(m) => {
            let (matrix, offset) = if forward {
                (m.matrix, m.offset)
            } else {
                invert_matrix(&m.matrix, &m.offset)?
            };
            ops.push(ProcessorOp::Matrix {
                matrix: matrix.map(|v| v as f32),
                offset: offset.map(|v| v as f32),
            });
        }

        Transform::Exponent(e) => {
            if e.value.contains(&0.0) {
                return Err(OcioError::InvalidTransform {
                    reason: "exponent value must be non-zero".into(),
                });
            }
            let value = if forward {
                e.value.map(|v| v as f32)
            } else {
                e.value.map(|v| (1.0 / v) as f32)
            };
            ops.push(ProcessorOp::Exponent { value, negative_style: e.negative_style });
        }

        Transform::ExponentWithLinear(e) => {
            if e.gamma.iter().any(|g| *g < 1.0) || e.offset.iter().any(|o| *o < 0.0) {
                return Err(OcioError::InvalidTransform {
                    reason: "ExponentWithLinearTransform needs gamma >= 1 and offset >= 0".into(),
                });
            }
            ops.push(ProcessorOp::MonCurve {
                gamma: e.gamma.map(|v| v as f32),
                offset: e.offset.map(|v| v as f32),
                mirror: e.negative_style == NegativeStyle::Mirror,
                forward,
            });
        }

        Transform::Log(l) => {
            if l.base <= 0.0 || l.base == 1.0 {
                return Err(OcioError::InvalidTransform {
                    reason: format!("log base {} is not usable", l.base),
                });
            }
            ops.push(ProcessorOp::Log { base: l.base as f32, forward });
        }

        Transform::LogAffine(l) => {
            ops.push(ProcessorOp::LogAffine { params: LogParams::from_affine(l)?, forward });
        }

        Transform::LogCamera(l) => {
            let params = LogParams::from_affine(&l.affine)?;
            let lin_side_break = l.lin_side_break.map(|v| v as f32);
            let mut linear_slope = [0.0f32; 3];
            let mut linear_offset = [0.0f32; 3];
            for c in 0..3 {
                let break_lin = params.lin_side_slope[c] * lin_side_break[c] + params.lin_side_offset[c];
                if break_lin <= 0.0 {
                    return Err(OcioError::InvalidTransform {
                        reason: "LogCameraTransform break point is not in the log domain".into(),
                    });
                }
                let log_break = params.lin_to_log(c, lin_side_break[c]);
                linear_slope[c] = match l.linear_slope {
                    Some(s) => s[c] as f32,
                    None => {
                        params.log_side_slope[c] * params.lin_side_slope[c] / (break_lin * params.ln_base)
                    }
                };
                if linear_slope[c] == 0.0 {
                    return Err(OcioError::InvalidTransform {
                        reason: "LogCameraTransform linear slope must be non-zero".into(),
                    });
                }
                linear_offset[c] = log_break - linear_slope[c] * lin_side_break[c];
            }
            ops.push(ProcessorOp::LogCamera {
                params,
                lin_side_break,
                linear_slope,
                linear_offset,
                forward,
            });
        }

        Transform::Range(r) => ops.push(compile_range(r, forward)?),

        Transform::Cdl(cdl) => {
            if cdl.slope.contains(&0.0) || cdl.power.contains(&0.0) || cdl.saturation == 0.0 {
                return Err(OcioError::InvalidTransform {
                    reason: "CDL slope, power and saturation must be non-zero".into(),
                });
            }
            ops.push(ProcessorOp::Cdl {
                slope: cdl.slope.map(|v| v as f32),
                offset: cdl.offset.map(|v| v as f32),
                power: cdl.power.map(|v| v as f32),
                saturation: cdl.saturation as f32,
                style: cdl.style,
                forward,
            });
        }

        Transform::Builtin(b) => {
            let expanded = builtin::expand(&b.style)?;
            compile(&expanded, dir, ops)?;
        }

        Transform::Group(g) => {
            if forward {
                for t in &g.transforms {
                    compile(t, TransformDirection::Forward, ops)?;
                }
            } else {
                for t in g.transforms.iter().rev() {
                    compile(t, TransformDirection::Inverse, ops)?;
                }
            }
        }

        Transform::ColorSpace(cs) => {
            return Err(OcioError::InvalidTransform {
                reason: format!(
                    "color space reference {} -> {} must be resolved by a config",
                    cs.src, cs.dst
                ),
            });
        }

        Transform::File(f) => {
            return Err(OcioError::UnsupportedTransform {
                name: format!("FileTransform ({})", f.src),
            });
        }

        Transform::Unsupported(u) => {
            return Err(OcioError::UnsupportedTransform { name: u.kind.clone() });
        }
    }
    Ok(())
}

fn compile_range(r: &RangeTransform, forward: bool) -> OcioResult<ProcessorOp> {
    let pair = |a: Option<f64>, b: Option<f64>, what: &str| match (a, b) {
        (Some(a), Some(b)) => Ok(Some((a, b))),
        (None, None) => Ok(None),
        _ => Err(OcioError::InvalidTransform {
            reason: format!("RangeTransform {what} values must be given for both input and output"),
        }),
    };
    let mins = pair(r.min_in, r.min_out, "min")?;
    let maxs = pair(r.max_in, r.max_out, "max")?;

    // Inverse swaps the roles of input and output bounds.
    let flip = |p: Option<(f64, f64)>| p.map(|(i, o)| if forward { (i, o) } else { (o, i) });
    let (mins, maxs) = (flip(mins), flip(maxs));

    let (scale, offset) = match (mins, maxs) {
        (Some((min_in, min_out)), Some((max_in, max_out))) => {
            if (max_in - min_in).abs() < 1e-12 {
                return Err(OcioError::InvalidTransform {
                    reason: "RangeTransform input range is empty".into(),
                });
            }
            let scale = (max_out - min_out) / (max_in - min_in);
            (scale, min_out - min_in * scale)
        }
        (Some((min_in, min_out)), None) => (1.0, min_out - min_in),
        (None, Some((max_in, max_out))) => (1.0, max_out - max_in),
        (None, None) => (1.0, 0.0),
    };

    let clamp = r.style == RangeStyle::Clamp;
    Ok(ProcessorOp::Range {
        scale: scale as f32,
        offset: offset as f32,
        clamp_min: mins.filter(|_| clamp).map(|(_, o)| o as f32),
        clamp_max: maxs.filter(|_| clamp).map(|(_, o)| o as f32),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn run(t: &Transform, dir: TransformDirection, px: [f32; 4]) -> [f32; 4] {
        let mut pixels = [px];
        Processor::from_transform(t, dir)
            .unwrap()
            .default_cpu_processor()
            .apply_rgba(&mut pixels);
        pixels[0]
    }

    #[test]
    fn matrix_inverse_roundtrip() {
        let t = Transform::Matrix(MatrixTransform {
            matrix: [
                2.0, 0.5, 0.0, 0.0,
                0.0, 1.0, 0.25, 0.0,
                0.1, 0.0, 3.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
            offset: [0.1, -0.2, 0.3, 0.0],
            direction: TransformDirection::Forward,
        });
        let fwd = run(&t, TransformDirection::Forward, [0.3, 0.5, 0.7, 1.0]);
        let back = run(&t, TransformDirection::Inverse, fwd);
        for (a, b) in back.iter().zip([0.3, 0.5, 0.7, 1.0]) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-5);
        }
    }

    #[test]
    fn singular_matrix_inverse_fails() {
        let mut m = IDENTITY_4X4;
        m[0] = 0.0;
        let t = Transform::matrix(m);
        assert!(Processor::from_transform(&t, TransformDirection::Inverse).is_err());
    }

    #[test]
    fn moncurve_srgb_values() {
        let t = Transform::ExponentWithLinear(ExponentWithLinearTransform {
            gamma: [2.4; 3],
            offset: [0.055; 3],
            negative_style: NegativeStyle::Linear,
            direction: TransformDirection::Forward,
        });
        // Forward decodes: sRGB 0.5 is ~0.214 linear.
        let lin = run(&t, TransformDirection::Forward, [0.5, 0.02, 1.0, 1.0]);
        assert_abs_diff_eq!(lin[0], 0.2140, epsilon = 1e-3);
        assert_abs_diff_eq!(lin[1], 0.02 / 12.92, epsilon = 1e-5);
        assert_abs_diff_eq!(lin[2], 1.0, epsilon = 1e-5);

        let enc = run(&t, TransformDirection::Inverse, lin);
        assert_abs_diff_eq!(enc[0], 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(enc[1], 0.02, epsilon = 1e-5);
    }

    #[test]
    fn exponent_processor() {
        let t = Transform::Exponent(ExponentTransform {
            value: [2.0, 2.0, 2.0, 1.0],
            negative_style: NegativeStyle::Clamp,
            direction: TransformDirection::Forward,
        });
        let px = run(&t, TransformDirection::Forward, [0.5, -0.5, 1.0, 0.5]);
        assert_abs_diff_eq!(px[0], 0.25, epsilon = 1e-6);
        assert_eq!(px[1], 0.0);
        assert_eq!(px[3], 0.5);
    }

    #[test]
    fn log_camera_is_continuous_at_break() {
        let t = builtin::expand("CURVE - LINEAR_to_ACEScct-LOG").unwrap();
        let below = run(&t, TransformDirection::Forward, [0.0078125 - 1e-6, 0.0, 0.18, 1.0]);
        let above = run(&t, TransformDirection::Forward, [0.0078125 + 1e-6, 0.0, 0.18, 1.0]);
        assert_abs_diff_eq!(below[0], above[0], epsilon = 1e-4);
        // ACEScct toe: 0 maps to B.
        assert_abs_diff_eq!(below[1], 0.072_905_53, epsilon = 1e-5);
        assert_abs_diff_eq!(below[2], 0.4135, epsilon = 1e-3);
    }

    #[test]
    fn range_clamps_and_inverts() {
        let t = Transform::Range(RangeTransform {
            min_in: Some(0.0),
            max_in: Some(1.0),
            min_out: Some(0.5),
            max_out: Some(1.0),
            ..Default::default()
        });
        let px = run(&t, TransformDirection::Forward, [0.5, 2.0, -1.0, 1.0]);
        assert_abs_diff_eq!(px[0], 0.75, epsilon = 1e-6);
        assert_eq!(px[1], 1.0);
        assert_eq!(px[2], 0.5);
        let back = run(&t, TransformDirection::Inverse, [0.75, 0.5, 1.0, 1.0]);
        assert_abs_diff_eq!(back[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn range_needs_matching_bounds() {
        let t = Transform::Range(RangeTransform {
            min_in: Some(0.0),
            ..Default::default()
        });
        assert!(Processor::from_transform(&t, TransformDirection::Forward).is_err());
    }

    #[test]
    fn cdl_processor() {
        let t = Transform::Cdl(CdlTransform {
            slope: [1.1, 1.0, 0.9],
            ..Default::default()
        });
        let px = run(&t, TransformDirection::Forward, [0.5, 0.5, 0.5, 1.0]);
        assert_abs_diff_eq!(px[0], 0.55, epsilon = 1e-6);
        assert_abs_diff_eq!(px[2], 0.45, epsilon = 1e-6);
        let back = run(&t, TransformDirection::Inverse, px);
        assert_abs_diff_eq!(back[0], 0.5, epsilon = 1e-5);
    }

    #[test]
    fn group_inverse_reverses_order() {
        let g = Transform::group(vec![
            Transform::Log(LogTransform { base: 10.0, direction: TransformDirection::Forward }),
            Transform::matrix([
                2.0, 0.0, 0.0, 0.0,
                0.0, 2.0, 0.0, 0.0,
                0.0, 0.0, 2.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ]),
        ]);
        let fwd = run(&g, TransformDirection::Forward, [10.0, 100.0, 1.0, 1.0]);
        assert_abs_diff_eq!(fwd[1], 4.0, epsilon = 1e-5);
        let back = run(&g, TransformDirection::Inverse, fwd);
        assert_abs_diff_eq!(back[1], 100.0, epsilon = 1e-2);
    }

    #[test]
    fn optimization_removes_identity() {
        let g = Transform::group(vec![
            Transform::matrix(IDENTITY_4X4),
            Transform::Exponent(ExponentTransform {
                value: [1.0; 4],
                negative_style: NegativeStyle::Clamp,
                direction: TransformDirection::Forward,
            }),
        ]);
        let p = Processor::from_transform(&g, TransformDirection::Forward).unwrap();
        assert_eq!(p.ops().len(), 2);
        assert!(p.is_identity());
        assert_eq!(p.default_cpu_processor().num_ops(), 0);
        assert_eq!(p.cpu_processor(OptimizationLevel::None).num_ops(), 2);
    }

    #[test]
    fn optimization_combines_matrices() {
        let t = Transform::builtin("ACEScg_to_ACES2065-1");
        let g = Transform::group(vec![t.clone(), t.inverse()]);
        let p = Processor::from_transform(&g, TransformDirection::Forward).unwrap();
        assert_eq!(p.ops().len(), 2);
        assert_eq!(p.default_cpu_processor().num_ops(), 0);
    }

    #[test]
    fn unresolved_colorspace_reference_fails() {
        let t = Transform::ColorSpace(ColorSpaceTransform {
            src: "a".into(),
            dst: "b".into(),
            data_bypass: true,
            direction: TransformDirection::Forward,
        });
        assert!(Processor::from_transform(&t, TransformDirection::Forward).is_err());
    }

    #[test]
    fn file_transform_unsupported() {
        let t = Transform::File(FileTransform {
            src: "grade.cube".into(),
            direction: TransformDirection::Forward,
        });
        assert!(matches!(
            Processor::from_transform(&t, TransformDirection::Forward),
            Err(OcioError::UnsupportedTransform { .. })
        ));
    }

    #[test]
    fn unsupported_kind_fails_to_compile() {
        let t = Transform::group(vec![
            Transform::builtin("IDENTITY"),
            Transform::Unsupported(UnsupportedTransform {
                kind: "FixedFunctionTransform".into(),
                direction: TransformDirection::Inverse,
            }),
        ]);
        let err = Processor::from_transform(&t, TransformDirection::Forward).unwrap_err();
        assert!(matches!(err, OcioError::UnsupportedTransform { name } if name == "FixedFunctionTransform"));
    }
}
