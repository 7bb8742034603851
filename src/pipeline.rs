//! Operation dispatch.
//!
//! Every core operation has a name usable on the command line and in
//! pipeline files. Operations that need an argument take it after a colon:
//! `rotate:30`, `gaussian-n:7`, `difference:other.tga`,
//! `stroke:RADIUS,X,Y,R,G,B[,A]`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use raster_ops::{Compositor, Raster, Stroke};

use crate::codec;
use crate::error::AppError;

/// Operation names with a one-line usage, in display order.
pub const OPERATIONS: &[(&str, &str)] = &[
    ("grayscale", "convert to luminance gray"),
    ("quant-uniform", "truncate to 8x8x4 uniform levels"),
    ("quant-populosity", "reduce to the 256 most frequent colors"),
    ("dither-threshold", "black and white at luminance 127"),
    ("dither-random", "black and white with uniform noise"),
    ("dither-fs", "Floyd-Steinberg black and white"),
    ("dither-bright", "black and white preserving mean brightness"),
    ("dither-cluster", "4x4 clustered-dot ordered dither"),
    ("dither-color", "Floyd-Steinberg to the uniform color levels"),
    ("filter-box", "5x5 box blur"),
    ("filter-bartlett", "5x5 Bartlett blur"),
    ("filter-gaussian", "5x5 Gaussian blur"),
    ("gaussian-n:N", "N x N binomial blur (odd N, at most 29)"),
    ("filter-edge", "high-pass edge detection"),
    ("filter-enhance", "add edge response to the image"),
    ("half-size", "halve width and height"),
    ("double-size", "double width and height"),
    ("rotate:DEG", "rotate clockwise about the center"),
    ("flip", "reverse the row order"),
    ("clear", "set every byte to zero"),
    ("stroke:R,X,Y,R,G,B[,A]", "paint a disc"),
    ("over:PATH", "composite over (unimplemented)"),
    ("in:PATH", "composite in (unimplemented)"),
    ("out:PATH", "composite out (unimplemented)"),
    ("atop:PATH", "composite atop (unimplemented)"),
    ("xor:PATH", "composite xor (unimplemented)"),
    ("difference:PATH", "absolute difference against another image"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Grayscale,
    QuantUniform,
    QuantPopulosity,
    DitherThreshold,
    DitherRandom,
    DitherFs,
    DitherBright,
    DitherCluster,
    DitherColor,
    FilterBox,
    FilterBartlett,
    FilterGaussian,
    GaussianN(u32),
    FilterEdge,
    FilterEnhance,
    HalfSize,
    DoubleSize,
    Rotate(f32),
    Flip,
    Clear,
    Stroke(Stroke),
    Composite(Compositor, PathBuf),
    Difference(PathBuf),
}

fn compositor_name(op: Compositor) -> &'static str {
    match op {
        Compositor::Over => "over",
        Compositor::In => "in",
        Compositor::Out => "out",
        Compositor::Atop => "atop",
        Compositor::Xor => "xor",
    }
}

fn parse_compositor(name: &str) -> Option<Compositor> {
    Compositor::ALL
        .into_iter()
        .find(|&op| compositor_name(op) == name)
}

/// Parse `RADIUS,X,Y,R,G,B[,A]`; alpha defaults to opaque.
fn parse_stroke(arg: &str) -> Result<Stroke, AppError> {
    let fields: Vec<&str> = arg.split(',').map(str::trim).collect();
    if fields.len() != 6 && fields.len() != 7 {
        return Err(AppError::invalid_argument(
            "stroke",
            format!("expected RADIUS,X,Y,R,G,B[,A], got {arg:?}"),
        ));
    }
    let number = |i: usize| -> Result<u32, AppError> {
        fields[i]
            .parse()
            .map_err(|e| AppError::invalid_argument("stroke", format!("{:?}: {e}", fields[i])))
    };
    let channel = |i: usize| -> Result<u8, AppError> {
        fields[i]
            .parse()
            .map_err(|e| AppError::invalid_argument("stroke", format!("{:?}: {e}", fields[i])))
    };
    let alpha = if fields.len() == 7 { channel(6)? } else { 255 };
    Ok(Stroke::new(
        number(0)?,
        number(1)?,
        number(2)?,
        [channel(3)?, channel(4)?, channel(5)?, alpha],
    ))
}

fn require_arg<'a>(name: &str, arg: Option<&'a str>) -> Result<&'a str, AppError> {
    arg.filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::invalid_argument(name, "missing argument"))
}

impl Operation {
    /// Parse a name and optional argument.
    pub fn parse(name: &str, arg: Option<&str>) -> Result<Self, AppError> {
        let op = match name {
            "grayscale" => Operation::Grayscale,
            "quant-uniform" => Operation::QuantUniform,
            "quant-populosity" => Operation::QuantPopulosity,
            "dither-threshold" => Operation::DitherThreshold,
            "dither-random" => Operation::DitherRandom,
            "dither-fs" => Operation::DitherFs,
            "dither-bright" => Operation::DitherBright,
            "dither-cluster" => Operation::DitherCluster,
            "dither-color" => Operation::DitherColor,
            "filter-box" => Operation::FilterBox,
            "filter-bartlett" => Operation::FilterBartlett,
            "filter-gaussian" => Operation::FilterGaussian,
            "filter-edge" => Operation::FilterEdge,
            "filter-enhance" => Operation::FilterEnhance,
            "half-size" => Operation::HalfSize,
            "double-size" => Operation::DoubleSize,
            "flip" => Operation::Flip,
            "clear" => Operation::Clear,
            "gaussian-n" => {
                let arg = require_arg(name, arg)?;
                let size = arg
                    .trim()
                    .parse()
                    .map_err(|e| AppError::invalid_argument(name, format!("{arg:?}: {e}")))?;
                Operation::GaussianN(size)
            }
            "rotate" => {
                let arg = require_arg(name, arg)?;
                let degrees: f32 = arg
                    .trim()
                    .parse()
                    .map_err(|e| AppError::invalid_argument(name, format!("{arg:?}: {e}")))?;
                if !degrees.is_finite() {
                    return Err(AppError::invalid_argument(name, "angle must be finite"));
                }
                Operation::Rotate(degrees)
            }
            "stroke" => Operation::Stroke(parse_stroke(require_arg(name, arg)?)?),
            "difference" => Operation::Difference(PathBuf::from(require_arg(name, arg)?)),
            other => match parse_compositor(other) {
                Some(op) => Operation::Composite(op, PathBuf::from(require_arg(name, arg)?)),
                None => return Err(AppError::UnknownOperation(other.to_string())),
            },
        };

        let takes_arg = matches!(
            op,
            Operation::GaussianN(_)
                | Operation::Rotate(_)
                | Operation::Stroke(_)
                | Operation::Composite(..)
                | Operation::Difference(_)
        );
        if !takes_arg && arg.is_some() {
            return Err(AppError::invalid_argument(name, "takes no argument"));
        }
        Ok(op)
    }

    /// Base name, without argument.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Grayscale => "grayscale",
            Operation::QuantUniform => "quant-uniform",
            Operation::QuantPopulosity => "quant-populosity",
            Operation::DitherThreshold => "dither-threshold",
            Operation::DitherRandom => "dither-random",
            Operation::DitherFs => "dither-fs",
            Operation::DitherBright => "dither-bright",
            Operation::DitherCluster => "dither-cluster",
            Operation::DitherColor => "dither-color",
            Operation::FilterBox => "filter-box",
            Operation::FilterBartlett => "filter-bartlett",
            Operation::FilterGaussian => "filter-gaussian",
            Operation::GaussianN(_) => "gaussian-n",
            Operation::FilterEdge => "filter-edge",
            Operation::FilterEnhance => "filter-enhance",
            Operation::HalfSize => "half-size",
            Operation::DoubleSize => "double-size",
            Operation::Rotate(_) => "rotate",
            Operation::Flip => "flip",
            Operation::Clear => "clear",
            Operation::Stroke(_) => "stroke",
            Operation::Composite(op, _) => compositor_name(*op),
            Operation::Difference(_) => "difference",
        }
    }

    /// Resolve a relative second-operand path against `base`.
    pub fn relative_to(self, base: &Path) -> Self {
        let resolve = |path: PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };
        match self {
            Operation::Composite(op, path) => Operation::Composite(op, resolve(path)),
            Operation::Difference(path) => Operation::Difference(resolve(path)),
            other => other,
        }
    }

    /// Apply to `raster`. `rng` feeds the random dither.
    pub fn apply<R: Rng + ?Sized>(&self, raster: &mut Raster, rng: &mut R) -> Result<(), AppError> {
        match self {
            Operation::Grayscale => raster.to_grayscale(),
            Operation::QuantUniform => raster.quant_uniform(),
            Operation::QuantPopulosity => raster.quant_populosity(),
            Operation::DitherThreshold => raster.dither_threshold(),
            Operation::DitherRandom => raster.dither_random_with(rng),
            Operation::DitherFs => raster.dither_fs(),
            Operation::DitherBright => raster.dither_bright(),
            Operation::DitherCluster => raster.dither_cluster(),
            Operation::DitherColor => raster.dither_color(),
            Operation::FilterBox => raster.filter_box(),
            Operation::FilterBartlett => raster.filter_bartlett(),
            Operation::FilterGaussian => raster.filter_gaussian(),
            Operation::GaussianN(size) => raster.filter_gaussian_n(*size)?,
            Operation::FilterEdge => raster.filter_edge(),
            Operation::FilterEnhance => raster.filter_enhance(),
            Operation::HalfSize => raster.half_size(),
            Operation::DoubleSize => raster.double_size(),
            Operation::Rotate(degrees) => raster.rotate(*degrees),
            Operation::Flip => *raster = raster.reverse_rows(),
            Operation::Clear => raster.clear_to_black(),
            Operation::Stroke(stroke) => raster.paint_stroke(stroke),
            Operation::Composite(op, path) => {
                let other = codec::load(path)?;
                raster.composite(*op, &other)?;
            }
            Operation::Difference(path) => {
                let other = codec::load(path)?;
                raster.difference(&other)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Operation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            Some((name, arg)) => Operation::parse(name.trim(), Some(arg)),
            None => Operation::parse(s, None),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Operation::GaussianN(size) => write!(f, "{name}:{size}"),
            Operation::Rotate(degrees) => write!(f, "{name}:{degrees}"),
            Operation::Stroke(s) => write!(
                f,
                "{name}:{},{},{},{},{},{},{}",
                s.radius, s.x, s.y, s.r, s.g, s.b, s.a
            ),
            Operation::Composite(_, path) | Operation::Difference(path) => {
                write!(f, "{name}:{}", path.display())
            }
            _ => f.write_str(name),
        }
    }
}

/// An ordered list of operations with the RNG they share.
pub struct Pipeline {
    steps: Vec<Operation>,
    rng: StdRng,
}

impl Pipeline {
    /// Build a pipeline. Without a seed the random dither draws from OS
    /// entropy.
    pub fn new(steps: Vec<Operation>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { steps, rng }
    }

    pub fn steps(&self) -> &[Operation] {
        &self.steps
    }

    /// Apply every step in order, stopping at the first failure.
    pub fn run(&mut self, raster: &mut Raster) -> Result<(), AppError> {
        for (index, step) in self.steps.iter().enumerate() {
            let span = tracing::info_span!("step", index, op = %step);
            let _guard = span.enter();
            step.apply(raster, &mut self.rng).inspect_err(|e| {
                tracing::warn!(%e, "Step failed");
            })?;
            tracing::debug!(
                width = raster.width(),
                height = raster.height(),
                "Step complete"
            );
        }
        Ok(())
    }
}
