use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use raster_ops::Stroke;

use crate::error::AppError;
use crate::pipeline::{Operation, Pipeline};

/// Pipeline description loaded from a YAML file
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Image to read
    pub input: PathBuf,

    /// Image to write; the extension selects the format
    pub output: PathBuf,

    /// Seed for the random dither (OS entropy when absent)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Operations applied in order
    #[serde(default)]
    pub steps: Vec<StepConfig>,

    /// Directory the file was loaded from
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// One pipeline step: either a bare name (`grayscale`) or a single-key
/// mapping from name to argument (`rotate: 30`).
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum StepConfig {
    Name(String),
    WithArgument(BTreeMap<String, serde_yaml::Value>),
}

/// Structured form of the stroke argument
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
struct StrokeConfig {
    radius: u32,
    x: u32,
    y: u32,
    r: u8,
    g: u8,
    b: u8,
    #[serde(default = "default_alpha")]
    a: u8,
}

fn default_alpha() -> u8 {
    255
}

fn scalar_argument(name: &str, value: &serde_yaml::Value) -> Result<String, AppError> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        _ => Err(AppError::Config(format!(
            "step `{name}` expects a scalar argument"
        ))),
    }
}

impl StepConfig {
    /// Parse the step. Unknown names are configuration errors here.
    pub fn to_operation(&self) -> Result<Operation, AppError> {
        self.parse_operation().map_err(|e| match e {
            AppError::UnknownOperation(name) => {
                AppError::Config(format!("unknown step `{name}`"))
            }
            other => other,
        })
    }

    fn parse_operation(&self) -> Result<Operation, AppError> {
        match self {
            StepConfig::Name(text) => text.parse(),
            StepConfig::WithArgument(map) => {
                let mut entries = map.iter();
                let (name, value) = match (entries.next(), entries.next()) {
                    (Some(entry), None) => entry,
                    _ => {
                        return Err(AppError::Config(format!(
                            "a step must have exactly one key, got {}",
                            map.len()
                        )))
                    }
                };
                if name == "stroke" && value.is_mapping() {
                    let s: StrokeConfig = serde_yaml::from_value(value.clone())
                        .map_err(|e| AppError::Config(format!("step `stroke`: {e}")))?;
                    return Ok(Operation::Stroke(Stroke::new(
                        s.radius,
                        s.x,
                        s.y,
                        [s.r, s.g, s.b, s.a],
                    )));
                }
                Operation::parse(name, Some(&scalar_argument(name, value)?))
            }
        }
    }
}

impl PipelineConfig {
    /// Parse a pipeline from YAML text. Paths are kept as written.
    pub fn from_yaml(yaml: &str) -> Result<Self, AppError> {
        serde_yaml::from_str(yaml).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load a pipeline file. Relative paths inside it, including second
    /// operands of binary operations, are resolved against the file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.input = resolve(base, &config.input);
        config.output = resolve(base, &config.output);
        config.base_dir = Some(base.to_path_buf());
        tracing::info!(
            path = %path.display(),
            steps = config.steps.len(),
            "Loaded pipeline"
        );
        Ok(config)
    }

    /// Parse every step into an [`Operation`].
    pub fn operations(&self) -> Result<Vec<Operation>, AppError> {
        self.steps
            .iter()
            .map(|step| {
                let op = step.to_operation()?;
                Ok(match &self.base_dir {
                    Some(base) => op.relative_to(base),
                    None => op,
                })
            })
            .collect()
    }

    /// Build the runnable pipeline.
    pub fn pipeline(&self) -> Result<Pipeline, AppError> {
        Ok(Pipeline::new(self.operations()?, self.seed))
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
