use std::path::PathBuf;

use raster_ops::RasterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Image codec error for {}: {source}", path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid pipeline config: {0}")]
    Config(String),

    #[error("Operation failed: {0}")]
    Operation(#[from] RasterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid argument for {op}: {message}")]
    InvalidArgument { op: String, message: String },
}

impl AppError {
    pub(crate) fn invalid_argument(op: &str, message: impl Into<String>) -> Self {
        AppError::InvalidArgument {
            op: op.to_string(),
            message: message.into(),
        }
    }
}
