use std::path::PathBuf;

/// Failures of the surfaces around the solver. The solver itself has none.
#[derive(Debug, thiserror::Error)]
pub enum FluidError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type FluidResult<T> = Result<T, FluidError>;
