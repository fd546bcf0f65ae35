use std::path::PathBuf;

pub type VitrineResult<T> = Result<T, VitrineError>;

#[derive(thiserror::Error, Debug)]
pub enum VitrineError {
    #[error("asset not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported asset format for '{}': {detail}", path.display())]
    UnsupportedFormat { path: PathBuf, detail: String },

    #[error("import produced no geometry: {}", path.display())]
    EmptyImport { path: PathBuf },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid frame range: {0}")]
    InvalidFrameRange(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VitrineError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn unsupported_format(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub fn empty_import(path: impl Into<PathBuf>) -> Self {
        Self::EmptyImport { path: path.into() }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn invalid_frame_range(msg: impl Into<String>) -> Self {
        Self::InvalidFrameRange(msg.into())
    }
}
