use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Face catalog error: {0}")]
    FaceCatalog(String),

    #[error("Vector with non-finite components: {0}")]
    NonFinite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ZoneError {
    /// Errors that only invalidate a single candidate, not the whole computation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ZoneError::NonFinite(_))
    }
}

pub type Result<T> = std::result::Result<T, ZoneError>;
