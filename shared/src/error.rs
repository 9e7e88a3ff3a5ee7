use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to encode image: {0}")]
    EncodingFailure(String),

    #[error("Failed to write {path}: {message}")]
    WriteFailure { path: String, message: String },

    #[error("A render worker panicked")]
    WorkerPanicked,

    #[error("Render could not be scheduled: {0}")]
    Scheduling(String),
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::EncodingFailure(e.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::EncodingFailure(e.to_string())
    }
}
