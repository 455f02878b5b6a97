use thiserror::Error;

/// Crate-wide error type.
///
/// `ImageLoad` is recoverable at the block level: the renderer catches it,
/// logs a warning, and continues with a zero-height block. Everything else
/// aborts the render.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create PDF: {0}")]
    Pdf(String),
    #[error("Failed to read order file: {0}")]
    Order(String),
    #[error("Failed to load image: {0}")]
    ImageLoad(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
