use thiserror::Error;

#[derive(Error, Debug)]
/// Batch error
pub enum BatchError {
    /// A file could not be opened, read, created or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// Input content is not valid JSON or is not an array of objects.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid format selector, job configuration or record shape.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A value could not be represented in the requested output format.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A job stage failed.
    #[error("Step {step} failed: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<BatchError>,
    },
}

impl BatchError {
    /// Returns the innermost error, unwrapping any `Step` layers.
    pub fn cause(&self) -> &BatchError {
        match self {
            BatchError::Step { source, .. } => source.cause(),
            other => other,
        }
    }

    /// Name of the stage that failed, when known.
    pub fn step(&self) -> Option<&str> {
        match self {
            BatchError::Step { step, .. } => Some(step),
            _ => None,
        }
    }
}
