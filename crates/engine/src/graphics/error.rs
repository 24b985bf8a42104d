use thiserror::Error;

/// Error type for everything a renderer backend can fail at
#[derive(Debug, Error)]
pub enum GraphicsError {
    /// A renderer could not acquire its draw resources
    #[error("Resource creation failed: {0}")]
    ResourceCreation(String),
    /// All errors for which no specific variant is available
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GraphicsResult<T> = ::std::result::Result<T, GraphicsError>;
