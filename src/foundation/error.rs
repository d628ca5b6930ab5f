pub type SyncResult<T> = Result<T, SyncError>;

/// Error taxonomy for the render pipeline.
///
/// Callers branch on the variant rather than string-matching a formatted
/// message: `Input` means no usable audio source, `EmptyResult` means motion
/// synthesis produced zero frames, `Encoding` covers failures of the media
/// encoding step.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    #[error("input error: {0}")]
    Input(String),

    #[error("empty result: {0}")]
    EmptyResult(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SyncError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn empty_result(msg: impl Into<String>) -> Self {
        Self::EmptyResult(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
