use thiserror::Error;

/// Failure reported by the order service. The message is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct OperationError(pub String);

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No bearer token was supplied, so the operation was never attempted.
    #[error("Missing credential")]
    MissingCredential,
    #[error(transparent)]
    Operation(#[from] OperationError),
}
