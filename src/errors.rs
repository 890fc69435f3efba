use thiserror::Error;

use crate::application::invoice_view::ViewError;
use crate::domain::errors::{OperationError, StoreError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential")]
    MissingCredential,

    #[error("Order service error: {0}")]
    Service(String),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::MissingCredential => AppError::MissingCredential,
            StoreError::Operation(OperationError(msg)) => AppError::Service(msg),
        }
    }
}

impl From<OperationError> for AppError {
    fn from(e: OperationError) -> Self {
        AppError::Service(e.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_display() {
        assert_eq!(
            AppError::Service("Order not found".to_string()).to_string(),
            "Order service error: Order not found"
        );
    }

    #[test]
    fn store_missing_credential_maps_to_app_missing_credential() {
        let app_err: AppError = StoreError::MissingCredential.into();
        assert!(matches!(app_err, AppError::MissingCredential));
    }

    #[test]
    fn store_operation_maps_to_app_service() {
        let app_err: AppError = StoreError::Operation(OperationError::new("oops")).into();
        assert!(matches!(app_err, AppError::Service(msg) if msg == "oops"));
    }

    #[test]
    fn view_error_is_transparent() {
        let app_err: AppError = ViewError::UnsupportedPageSize(3).into();
        assert_eq!(app_err.to_string(), "Unsupported page size: 3");
    }
}
