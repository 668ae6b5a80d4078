use cuba_errors::AppError;
use derive_more::Display;
use thiserror::Error;

/// 失败的存储操作，决定返回给客户端的通用错误消息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StoreAction {
    #[display("Failed to retrieve returns")]
    List,
    #[display("Failed to create return")]
    Create,
    #[display("Failed to update return")]
    Update,
    #[display("Failed to delete return")]
    Delete,
    #[display("Failed to restore return")]
    Restore,
}

#[derive(Debug, Error)]
pub enum ReturError {
    #[error("Invalid ID format")]
    InvalidId,
    #[error("Invalid input")]
    InvalidInput,
    #[error("Pengembalian must be 'barang' or 'uang'")]
    InvalidRefundMethod,
    #[error("Return not found")]
    NotFound,
    #[error("No returns to undo")]
    EmptyStack,
    #[error("{action}")]
    Store {
        action: StoreAction,
        #[source]
        source: AppError,
    },
}

impl ReturError {
    pub fn store(action: StoreAction, source: AppError) -> Self {
        Self::Store { action, source }
    }
}

impl From<crate::domain::ledger::EmptyStack> for ReturError {
    fn from(_: crate::domain::ledger::EmptyStack) -> Self {
        ReturError::EmptyStack
    }
}

/// 存储层的 NotFound 保留为 404，其余错误归类为存储失败
pub(crate) fn classify(action: StoreAction) -> impl FnOnce(AppError) -> ReturError {
    move |error| match error {
        AppError::NotFound(_) => ReturError::NotFound,
        other => ReturError::store(action, other),
    }
}

impl From<ReturError> for AppError {
    fn from(error: ReturError) -> Self {
        match error {
            ReturError::InvalidId
            | ReturError::InvalidInput
            | ReturError::InvalidRefundMethod
            | ReturError::EmptyStack => AppError::Validation(error.to_string()),
            ReturError::NotFound => AppError::NotFound(error.to_string()),
            // 底层原因只写日志，不返回给客户端
            ReturError::Store { action, .. } => AppError::Internal(action.to_string()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ReturError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        for error in [
            ReturError::InvalidId,
            ReturError::InvalidInput,
            ReturError::InvalidRefundMethod,
            ReturError::EmptyStack,
        ] {
            let app: AppError = error.into();
            assert_eq!(app.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_not_found_message() {
        let app: AppError = ReturError::NotFound.into();
        assert_eq!(app.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(app.message(), "Return not found");
    }

    #[test]
    fn test_store_error_hides_cause() {
        let error = ReturError::store(
            StoreAction::Create,
            AppError::database("duplicate key value violates unique constraint"),
        );
        let app: AppError = error.into();

        assert_eq!(app.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.message(), "Failed to create return");
    }

    #[test]
    fn test_classify_keeps_not_found() {
        let error = classify(StoreAction::Update)(AppError::not_found("gone"));
        assert!(matches!(error, ReturError::NotFound));

        let error = classify(StoreAction::Delete)(AppError::database("down"));
        assert!(matches!(
            error,
            ReturError::Store {
                action: StoreAction::Delete,
                ..
            }
        ));
    }
}
