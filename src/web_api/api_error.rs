use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::data_access::data_context::StoreError;

/// Failures a handler can surface. Missing ids are not among them: update
/// and delete report success whether or not anything matched.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
    #[error("storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(_) | ApiError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        // Storage details stay in the log.
        (self.status_code(), "Internal server error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_are_opaque_500s() {
        let response = ApiError::Store(StoreError::Decode("secret detail".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn panicked_storage_task_is_a_500() {
        let join_error = tokio::task::spawn_blocking(|| panic!("redb blew up"))
            .await
            .unwrap_err();
        let response = ApiError::from(join_error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
