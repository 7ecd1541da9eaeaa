//! 错误到 HTTP 响应的转换

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use errors::{AppError, ErrorResponse};
use metrics::counter;
use tracing::{error, warn};

/// 处理器对应的存储操作，决定 500 响应的错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_code(self) -> &'static str {
        match self {
            Operation::List | Operation::Get => "FETCH_ERROR",
            Operation::Create => "CREATE_ERROR",
            Operation::Update => "UPDATE_ERROR",
            Operation::Delete => "DELETE_ERROR",
        }
    }

    fn failure_label(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch trackers",
            Operation::Get => "Failed to fetch tracker",
            Operation::Create => "Failed to create tracker",
            Operation::Update => "Failed to update tracker",
            Operation::Delete => "Failed to delete tracker",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "An error occurred while retrieving trackers from database",
            Operation::Get => "An error occurred while retrieving the tracker from database",
            Operation::Create => "An error occurred while saving the tracker to database",
            Operation::Update => "An error occurred while updating the tracker in database",
            Operation::Delete => "An error occurred while deleting the tracker from database",
        }
    }
}

/// 渲染为错误信封的失败响应
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
    pub code: &'static str,
}

impl ApiError {
    fn new(
        status: StatusCode,
        error: impl Into<String>,
        message: impl Into<String>,
        code: &'static str,
    ) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
            code,
        }
    }

    pub fn validation(violations: &[String]) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            violations.join("; "),
            "VALIDATION_ERROR",
        )
    }

    pub fn invalid_json(schema: &str, rejection: &JsonRejection) -> Self {
        warn!(schema, error = %rejection.body_text(), "Failed to decode JSON");
        Self::new(
            StatusCode::BAD_REQUEST,
            "Invalid JSON payload",
            format!("Request body must be valid JSON matching {} schema", schema),
            "INVALID_JSON",
        )
    }

    pub fn invalid_id(reason: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Invalid ID parameter",
            reason,
            "INVALID_ID",
        )
    }

    /// 状态码取自 `AppError::status_code`，服务端失败使用操作自身的错误码
    pub fn from_app(operation: Operation, id: Option<i64>, err: AppError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = err.code();

        match err {
            AppError::NotFound(_) => {
                let message = match id {
                    Some(id) => format!("No tracker exists with ID {}", id),
                    None => "No tracker exists with the given ID".to_string(),
                };
                Self::new(status, "Tracker not found", message, code)
            }
            AppError::Validation(msg) => Self::new(status, "Validation failed", msg, code),
            other => {
                error!(
                    operation = ?operation,
                    kind = other.code(),
                    error = %other,
                    "Service error"
                );
                Self::new(
                    status,
                    operation.failure_label(),
                    operation.failure_message(),
                    operation.failure_code(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status.as_u16();
        if self.status.is_server_error() {
            error!(code = self.code, status, message = %self.message, "{}", self.error);
        } else {
            warn!(code = self.code, status, message = %self.message, "{}", self.error);
        }

        counter!(
            "tracker_http_errors_total",
            "code" => self.code,
            "status" => status.to_string()
        )
        .increment(1);

        let body = ErrorResponse::new(self.error)
            .with_message(self.message)
            .with_code(self.code);
        (self.status, Json(body)).into_response()
    }
}
