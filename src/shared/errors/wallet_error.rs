use axum::{http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// 지갑 관련 에러
/// Wallet-related errors
#[derive(Error, Debug)]
pub enum WalletError {
    /// 지갑을 찾을 수 없음
    /// Wallet not found
    #[error("Wallet not found: {id}")]
    NotFound { id: Uuid },

    /// 잔액 부족 (출금 시 잔액 < 요청 금액)
    /// Insufficient funds (withdrawal would drive the balance negative)
    #[error("Insufficient funds: current balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// 에러 응답 바디
/// Error response body (uniform shape for every failure path)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = ErrorResponse)]
pub struct ErrorResponse {
    /// 에러 코드
    /// Error code
    #[schema(example = "INSUFFICIENT_FUNDS")]
    pub error: String,

    /// 사람이 읽을 수 있는 메시지
    /// Human-readable message
    pub message: String,

    /// HTTP 상태 코드
    /// HTTP status code
    #[schema(example = 422)]
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

/// WalletError를 HTTP 응답으로 변환
/// Convert WalletError into an HTTP response
///
/// NOT_FOUND → 404, INSUFFICIENT_FUNDS → 422, 나머지는 전부 500
/// 내부 에러 상세는 로그로만 남기고 응답에는 노출하지 않음
impl From<WalletError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: WalletError) -> Self {
        let (status, code, message) = match &err {
            WalletError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            WalletError::InsufficientFunds { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_FUNDS", err.to_string())
            }
            WalletError::DatabaseError(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
            WalletError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(code, message, status)))
    }
}
