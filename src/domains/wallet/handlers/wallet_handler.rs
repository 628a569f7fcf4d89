use axum::extract::rejection::JsonRejection;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::domains::wallet::models::{
    WalletBalanceResponse, WalletOperationRequest, WalletOperationResponse,
};
use crate::shared::errors::{ErrorResponse, WalletError};
use crate::shared::services::AppState;

/// 지갑 연산 핸들러 (입금/출금)
/// Perform operation handler (deposit/withdraw)
///
/// 존재하지 않는 지갑은 balance 0으로 암묵 생성 후 연산이 적용됨
#[utoipa::path(
    post,
    path = "/api/v1/wallet",
    request_body = WalletOperationRequest,
    responses(
        (status = 200, description = "Operation completed successfully", body = WalletOperationResponse),
        (status = 400, description = "Invalid request (malformed body, non-positive amount, missing fields)", body = ErrorResponse),
        (status = 404, description = "Wallet not found", body = ErrorResponse),
        (status = 422, description = "Insufficient funds", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Wallets"
)]
pub async fn perform_operation(
    State(app_state): State<AppState>,
    request: Result<Json<WalletOperationRequest>, JsonRejection>,
) -> Result<Json<WalletOperationResponse>, (StatusCode, Json<ErrorResponse>)> {
    // 1. 바디 검증 (파싱/타입 오류는 400)
    let Json(request) = request.map_err(handle_json_rejection)?;

    // 2. 금액 검증 (음수/소수는 역직렬화에서 이미 거부됨, 0만 따로 거부)
    if request.amount == 0 {
        tracing::warn!(wallet_id = %request.wallet_id, "Rejected operation with zero amount");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "VALIDATION_ERROR",
                "amount: must be greater than 0",
                StatusCode::BAD_REQUEST,
            )),
        ));
    }

    // 3. 연산 실행
    let response = app_state
        .wallet_state
        .wallet_service
        .perform_operation(request.wallet_id, request.operation_type, request.amount)
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<ErrorResponse>) { e.into() })?;

    Ok(Json(response))
}

/// 잔액 조회 핸들러
/// Get balance handler
#[utoipa::path(
    get,
    path = "/api/v1/wallets/{wallet_id}",
    params(
        ("wallet_id" = Uuid, Path, description = "Wallet ID")
    ),
    responses(
        (status = 200, description = "Balance retrieved successfully", body = WalletBalanceResponse),
        (status = 404, description = "Wallet not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Wallets"
)]
pub async fn get_balance(
    State(app_state): State<AppState>,
    Path(wallet_id): Path<Uuid>,
) -> Result<Json<WalletBalanceResponse>, (StatusCode, Json<ErrorResponse>)> {
    let response = app_state
        .wallet_state
        .wallet_service
        .get_balance(wallet_id)
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<ErrorResponse>) { e.into() })?;

    Ok(Json(response))
}

/// JSON 바디 거부를 400 응답으로 변환
/// Map a rejected JSON body to a 400 response
fn handle_json_rejection(rejection: JsonRejection) -> (StatusCode, Json<ErrorResponse>) {
    let message = rejection.body_text();
    tracing::warn!("Request body rejected: {}", message);

    // 타입/값 오류는 VALIDATION_ERROR, 그 외(깨진 JSON 등)는 INVALID_JSON
    let code = if matches!(rejection, JsonRejection::JsonDataError(_)) {
        "VALIDATION_ERROR"
    } else {
        "INVALID_JSON"
    };

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(code, message, StatusCode::BAD_REQUEST)),
    )
}
