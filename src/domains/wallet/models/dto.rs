use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domains::wallet::models::OperationType;

// 요청/응답 DTO
// 와이어 포맷은 camelCase (walletId, operationType, amount)

/// 지갑 연산 요청
/// Wallet operation request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = WalletOperationRequest)]
pub struct WalletOperationRequest {
    /// 지갑 식별자
    /// Wallet identifier
    #[schema(example = "b3f1c9de-8a47-4f2e-9c36-5d2f0a1e7b94")]
    pub wallet_id: Uuid,

    /// 연산 종류 (DEPOSIT 또는 WITHDRAW)
    /// Operation type (DEPOSIT or WITHDRAW)
    pub operation_type: OperationType,

    /// 금액 (최소 화폐 단위의 양의 정수)
    /// Amount (positive integer, minor units)
    ///
    /// 음수/소수는 역직렬화 단계에서 거부됨. 0은 핸들러에서 거부
    #[schema(example = 1000)]
    pub amount: u64,
}

/// 지갑 연산 응답
/// Wallet operation response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = WalletOperationResponse)]
pub struct WalletOperationResponse {
    /// 지갑 식별자
    /// Wallet identifier
    pub wallet_id: Uuid,

    /// 연산 반영 후 잔액
    /// Balance after the operation
    #[schema(value_type = String, example = "1000")]
    pub balance: Decimal,

    /// 성공 메시지
    /// Success message
    #[schema(example = "Operation DEPOSIT completed successfully")]
    pub message: String,
}

/// 잔액 조회 응답
/// Wallet balance response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = WalletBalanceResponse)]
pub struct WalletBalanceResponse {
    /// 지갑 식별자
    /// Wallet identifier
    pub wallet_id: Uuid,

    /// 현재 잔액
    /// Current balance
    #[schema(value_type = String, example = "600")]
    pub balance: Decimal,
}
