use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

// =====================================================
// Wallet 모델
// =====================================================
// 역할: 지갑 한 개의 영속 상태를 나타내는 데이터 모델
// 불변식: balance >= 0 (모든 동시 실행 순서에서)
//
// 생명주기:
// - 알려지지 않은 id로 첫 연산이 들어오면 balance 0으로 암묵 생성
// - 이 코어에서 삭제는 하지 않음
// =====================================================

/// 지갑 (데이터베이스 행)
/// Wallet (database row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// 지갑 고유 식별자
    /// Wallet identifier (UUID)
    pub id: Uuid,

    /// 현재 잔액 (음수 불가, 정밀 십진수)
    /// Current balance (non-negative, exact decimal)
    pub balance: Decimal,

    /// Created timestamp
    /// 생성 시간
    pub created_at: DateTime<Utc>,

    /// Updated timestamp
    /// 잔액 마지막 변경 시간
    pub updated_at: DateTime<Utc>,
}

/// 연산 종류
/// Operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    /// 입금
    /// Deposit: balance + amount
    Deposit,
    /// 출금
    /// Withdraw: balance - amount (잔액 부족 시 거부)
    Withdraw,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationType::Deposit => write!(f, "DEPOSIT"),
            OperationType::Withdraw => write!(f, "WITHDRAW"),
        }
    }
}
