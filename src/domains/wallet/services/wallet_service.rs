use anyhow::Context;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domains::wallet::models::{
    OperationType, WalletBalanceResponse, WalletOperationResponse,
};
use crate::shared::database::{Database, WalletRepository};
use crate::shared::errors::WalletError;

// =====================================================
// WalletService
// =====================================================
// 역할: 잔액 변경 프로토콜 실행
// 설명: 연산 한 건을 하나의 DB 트랜잭션 안에서 처리
//
// 처리 순서 (전부 한 트랜잭션):
// 1. 지갑 조회 (행 잠금) — 없으면 생성 후 재조회
// 2. 새 잔액 계산 (출금 시 잔액 부족 검사)
// 3. 잔액 기록 — 영향받은 행 수로 쓰기 확인
// 4. 저장된 잔액 재조회 후 커밋
//
// 같은 지갑에 대한 동시 연산은 1번의 행 잠금에서 직렬화되므로
// 갱신 유실(lost update)이 없음. 다른 지갑끼리는 경합하지 않음
// =====================================================

/// 한 연산의 최대 시도 횟수 (일시적 저장소 오류 재시도 한도)
/// Max attempts per operation (bounded retry of transient store errors)
const MAX_OPERATION_ATTEMPTS: u32 = 3;

/// 한 번의 시도 결과 구분
/// Outcome of a single attempt
///
/// Business는 재시도하지 않고 그대로 반환, Store는 일시적 오류일 때만 재시도
enum OperationError {
    Business(WalletError),
    Store(anyhow::Error),
}

impl From<anyhow::Error> for OperationError {
    fn from(err: anyhow::Error) -> Self {
        OperationError::Store(err)
    }
}

/// 지갑 서비스
/// WalletService: applies deposit/withdraw operations and reads balances
#[derive(Clone)]
pub struct WalletService {
    db: Database,
}

impl WalletService {
    /// 생성자
    /// Constructor
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 연산 수행 (입금/출금)
    /// Perform a deposit or withdraw operation
    ///
    /// 일시적 저장소 오류(직렬화 실패, 데드락, 연결 끊김)는 잔액이 바뀌었을 수
    /// 있으므로 전체 시퀀스를 처음부터 다시 실행. 업무 결과(NotFound,
    /// InsufficientFunds)는 재시도하지 않음
    pub async fn perform_operation(
        &self,
        wallet_id: Uuid,
        operation_type: OperationType,
        amount: u64,
    ) -> Result<WalletOperationResponse, WalletError> {
        let amount = Decimal::from(amount);
        tracing::debug!(%wallet_id, %operation_type, %amount, "Performing wallet operation");

        let mut attempt = 1;
        loop {
            match self.try_operation(wallet_id, operation_type, amount).await {
                Ok(response) => return Ok(response),
                Err(OperationError::Business(err)) => return Err(err),
                Err(OperationError::Store(err))
                    if attempt < MAX_OPERATION_ATTEMPTS && is_retryable(&err) =>
                {
                    tracing::warn!(
                        %wallet_id,
                        attempt,
                        error = %err,
                        "Transient database error, retrying operation"
                    );
                    attempt += 1;
                }
                Err(OperationError::Store(err)) => {
                    return Err(WalletError::DatabaseError(format!("{err:#}")));
                }
            }
        }
    }

    /// 잔액 조회
    /// Get current balance
    ///
    /// 단건 읽기라 트랜잭션 불필요. 암묵 생성도 하지 않음
    pub async fn get_balance(&self, wallet_id: Uuid) -> Result<WalletBalanceResponse, WalletError> {
        tracing::debug!(%wallet_id, "Fetching wallet balance");

        let wallet_repo = WalletRepository::new(self.db.pool().clone());
        let wallet = wallet_repo
            .find_by_id(wallet_id)
            .await
            .map_err(|e| WalletError::DatabaseError(format!("Failed to fetch wallet: {e}")))?;

        match wallet {
            Some(wallet) => Ok(WalletBalanceResponse {
                wallet_id: wallet.id,
                balance: wallet.balance,
            }),
            None => {
                tracing::warn!(%wallet_id, "Wallet not found");
                Err(WalletError::NotFound { id: wallet_id })
            }
        }
    }

    /// 연산 1회 시도 (트랜잭션 한 개)
    /// One attempt of the operation, in its own transaction
    async fn try_operation(
        &self,
        wallet_id: Uuid,
        operation_type: OperationType,
        amount: Decimal,
    ) -> Result<WalletOperationResponse, OperationError> {
        let wallet_repo = WalletRepository::new(self.db.pool().clone());

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .context("Failed to begin transaction")?;

        // 1. 지갑 조회 (행 잠금). 없으면 balance 0으로 생성 후 재조회
        // 생성도 같은 트랜잭션이므로 이후 단계가 실패하면 함께 롤백됨
        let wallet = match wallet_repo.find_by_id_for_update(&mut tx, wallet_id).await? {
            Some(wallet) => wallet,
            None => {
                tracing::debug!(%wallet_id, "Wallet not found, creating with zero balance");
                wallet_repo
                    .insert_or_ignore(&mut tx, wallet_id, Decimal::ZERO)
                    .await?;
                match wallet_repo.find_by_id_for_update(&mut tx, wallet_id).await? {
                    Some(wallet) => wallet,
                    None => {
                        // 삽입 직후에도 행이 없으면 저장소 자체의 문제
                        tracing::error!(%wallet_id, "Wallet still absent after creation attempt");
                        return Err(OperationError::Business(WalletError::NotFound {
                            id: wallet_id,
                        }));
                    }
                }
            }
        };

        // 2. 새 잔액 계산 (정밀 십진 연산, 반올림 없음)
        let new_balance = match operation_type {
            OperationType::Deposit => wallet.balance + amount,
            OperationType::Withdraw => {
                if wallet.balance < amount {
                    return Err(OperationError::Business(WalletError::InsufficientFunds {
                        balance: wallet.balance,
                        requested: amount,
                    }));
                }
                wallet.balance - amount
            }
        };

        // 3. 잔액 기록. 영향받은 행이 0이면 읽기와 쓰기 사이에 행이 사라진 것
        let rows_affected = wallet_repo
            .update_balance(&mut tx, wallet_id, new_balance)
            .await?;
        if rows_affected == 0 {
            tracing::error!(%wallet_id, "Balance update affected no rows");
            return Err(OperationError::Business(WalletError::NotFound {
                id: wallet_id,
            }));
        }

        // 4. 커밋 전에 저장된 잔액 재조회 (저장소 측 정규화까지 반영된 값 반환)
        let updated = match wallet_repo.find_by_id_for_update(&mut tx, wallet_id).await? {
            Some(wallet) => wallet,
            None => {
                tracing::error!(%wallet_id, "Wallet disappeared after balance update");
                return Err(OperationError::Business(WalletError::NotFound {
                    id: wallet_id,
                }));
            }
        };

        tx.commit().await.context("Failed to commit transaction")?;

        tracing::debug!(%wallet_id, balance = %updated.balance, "Operation committed");

        Ok(WalletOperationResponse {
            wallet_id: updated.id,
            balance: updated.balance,
            message: format!("Operation {operation_type} completed successfully"),
        })
    }
}

/// 일시적 오류 여부 판단
/// Classify transient store errors worth re-running the sequence for
///
/// 40001 = serialization_failure, 40P01 = deadlock_detected
fn is_retryable(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => {
            matches!(db_err.code().as_deref(), Some("40001") | Some("40P01"))
        }
        Some(sqlx::Error::Io(_)) | Some(sqlx::Error::PoolTimedOut) => true,
        _ => false,
    }
}
