use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domains::wallet::models::Wallet;

// =====================================================
// WalletRepository
// =====================================================
// 역할: wallets 테이블에 대한 모든 쿼리 담당
// 설명: 지갑 잔액의 영속 저장소. 캐시 없이 매 호출마다 DB 직접 접근
//
// 동시성:
// - find_by_id_for_update가 행 잠금(SELECT ... FOR UPDATE)을 잡는다
// - 같은 지갑에 대한 동시 연산은 이 잠금에서 직렬화됨
// =====================================================

pub struct WalletRepository {
    pool: PgPool,
}

impl WalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 지갑 단건 조회 (트랜잭션 밖, 잠금 없음)
    /// Get wallet by id (plain point read, no locking)
    pub async fn find_by_id(&self, wallet_id: Uuid) -> Result<Option<Wallet>> {
        let row = sqlx::query(
            r#"
            SELECT id, balance, created_at, updated_at
            FROM wallets
            WHERE id = $1
            "#,
        )
        .bind(wallet_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch wallet by id")?;

        let row = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        Ok(Some(Wallet {
            id: row.get("id"),
            balance: row.get("balance"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    /// 지갑 단건 조회 + 행 잠금 (트랜잭션 안)
    /// Get wallet by id with a row lock, inside the caller's transaction
    ///
    /// 같은 행을 잠그려는 다른 트랜잭션은 커밋/롤백까지 대기함
    /// Concurrent transactions locking the same row wait until commit/rollback
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: Uuid,
    ) -> Result<Option<Wallet>> {
        let row = sqlx::query(
            r#"
            SELECT id, balance, created_at, updated_at
            FROM wallets
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(wallet_id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to fetch wallet by id for update")?;

        let row = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        Ok(Some(Wallet {
            id: row.get("id"),
            balance: row.get("balance"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    /// 지갑 생성 (이미 있으면 no-op)
    /// Create wallet if absent (no-op when the row already exists)
    ///
    /// 존재 확인 후 INSERT하는 방식은 race가 있으므로
    /// ON CONFLICT DO NOTHING 원자적 삽입만 사용
    pub async fn insert_or_ignore(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: Uuid,
        initial_balance: Decimal,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO wallets (id, balance, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(wallet_id)
        .bind(initial_balance)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .context("Failed to insert wallet")?;

        Ok(result.rows_affected())
    }

    /// 잔액 덮어쓰기
    /// Overwrite the balance of an existing wallet
    ///
    /// 반환값은 영향받은 행 수. 0이면 읽기와 쓰기 사이에 행이 사라진 것
    /// Returns affected row count; 0 means the row vanished between read and write
    pub async fn update_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: Uuid,
        new_balance: Decimal,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE wallets
            SET balance = $1, updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(new_balance)
        .bind(Utc::now())
        .bind(wallet_id)
        .execute(&mut *tx)
        .await
        .context("Failed to update wallet balance")?;

        Ok(result.rows_affected())
    }
}
