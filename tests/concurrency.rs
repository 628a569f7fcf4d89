// =====================================================
// 동시성 통합 테스트
// =====================================================
// 같은 지갑에 대한 동시 연산이 행 잠금에서 직렬화되어
// 갱신 유실/음수 잔액이 생기지 않는지 확인
// =====================================================

mod common;
use common::*;

use futures_util::future::join_all;
use rust_decimal::Decimal;
use uuid::Uuid;
use wallet_api::domains::wallet::models::OperationType;
use wallet_api::shared::errors::WalletError;

/// 테스트: 동시 입금 N건이 전부 반영됨 (갱신 유실 없음)
///
/// 새 지갑에 a씩 N번 동시 입금하면 최종 잔액은 정확히 N*a 여야 합니다.
#[tokio::test]
async fn test_concurrent_deposits_no_lost_updates() {
    const NUM_DEPOSITS: u64 = 20;
    const DEPOSIT_AMOUNT: u64 = 10;

    let (service, db) = setup_test().await;
    let wallet_id = Uuid::new_v4();

    let handles: Vec<_> = (0..NUM_DEPOSITS)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .perform_operation(wallet_id, OperationType::Deposit, DEPOSIT_AMOUNT)
                    .await
            })
        })
        .collect();

    for result in join_all(handles).await {
        result.expect("Task panicked").expect("Deposit failed");
    }

    let balance = fetch_balance(&db, wallet_id).await.expect("Wallet missing");
    assert_eq!(balance, Decimal::from(NUM_DEPOSITS * DEPOSIT_AMOUNT));

    cleanup_wallet(&db, wallet_id).await;
}

/// 테스트: 잔액 전체를 노리는 동시 출금 2건 중 정확히 1건만 성공
///
/// 잔액 B인 지갑에 B씩 두 번 동시 출금하면 한 건은 성공, 한 건은
/// 잔액 부족이어야 하고 최종 잔액은 0이어야 합니다 (절대 음수 불가).
#[tokio::test]
async fn test_concurrent_overdraw_exactly_one_succeeds() {
    const BALANCE: u64 = 100;

    let (service, db) = setup_test().await;
    let wallet_id = Uuid::new_v4();

    service
        .perform_operation(wallet_id, OperationType::Deposit, BALANCE)
        .await
        .expect("Setup deposit failed");

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .perform_operation(wallet_id, OperationType::Withdraw, BALANCE)
                    .await
            })
        })
        .collect();

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|r| r.expect("Task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let rejections = results
        .iter()
        .filter(|r| matches!(r, Err(WalletError::InsufficientFunds { .. })))
        .count();

    assert_eq!(successes, 1, "Exactly one withdrawal must succeed");
    assert_eq!(rejections, 1, "The other withdrawal must be rejected");

    let balance = fetch_balance(&db, wallet_id).await.expect("Wallet missing");
    assert_eq!(balance, Decimal::ZERO);

    cleanup_wallet(&db, wallet_id).await;
}

/// 테스트: 동시 출금 경쟁에서도 잔액은 음수가 되지 않음
///
/// 잔액 50에 30짜리 출금 10건을 동시에 던지면 성공 건수만큼만 차감되고
/// 최종 잔액은 50 - 30*성공수 (>= 0) 여야 합니다.
#[tokio::test]
async fn test_concurrent_withdrawals_never_go_negative() {
    const INITIAL_BALANCE: u64 = 50;
    const WITHDRAW_AMOUNT: u64 = 30;
    const NUM_WITHDRAWALS: usize = 10;

    let (service, db) = setup_test().await;
    let wallet_id = Uuid::new_v4();

    service
        .perform_operation(wallet_id, OperationType::Deposit, INITIAL_BALANCE)
        .await
        .expect("Setup deposit failed");

    let handles: Vec<_> = (0..NUM_WITHDRAWALS)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .perform_operation(wallet_id, OperationType::Withdraw, WITHDRAW_AMOUNT)
                    .await
            })
        })
        .collect();

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|r| r.expect("Task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();

    // 50으로는 30짜리 출금이 한 번만 가능
    assert_eq!(successes, 1);

    let balance = fetch_balance(&db, wallet_id).await.expect("Wallet missing");
    assert!(balance >= Decimal::ZERO, "Balance must never be negative");
    assert_eq!(
        balance,
        Decimal::from(INITIAL_BALANCE) - Decimal::from(WITHDRAW_AMOUNT) * Decimal::from(successes as u64)
    );

    cleanup_wallet(&db, wallet_id).await;
}

/// 테스트: 다른 지갑끼리는 서로 간섭하지 않음
#[tokio::test]
async fn test_operations_on_different_wallets_are_independent() {
    const NUM_WALLETS: usize = 4;
    const DEPOSIT_AMOUNT: u64 = 250;

    let (service, db) = setup_test().await;
    let wallet_ids: Vec<Uuid> = (0..NUM_WALLETS).map(|_| Uuid::new_v4()).collect();

    let handles: Vec<_> = wallet_ids
        .iter()
        .map(|&wallet_id| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .perform_operation(wallet_id, OperationType::Deposit, DEPOSIT_AMOUNT)
                    .await
            })
        })
        .collect();

    for result in join_all(handles).await {
        result.expect("Task panicked").expect("Deposit failed");
    }

    for &wallet_id in &wallet_ids {
        let balance = fetch_balance(&db, wallet_id).await.expect("Wallet missing");
        assert_eq!(balance, Decimal::from(DEPOSIT_AMOUNT));
        cleanup_wallet(&db, wallet_id).await;
    }
}
