// Wallet domain routes
// 지갑 도메인 라우터
use axum::{
    routing::{get, post},
    Router,
};

use crate::domains::wallet::handlers::wallet_handler;
use crate::shared::services::AppState;

/// Create wallet router
/// 지갑 라우터 생성
pub fn create_wallet_router() -> Router<AppState> {
    Router::new()
        .route("/wallet", post(wallet_handler::perform_operation))
        .route("/wallets/:wallet_id", get(wallet_handler::get_balance))
}
