use crate::domains::wallet::services::state::WalletState;
use crate::shared::database::Database;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 핸들러 호출 간에 공유되는 in-process 가변 상태는 없음.
/// 공유 상태는 전부 데이터베이스에 있음
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    /// Database connection (shared)
    pub db: Database,
    pub wallet_state: WalletState,
}

impl AppState {
    /// Create AppState with database
    /// 모든 도메인 State를 초기화하고 조합
    pub fn new(db: Database) -> Self {
        let wallet_state = WalletState::new(db.clone());

        Self { db, wallet_state }
    }
}
