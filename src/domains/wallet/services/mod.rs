// Wallet services module
pub mod state;
pub mod wallet_service;

pub use state::*;
pub use wallet_service::*;
