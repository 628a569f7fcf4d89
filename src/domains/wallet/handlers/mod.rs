// Wallet handlers module
pub mod wallet_handler;

pub use wallet_handler::*;
