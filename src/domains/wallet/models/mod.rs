// Wallet domain models
pub mod dto;
pub mod wallet;

pub use dto::*;
pub use wallet::*;
