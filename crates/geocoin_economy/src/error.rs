//! # Economy Error Types
//!
//! All errors that can occur while moving or restoring coins.

use thiserror::Error;

use crate::coin::Coin;

/// Errors that can occur in the economy system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// The coin is not in the source container.
    ///
    /// Usually a stale handle: the coin already moved. Never fatal.
    #[error("coin not found: {coin}")]
    CoinNotFound {
        /// The coin that was requested.
        coin: Coin,
    },

    /// A memento could not be decoded into a coin list.
    #[error("corrupt cache state: {reason}")]
    CorruptState {
        /// What was wrong with the memento.
        reason: String,
    },

    /// A coin list could not be encoded.
    #[error("failed to encode memento: {0}")]
    Encode(String),
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
