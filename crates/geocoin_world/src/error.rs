//! # World Error Types
//!
//! Errors from the storage boundary and from world operations.

use geocoin_economy::EconomyError;
use geocoin_grid::Cell;
use thiserror::Error;

/// Errors raised by a key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The write would exceed the store's byte quota. Nothing was written.
    #[error("storage quota exceeded: limit {limit} bytes, write needs {requested}")]
    QuotaExceeded {
        /// Quota in bytes.
        limit: usize,
        /// Bytes the store would hold after the write.
        requested: usize,
    },

    /// The backing data failed a format or checksum check.
    #[error("storage corrupt: {0}")]
    Corrupt(String),
}

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in world operations.
#[derive(Error, Debug)]
pub enum WorldError {
    /// Configuration rejected by validation or parsing.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A position with a non-finite component.
    #[error("invalid position ({lat}, {lng})")]
    InvalidPosition {
        /// First axis.
        lat: f64,
        /// Second axis.
        lng: f64,
    },

    /// Saving or loading failed. In-memory state is unaffected.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A coin or memento operation failed.
    #[error(transparent)]
    Economy(#[from] EconomyError),

    /// The cell has no live cache in the visible neighborhood.
    #[error("no visible cache at {0}")]
    CacheNotVisible(Cell),

    /// Deposit-last with nothing held.
    #[error("inventory is empty")]
    EmptyInventory,

    /// A store record could not be encoded.
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
