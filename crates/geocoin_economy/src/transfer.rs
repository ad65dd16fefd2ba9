//! # Transfer Protocol
//!
//! Moves one coin between two containers. This is the only path by which a
//! coin changes container after generation.
//!
//! ## Guarantees
//!
//! 1. **Identity**: The coin is matched by origin cell and serial
//! 2. **Atomicity**: On failure neither container changes
//! 3. **Idempotent failure**: A second call for a coin that already moved
//!    fails with `CoinNotFound` and does nothing
//!
//! Persistence is the caller's job; this module never touches storage.

use geocoin_grid::Cell;

use crate::cache::Cache;
use crate::coin::Coin;
use crate::error::EconomyResult;

/// Record of a completed transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    /// The coin that moved.
    pub coin: Coin,
    /// Cell of the source container.
    pub from: Cell,
    /// Cell of the destination container.
    pub to: Cell,
}

/// Moves `coin` from `from` into `to`.
///
/// # Errors
///
/// Returns `EconomyError::CoinNotFound` if `from` does not hold the coin.
pub fn transfer(from: &mut Cache, to: &mut Cache, coin: &Coin) -> EconomyResult<TransferReceipt> {
    let coin = from.take(coin)?;
    to.insert(coin);

    Ok(TransferReceipt {
        coin,
        from: from.cell(),
        to: to.cell(),
    })
}
