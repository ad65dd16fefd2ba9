//! # Game Session
//!
//! The single owner of world state that a presentation layer drives.
//!
//! ## Flow
//!
//! ```text
//! position change ─► reconcile ─► save trail (+ ledger if it grew)
//! collect/deposit ─► transfer  ─► save ledger + inventory
//! ```
//!
//! Every mutation is applied in memory first and then saved. A save failure
//! is returned to the caller, but the in-memory state stays authoritative for
//! the rest of the session and is written out again by the next save.

use geocoin_economy::{Cache, Coin, Inventory, TransferReceipt};
use geocoin_grid::{Cell, Direction, GridIndex, Point};

use crate::config::WorldConfig;
use crate::error::{WorldError, WorldResult};
use crate::ledger::{VisibilityDelta, WorldLedger};
use crate::persistence;
use crate::storage::KeyValueStore;
use crate::trail::PathTrail;

/// One player's world, bound to a store.
#[derive(Debug)]
pub struct GameSession<S: KeyValueStore> {
    config: WorldConfig,
    store: S,
    ledger: WorldLedger,
    inventory: Inventory,
    trail: PathTrail,
    position: Point,
    cell: Cell,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Loads saved state from `store` and reconciles around the player.
    ///
    /// The player resumes at the last trail point, or at the configured start
    /// if nothing usable was saved.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidConfig` for a bad configuration and
    /// `WorldError::Storage` if the store cannot be read or written.
    pub fn start(config: WorldConfig, store: S) -> WorldResult<Self> {
        config.validate()?;
        let saved = persistence::load(&store)?;

        let mut ledger = WorldLedger::new(&config);
        ledger.restore_entries(saved.entries);

        let mut trail = saved.trail;
        let position = match trail.last() {
            Some(point) if ledger.grid().cell_for(point).is_some() => point,
            _ => {
                let start = config.start_point();
                trail.push(start);
                start
            }
        };
        let cell = locate(ledger.grid(), position)?;

        let mut session = Self {
            config,
            store,
            ledger,
            inventory: saved.inventory,
            trail,
            position,
            cell,
        };

        let delta = session.ledger.reconcile(position)?;
        tracing::info!(
            "Session started at {}: {} caches known, {} visible, {} held coins",
            session.current_cell(),
            session.ledger.len(),
            session.ledger.active_len(),
            session.inventory.len()
        );
        if !delta.discarded.is_empty() {
            tracing::warn!("{} corrupt caches regenerated", delta.discarded.len());
        }

        session.save()?;
        Ok(session)
    }

    /// Moves the player to `point` and reconciles.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidPosition` for a point with no cell, such as
    /// a non-finite one (nothing changes), and `WorldError::Storage` if saving
    /// fails.
    pub fn move_to(&mut self, point: Point) -> WorldResult<VisibilityDelta> {
        self.cell = locate(self.ledger.grid(), point)?;
        self.position = point;
        self.trail.push(point);
        let delta = self.ledger.reconcile(point)?;
        tracing::debug!(
            "Moved to {}: +{} spawned, +{} restored, -{} dormant",
            self.current_cell(),
            delta.spawned.len(),
            delta.restored.len(),
            delta.dormant.len()
        );

        if delta.ledger_changed() {
            persistence::save_ledger(&mut self.store, &self.ledger)?;
        }
        persistence::save_trail(&mut self.store, &self.trail)?;
        Ok(delta)
    }

    /// Moves one tile in `direction`.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidPosition` at the edge of the addressable
    /// grid and `WorldError::Storage` if saving fails.
    pub fn step(&mut self, direction: Direction) -> WorldResult<VisibilityDelta> {
        let next = self.position.step(direction, self.config.grid.tile_width);
        self.move_to(next)
    }

    /// Moves `coin` from the cache at `cell` into the inventory.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::CacheNotVisible`, `WorldError::Economy` (coin not
    /// there, nothing changes) or `WorldError::Storage` (transfer applied).
    pub fn collect(&mut self, cell: Cell, coin: Coin) -> WorldResult<TransferReceipt> {
        let receipt = self.ledger.collect(cell, &coin, &mut self.inventory)?;
        self.save_transfer()?;
        Ok(receipt)
    }

    /// Moves `coin` from the inventory into the cache at `cell`.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::CacheNotVisible`, `WorldError::Economy` (coin not
    /// held, nothing changes) or `WorldError::Storage` (transfer applied).
    pub fn deposit(&mut self, cell: Cell, coin: Coin) -> WorldResult<TransferReceipt> {
        let receipt = self.ledger.deposit(cell, &coin, &mut self.inventory)?;
        self.save_transfer()?;
        Ok(receipt)
    }

    /// Deposits the inventory's last coin into the cache at `cell`.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::CacheNotVisible` if `cell` has no live cache,
    /// `WorldError::EmptyInventory` if nothing is held, and
    /// `WorldError::Storage` if saving fails.
    pub fn deposit_last(&mut self, cell: Cell) -> WorldResult<TransferReceipt> {
        if self.ledger.cache(cell).is_none() {
            return Err(WorldError::CacheNotVisible(cell));
        }
        let coin = self.inventory.last().ok_or(WorldError::EmptyInventory)?;
        self.deposit(cell, coin)
    }

    /// Forgets the whole world and returns the player to the start.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::Storage` if clearing or saving fails.
    pub fn reset(&mut self) -> WorldResult<VisibilityDelta> {
        self.ledger.reset();
        self.inventory.clear();
        self.trail.clear();

        self.position = self.config.start_point();
        self.cell = locate(self.ledger.grid(), self.position)?;
        self.trail.push(self.position);
        let delta = self.ledger.reconcile(self.position)?;
        tracing::info!("World reset: {} caches spawned", delta.spawned.len());

        persistence::clear(&mut self.store)?;
        self.save()?;
        Ok(delta)
    }

    /// Writes ledger, inventory and trail.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::Storage` if the store refuses a write.
    pub fn save(&mut self) -> WorldResult<()> {
        persistence::save_all(&mut self.store, &self.ledger, &self.inventory, &self.trail)
    }

    fn save_transfer(&mut self) -> WorldResult<()> {
        persistence::save_ledger(&mut self.store, &self.ledger)?;
        persistence::save_inventory(&mut self.store, &self.inventory)
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the player position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Returns the cell under the player.
    #[must_use]
    pub const fn current_cell(&self) -> Cell {
        self.cell
    }

    /// Returns the ledger.
    #[must_use]
    pub const fn ledger(&self) -> &WorldLedger {
        &self.ledger
    }

    /// Returns the inventory.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Returns the path trail.
    #[must_use]
    pub const fn trail(&self) -> &PathTrail {
        &self.trail
    }

    /// Returns the live cache at `cell`.
    #[must_use]
    pub fn cache(&self, cell: Cell) -> Option<&Cache> {
        self.ledger.cache(cell)
    }

    /// Returns the live caches, sorted by cell.
    #[must_use]
    pub fn visible_caches(&self) -> Vec<&Cache> {
        self.ledger.active_caches()
    }

    /// Returns the store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Ends the session, handing back the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}

/// Cell of `point`, or `InvalidPosition` if it has none.
fn locate(grid: &GridIndex, point: Point) -> WorldResult<Cell> {
    grid.cell_for(point).ok_or(WorldError::InvalidPosition {
        lat: point.lat,
        lng: point.lng,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{CACHES_KEY, INVENTORY_KEY, PATH_KEY};
    use crate::storage::MemoryStore;

    fn session() -> GameSession<MemoryStore> {
        GameSession::start(WorldConfig::test(), MemoryStore::new()).unwrap()
    }

    fn rich_cache(session: &GameSession<MemoryStore>) -> Cell {
        session
            .visible_caches()
            .into_iter()
            .find(|cache| !cache.is_empty())
            .map(Cache::cell)
            .expect("some visible cache has coins")
    }

    #[test]
    fn test_start_writes_all_keys() {
        let session = session();
        assert_eq!(session.visible_caches().len(), 25);
        assert_eq!(session.trail().len(), 1);
        for key in [CACHES_KEY, INVENTORY_KEY, PATH_KEY] {
            assert!(session.store().contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_step_moves_one_tile() {
        let mut session = session();
        let before = session.current_cell();

        session.step(Direction::North).unwrap();
        assert_eq!(session.current_cell(), before.offset(1, 0).unwrap());
        session.step(Direction::East).unwrap();
        assert_eq!(session.current_cell(), before.offset(1, 1).unwrap());
        session.step(Direction::South).unwrap();
        session.step(Direction::West).unwrap();
        assert_eq!(session.current_cell(), before);
        assert_eq!(session.trail().len(), 5);
    }

    #[test]
    fn test_step_reports_one_row() {
        let mut session = session();
        let delta = session.step(Direction::North).unwrap();
        assert_eq!(delta.spawned.len(), 5);
        assert_eq!(delta.dormant.len(), 5);
    }

    #[test]
    fn test_non_finite_move_rejected() {
        let mut session = session();
        let before = session.position();
        assert!(matches!(
            session.move_to(Point::new(f64::NAN, 0.0)),
            Err(WorldError::InvalidPosition { .. })
        ));
        assert_eq!(session.position(), before);
        assert_eq!(session.trail().len(), 1);
    }

    #[test]
    fn test_unaddressable_move_rejected() {
        let mut session = session();
        let before = session.current_cell();
        assert!(matches!(
            session.move_to(Point::new(0.0, -1.0e300)),
            Err(WorldError::InvalidPosition { .. })
        ));
        assert_eq!(session.current_cell(), before);
        assert_eq!(session.trail().len(), 1);
        assert_eq!(session.visible_caches().len(), 25);
    }

    #[test]
    fn test_unaddressable_trail_point_resumes_at_start() {
        let mut store = MemoryStore::new();
        store.set(PATH_KEY, "[[1.0e300, 0.0]]").unwrap();

        let session = GameSession::start(WorldConfig::test(), store).unwrap();
        assert_eq!(session.position(), WorldConfig::test().start_point());
        assert_eq!(session.trail().len(), 2);
    }

    #[test]
    fn test_collect_then_deposit_last() {
        let mut session = session();
        let cell = rich_cache(&session);
        let coin = session.cache(cell).unwrap().coins()[0];

        let receipt = session.collect(cell, coin).unwrap();
        assert_eq!(receipt.coin, coin);
        assert!(session.inventory().contains(&coin));

        let target = session.current_cell();
        let receipt = session.deposit_last(target).unwrap();
        assert_eq!(receipt.coin, coin);
        assert!(session.inventory().is_empty());
        assert!(session.cache(target).unwrap().contains(&coin));
    }

    #[test]
    fn test_deposit_last_errors() {
        let mut session = session();
        let here = session.current_cell();
        assert!(matches!(
            session.deposit_last(here),
            Err(WorldError::EmptyInventory)
        ));
        assert!(matches!(
            session.deposit_last(here.offset(50, 50).unwrap()),
            Err(WorldError::CacheNotVisible(_))
        ));
    }

    #[test]
    fn test_resumes_from_store() {
        let mut session = session();
        session.step(Direction::East).unwrap();
        let cell = rich_cache(&session);
        let coin = session.cache(cell).unwrap().coins()[0];
        session.collect(cell, coin).unwrap();
        let position = session.position();

        let resumed = GameSession::start(WorldConfig::test(), session.into_store()).unwrap();
        assert_eq!(resumed.position(), position);
        assert!(resumed.inventory().contains(&coin));
        assert!(!resumed.cache(cell).unwrap().contains(&coin));
    }

    #[test]
    fn test_reset_returns_to_fresh_world() {
        let mut session = session();
        let fresh: Vec<Cache> = session.visible_caches().into_iter().cloned().collect();

        let cell = rich_cache(&session);
        let coin = session.cache(cell).unwrap().coins()[0];
        session.collect(cell, coin).unwrap();
        session.step(Direction::North).unwrap();

        let delta = session.reset().unwrap();
        assert_eq!(delta.spawned.len(), 25);
        assert!(session.inventory().is_empty());
        assert_eq!(session.trail().len(), 1);
        assert_eq!(session.position(), WorldConfig::test().start_point());
        let after: Vec<Cache> = session.visible_caches().into_iter().cloned().collect();
        assert_eq!(after, fresh);
    }
}
