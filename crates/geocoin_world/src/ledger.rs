//! # World Ledger
//!
//! Authoritative cell -> cache state for every cell ever discovered.
//!
//! ## Per-cell States
//!
//! ```text
//!             should_spawn = false
//!   Unknown ─────────────────────────► NoSpawn
//!      │   ◄──────── leaves view ─────────┘
//!      │ should_spawn = true (materialize + memento)
//!      ▼
//!   Active ◄──── re-enters view (from memento) ──── Dormant
//!      └──────────── leaves view ──────────────────────►┘
//! ```
//!
//! ## Guarantees
//!
//! 1. **No regeneration**: A cell with a memento is restored from it, never
//!    from the generator
//! 2. **One live cache per cell**: `active` holds at most one `Cache` per cell
//! 3. **Memento is current**: Every transfer commits the affected memento
//!    immediately, so going dormant needs no extra write
//! 4. **Idempotent reconcile**: Reconciling the same point twice changes
//!    nothing the second time

use std::collections::{BTreeMap, HashMap, HashSet};

use geocoin_economy::{transfer, Cache, Coin, Inventory, TransferReceipt};
use geocoin_grid::{Cell, GridIndex, Point};
use geocoin_procedural::CacheGenerator;

use crate::config::WorldConfig;
use crate::error::{WorldError, WorldResult};

/// Lifecycle state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Never evaluated.
    Unknown,
    /// Evaluated; no cache here.
    NoSpawn,
    /// Cache is live in the visible neighborhood.
    Active,
    /// Cache exists only as a ledger memento.
    Dormant,
}

/// Transitions performed by one reconciliation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityDelta {
    /// Cells whose cache was generated for the first time.
    pub spawned: Vec<Cell>,
    /// Cells whose cache was rebuilt from the ledger.
    pub restored: Vec<Cell>,
    /// Cells whose live cache was released.
    pub dormant: Vec<Cell>,
    /// Cells whose memento failed to decode and was dropped.
    pub discarded: Vec<Cell>,
}

impl VisibilityDelta {
    /// Returns true if the pass changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
            && self.restored.is_empty()
            && self.dormant.is_empty()
            && self.discarded.is_empty()
    }

    /// Returns true if the ledger gained or lost an entry.
    #[must_use]
    pub fn ledger_changed(&self) -> bool {
        !self.spawned.is_empty() || !self.discarded.is_empty()
    }
}

/// Owner of all cache state.
#[derive(Debug)]
pub struct WorldLedger {
    /// Point -> cell mapping.
    grid: GridIndex,
    /// Spawn decisions for unknown cells.
    generator: CacheGenerator,
    /// Visibility radius, already clamped.
    radius: i32,
    /// Latest memento of every discovered cache.
    mementos: BTreeMap<Cell, String>,
    /// Live caches in the visible neighborhood.
    active: HashMap<Cell, Cache>,
    /// Visible cells evaluated with no spawn.
    barren: HashSet<Cell>,
}

impl WorldLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            grid: config.grid_index(),
            generator: config.generator(),
            radius: config.visibility_radius(),
            mementos: BTreeMap::new(),
            active: HashMap::new(),
            barren: HashSet::new(),
        }
    }

    /// Returns the grid index.
    #[must_use]
    pub const fn grid(&self) -> &GridIndex {
        &self.grid
    }

    /// Returns the generator.
    #[must_use]
    pub const fn generator(&self) -> &CacheGenerator {
        &self.generator
    }

    /// Returns the visibility radius.
    #[must_use]
    pub const fn radius(&self) -> i32 {
        self.radius
    }

    /// Replaces the ledger contents with previously saved entries.
    ///
    /// Live caches are released; the next reconcile restores them from the
    /// new entries.
    pub fn restore_entries(&mut self, entries: impl IntoIterator<Item = (Cell, String)>) {
        self.active.clear();
        self.barren.clear();
        self.mementos = entries.into_iter().collect();
    }

    /// Iterates `(cell, memento)` in cell order.
    pub fn entries(&self) -> impl Iterator<Item = (Cell, &str)> + '_ {
        self.mementos.iter().map(|(cell, memento)| (*cell, memento.as_str()))
    }

    /// Returns the memento stored for `cell`.
    #[must_use]
    pub fn memento(&self, cell: Cell) -> Option<&str> {
        self.mementos.get(&cell).map(String::as_str)
    }

    /// Number of discovered caches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mementos.len()
    }

    /// Returns true if no cache has been discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mementos.is_empty()
    }

    /// Number of live caches.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Returns the lifecycle state of `cell`.
    #[must_use]
    pub fn state_of(&self, cell: Cell) -> CellState {
        if self.active.contains_key(&cell) {
            CellState::Active
        } else if self.mementos.contains_key(&cell) {
            CellState::Dormant
        } else if self.barren.contains(&cell) {
            CellState::NoSpawn
        } else {
            CellState::Unknown
        }
    }

    /// Returns the live cache at `cell`.
    #[must_use]
    pub fn cache(&self, cell: Cell) -> Option<&Cache> {
        self.active.get(&cell)
    }

    /// Returns the live caches, sorted by cell.
    #[must_use]
    pub fn active_caches(&self) -> Vec<&Cache> {
        let mut caches: Vec<&Cache> = self.active.values().collect();
        caches.sort_unstable_by_key(|cache| cache.cell());
        caches
    }

    /// Brings the live set in line with the neighborhood of `point`.
    ///
    /// Cells leaving the neighborhood go dormant. Entering cells are restored
    /// from their memento if they have one, else evaluated by the generator.
    /// A memento that fails to decode is dropped and the cell is treated as
    /// unknown. No-spawn cells are only remembered while visible.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidPosition` if `point` has no cell (nothing
    /// changes), `WorldError::InvalidConfig` if the radius is above
    /// [`GridIndex::MAX_RADIUS`], and `WorldError::Economy` if a fresh cache
    /// cannot be encoded.
    pub fn reconcile(&mut self, point: Point) -> WorldResult<VisibilityDelta> {
        let center = self.grid.cell_for(point).ok_or(WorldError::InvalidPosition {
            lat: point.lat,
            lng: point.lng,
        })?;
        let visible = GridIndex::cells_around(center, self.radius).ok_or_else(|| {
            WorldError::InvalidConfig(format!(
                "visibility radius {} exceeds {}",
                self.radius,
                GridIndex::MAX_RADIUS
            ))
        })?;
        let visible_set: HashSet<Cell> = visible.iter().copied().collect();
        let mut delta = VisibilityDelta::default();

        let mut leaving: Vec<Cell> = self
            .active
            .keys()
            .filter(|cell| !visible_set.contains(*cell))
            .copied()
            .collect();
        leaving.sort_unstable();
        for cell in leaving {
            self.active.remove(&cell);
            tracing::debug!("Cache {} went dormant", cell);
            delta.dormant.push(cell);
        }
        self.barren.retain(|cell| visible_set.contains(cell));

        for cell in visible {
            if self.active.contains_key(&cell) || self.barren.contains(&cell) {
                continue;
            }

            if let Some(memento) = self.mementos.get(&cell) {
                match Cache::from_memento(cell, memento) {
                    Ok(cache) => {
                        self.active.insert(cell, cache);
                        tracing::debug!("Cache {} restored from ledger", cell);
                        delta.restored.push(cell);
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!("Discarding corrupt memento for {}: {}", cell, e);
                        self.mementos.remove(&cell);
                        delta.discarded.push(cell);
                    }
                }
            }

            if self.generator.should_spawn(cell) {
                let cache = self.generator.materialize(cell);
                self.mementos.insert(cell, cache.to_memento()?);
                tracing::debug!("Cache {} spawned with {} coins", cell, cache.len());
                self.active.insert(cell, cache);
                delta.spawned.push(cell);
            } else {
                self.barren.insert(cell);
            }
        }

        Ok(delta)
    }

    /// Moves `coin` from the live cache at `cell` into `inventory`.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::CacheNotVisible` if `cell` has no live cache and
    /// `WorldError::Economy` if the coin is not there.
    pub fn collect(
        &mut self,
        cell: Cell,
        coin: &Coin,
        inventory: &mut Inventory,
    ) -> WorldResult<TransferReceipt> {
        let cache = self
            .active
            .get_mut(&cell)
            .ok_or(WorldError::CacheNotVisible(cell))?;
        let receipt = transfer(cache, inventory.as_cache_mut(), coin)?;
        self.commit(cell)?;
        tracing::debug!("Collected {} from {}", receipt.coin, cell);
        Ok(receipt)
    }

    /// Moves `coin` from `inventory` into the live cache at `cell`.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::CacheNotVisible` if `cell` has no live cache and
    /// `WorldError::Economy` if the inventory does not hold the coin.
    pub fn deposit(
        &mut self,
        cell: Cell,
        coin: &Coin,
        inventory: &mut Inventory,
    ) -> WorldResult<TransferReceipt> {
        let cache = self
            .active
            .get_mut(&cell)
            .ok_or(WorldError::CacheNotVisible(cell))?;
        let receipt = transfer(inventory.as_cache_mut(), cache, coin)?;
        self.commit(cell)?;
        tracing::debug!("Deposited {} into {}", receipt.coin, cell);
        Ok(receipt)
    }

    /// Forgets every discovered cell.
    pub fn reset(&mut self) {
        self.mementos.clear();
        self.active.clear();
        self.barren.clear();
    }

    /// Re-encodes the live cache at `cell` into the ledger.
    fn commit(&mut self, cell: Cell) -> WorldResult<()> {
        if let Some(cache) = self.active.get(&cell) {
            let memento = cache.to_memento()?;
            self.mementos.insert(cell, memento);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocoin_grid::Direction;

    fn origin() -> Point {
        WorldConfig::test().start_point()
    }

    fn ledger() -> WorldLedger {
        WorldLedger::new(&WorldConfig::test())
    }

    #[test]
    fn test_first_reconcile_spawns_everything_visible() {
        let mut ledger = ledger();
        let delta = ledger.reconcile(origin()).unwrap();

        assert_eq!(delta.spawned.len(), 25);
        assert!(delta.restored.is_empty() && delta.dormant.is_empty());
        assert_eq!(ledger.len(), 25);
        assert_eq!(ledger.active_len(), 25);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut ledger = ledger();
        ledger.reconcile(origin()).unwrap();
        let before: Vec<(Cell, String)> =
            ledger.entries().map(|(c, m)| (c, m.to_string())).collect();

        let delta = ledger.reconcile(origin()).unwrap();
        assert!(delta.is_empty(), "{delta:?}");
        let after: Vec<(Cell, String)> =
            ledger.entries().map(|(c, m)| (c, m.to_string())).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_leaving_and_returning() {
        let mut ledger = ledger();
        let start = origin();
        ledger.reconcile(start).unwrap();
        let center = ledger.grid().cell_for(start).unwrap();

        let far = Point::new(start.lat + 0.01, start.lng);
        let delta = ledger.reconcile(far).unwrap();
        assert_eq!(delta.dormant.len(), 25);
        assert_eq!(ledger.state_of(center), CellState::Dormant);
        assert!(ledger.cache(center).is_none());

        let delta = ledger.reconcile(start).unwrap();
        assert_eq!(delta.restored.len(), 25);
        assert!(delta.spawned.is_empty());
        assert_eq!(ledger.state_of(center), CellState::Active);
    }

    #[test]
    fn test_collected_coins_stay_collected() {
        let mut ledger = ledger();
        let mut inventory = Inventory::new();
        let start = origin();
        ledger.reconcile(start).unwrap();

        let cell = ledger
            .active_caches()
            .into_iter()
            .find(|cache| !cache.is_empty())
            .map(Cache::cell)
            .expect("some visible cache has coins");
        let coins = ledger.cache(cell).unwrap().coins().to_vec();
        for coin in &coins {
            ledger.collect(cell, coin, &mut inventory).unwrap();
        }
        assert_eq!(inventory.len(), coins.len());

        ledger.reconcile(Point::new(start.lat + 0.01, start.lng)).unwrap();
        ledger.reconcile(start).unwrap();
        assert!(ledger.cache(cell).unwrap().is_empty());
    }

    #[test]
    fn test_transfer_requires_visible_cache() {
        let mut ledger = ledger();
        let mut inventory = Inventory::new();
        let cell = Cell::new(0, 0);
        let err = ledger
            .collect(cell, &Coin::new(cell, 1), &mut inventory)
            .unwrap_err();
        assert!(matches!(err, WorldError::CacheNotVisible(c) if c == cell));
    }

    #[test]
    fn test_double_collect_fails_cleanly() {
        let mut ledger = ledger();
        let mut inventory = Inventory::new();
        ledger.reconcile(origin()).unwrap();

        let cache = ledger
            .active_caches()
            .into_iter()
            .find(|cache| !cache.is_empty())
            .expect("some visible cache has coins");
        let cell = cache.cell();
        let coin = cache.coins()[0];

        ledger.collect(cell, &coin, &mut inventory).unwrap();
        let memento = ledger.memento(cell).unwrap().to_string();
        assert!(matches!(
            ledger.collect(cell, &coin, &mut inventory),
            Err(WorldError::Economy(_))
        ));
        assert_eq!(ledger.memento(cell).unwrap(), memento);
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_deposit_commits_memento() {
        let mut ledger = ledger();
        let mut inventory = Inventory::new();
        ledger.reconcile(origin()).unwrap();

        let foreign = Coin::new(Cell::new(1, 1), 9);
        inventory.add(foreign);
        let cell = ledger.grid().cell_for(origin()).unwrap();
        ledger.deposit(cell, &foreign, &mut inventory).unwrap();

        assert!(inventory.is_empty());
        let restored = Cache::from_memento(cell, ledger.memento(cell).unwrap()).unwrap();
        assert!(restored.contains(&foreign));
    }

    #[test]
    fn test_corrupt_memento_regenerates() {
        let mut ledger = ledger();
        let cell = ledger.grid().cell_for(origin()).unwrap();
        ledger.restore_entries([(cell, "not json".to_string())]);
        assert_eq!(ledger.state_of(cell), CellState::Dormant);

        let delta = ledger.reconcile(origin()).unwrap();
        assert_eq!(delta.discarded, vec![cell]);
        assert!(delta.spawned.contains(&cell));
        assert_eq!(
            ledger.cache(cell).unwrap(),
            &ledger.generator().materialize(cell)
        );
    }

    #[test]
    fn test_no_spawn_cells_are_remembered() {
        let mut config = WorldConfig::test();
        config.generation.spawn_threshold = 0.0;
        let mut ledger = WorldLedger::new(&config);
        let cell = ledger.grid().cell_for(origin()).unwrap();

        assert_eq!(ledger.state_of(cell), CellState::Unknown);
        let delta = ledger.reconcile(origin()).unwrap();
        assert!(delta.is_empty());
        assert_eq!(ledger.state_of(cell), CellState::NoSpawn);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_no_spawn_cells_forgotten_out_of_view() {
        let mut config = WorldConfig::test();
        config.generation.spawn_threshold = 0.0;
        let mut ledger = WorldLedger::new(&config);
        let start = origin();
        let cell = ledger.grid().cell_for(start).unwrap();

        ledger.reconcile(start).unwrap();
        assert_eq!(ledger.barren.len(), 25);

        // Walk a long way; only the current window is ever remembered.
        let mut here = start;
        for _ in 0..50 {
            here = here.step(Direction::East, ledger.grid().tile_width());
            ledger.reconcile(here).unwrap();
            assert_eq!(ledger.barren.len(), 25);
        }
        assert_eq!(ledger.state_of(cell), CellState::Unknown);

        ledger.reconcile(start).unwrap();
        assert_eq!(ledger.state_of(cell), CellState::NoSpawn);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_unaddressable_point_changes_nothing() {
        let mut ledger = ledger();
        ledger.reconcile(origin()).unwrap();

        let far = Point::new(1.0e300, 0.0);
        assert!(matches!(
            ledger.reconcile(far),
            Err(WorldError::InvalidPosition { .. })
        ));
        assert_eq!(ledger.active_len(), 25);
        assert_eq!(ledger.len(), 25);
    }

    #[test]
    fn test_oversized_radius_is_rejected() {
        let mut config = WorldConfig::test();
        config.grid.visibility_radius = GridIndex::MAX_RADIUS + 1;
        let mut ledger = WorldLedger::new(&config);
        assert!(matches!(
            ledger.reconcile(origin()),
            Err(WorldError::InvalidConfig(_))
        ));
        assert_eq!(ledger.active_len(), 0);
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut ledger = ledger();
        ledger.reconcile(origin()).unwrap();
        ledger.reset();

        assert!(ledger.is_empty());
        assert_eq!(ledger.active_len(), 0);
        assert_eq!(
            ledger.state_of(ledger.grid().cell_for(origin()).unwrap()),
            CellState::Unknown
        );
    }
}
