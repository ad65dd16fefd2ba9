//! # Persistence Codec
//!
//! Maps world state onto three store keys.
//!
//! | Key | Value |
//! |---|---|
//! | `caches` | `[{"key": "i,j", "memento": "<cache memento>"}, ...]` in cell order |
//! | `playerInventory` | inventory memento |
//! | `pathCoords` | `[[lat, lng], ...]` |
//!
//! ## Load Policy
//!
//! Storage errors propagate. Bad data never does:
//! - unparseable `caches`: whole ledger dropped
//! - bad entry key or memento: that entry dropped, the cell becomes unknown
//! - unparseable inventory: empty inventory
//! - unparseable trail: empty trail
//!
//! Every drop is logged at `warn`.

use geocoin_economy::{Cache, Inventory};
use geocoin_grid::Cell;
use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};
use crate::ledger::WorldLedger;
use crate::storage::KeyValueStore;
use crate::trail::PathTrail;

/// Store key of the cache ledger.
pub const CACHES_KEY: &str = "caches";

/// Store key of the inventory memento.
pub const INVENTORY_KEY: &str = "playerInventory";

/// Store key of the path trail.
pub const PATH_KEY: &str = "pathCoords";

/// One ledger entry as stored.
#[derive(Serialize, Deserialize)]
struct LedgerRecord {
    key: String,
    memento: String,
}

/// Everything read back from a store.
#[derive(Debug, Default)]
pub struct SavedWorld {
    /// Valid ledger entries.
    pub entries: Vec<(Cell, String)>,
    /// Player inventory.
    pub inventory: Inventory,
    /// Path trail.
    pub trail: PathTrail,
    /// Entries dropped while loading.
    pub discarded: usize,
}

/// Writes the ledger under [`CACHES_KEY`].
///
/// # Errors
///
/// Returns `WorldError::Storage` if the store refuses the write.
pub fn save_ledger<S: KeyValueStore + ?Sized>(store: &mut S, ledger: &WorldLedger) -> WorldResult<()> {
    let records: Vec<LedgerRecord> = ledger
        .entries()
        .map(|(cell, memento)| LedgerRecord {
            key: cell.key(),
            memento: memento.to_string(),
        })
        .collect();
    let json = serde_json::to_string(&records).map_err(|e| WorldError::Encode(e.to_string()))?;
    store.set(CACHES_KEY, &json)?;
    Ok(())
}

/// Writes the inventory under [`INVENTORY_KEY`].
///
/// # Errors
///
/// Returns `WorldError::Storage` if the store refuses the write.
pub fn save_inventory<S: KeyValueStore + ?Sized>(store: &mut S, inventory: &Inventory) -> WorldResult<()> {
    store.set(INVENTORY_KEY, &inventory.to_memento()?)?;
    Ok(())
}

/// Writes the trail under [`PATH_KEY`].
///
/// # Errors
///
/// Returns `WorldError::Storage` if the store refuses the write.
pub fn save_trail<S: KeyValueStore + ?Sized>(store: &mut S, trail: &PathTrail) -> WorldResult<()> {
    store.set(PATH_KEY, &trail.to_json()?)?;
    Ok(())
}

/// Writes all three keys.
///
/// # Errors
///
/// Returns the first storage failure.
pub fn save_all<S: KeyValueStore + ?Sized>(
    store: &mut S,
    ledger: &WorldLedger,
    inventory: &Inventory,
    trail: &PathTrail,
) -> WorldResult<()> {
    save_ledger(store, ledger)?;
    save_inventory(store, inventory)?;
    save_trail(store, trail)
}

/// Reads all three keys, applying the load policy.
///
/// # Errors
///
/// Returns `WorldError::Storage` only if the store itself fails.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> WorldResult<SavedWorld> {
    let mut saved = SavedWorld::default();

    if let Some(text) = store.get(CACHES_KEY)? {
        match serde_json::from_str::<Vec<LedgerRecord>>(&text) {
            Ok(records) => {
                for record in records {
                    match decode_record(&record) {
                        Some(cell) => saved.entries.push((cell, record.memento)),
                        None => {
                            tracing::warn!("Discarding corrupt ledger entry {:?}", record.key);
                            saved.discarded += 1;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable ledger: {}", e);
            }
        }
    }

    if let Some(text) = store.get(INVENTORY_KEY)? {
        match Inventory::from_memento(&text) {
            Ok(inventory) => saved.inventory = inventory,
            Err(e) => tracing::warn!("Discarding unreadable inventory: {}", e),
        }
    }

    if let Some(text) = store.get(PATH_KEY)? {
        match PathTrail::from_json(&text) {
            Some(trail) => saved.trail = trail,
            None => tracing::warn!("Discarding unreadable path trail"),
        }
    }

    tracing::info!(
        "Loaded {} caches, {} held coins, {} trail points ({} discarded)",
        saved.entries.len(),
        saved.inventory.len(),
        saved.trail.len(),
        saved.discarded
    );
    Ok(saved)
}

/// Checks one stored entry. Returns its cell if both key and memento are good.
fn decode_record(record: &LedgerRecord) -> Option<Cell> {
    let cell = Cell::parse_key(&record.key)?;
    Cache::from_memento(cell, &record.memento).ok()?;
    Some(cell)
}

/// Removes all three keys.
///
/// # Errors
///
/// Returns the first storage failure.
pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> WorldResult<()> {
    for key in [CACHES_KEY, INVENTORY_KEY, PATH_KEY] {
        store.remove(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::storage::MemoryStore;
    use geocoin_economy::Coin;
    use geocoin_grid::Point;

    #[test]
    fn test_round_trip() {
        let config = WorldConfig::test();
        let mut ledger = WorldLedger::new(&config);
        ledger.reconcile(config.start_point()).unwrap();

        let mut inventory = Inventory::new();
        inventory.add(Coin::new(Cell::new(-5, 5), 2));
        let mut trail = PathTrail::new();
        trail.push(config.start_point());

        let mut store = MemoryStore::new();
        save_all(&mut store, &ledger, &inventory, &trail).unwrap();

        let saved = load(&store).unwrap();
        let expected: Vec<(Cell, String)> =
            ledger.entries().map(|(c, m)| (c, m.to_string())).collect();
        assert_eq!(saved.entries, expected);
        assert_eq!(saved.inventory, inventory);
        assert_eq!(saved.trail, trail);
        assert_eq!(saved.discarded, 0);
    }

    #[test]
    fn test_ledger_record_shape() {
        let config = WorldConfig::test();
        let mut ledger = WorldLedger::new(&config);
        let cell = Cell::new(7, -3);
        ledger.restore_entries([(cell, r#"{"coins":[]}"#.to_string())]);

        let mut store = MemoryStore::new();
        save_ledger(&mut store, &ledger).unwrap();
        assert_eq!(
            store.get(CACHES_KEY).unwrap().as_deref(),
            Some(r#"[{"key":"7,-3","memento":"{\"coins\":[]}"}]"#)
        );
    }

    #[test]
    fn test_empty_store_loads_empty_world() {
        let saved = load(&MemoryStore::new()).unwrap();
        assert!(saved.entries.is_empty());
        assert!(saved.inventory.is_empty());
        assert!(saved.trail.is_empty());
    }

    #[test]
    fn test_bad_entries_dropped_individually() {
        let mut store = MemoryStore::new();
        store
            .set(
                CACHES_KEY,
                r#"[
                    {"key":"1,2","memento":"{\"coins\":[]}"},
                    {"key":"one,two","memento":"{\"coins\":[]}"},
                    {"key":"3,4","memento":"garbage"}
                ]"#,
            )
            .unwrap();

        let saved = load(&store).unwrap();
        assert_eq!(saved.entries.len(), 1);
        assert_eq!(saved.entries[0].0, Cell::new(1, 2));
        assert_eq!(saved.discarded, 2);
    }

    #[test]
    fn test_unreadable_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(CACHES_KEY, "{not a list").unwrap();
        store.set(INVENTORY_KEY, "nope").unwrap();
        store.set(PATH_KEY, "[[1.0, 2.0], \"x\"]").unwrap();

        let saved = load(&store).unwrap();
        assert!(saved.entries.is_empty());
        assert!(saved.inventory.is_empty());
        assert!(saved.trail.is_empty());
    }

    #[test]
    fn test_clear_removes_all_keys() {
        let mut store = MemoryStore::new();
        let config = WorldConfig::test();
        let mut trail = PathTrail::new();
        trail.push(Point::new(0.0, 0.0));
        save_all(&mut store, &WorldLedger::new(&config), &Inventory::new(), &trail).unwrap();
        store.set("unrelated", "kept").unwrap();

        clear(&mut store).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains_key("unrelated"));
    }
}
