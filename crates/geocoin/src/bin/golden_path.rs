//! # Golden Path Scenario
//!
//! Reference world, headless, in-memory store:
//!
//! Start → Collect every coin of a 3-coin cache → Walk out of view →
//! Walk back → Cache is restored EMPTY (not regenerated) → Restart → Same.
//!
//! Usage: `golden_path [config.toml]`

use std::process::ExitCode;
use std::time::Instant;

use geocoin::{Cell, Direction, GameSession, GridIndex, MemoryStore, WorldConfig, WorldResult};

/// What the run observed.
#[derive(Debug)]
struct GoldenPathResult {
    /// Cache the scenario played against.
    cell: Cell,
    /// Cells in the visible window.
    window: usize,
    /// Caches live at start.
    visible_at_start: usize,
    /// Coins collected.
    collected: usize,
    /// Coins in the cache after walking back.
    after_return: usize,
    /// Coins in the cache after a restart.
    after_restart: usize,
    /// Caches discovered over the whole walk.
    discovered: usize,
    /// Wall time of the walk.
    walk_us: u128,
}

impl GoldenPathResult {
    fn passed(&self) -> bool {
        self.collected > 0 && self.after_return == 0 && self.after_restart == 0
    }
}

/// Finds a spawning cell with three starting coins near the configured start.
fn find_target(config: &WorldConfig) -> Option<Cell> {
    let generator = config.generator();
    let center = config.grid_index().cell_for(config.start_point())?;
    GridIndex::cells_around(center, GridIndex::MAX_RADIUS)?
        .into_iter()
        .find(|cell| generator.should_spawn(*cell) && generator.initial_coin_count(*cell) == 3)
}

fn run(mut config: WorldConfig) -> WorldResult<Option<GoldenPathResult>> {
    let Some(cell) = find_target(&config) else {
        return Ok(None);
    };
    config.player.start = config.grid_index().bounds_of(cell).center().to_array();
    let radius = config.visibility_radius();

    let mut session = GameSession::start(config, MemoryStore::new())?;
    let window = session
        .ledger()
        .grid()
        .neighborhood(session.position(), radius)
        .map_or(0, |cells| cells.len());
    let visible_at_start = session.visible_caches().len();

    let coins = session
        .cache(cell)
        .map(|cache| cache.coins().to_vec())
        .unwrap_or_default();
    for coin in &coins {
        session.collect(cell, *coin)?;
    }

    let walk_start = Instant::now();
    let leg = usize::try_from(radius).unwrap_or(0) + 1;
    for _ in 0..leg {
        session.step(Direction::East)?;
    }
    for _ in 0..leg {
        session.step(Direction::West)?;
    }
    let walk_us = walk_start.elapsed().as_micros();

    let after_return = session.cache(cell).map_or(usize::MAX, |cache| cache.len());
    let discovered = session.ledger().len();

    let resumed = GameSession::start(config, session.into_store())?;
    let after_restart = resumed.cache(cell).map_or(usize::MAX, |cache| cache.len());

    Ok(Some(GoldenPathResult {
        cell,
        window,
        visible_at_start,
        collected: coins.len(),
        after_return,
        after_restart,
        discovered,
        walk_us,
    }))
}

fn load_config() -> WorldResult<WorldConfig> {
    match std::env::args().nth(1) {
        Some(path) => WorldConfig::load(path),
        None => Ok(WorldConfig::default()),
    }
}

fn main() -> ExitCode {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║           GOLDEN PATH SCENARIO                                   ║");
    println!("║           Collect → Walk Away → Walk Back → Still Empty          ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let result = load_config().and_then(run);
    let result = match result {
        Ok(Some(result)) => result,
        Ok(None) => {
            println!(
                "❌ No three-coin cache within {} cells of the start",
                GridIndex::MAX_RADIUS
            );
            return ExitCode::FAILURE;
        }
        Err(e) => {
            println!("❌ Scenario aborted: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Golden path finished: {:?}", result);

    println!("┌─ WORLD ──────────────────────────────────────────────────────────┐");
    println!("│ Target Cache:       {}", result.cell);
    println!("│ Window Cells:       {}", result.window);
    println!("│ Visible at Start:   {}", result.visible_at_start);
    println!("│ Discovered Total:   {}", result.discovered);
    println!("│ Walk Time:          {:.3} ms", result.walk_us as f64 / 1000.0);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();
    println!("┌─ COINS ──────────────────────────────────────────────────────────┐");
    println!("│ Collected:          {}", result.collected);
    println!("│ After Walk Back:    {}", result.after_return);
    println!("│ After Restart:      {}", result.after_restart);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    if result.passed() {
        println!("✅ GOLDEN PATH PASSED");
        ExitCode::SUCCESS
    } else {
        println!("❌ GOLDEN PATH FAILED");
        ExitCode::FAILURE
    }
}
