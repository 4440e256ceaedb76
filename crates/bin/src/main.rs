//! Pointgrid benchmark harness.
//!
//! Fills a spatial index with uniformly random points, runs a batch of
//! random box queries, and reports wall-clock timings plus tree
//! statistics. One query is cross-checked against a linear scan.

use std::time::Instant;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatial::{Config, SpatialIndex};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Pointgrid v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!("Loaded configuration");
    info!("  World: {}x{}", config.world.width, config.world.height);
    info!(
        "  Grid: max_items={}, min_size={}",
        config.grid.max_items, config.grid.min_size
    );
    info!(
        "  Bench: {} points, {} queries of {}x{}",
        config.bench.points, config.bench.queries, config.bench.query_width, config.bench.query_height
    );

    let mut rng = if config.bench.seed != 0 {
        StdRng::seed_from_u64(config.bench.seed)
    } else {
        StdRng::from_os_rng()
    };

    let half_w = config.world.width / 2.0;
    let half_h = config.world.height / 2.0;
    let mut index = SpatialIndex::new(config.world.width, config.world.height, config.grid.limits());

    // Fill phase: batch inserts, one sort at the end
    let start = Instant::now();
    let ids: Vec<u32> = (0..config.bench.points)
        .map(|_| {
            index.add(Vec2::new(
                rng.random_range(-half_w..half_w),
                rng.random_range(-half_h..half_h),
            ))
        })
        .collect();
    index.sort();
    info!("Inserted {} points in {:?}", ids.len(), start.elapsed());

    // Query phase
    let extent = Vec2::new(config.bench.query_width, config.bench.query_height);
    let mut total_hits = 0usize;
    let mut last_center = Vec2::ZERO;
    let start = Instant::now();
    for _ in 0..config.bench.queries {
        let center = Vec2::new(
            rng.random_range(-half_w..half_w),
            rng.random_range(-half_h..half_h),
        );
        total_hits += index.query(center, extent)?.len();
        last_center = center;
    }
    info!(
        "Ran {} queries in {:?} ({} total hits)",
        config.bench.queries,
        start.elapsed(),
        total_hits
    );

    // Cross-check the last query against a linear scan
    let indexed = index.query(last_center, extent)?.len();
    let lo = last_center - extent / 2.0;
    let hi = last_center + extent / 2.0;
    let mut scanned = 0usize;
    for &id in &ids {
        let p = index.get(id)?.position();
        if p.x >= lo.x && p.x <= hi.x && p.y >= lo.y && p.y <= hi.y {
            scanned += 1;
        }
    }
    if indexed == scanned {
        info!("Verified query at {last_center} against linear scan: {indexed} hits");
    } else {
        warn!("Query mismatch at {last_center}: index {indexed} vs scan {scanned}");
    }

    let stats = index.stats();
    info!(
        "Tree: {} leaves, {} items, depth {}, {} overflowed",
        stats.leaves, stats.items, stats.max_depth, stats.overflowed
    );

    Ok(())
}
