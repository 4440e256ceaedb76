//! Index and harness configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::grid::GridLimits;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub bench: BenchConfig,
}

impl Config {
    /// Load configuration from `pointgrid.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new("pointgrid.toml");
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!("No pointgrid.toml found, creating default config");
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }
}

/// World bounds configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorldConfig {
    #[serde(default = "default_world_size")]
    pub width: f32,
    #[serde(default = "default_world_size")]
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_size(),
            height: default_world_size(),
        }
    }
}

fn default_world_size() -> f32 {
    5000.0
}

/// Grid subdivision configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GridConfig {
    /// Leaf capacity before subdivision is attempted.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Quadrant side length at or below which subdivision is refused.
    #[serde(default = "default_min_size")]
    pub min_size: f32,
}

impl GridConfig {
    /// The core-facing subset of this section.
    pub fn limits(&self) -> GridLimits {
        GridLimits {
            max_items: self.max_items,
            min_size: self.min_size,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            min_size: default_min_size(),
        }
    }
}

fn default_max_items() -> usize {
    100
}
fn default_min_size() -> f32 {
    50.0
}

/// Benchmark harness configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BenchConfig {
    /// Points to generate.
    #[serde(default = "default_points")]
    pub points: usize,
    /// Random box queries to run.
    #[serde(default = "default_queries")]
    pub queries: usize,
    #[serde(default = "default_query_size")]
    pub query_width: f32,
    #[serde(default = "default_query_size")]
    pub query_height: f32,
    /// RNG seed; 0 picks a fresh seed per run.
    #[serde(default)]
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            points: default_points(),
            queries: default_queries(),
            query_width: default_query_size(),
            query_height: default_query_size(),
            seed: 0,
        }
    }
}

fn default_points() -> usize {
    10_000
}
fn default_queries() -> usize {
    1000
}
fn default_query_size() -> f32 {
    500.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.world.width, 5000.0);
        assert_eq!(config.grid.max_items, 100);
        assert_eq!(config.grid.min_size, 50.0);
        assert_eq!(config.bench.points, 10_000);
        assert_eq!(config.bench.seed, 0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [grid]
            max_items = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.max_items, 8);
        assert_eq!(config.grid.min_size, 50.0);
        assert_eq!(config.world.height, 5000.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.grid.max_items, config.grid.max_items);
        assert_eq!(back.bench.queries, config.bench.queries);
    }
}
