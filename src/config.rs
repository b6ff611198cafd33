// Configuration module for reading Snake.toml

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub search: SearchConfig,
    pub debug: DebugConfig,
}

/// Request timing constants
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms
            .saturating_sub(self.network_overhead_ms)
    }
}

/// Search strategy constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub initial_depth: usize,
    pub max_depth: usize,
    pub min_time_remaining_ms: u64,
    pub base_iteration_time_ms: f64,
    pub branching_factor: f64,
    pub max_snakes_for_multi_max: usize,
    pub fringe_lookahead: usize,
}

impl SearchConfig {
    /// Estimates the time for one multi-max iteration at a given depth,
    /// using the exponential branching model
    /// `base * branching_factor^(depth * alive_snakes)`.
    pub fn estimate_iteration_ms(&self, depth: usize, alive_snakes: usize) -> u64 {
        let exponent = (depth as f64) * (alive_snakes as f64);
        let estimate = self.base_iteration_time_ms * self.branching_factor.powf(exponent);
        estimate.ceil() as u64
    }
}

/// Debug logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback.
    /// This should match the constants defined in Snake.toml.
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            search: SearchConfig {
                initial_depth: 2,
                max_depth: 8,
                min_time_remaining_ms: 20,
                base_iteration_time_ms: 0.05,
                branching_factor: 3.0,
                max_snakes_for_multi_max: 3,
                fringe_lookahead: 6,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "decision_log.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
