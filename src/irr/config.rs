//! Solver configuration: seeds, tolerance and iteration budget

use crate::error::InputError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default starting rate (10% per period)
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;
/// Default convergence threshold on |NPV| and on the Newton step size
pub const DEFAULT_TOLERANCE: f64 = 1e-10;
/// Default iteration budget per seed
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;
/// Seed retried when the default initial guess fails
pub const DEFAULT_FALLBACK_SEED: f64 = 0.01;

/// Slope below which no Newton step is taken
pub const DERIVATIVE_FLOOR: f64 = 1e-10;
/// Amount added to the guess when the slope is below the floor
pub const FLAT_SLOPE_NUDGE: f64 = 0.01;

/// Newton-Raphson IRR solver settings
///
/// `fallback_seeds` left as `None` follows the default retry rule: the
/// fallback seed is only tried when `initial_guess` is the default. An
/// explicit list is always tried in order after the initial guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,

    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    #[serde(default)]
    pub fallback_seeds: Option<Vec<f64>>,
}

fn default_initial_guess() -> f64 { DEFAULT_INITIAL_GUESS }
fn default_tolerance() -> f64 { DEFAULT_TOLERANCE }
fn default_max_iterations() -> u32 { DEFAULT_MAX_ITERATIONS }

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            fallback_seeds: None,
        }
    }
}

impl SolverConfig {
    /// Start from a custom guess. No fallback seeds unless added explicitly.
    pub fn with_initial_guess(initial_guess: f64) -> Self {
        Self {
            initial_guess,
            ..Self::default()
        }
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn fallback_seeds(mut self, seeds: Vec<f64>) -> Self {
        self.fallback_seeds = Some(seeds);
        self
    }

    /// Seeds in the order they are tried
    pub fn seeds(&self) -> Vec<f64> {
        let mut seeds = vec![self.initial_guess];
        match &self.fallback_seeds {
            Some(explicit) => seeds.extend(explicit.iter().copied()),
            None if self.initial_guess == DEFAULT_INITIAL_GUESS => seeds.push(DEFAULT_FALLBACK_SEED),
            None => {}
        }
        seeds
    }

    /// Check the settings can drive an iteration
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(InputError::Config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(InputError::Config("max_iterations must be at least 1".into()));
        }
        for seed in self.seeds() {
            if !seed.is_finite() || seed <= -1.0 {
                return Err(InputError::Config(format!(
                    "seed rate must be finite and above -100%, got {}",
                    seed
                )));
            }
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields take defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `IRR_*` environment variables
    pub fn from_env() -> Self {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Overlay values from a variable lookup
    ///
    /// Reads IRR_INITIAL_GUESS, IRR_TOLERANCE, IRR_MAX_ITERATIONS and
    /// IRR_FALLBACK_SEEDS (comma separated). Unparseable values are skipped.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(guess) = parse_var(&lookup, "IRR_INITIAL_GUESS") {
            self.initial_guess = guess;
        }
        if let Some(tolerance) = parse_var(&lookup, "IRR_TOLERANCE") {
            self.tolerance = tolerance;
        }
        if let Some(max_iterations) = parse_var(&lookup, "IRR_MAX_ITERATIONS") {
            self.max_iterations = max_iterations;
        }
        if let Some(raw) = lookup("IRR_FALLBACK_SEEDS") {
            match parse_rate_list(&raw) {
                Some(seeds) => self.fallback_seeds = Some(seeds),
                None => warn!("Ignoring IRR_FALLBACK_SEEDS={:?}: not a list of rates", raw),
            }
        }
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!("Ignoring {}={:?}: not a valid value", key, raw);
    }
    parsed
}

/// Parse "0.05, 0.01" into rates. An empty string is an empty list.
pub fn parse_rate_list(raw: &str) -> Option<Vec<f64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}
