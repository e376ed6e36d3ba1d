use crate::error::{ErrorCategory, GeoError};
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// Per-session counters, kept by the interactive loop and dropped with it.
///
/// Lookup failures and rejected inputs (bad address, no external IP) are
/// counted apart; a rejected input never issues a lookup.
#[derive(Debug)]
pub struct SessionMetrics {
    lookups: u64,
    succeeded: u64,
    failures: HashMap<ErrorCategory, u64>,
    rejected: HashMap<ErrorCategory, u64>,
    start_time: Instant,
}

impl SessionMetrics {
    pub fn new() -> Self {
        SessionMetrics {
            lookups: 0,
            succeeded: 0,
            failures: HashMap::new(),
            rejected: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    pub fn record_lookup(&mut self) {
        self.lookups += 1;
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    /// A lookup that was issued and came back with an error.
    pub fn record_failure(&mut self, err: &GeoError) {
        *self.failures.entry(err.category()).or_insert(0) += 1;
    }

    /// An interaction that ended before any lookup.
    pub fn record_rejected(&mut self, err: &GeoError) {
        *self.rejected.entry(err.category()).or_insert(0) += 1;
    }

    pub fn get_lookups(&self) -> u64 {
        self.lookups
    }

    pub fn get_succeeded(&self) -> u64 {
        self.succeeded
    }

    pub fn get_failures(&self, category: ErrorCategory) -> u64 {
        self.failures.get(&category).copied().unwrap_or(0)
    }

    pub fn get_rejected(&self, category: ErrorCategory) -> u64 {
        self.rejected.get(&category).copied().unwrap_or(0)
    }

    pub fn failed_lookups(&self) -> u64 {
        self.failures.values().sum()
    }

    pub fn total_rejected(&self) -> u64 {
        self.rejected.values().sum()
    }

    pub fn print_summary(&self) {
        info!("=== Session Summary ===");
        info!("Lookups: {}", self.get_lookups());
        info!("Succeeded: {}", self.get_succeeded());
        info!("Failed lookups: {}", self.failed_lookups());
        for (category, count) in &self.failures {
            info!("  {:?}: {}", category, count);
        }
        info!("Rejected inputs: {}", self.total_rejected());
        for (category, count) in &self.rejected {
            info!("  {:?}: {}", category, count);
        }
        info!("Elapsed: {:.2}s", self.start_time.elapsed().as_secs_f64());
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
