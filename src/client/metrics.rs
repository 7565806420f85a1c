use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::common::messages::LookupOutcome;

/// Number of most recent latencies kept for the percentiles.
pub const LATENCY_WINDOW: usize = 1024;

/// Distinct failure reasons tracked before further ones are folded into
/// [`OTHER_FAILURE_REASON`].
pub const MAX_FAILURE_REASONS: usize = 64;
pub const OTHER_FAILURE_REASON: &str = "other";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AggregatedStats {
    pub total_lookups: usize,
    pub successful_lookups: usize,
    pub failed_lookups: usize,
    pub failure_rate: f64,

    // Latency statistics (milliseconds). Min, max and average cover every
    // lookup; percentiles cover the recent window only.
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub latency_avg_ms: f64,
    pub latency_p50_ms: u64,
    pub latency_p95_ms: u64,
    pub latency_p99_ms: u64,

    // Lookups per catalog key
    pub game_distribution: HashMap<String, usize>,

    // Failure reasons breakdown
    pub failure_reasons: HashMap<String, usize>,
}

/// In-memory lookup counters. Nothing here is written to disk, and memory use
/// does not grow with the number of lookups.
#[derive(Debug)]
pub struct LookupMetrics {
    start_time: Instant,
    window: usize,

    total: usize,
    successful: usize,
    latency_min_ms: u64,
    latency_max_ms: u64,
    latency_sum_ms: u128,
    recent_latencies: VecDeque<u64>,

    game_distribution: HashMap<String, usize>,
    failure_reasons: HashMap<String, usize>,
}

impl Default for LookupMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::with_latency_window(LATENCY_WINDOW)
    }

    /// Keeps at most `window` recent latencies for the percentiles.
    pub fn with_latency_window(window: usize) -> Self {
        let window = window.max(1);
        Self {
            start_time: Instant::now(),
            window,
            total: 0,
            successful: 0,
            latency_min_ms: u64::MAX,
            latency_max_ms: 0,
            latency_sum_ms: 0,
            recent_latencies: VecDeque::with_capacity(window),
            game_distribution: HashMap::new(),
            failure_reasons: HashMap::new(),
        }
    }

    pub fn record_lookup(&mut self, game: &str, latency: Duration, outcome: &LookupOutcome) {
        let latency_ms = latency.as_millis() as u64;

        self.total += 1;
        self.latency_min_ms = self.latency_min_ms.min(latency_ms);
        self.latency_max_ms = self.latency_max_ms.max(latency_ms);
        self.latency_sum_ms += u128::from(latency_ms);

        if self.recent_latencies.len() == self.window {
            self.recent_latencies.pop_front();
        }
        self.recent_latencies.push_back(latency_ms);

        *self.game_distribution.entry(game.to_string()).or_insert(0) += 1;

        match outcome {
            LookupOutcome::Success { .. } => self.successful += 1,
            LookupOutcome::Failure { reason } => self.record_failure_reason(reason),
        }
    }

    fn record_failure_reason(&mut self, reason: &str) {
        if let Some(count) = self.failure_reasons.get_mut(reason) {
            *count += 1;
            return;
        }

        let key = if self.failure_reasons.len() < MAX_FAILURE_REASONS {
            reason
        } else {
            OTHER_FAILURE_REASON
        };
        *self.failure_reasons.entry(key.to_string()).or_insert(0) += 1;
    }

    /// Number of latencies currently held for the percentiles.
    pub fn latency_window_len(&self) -> usize {
        self.recent_latencies.len()
    }

    pub fn aggregate(&self) -> AggregatedStats {
        let mut stats = AggregatedStats::default();

        if self.total == 0 {
            return stats;
        }

        stats.total_lookups = self.total;
        stats.successful_lookups = self.successful;
        stats.failed_lookups = self.total - self.successful;
        stats.failure_rate = (stats.failed_lookups as f64 / stats.total_lookups as f64) * 100.0;

        // A rejected lookup still costs a round trip, so latency covers every lookup.
        stats.latency_min_ms = self.latency_min_ms;
        stats.latency_max_ms = self.latency_max_ms;
        stats.latency_avg_ms = self.latency_sum_ms as f64 / self.total as f64;

        let mut latencies: Vec<u64> = self.recent_latencies.iter().copied().collect();
        latencies.sort_unstable();
        stats.latency_p50_ms = percentile(&latencies, 50.0);
        stats.latency_p95_ms = percentile(&latencies, 95.0);
        stats.latency_p99_ms = percentile(&latencies, 99.0);

        stats.game_distribution = self.game_distribution.clone();
        stats.failure_reasons = self.failure_reasons.clone();

        stats
    }

    pub fn snapshot_json(&self) -> serde_json::Value {
        serde_json::json!({
            "uptime_secs": self.start_time.elapsed().as_secs(),
            "aggregated_stats": self.aggregate(),
        })
    }
}

fn percentile(sorted_data: &[u64], percentile: f64) -> u64 {
    if sorted_data.is_empty() {
        return 0;
    }

    let index = (percentile / 100.0 * (sorted_data.len() - 1) as f64).round() as usize;
    sorted_data[index.min(sorted_data.len() - 1)]
}
