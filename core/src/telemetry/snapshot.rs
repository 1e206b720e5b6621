//! telemetry/snapshot.rs
//! Immutable view of a finished stream's counters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_VARINT_LEN64;
use crate::telemetry::counters::RecordCounters;

/// Core telemetry snapshot.
/// Captures counters, ratios, throughput and elapsed duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub records: u64,
    pub empty_records: u64,
    pub bytes_payload: u64,
    pub bytes_overhead: u64,
    pub bytes_total: u64,
    pub largest_record: u64,
    pub mean_record_size: f64,
    /// `bytes_overhead / bytes_total`, 0 for an empty stream.
    pub overhead_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
}

impl TelemetrySnapshot {
    pub fn from(counters: &RecordCounters, elapsed: Duration) -> Self {
        let bytes_total = counters.total_bytes();

        let mean_record_size = if counters.records > 0 {
            counters.bytes_payload as f64 / counters.records as f64
        } else {
            0.0
        };

        let overhead_ratio = if bytes_total > 0 {
            counters.bytes_overhead as f64 / bytes_total as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            bytes_total as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            records: counters.records,
            empty_records: counters.empty_records,
            bytes_payload: counters.bytes_payload,
            bytes_overhead: counters.bytes_overhead,
            bytes_total,
            largest_record: counters.largest_record,
            mean_record_size,
            overhead_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
        }
    }

    /// Every frame carries at least one prefix byte and at most ten.
    pub fn sanity_check(&self) -> bool {
        self.bytes_total == self.bytes_payload + self.bytes_overhead
            && self.empty_records <= self.records
            && self.bytes_overhead >= self.records
            && self.bytes_overhead <= self.records * MAX_VARINT_LEN64 as u64
            && self.largest_record <= self.bytes_payload
            && self.overhead_ratio <= 1.0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
