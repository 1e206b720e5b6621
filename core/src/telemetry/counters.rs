//! telemetry/counters.rs
//! Mutable counters collected while encoding or decoding a stream.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Deterministic counters collected during stream processing
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCounters {
    pub records: u64,
    pub empty_records: u64,
    pub bytes_payload: u64,
    /// Length prefix bytes.
    pub bytes_overhead: u64,
    pub largest_record: u64,
}

impl RecordCounters {
    /// Record one frame.
    ///
    /// - `payload_len`: payload bytes
    /// - `prefix_len`: varint length prefix bytes
    pub fn add_record(&mut self, payload_len: usize, prefix_len: usize) {
        self.records += 1;
        if payload_len == 0 {
            self.empty_records += 1;
        }
        self.bytes_payload += payload_len as u64;
        self.bytes_overhead += prefix_len as u64;
        self.largest_record = self.largest_record.max(payload_len as u64);
    }

    /// Bytes on the wire (payload + prefixes).
    pub fn total_bytes(&self) -> u64 {
        self.bytes_payload + self.bytes_overhead
    }

    // Per-stream counters are merged after the fact, no shared state.
    pub fn merge(&mut self, other: &RecordCounters) {
        self.records += other.records;
        self.empty_records += other.empty_records;
        self.bytes_payload += other.bytes_payload;
        self.bytes_overhead += other.bytes_overhead;
        self.largest_record = self.largest_record.max(other.largest_record);
    }
}

impl AddAssign for RecordCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
