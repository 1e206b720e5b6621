//! telemetry/mod.rs
//! Record counters and immutable snapshots.
//!
//! Counters are kept by every `Writer` and `Reader` and converted into a
//! `TelemetrySnapshot` at the end of a stream.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
