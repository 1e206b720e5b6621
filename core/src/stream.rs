//! Whole-stream entry points over normalized inputs and outputs.

use std::time::Instant;

use bytes::Bytes;
use tracing::debug;

use crate::config::ReaderOptions;
use crate::io::{open_input, open_output, InputSource, OutputSink};
use crate::reader::Reader;
use crate::telemetry::TelemetrySnapshot;
use crate::types::RecordResult;
use crate::writer::Writer;

#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub telemetry: TelemetrySnapshot,
    /// Encoded stream, for `OutputSink::Memory` only.
    pub output: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct ReadOutcome {
    pub records: Vec<Bytes>,
    pub telemetry: TelemetrySnapshot,
}

/// Encode `records` in order into `output`.
pub fn write_stream<I>(output: OutputSink, records: I) -> RecordResult<WriteOutcome>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let started = Instant::now();

    let sink = open_output(output)?;
    let mut writer = Writer::new(sink);
    writer.write_all(records)?;
    writer.flush()?;

    let telemetry = TelemetrySnapshot::from(writer.counters(), started.elapsed());
    debug!(
        records = telemetry.records,
        bytes = telemetry.bytes_total,
        "stream written"
    );

    Ok(WriteOutcome {
        telemetry,
        output: writer.into_inner().into_memory(),
    })
}

/// Decode every record of `input`, copying each one out.
///
/// Stops at the first error and returns it; records decoded before it are dropped.
pub fn read_stream(input: InputSource, options: &ReaderOptions) -> RecordResult<ReadOutcome> {
    let started = Instant::now();

    let source = open_input(input, options.read_buffer_capacity)?;
    let mut reader = Reader::from_source_with_options(source, options)?;

    let mut records = Vec::new();
    while let Some(payload) = reader.next()? {
        records.push(Bytes::copy_from_slice(payload));
    }

    let telemetry = TelemetrySnapshot::from(reader.counters(), started.elapsed());
    debug!(
        records = telemetry.records,
        bytes = telemetry.bytes_total,
        "stream read"
    );

    Ok(ReadOutcome { records, telemetry })
}
