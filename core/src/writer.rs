use std::io::Write;

use tracing::trace;

use crate::framing::encode_frame_into;
use crate::telemetry::RecordCounters;
use crate::types::RecordResult;

/// Encoder: writes each payload as one `varint(len) || payload` frame.
#[derive(Debug)]
pub struct Writer<W: Write> {
    inner: W,
    // reused across writes; holds exactly one frame while writing
    scratch: Vec<u8>,
    counters: RecordCounters,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            scratch: Vec::new(),
            counters: RecordCounters::default(),
        }
    }

    /// Write one record.
    ///
    /// The frame is handed to the sink in a single `write_all`. A failing
    /// sink surfaces as `RecordError::Io`; nothing is retried, and whatever
    /// the sink already accepted stays written.
    ///
    /// Returns the number of bytes written (prefix + payload).
    pub fn write(&mut self, payload: &[u8]) -> RecordResult<usize> {
        self.scratch.clear();
        let frame_len = encode_frame_into(payload, &mut self.scratch);

        self.inner.write_all(&self.scratch)?;

        let prefix_len = frame_len - payload.len();
        self.counters.add_record(payload.len(), prefix_len);
        trace!(payload_len = payload.len(), prefix_len, "record written");

        Ok(frame_len)
    }

    /// Write every record yielded by `records`, in order.
    ///
    /// Returns the total number of bytes written.
    pub fn write_all<I>(&mut self, records: I) -> RecordResult<u64>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut total = 0u64;
        for record in records {
            total += self.write(record.as_ref())? as u64;
        }
        Ok(total)
    }

    pub fn flush(&mut self) -> RecordResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn counters(&self) -> &RecordCounters {
        &self.counters
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
