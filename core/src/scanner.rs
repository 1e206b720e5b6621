//! Sequential scanner.
//!
//! Pull-based iteration over a record stream: `advance` decodes the next
//! record, `current` exposes it. Errors do not surface at the call site;
//! `advance` returns false and the error is latched for `last_error`, so a
//! plain `while scanner.advance()` loop is enough to drain the stream.
//!
//! ```rust
//! use recordio::{Scanner, Writer};
//!
//! let mut w = Writer::new(Vec::new());
//! for rec in ["first", "second", "third"] {
//!     w.write(rec.as_bytes()).unwrap();
//! }
//!
//! let wire = w.into_inner();
//! let mut scanner = Scanner::new(wire.as_slice());
//! let mut seen = Vec::new();
//! while scanner.advance() {
//!     seen.push(scanner.current().to_vec());
//! }
//! // always check: a corrupt stream also ends the loop
//! assert!(scanner.last_error().is_none());
//! assert_eq!(seen, [b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]);
//! ```

use std::io::{BufRead, Read};

use tracing::debug;

use crate::config::ReaderOptions;
use crate::reader::Reader;
use crate::telemetry::RecordCounters;
use crate::types::{RecordError, RecordResult};

/// Why the scanner stopped.
#[derive(Debug)]
enum Stop {
    EndOfStream,
    Failed(RecordError),
}

#[derive(Debug)]
enum ScanState {
    /// No `advance` yet.
    Ready,
    /// Last `advance` produced a record.
    Holding,
    /// Terminal.
    Exhausted(Stop),
}

#[derive(Debug)]
pub struct Scanner<R: Read> {
    reader: Reader<R>,
    state: ScanState,
    scanned: u64,
}

impl<R: Read> Scanner<R> {
    pub fn new(inner: R) -> Self {
        Self::from_reader(Reader::new(inner))
    }

    pub fn with_options(inner: R, opts: &ReaderOptions) -> RecordResult<Self> {
        Ok(Self::from_reader(Reader::with_options(inner, opts)?))
    }

    /// Scan a reader that may already have been read from.
    pub fn from_reader(reader: Reader<R>) -> Self {
        Self {
            reader,
            state: ScanState::Ready,
            scanned: 0,
        }
    }

    /// Decode the next record.
    ///
    /// Returns false on the clean end of the stream and on any error; after
    /// that the scanner is exhausted and every later call returns false
    /// without touching the source.
    pub fn advance(&mut self) -> bool {
        if let ScanState::Exhausted(_) = self.state {
            return false;
        }

        match self.reader.read_frame() {
            Ok(Some(_)) => {
                self.scanned += 1;
                self.state = ScanState::Holding;
                true
            }
            Ok(None) => {
                debug!(records = self.scanned, "scanner reached end of stream");
                self.state = ScanState::Exhausted(Stop::EndOfStream);
                false
            }
            Err(e) => {
                debug!(records = self.scanned, error = %e, "scanner stopped on error");
                self.state = ScanState::Exhausted(Stop::Failed(e));
                false
            }
        }
    }

    /// Record produced by the last successful `advance`.
    ///
    /// Valid until the next `advance`. Empty before the first record and
    /// once the scanner is exhausted.
    pub fn current(&self) -> &[u8] {
        match self.state {
            ScanState::Holding => self.reader.current(),
            _ => &[],
        }
    }

    /// The error that stopped the scan, `None` if it has not stopped or
    /// stopped at a clean end of stream.
    pub fn last_error(&self) -> Option<&RecordError> {
        match &self.state {
            ScanState::Exhausted(Stop::Failed(e)) => Some(e),
            _ => None,
        }
    }

    /// Take the latched error, leaving the scanner exhausted.
    pub fn take_error(&mut self) -> Option<RecordError> {
        match std::mem::replace(&mut self.state, ScanState::Exhausted(Stop::EndOfStream)) {
            ScanState::Exhausted(Stop::Failed(e)) => Some(e),
            other => {
                self.state = other;
                None
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, ScanState::Exhausted(_))
    }

    /// Records produced so far by this scanner.
    pub fn records_scanned(&self) -> u64 {
        self.scanned
    }

    pub fn counters(&self) -> &RecordCounters {
        self.reader.counters()
    }

    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: BufRead> Scanner<R> {
    pub fn from_buf_read(inner: R) -> Self {
        Self::from_reader(Reader::from_buf_read(inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_error_keeps_scanner_exhausted() {
        let wire = [0x80u8];
        let mut s = Scanner::new(&wire[..]);

        assert!(!s.advance());
        assert!(matches!(
            s.take_error(),
            Some(RecordError::UnexpectedEndOfStream { consumed: 1 })
        ));
        assert!(s.take_error().is_none());
        assert!(s.is_exhausted());
        assert!(!s.advance());
    }

    #[test]
    fn take_error_before_stop_is_noop() {
        let mut s = Scanner::new(&[0x01u8, b'a'][..]);
        assert!(s.advance());
        assert!(s.take_error().is_none());
        assert_eq!(s.current(), b"a");
    }
}
