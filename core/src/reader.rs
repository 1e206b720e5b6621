//! Single-shot decoder.
//!
//! `Reader::next` decodes one frame on demand into a decode buffer owned by
//! the reader. The buffer only grows, and only as payload bytes actually
//! arrive, so a corrupt length prefix cannot force a large allocation. It ends
//! up exactly as long as the largest record seen and is reused for every
//! later record. The returned slice borrows that buffer,
//! so it is valid until the next read; copy it out to keep it.

use std::io::{self, BufRead, Read};
use std::iter::FusedIterator;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::config::ReaderOptions;
use crate::framing::read_uvarint;
use crate::io::{read_exact_or_eof, ByteSource};
use crate::telemetry::RecordCounters;
use crate::types::{RecordError, RecordResult};

#[derive(Debug)]
pub struct Reader<R: Read> {
    src: ByteSource<R>,
    buf: Vec<u8>,
    // valid bytes of `buf`; everything past it is stale
    len: usize,
    max_record_size: Option<usize>,
    counters: RecordCounters,
}

impl<R: Read> Reader<R> {
    /// Reader over any source; the length prefix is read through an internal buffer.
    pub fn new(inner: R) -> Self {
        Self::from_source(ByteSource::buffered(inner))
    }

    pub fn from_source(src: ByteSource<R>) -> Self {
        Self {
            src,
            buf: Vec::new(),
            len: 0,
            max_record_size: None,
            counters: RecordCounters::default(),
        }
    }

    pub fn with_options(inner: R, opts: &ReaderOptions) -> RecordResult<Self> {
        Self::from_source_with_options(ByteSource::with_capacity(opts.read_buffer_capacity, inner), opts)
    }

    /// Apply record limits and initial capacity to an already opened source.
    ///
    /// `read_buffer_capacity` is not applied here; `src` keeps its own buffering.
    pub fn from_source_with_options(src: ByteSource<R>, opts: &ReaderOptions) -> RecordResult<Self> {
        opts.validate()?;
        let mut reader = Self::from_source(src);
        reader.apply(opts);
        Ok(reader)
    }

    fn apply(&mut self, opts: &ReaderOptions) {
        self.max_record_size = opts.max_record_size;
        if opts.initial_buffer_capacity > 0 {
            self.buf = vec![0u8; opts.initial_buffer_capacity];
        }
    }

    /// Decode the next record.
    ///
    /// Returns `Ok(None)` when the source ends cleanly at a frame boundary.
    pub fn next(&mut self) -> RecordResult<Option<&[u8]>> {
        match self.read_frame()? {
            Some(len) => Ok(Some(&self.buf[..len])),
            None => Ok(None),
        }
    }

    /// Payload of the last successful read, empty if there is none.
    pub fn current(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Decode one frame into the buffer and return its length.
    pub(crate) fn read_frame(&mut self) -> RecordResult<Option<usize>> {
        self.len = 0;

        let (size, prefix_len) = match read_uvarint(&mut self.src)? {
            Some(v) => v,
            None => return Ok(None),
        };
        let len = self.check_size(size)?;

        if len > 0 {
            let got = self.fill(len)?;
            if got < len {
                debug!(expected = len, actual = got, "record truncated");
                return Err(RecordError::TruncatedRecord {
                    expected: size,
                    actual: got as u64,
                });
            }
        }

        self.len = len;
        self.counters.add_record(len, prefix_len);
        trace!(payload_len = len, prefix_len, "record decoded");

        Ok(Some(len))
    }

    /// Read up to `len` payload bytes into the front of the buffer.
    ///
    /// The part already allocated is filled in place; the rest is appended as
    /// it is read, bounded by `len`. Returns how many bytes arrived.
    fn fill(&mut self, len: usize) -> io::Result<usize> {
        let held = self.buf.len().min(len);
        let mut got = read_exact_or_eof(&mut self.src, &mut self.buf[..held])?;

        if got == held && len > held {
            debug!(held, declared = len, "extending decode buffer as payload arrives");
            let rest = (len - held) as u64;
            got += self.src.by_ref().take(rest).read_to_end(&mut self.buf)?;
        }

        Ok(got)
    }

    fn check_size(&self, size: u64) -> RecordResult<usize> {
        let len = usize::try_from(size).map_err(|_| RecordError::RecordTooLarge {
            size,
            max: usize::MAX as u64,
        })?;
        if let Some(max) = self.max_record_size {
            if len > max {
                return Err(RecordError::RecordTooLarge {
                    size,
                    max: max as u64,
                });
            }
        }
        Ok(len)
    }

    /// Allocated size of the decode buffer.
    pub fn buffer_capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn counters(&self) -> &RecordCounters {
        &self.counters
    }

    pub fn get_ref(&self) -> &R {
        self.src.get_ref()
    }

    pub fn into_inner(self) -> R {
        self.src.into_inner()
    }

    /// Owned iterator that copies each payload out of the decode buffer.
    pub fn records(self) -> Records<R> {
        Records {
            reader: self,
            done: false,
        }
    }
}

impl<R: BufRead> Reader<R> {
    /// Reader over a source that already buffers; no extra adapter.
    pub fn from_buf_read(inner: R) -> Self {
        Self::from_source(ByteSource::native(inner))
    }

    pub fn from_buf_read_with_options(inner: R, opts: &ReaderOptions) -> RecordResult<Self> {
        Self::from_source_with_options(ByteSource::native(inner), opts)
    }
}

/// Iterator of owned records; ends after the clean end or the first error.
#[derive(Debug)]
pub struct Records<R: Read> {
    reader: Reader<R>,
    done: bool,
}

impl<R: Read> Records<R> {
    pub fn into_reader(self) -> Reader<R> {
        self.reader
    }
}

impl<R: Read> Iterator for Records<R> {
    type Item = RecordResult<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next() {
            Ok(Some(payload)) => Some(Ok(Bytes::copy_from_slice(payload))),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for Records<R> {}
