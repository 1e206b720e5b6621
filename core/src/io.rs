//! Normalized I/O for record streams.
//!
//! The decoder reads the length prefix one byte at a time and the payload in
//! bulk. `ByteSource` gives both over any `Read`: sources that are already
//! cheap per byte are used as-is, everything else goes through a `BufReader`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Read, Write};
use std::path::PathBuf;

use crate::constants::DEFAULT_READ_BUFFER_SIZE;

/// Single-byte read primitive used by the varint decoder.
pub trait ReadByte {
    /// Read one byte. `Ok(None)` means the source is exhausted.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl ReadByte for &[u8] {
    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.split_first() {
            Some((&b, rest)) => {
                *self = rest;
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }
}

impl<S: ReadByte + ?Sized> ReadByte for &mut S {
    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }
}

/// Byte source with two capability variants.
///
/// Prefer the constructors: `native` only accepts `BufRead` sources, `buffered`
/// and `with_capacity` accept anything.
pub enum ByteSource<R: Read> {
    /// Source whose one-byte reads are cheap (in-memory or already buffered).
    ///
    /// Every length-prefix byte is a separate `read` call on `R`. Building
    /// this variant by hand over an unbuffered file or socket costs one system
    /// call per prefix byte.
    Native(R),
    /// Bulk-only source wrapped in an internal buffer.
    Buffered(BufReader<R>),
}

impl<R: BufRead> ByteSource<R> {
    /// Use a buffered source directly; the `BufRead` bound is the capability witness.
    pub fn native(inner: R) -> Self {
        ByteSource::Native(inner)
    }
}

impl<R: Read> ByteSource<R> {
    pub fn buffered(inner: R) -> Self {
        Self::with_capacity(DEFAULT_READ_BUFFER_SIZE, inner)
    }

    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        ByteSource::Buffered(BufReader::with_capacity(capacity, inner))
    }

    pub fn is_buffered(&self) -> bool {
        matches!(self, ByteSource::Buffered(_))
    }

    pub fn get_ref(&self) -> &R {
        match self {
            ByteSource::Native(r) => r,
            ByteSource::Buffered(r) => r.get_ref(),
        }
    }

    /// Unwrap the underlying source.
    ///
    /// For the buffered variant, bytes already pulled into the internal
    /// buffer but not yet decoded are lost.
    pub fn into_inner(self) -> R {
        match self {
            ByteSource::Native(r) => r,
            ByteSource::Buffered(r) => r.into_inner(),
        }
    }
}

impl<R: Read> Read for ByteSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            ByteSource::Native(r) => r.read(buf),
            ByteSource::Buffered(r) => r.read(buf),
        }
    }
}

impl<R: Read> ReadByte for ByteSource<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self {
            ByteSource::Native(r) => {
                let mut one = [0u8; 1];
                loop {
                    match r.read(&mut one) {
                        Ok(0) => return Ok(None),
                        Ok(_) => return Ok(Some(one[0])),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e),
                    }
                }
            }
            ByteSource::Buffered(r) => {
                let b = loop {
                    match r.fill_buf() {
                        Ok(buf) => break buf.first().copied(),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e),
                    }
                };
                if b.is_some() {
                    r.consume(1);
                }
                Ok(b)
            }
        }
    }
}

impl<R: Read> std::fmt::Debug for ByteSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteSource::Native(_) => f.write_str("ByteSource::Native"),
            ByteSource::Buffered(r) => f
                .debug_struct("ByteSource::Buffered")
                .field("capacity", &r.capacity())
                .field("buffered", &r.buffer().len())
                .finish(),
        }
    }
}

/// Fill as much of `buf` as the source provides.
///
/// Returns the number of bytes read; a short count means the source was
/// exhausted. `Interrupted` is retried.
pub fn read_exact_or_eof<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut off = 0;

    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(off)
}

// ================= Stream endpoints =================

/// Where an encoded record stream is read from.
pub enum InputSource {
    /// Caller-provided reader; buffered by `open_input`.
    Reader(Box<dyn Read + Send>),
    /// File opened for reading; buffered by `open_input`.
    File(PathBuf),
    /// Whole stream already in memory; read without an extra buffer.
    Memory(Vec<u8>),
}

/// Where encoded frames are written to.
pub enum OutputSink {
    /// Caller-provided writer, used unbuffered; each frame is one `write_all`.
    Writer(Box<dyn Write + Send>),
    /// File created or truncated, written through a `BufWriter`.
    File(PathBuf),
    /// Collect the stream into a `Vec<u8>` returned by `OpenSink::into_memory`.
    Memory,
}

/// Open `src` as a byte source for the decoder.
///
/// In-memory input is a `Cursor`, already cheap per byte, and is read
/// natively; readers and files get a buffer of `capacity` bytes.
pub fn open_input(src: InputSource, capacity: usize) -> io::Result<ByteSource<Box<dyn Read + Send>>> {
    let source = match src {
        InputSource::Reader(r) => ByteSource::with_capacity(capacity, r),
        InputSource::File(p) => {
            let file: Box<dyn Read + Send> = Box::new(File::open(p)?);
            ByteSource::with_capacity(capacity, file)
        }
        InputSource::Memory(b) => {
            let cursor: Box<dyn Read + Send> = Box::new(Cursor::new(b));
            ByteSource::Native(cursor)
        }
    };
    Ok(source)
}

/// Opened output sink.
pub enum OpenSink {
    Stream(Box<dyn Write + Send>),
    Memory(Vec<u8>),
}

impl OpenSink {
    /// Captured bytes for a memory sink, `None` otherwise.
    pub fn into_memory(self) -> Option<Vec<u8>> {
        match self {
            OpenSink::Stream(_) => None,
            OpenSink::Memory(buf) => Some(buf),
        }
    }
}

impl Write for OpenSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match self {
            OpenSink::Stream(w) => w.write(data),
            OpenSink::Memory(buf) => buf.write(data),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        match self {
            OpenSink::Stream(w) => w.write_all(data),
            OpenSink::Memory(buf) => buf.write_all(data),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OpenSink::Stream(w) => w.flush(),
            OpenSink::Memory(_) => Ok(()),
        }
    }
}

/// Open `sink` for frame output. Files are created or truncated.
pub fn open_output(sink: OutputSink) -> io::Result<OpenSink> {
    match sink {
        OutputSink::Writer(w) => Ok(OpenSink::Stream(w)),
        OutputSink::File(p) => Ok(OpenSink::Stream(Box::new(BufWriter::new(File::create(p)?)))),
        OutputSink::Memory => Ok(OpenSink::Memory(Vec::new())),
    }
}
