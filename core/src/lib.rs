//! recordio
//!
//! A minimal framing layer for a sequential stream of binary records.
//! Every record is stored as an unsigned varint holding the payload length,
//! followed by the payload bytes. No header, checksum or index.
//!
//! ```text
//! Stream  := Frame*
//! Frame   := Varint(Length) Bytes[Length]
//! ```
//!
//! Writing, then scanning:
//!
//! ```rust
//! use recordio::{Scanner, Writer};
//!
//! let mut w = Writer::new(Vec::new());
//! w.write(b"this is a record").unwrap();
//! w.write(b"this is a second record").unwrap();
//!
//! let wire = w.into_inner();
//! let mut scanner = Scanner::new(wire.as_slice());
//! while scanner.advance() {
//!     println!("{:?}", scanner.current());
//! }
//! assert!(scanner.last_error().is_none());
//! ```

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;

// Wire format
pub mod framing;
pub mod io;

// Stream layers
pub mod writer;
pub mod reader;
pub mod scanner;
pub mod stream;

pub mod telemetry;

pub use config::ReaderOptions;
pub use reader::{Reader, Records};
pub use scanner::Scanner;
pub use types::{RecordError, RecordResult};
pub use writer::Writer;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::ReaderOptions;
    pub use crate::io::{ByteSource, InputSource, OutputSink, ReadByte};
    pub use crate::reader::Reader;
    pub use crate::scanner::Scanner;
    pub use crate::stream::{read_stream, write_stream};
    pub use crate::types::{RecordError, RecordResult};
    pub use crate::writer::Writer;
}
