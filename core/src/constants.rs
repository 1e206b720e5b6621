/// Maximum encoded length of a 64-bit unsigned varint.
pub const MAX_VARINT_LEN64: usize = 10;

/// High bit of a varint byte: set when more bytes follow.
pub const CONTINUATION_BIT: u8 = 0x80;

/// Low seven bits of a varint byte carry the value.
pub const VALUE_MASK: u8 = 0x7f;

/// Bits of value carried per varint byte.
pub const VARINT_GROUP_BITS: u32 = 7;

/// Default capacity of the buffered adapter wrapped around bulk-only sources.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// Defaults when `Option<T>` is None
pub const DEFAULT_MAX_RECORD_SIZE: Option<usize> = None;
pub const DEFAULT_INITIAL_BUFFER_CAPACITY: usize = 0;
