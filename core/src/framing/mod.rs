//! Wire framing for record streams.
//!
//! Responsibilities:
//! - Encode/decode the unsigned varint length prefix
//! - Encode frames into the canonical byte layout
//! - Decode frames held in memory with strict validation
//!
//! Non-responsibilities:
//! - Buffer reuse across reads (see `reader`)
//! - Iteration state (see `scanner`)

pub mod types;
pub mod encode;
pub mod decode;

pub use types::FrameView;
pub use encode::{encode_frame, encode_frame_into, encode_uvarint, put_uvarint, uvarint_len};
pub use decode::{decode_frame, decode_uvarint, frames, read_uvarint, Frames};
