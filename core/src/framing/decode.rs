use std::iter::FusedIterator;

use crate::constants::{CONTINUATION_BIT, MAX_VARINT_LEN64, VALUE_MASK, VARINT_GROUP_BITS};
use crate::framing::types::FrameView;
use crate::io::ReadByte;
use crate::types::{RecordError, RecordResult};

/// Decode one unsigned varint from a byte-at-a-time source.
///
/// Returns `Ok(None)` when the source is exhausted before the first byte,
/// which is the clean end of a stream. Otherwise returns the value and the
/// number of bytes consumed.
///
/// Errors:
/// - `UnexpectedEndOfStream` if the source ends after at least one byte
/// - `MalformedVarint` if no terminator arrives within 10 bytes, or the
///   10th byte carries bits beyond 64
pub fn read_uvarint<S: ReadByte + ?Sized>(src: &mut S) -> RecordResult<Option<(u64, usize)>> {
    let mut value = 0u64;
    let mut shift = 0u32;

    for i in 0..MAX_VARINT_LEN64 {
        let byte = match src.read_byte()? {
            Some(b) => b,
            None if i == 0 => return Ok(None),
            None => return Err(RecordError::UnexpectedEndOfStream { consumed: i }),
        };

        if byte < CONTINUATION_BIT {
            if i == MAX_VARINT_LEN64 - 1 && byte > 1 {
                return Err(RecordError::MalformedVarint { consumed: i + 1 });
            }
            return Ok(Some((value | (u64::from(byte) << shift), i + 1)));
        }

        value |= u64::from(byte & VALUE_MASK) << shift;
        shift += VARINT_GROUP_BITS;
    }

    Err(RecordError::MalformedVarint { consumed: MAX_VARINT_LEN64 })
}

/// Decode one unsigned varint from the front of `buf`.
#[inline]
pub fn decode_uvarint(mut buf: &[u8]) -> RecordResult<Option<(u64, usize)>> {
    read_uvarint(&mut buf)
}

/// Decode the frame at the front of `wire` without copying.
///
/// Trailing bytes after the frame are left for the caller
/// (see [`FrameView::frame_len`]).
pub fn decode_frame(wire: &[u8]) -> RecordResult<Option<FrameView<'_>>> {
    let (size, prefix_len) = match decode_uvarint(wire)? {
        Some(v) => v,
        None => return Ok(None),
    };

    let available = (wire.len() - prefix_len) as u64;
    if size > available {
        return Err(RecordError::TruncatedRecord {
            expected: size,
            actual: available,
        });
    }

    // size <= available, which already fits in usize
    let end = prefix_len + size as usize;
    Ok(Some(FrameView {
        prefix_len,
        payload: &wire[prefix_len..end],
    }))
}

/// Zero-copy iterator over the frames of an in-memory stream.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    rest: &'a [u8],
    failed: bool,
}

/// Iterate the frames held in `wire`.
pub fn frames(wire: &[u8]) -> Frames<'_> {
    Frames {
        rest: wire,
        failed: false,
    }
}

impl<'a> Frames<'a> {
    /// Bytes not yet decoded.
    pub fn remaining(&self) -> &'a [u8] {
        self.rest
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = RecordResult<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match decode_frame(self.rest) {
            Ok(Some(frame)) => {
                self.rest = &self.rest[frame.frame_len()..];
                Some(Ok(frame.payload))
            }
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Frames<'_> {}
