use crate::constants::{CONTINUATION_BIT, MAX_VARINT_LEN64, VARINT_GROUP_BITS};

/// Write the minimal varint encoding of `value` into `buf`.
///
/// Returns the number of bytes used (1..=10).
#[inline]
pub fn put_uvarint(buf: &mut [u8; MAX_VARINT_LEN64], mut value: u64) -> usize {
    let mut i = 0;
    while value >= u64::from(CONTINUATION_BIT) {
        buf[i] = (value as u8) | CONTINUATION_BIT;
        value >>= VARINT_GROUP_BITS;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

/// Minimal varint encoding of `value`.
pub fn encode_uvarint(value: u64) -> Vec<u8> {
    let mut buf = [0u8; MAX_VARINT_LEN64];
    let n = put_uvarint(&mut buf, value);
    buf[..n].to_vec()
}

/// Encoded size of `value` without encoding it.
#[inline]
pub fn uvarint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(VARINT_GROUP_BITS as usize)
}

/// Append one frame (`varint(len) || payload`) to `out`.
///
/// Returns the frame length.
pub fn encode_frame_into(payload: &[u8], out: &mut Vec<u8>) -> usize {
    let mut prefix = [0u8; MAX_VARINT_LEN64];
    let n = put_uvarint(&mut prefix, payload.len() as u64);

    out.reserve(n + payload.len());
    out.extend_from_slice(&prefix[..n]);
    out.extend_from_slice(payload);

    n + payload.len()
}

/// Encode a payload into canonical wire format.
///
/// Layout:
///
/// ```text
/// [ varint length (1..10) ]
/// [ payload (length) ]
/// ```
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(uvarint_len(payload.len() as u64) + payload.len());
    encode_frame_into(payload, &mut out);
    out
}
