/// Borrowed view of one frame decoded from memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    /// Bytes taken by the varint length prefix.
    pub prefix_len: usize,
    pub payload: &'a [u8],
}

impl<'a> FrameView<'a> {
    /// Total wire length of the frame (prefix + payload).
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.prefix_len + self.payload.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
