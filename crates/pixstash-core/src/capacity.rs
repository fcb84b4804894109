use crate::error::{Result, StashError};
use crate::options::Framing;

/// Snapshot of how much a carrier can hold, one payload bit per channel byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub pixel_count: u64,
    pub channel_count: u8,
    /// Number of channel bytes, each carrying one bit.
    pub total_bits: u64,
    /// Largest payload in bytes that fits.
    pub max_bytes: u64,
    /// `max_bytes` minus the framing overhead. Negative if not even an empty
    /// file fits.
    pub usable_bytes: i64,
}

impl Capacity {
    /// Analyzes a carrier of `pixel_count` pixels with `channel_count` channels each.
    pub fn analyze(channel_count: u8, pixel_count: u64, framing: &Framing) -> Result<Self> {
        if !matches!(channel_count, 3 | 4) {
            return Err(StashError::UnsupportedFormat {
                channels: channel_count,
            });
        }

        // Saturates for carriers beyond any real image size.
        let total_bits = pixel_count.saturating_mul(u64::from(channel_count));
        let max_bytes = total_bits / 8;
        let overhead = i64::try_from(framing.overhead()).unwrap_or(i64::MAX);
        let usable_bytes = i64::try_from(max_bytes)
            .unwrap_or(i64::MAX)
            .saturating_sub(overhead);

        Ok(Capacity {
            pixel_count,
            channel_count,
            total_bits,
            max_bytes,
            usable_bytes,
        })
    }

    /// Whether a file of `file_len` bytes with an extension of `extension_len`
    /// bytes fits.
    pub fn fits(&self, file_len: usize, extension_len: usize) -> bool {
        let file_len = i64::try_from(file_len).unwrap_or(i64::MAX);
        let extension_len = i64::try_from(extension_len).unwrap_or(i64::MAX);
        file_len.saturating_add(extension_len) <= self.usable_bytes
    }
}

/// Payload bytes a channel buffer of `buffer_len` bytes can hold.
pub(crate) fn max_payload_bytes(buffer_len: usize) -> usize {
    buffer_len / 8
}
