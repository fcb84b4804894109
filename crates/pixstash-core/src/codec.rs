//! LSB codec - embeds payload bits into channel bytes and recovers them.
//!
//! A channel buffer is the flat sequence of every color channel of every
//! pixel in raster order (`R, G, B[, A], R, G, ...`). Each channel byte
//! carries exactly one payload bit in its least significant bit, so a buffer
//! of `n` bytes holds `n / 8` payload bytes.

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use log::debug;

use crate::bit_iterator::BitIterator;
use crate::capacity::{max_payload_bytes, Capacity};
use crate::error::{Result, StashError};
use crate::options::CodecOptions;
use crate::payload::{self, HiddenFile, Payload};
use crate::progress::{NoProgress, ProgressObserver, ProgressTracker};

/// Hides framed files in channel buffers and unveils them again.
#[derive(Debug, Clone, Default)]
pub struct LsbCodec {
    options: CodecOptions,
}

impl LsbCodec {
    pub fn new(options: CodecOptions) -> Self {
        LsbCodec { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Capacity of a carrier, with the overhead of the configured framing.
    pub fn analyze(&self, channel_count: u8, pixel_count: u64) -> Result<Capacity> {
        Capacity::analyze(channel_count, pixel_count, &self.options.framing)
    }

    /// Frames a file and its extension (without leading dot).
    pub fn build_payload(&self, file: &[u8], extension: &str) -> Result<Payload> {
        payload::build(file, extension, &self.options)
    }

    /// Embeds `payload` into the least significant bits of `buffer`.
    ///
    /// # Returns
    /// * `Ok(())` - the first `payload.len() * 8` bytes of `buffer` carry the payload
    /// * `Err(StashError::CapacityExceeded)` - `buffer` is left untouched
    pub fn embed(&self, buffer: &mut [u8], payload: &Payload) -> Result<()> {
        self.embed_with_progress(buffer, payload, &mut NoProgress)
    }

    pub fn embed_with_progress(
        &self,
        buffer: &mut [u8],
        payload: &Payload,
        observer: &mut dyn ProgressObserver,
    ) -> Result<()> {
        let available = max_payload_bytes(buffer.len());
        if payload.len() > available {
            return Err(StashError::CapacityExceeded {
                required: payload.len(),
                available,
            });
        }

        let bits = BitIterator::new(payload.as_bytes());
        let mut progress = ProgressTracker::new(observer, bits.len());
        for (i, (channel, bit)) in buffer.iter_mut().zip(bits).enumerate() {
            *channel = (*channel & !1) | bit;
            progress.advance(i + 1);
        }
        progress.finish();

        debug!(
            "embedded {} payload bytes into {} channel bytes",
            payload.len(),
            buffer.len()
        );
        Ok(())
    }

    /// Recovers the hidden file from the least significant bits of `buffer`.
    pub fn extract(&self, buffer: &[u8]) -> Result<HiddenFile> {
        self.extract_with_progress(buffer, &mut NoProgress)
    }

    pub fn extract_with_progress(
        &self,
        buffer: &[u8],
        observer: &mut dyn ProgressObserver,
    ) -> Result<HiddenFile> {
        let recovered = read_lsb_bytes(buffer, observer)?;
        debug!(
            "recovered {} bytes from {} channel bytes",
            recovered.len(),
            buffer.len()
        );

        payload::parse(&recovered, &self.options)
    }
}

/// Collects the least significant bit of every channel byte and regroups
/// them into bytes, most significant bit first. Trailing bits that do not
/// form a whole byte are dropped.
fn read_lsb_bytes(buffer: &[u8], observer: &mut dyn ProgressObserver) -> Result<Vec<u8>> {
    let mut writer = BitWriter::endian(
        Vec::with_capacity(max_payload_bytes(buffer.len())),
        BigEndian,
    );
    let mut progress = ProgressTracker::new(observer, buffer.len());
    for (i, channel) in buffer.iter().enumerate() {
        writer.write_bit(channel & 1 == 1)?;
        progress.advance(i + 1);
    }
    progress.finish();

    // partial bits of an incomplete last byte are discarded here
    Ok(writer.into_writer())
}
