//! Error types for hiding and unveiling files.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pixstash operations.
pub type Result<T> = std::result::Result<T, StashError>;

/// Errors that can occur while hiding or unveiling a file.
#[derive(Error)]
pub enum StashError {
    /// Channel layout other than RGB or RGBA.
    #[error("unsupported format: {channels} channels per pixel (only 3 or 4 are supported)")]
    UnsupportedFormat { channels: u8 },

    /// Secret file exceeds the configured maximum size.
    #[error("file too large: {size} bytes exceeds the maximum of {max} bytes")]
    FileTooLarge { size: usize, max: usize },

    /// Extension does not fit into the 16 bit length field.
    #[error("extension too long: {length} bytes exceeds the maximum of 65535 bytes")]
    ExtensionTooLong { length: usize },

    /// Payload is too large for the carrier.
    #[error("capacity exceeded: payload requires {required} bytes but only {available} available")]
    CapacityExceeded { required: usize, available: usize },

    /// Fewer bytes were recovered than the header announces.
    #[error("truncated data: need {required} bytes but only {available} were recovered")]
    TruncatedData { required: usize, available: usize },

    /// The recovered extension bytes are not valid UTF-8.
    #[error("invalid extension: hidden extension is not valid UTF-8")]
    InvalidExtension(#[source] std::str::Utf8Error),

    /// The end of file delimiter is missing in the recovered data.
    #[error("delimiter not found: no end of file marker after the header")]
    DelimiterNotFound,

    /// Delimited framing was configured with an empty delimiter.
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    /// The recovered extension cannot be used as part of a file name.
    #[error("unsafe extension {0:?}: refusing to use it as a file name")]
    UnsafeExtension(String),

    /// The output container would not preserve channel values bit exact.
    #[error("lossy output format for {0}: use PNG or BMP instead")]
    LossyOutputFormat(PathBuf),

    /// Image decoding or encoding failed.
    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl fmt::Debug for StashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug shows the Display message, so `main` returning an error reads well
        write!(f, "{self}")
    }
}
