//! Codec configuration.
//!
//! Everything that shapes the payload layout is passed explicitly through
//! [`CodecOptions`], so embedding and extracting with the same options always
//! agree on the wire format.

use crate::error::{Result, StashError};

/// Default ceiling for the size of a secret file (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Default end of file marker of the delimited framing.
pub const DEFAULT_DELIMITER: &[u8] = b"END_OF_FILE";

/// Non-empty end of file marker used by [`Framing::Delimited`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiter(Vec<u8>);

impl Delimiter {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(StashError::EmptyDelimiter);
        }
        Ok(Delimiter(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter(DEFAULT_DELIMITER.to_vec())
    }
}

/// How the file boundaries are encoded inside the payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Framing {
    /// `data_length: u32 BE | ext_length: u32 BE | extension | file_data`
    ///
    /// Both lengths are known up front, so extraction never scans and file
    /// data may contain any byte sequence.
    #[default]
    LengthPrefixed,

    /// `ext_length: u16 BE | extension | file_data | delimiter`
    ///
    /// Extraction stops at the *first* occurrence of the delimiter after the
    /// extension. File data that contains the delimiter is truncated there.
    Delimited(Delimiter),
}

impl Framing {
    /// Delimited framing with the default `END_OF_FILE` marker.
    pub fn delimited() -> Self {
        Framing::Delimited(Delimiter::default())
    }

    /// Number of payload bytes that are not file data or extension.
    pub fn overhead(&self) -> usize {
        match self {
            Framing::LengthPrefixed => 8,
            Framing::Delimited(delimiter) => 2 + delimiter.len(),
        }
    }
}

/// What extraction does when the delimited framing finds no delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingDelimiter {
    /// Fail with [`StashError::DelimiterNotFound`].
    #[default]
    Fail,
    /// Treat every remaining byte as file data and log a warning.
    TakeRemaining,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    pub framing: Framing,
    pub max_file_size: usize,
    pub missing_delimiter: MissingDelimiter,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            framing: Framing::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            missing_delimiter: MissingDelimiter::default(),
        }
    }
}

impl CodecOptions {
    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_missing_delimiter(mut self, policy: MissingDelimiter) -> Self {
        self.missing_delimiter = policy;
        self
    }
}
