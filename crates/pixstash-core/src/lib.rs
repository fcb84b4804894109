//! # pixstash core
//!
//! Hides a whole file, together with its file extension, in the least
//! significant bits of the color channels of an image, and unveils it again.
//!
//! The heart of the crate is [`LsbCodec`], which works on a flat channel
//! buffer (every color channel of every pixel in raster order) and never
//! touches the file system. [`ChannelImage`] turns image files into such
//! buffers, and [`commands`] composes both into file level operations.
//!
//! # Example
//!
//! ```
//! use pixstash_core::{CodecOptions, LsbCodec};
//!
//! let codec = LsbCodec::new(CodecOptions::default());
//! let mut channels = vec![0x80_u8; 3 * 300];
//!
//! let payload = codec.build_payload(b"Hello World", "txt")?;
//! codec.embed(&mut channels, &payload)?;
//!
//! let unveiled = codec.extract(&channels)?;
//! assert_eq!(unveiled.extension, "txt");
//! assert_eq!(unveiled.data, b"Hello World");
//! # Ok::<(), pixstash_core::StashError>(())
//! ```

pub mod bit_iterator;
pub mod capacity;
pub mod codec;
pub mod commands;
pub mod error;
pub mod media;
pub mod options;
pub mod payload;
pub mod progress;

pub use bit_iterator::BitIterator;
pub use capacity::Capacity;
pub use codec::LsbCodec;
pub use error::{Result, StashError};
pub use media::ChannelImage;
pub use options::{
    CodecOptions, Delimiter, Framing, MissingDelimiter, DEFAULT_DELIMITER, DEFAULT_MAX_FILE_SIZE,
};
pub use payload::{HiddenFile, Payload, MAX_EXTENSION_LEN};
pub use progress::{NoProgress, ProgressObserver, PROGRESS_STEP};
