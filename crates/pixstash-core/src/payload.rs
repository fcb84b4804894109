//! Payload framing: serializes a file and its extension into the byte
//! sequence that gets embedded, and parses it back.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use log::{debug, warn};

use crate::error::{Result, StashError};
use crate::options::{CodecOptions, Delimiter, Framing, MissingDelimiter};

/// Longest extension the 16 bit length field of the delimited framing can
/// describe. Applies to both framings.
pub const MAX_EXTENSION_LEN: usize = u16::MAX as usize;

/// Framed byte sequence ready to be embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(pub(crate) Vec<u8>);

impl Payload {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A file recovered from a carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenFile {
    /// Extension without leading dot, may be empty.
    pub extension: String,
    pub data: Vec<u8>,
}

/// Frames `file` and `extension` according to `options.framing`.
///
/// `extension` is taken as is, callers strip a leading dot.
pub fn build(file: &[u8], extension: &str, options: &CodecOptions) -> Result<Payload> {
    if file.len() > options.max_file_size {
        return Err(StashError::FileTooLarge {
            size: file.len(),
            max: options.max_file_size,
        });
    }
    let extension = extension.as_bytes();
    if extension.len() > MAX_EXTENSION_LEN {
        return Err(StashError::ExtensionTooLong {
            length: extension.len(),
        });
    }

    let framing = &options.framing;
    let mut buf = Vec::with_capacity(framing.overhead() + extension.len() + file.len());
    match framing {
        Framing::LengthPrefixed => {
            let data_len = u32::try_from(file.len()).map_err(|_| StashError::FileTooLarge {
                size: file.len(),
                max: u32::MAX as usize,
            })?;
            buf.write_u32::<BigEndian>(data_len)?;
            buf.write_u32::<BigEndian>(extension.len() as u32)?;
            buf.extend_from_slice(extension);
            buf.extend_from_slice(file);
        }
        Framing::Delimited(delimiter) => {
            buf.write_u16::<BigEndian>(extension.len() as u16)?;
            buf.extend_from_slice(extension);
            buf.extend_from_slice(file);
            buf.extend_from_slice(delimiter.as_bytes());
        }
    }

    debug!(
        "framed {} bytes of file data with extension of {} bytes into a payload of {} bytes",
        file.len(),
        extension.len(),
        buf.len()
    );

    Ok(Payload(buf))
}

/// Parses the bytes recovered from a carrier back into the hidden file.
///
/// `recovered` may be longer than the payload; trailing bytes are ignored.
pub fn parse(recovered: &[u8], options: &CodecOptions) -> Result<HiddenFile> {
    match &options.framing {
        Framing::LengthPrefixed => parse_length_prefixed(recovered),
        Framing::Delimited(delimiter) => {
            parse_delimited(recovered, delimiter, options.missing_delimiter)
        }
    }
}

fn parse_length_prefixed(recovered: &[u8]) -> Result<HiddenFile> {
    const HEADER_LEN: usize = 8;

    ensure_available(recovered, HEADER_LEN)?;
    let data_len = BigEndian::read_u32(&recovered[0..4]) as usize;
    let ext_len = BigEndian::read_u32(&recovered[4..8]) as usize;

    let data_start = HEADER_LEN.saturating_add(ext_len);
    let data_end = data_start.saturating_add(data_len);
    ensure_available(recovered, data_end)?;

    let extension = decode_extension(&recovered[HEADER_LEN..data_start])?;

    Ok(HiddenFile {
        extension,
        data: recovered[data_start..data_end].to_vec(),
    })
}

fn parse_delimited(
    recovered: &[u8],
    delimiter: &Delimiter,
    policy: MissingDelimiter,
) -> Result<HiddenFile> {
    const HEADER_LEN: usize = 2;

    ensure_available(recovered, HEADER_LEN)?;
    let ext_len = BigEndian::read_u16(&recovered[0..2]) as usize;

    let data_start = HEADER_LEN + ext_len;
    ensure_available(recovered, data_start)?;

    let extension = decode_extension(&recovered[HEADER_LEN..data_start])?;

    let remaining = &recovered[data_start..];
    let data = match find(remaining, delimiter.as_bytes()) {
        Some(end) => &remaining[..end],
        None => match policy {
            MissingDelimiter::Fail => return Err(StashError::DelimiterNotFound),
            MissingDelimiter::TakeRemaining => {
                warn!(
                    "no end of file delimiter found, taking all {} remaining bytes as file data",
                    remaining.len()
                );
                remaining
            }
        },
    };

    Ok(HiddenFile {
        extension,
        data: data.to_vec(),
    })
}

fn ensure_available(recovered: &[u8], required: usize) -> Result<()> {
    if recovered.len() < required {
        return Err(StashError::TruncatedData {
            required,
            available: recovered.len(),
        });
    }
    Ok(())
}

fn decode_extension(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(StashError::InvalidExtension)
}

/// Position of the first occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DEFAULT_DELIMITER;

    fn delimited() -> CodecOptions {
        CodecOptions::default().with_framing(Framing::delimited())
    }

    #[test]
    fn should_frame_delimited_payload() {
        let payload = build(b"Hello", "txt", &delimited()).unwrap();

        let mut expected = vec![0x00, 0x03];
        expected.extend_from_slice(b"txt");
        expected.extend_from_slice(b"Hello");
        expected.extend_from_slice(DEFAULT_DELIMITER);
        assert_eq!(payload.as_bytes(), &expected[..]);
        assert_eq!(payload.len(), 21);
    }

    #[test]
    fn should_frame_length_prefixed_payload() {
        let payload = build(b"Hello", "txt", &CodecOptions::default()).unwrap();

        assert_eq!(
            payload.as_bytes(),
            &[0, 0, 0, 5, 0, 0, 0, 3, b't', b'x', b't', b'H', b'e', b'l', b'l', b'o'][..]
        );
    }

    #[test]
    fn should_reject_files_over_the_limit() {
        let options = CodecOptions::default().with_max_file_size(4);

        assert!(build(b"1234", "", &options).is_ok());
        match build(b"12345", "", &options) {
            Err(StashError::FileTooLarge { size, max }) => {
                assert_eq!(size, 5);
                assert_eq!(max, 4);
            }
            other => panic!("expected FileTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn should_reject_too_long_extensions() {
        let longest = "a".repeat(MAX_EXTENSION_LEN);
        assert!(build(b"", &longest, &delimited()).is_ok());

        let too_long = "a".repeat(MAX_EXTENSION_LEN + 1);
        assert!(matches!(
            build(b"", &too_long, &delimited()),
            Err(StashError::ExtensionTooLong { length: 65536 })
        ));
    }

    #[test]
    fn should_parse_with_trailing_garbage() {
        let options = CodecOptions::default();
        let mut recovered = build(b"\x00\xffdata", "bin", &options)
            .unwrap()
            .into_inner();
        recovered.extend_from_slice(&[0xab; 32]);

        let file = parse(&recovered, &options).unwrap();
        assert_eq!(file.extension, "bin");
        assert_eq!(file.data, b"\x00\xffdata");
    }

    #[test]
    fn should_truncate_at_first_delimiter() {
        let mut secret = b"AA".to_vec();
        secret.extend_from_slice(DEFAULT_DELIMITER);
        secret.extend_from_slice(b"BB");

        let recovered = build(&secret, "txt", &delimited()).unwrap().into_inner();
        let file = parse(&recovered, &delimited()).unwrap();

        assert_eq!(file.data, b"AA");
    }

    #[test]
    fn should_fail_on_missing_delimiter_by_default() {
        let recovered = [0x00, 0x01, b'x', b'a', b'b', b'c'];

        assert!(matches!(
            parse(&recovered, &delimited()),
            Err(StashError::DelimiterNotFound)
        ));
    }

    #[test]
    fn should_take_remaining_bytes_when_asked_to() {
        let recovered = [0x00, 0x01, b'x', b'a', b'b', b'c'];
        let options = delimited().with_missing_delimiter(MissingDelimiter::TakeRemaining);

        let file = parse(&recovered, &options).unwrap();
        assert_eq!(file.extension, "x");
        assert_eq!(file.data, b"abc");
    }

    #[test]
    fn should_report_truncated_header() {
        assert!(matches!(
            parse(&[0x00], &delimited()),
            Err(StashError::TruncatedData {
                required: 2,
                available: 1
            })
        ));
        assert!(matches!(
            parse(&[0, 0, 0, 0, 0], &CodecOptions::default()),
            Err(StashError::TruncatedData {
                required: 8,
                available: 5
            })
        ));
    }

    #[test]
    fn should_report_extension_longer_than_data() {
        let recovered = [0x00, 0x10, b'a', b'b'];

        assert!(matches!(
            parse(&recovered, &delimited()),
            Err(StashError::TruncatedData {
                required: 18,
                available: 4
            })
        ));
    }

    #[test]
    fn should_report_data_length_beyond_recovered_bytes() {
        let recovered = [0, 0, 0xff, 0xff, 0, 0, 0, 0, 1, 2, 3];

        assert!(matches!(
            parse(&recovered, &CodecOptions::default()),
            Err(StashError::TruncatedData {
                required: 65_543,
                available: 11
            })
        ));
    }

    #[test]
    fn should_reject_non_utf8_extensions() {
        let mut recovered = vec![0x00, 0x02, 0xc3, 0x28];
        recovered.extend_from_slice(DEFAULT_DELIMITER);

        assert!(matches!(
            parse(&recovered, &delimited()),
            Err(StashError::InvalidExtension(_))
        ));
    }

    #[test]
    fn should_keep_multibyte_extensions() {
        let options = delimited();
        let recovered = build(b"\x01\x02", "tär.gz", &options).unwrap().into_inner();

        let file = parse(&recovered, &options).unwrap();
        assert_eq!(file.extension, "tär.gz");
        assert_eq!(file.data, b"\x01\x02");
    }
}
