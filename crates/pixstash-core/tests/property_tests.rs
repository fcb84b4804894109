//! Property-based tests using proptest
//!
//! Checks the codec invariants over random files, extensions and carriers.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use pixstash_core::{CodecOptions, Framing, LsbCodec, StashError};
use proptest::prelude::*;

fn framing() -> impl Strategy<Value = Framing> {
    prop_oneof![Just(Framing::LengthPrefixed), Just(Framing::delimited())]
}

/// A carrier with `pixels` pixels of 3 or 4 channels and arbitrary content.
fn carrier(pixels: std::ops::Range<usize>) -> impl Strategy<Value = Vec<u8>> {
    (prop_oneof![Just(3_usize), Just(4)], pixels).prop_flat_map(|(channels, pixels)| {
        prop::collection::vec(any::<u8>(), channels * pixels)
    })
}

// Property: whatever is hidden comes back unchanged, with length prefixes
proptest! {
    #[test]
    fn prop_length_prefixed_roundtrip(
        data in prop::collection::vec(any::<u8>(), 0..512),
        extension in "\\PC{0,16}",
        mut channels in carrier(2000..2600),
    ) {
        let codec = LsbCodec::new(CodecOptions::default());
        let payload = codec.build_payload(&data, &extension).expect("Payload should build");

        codec.embed(&mut channels, &payload).expect("Carrier should be large enough");
        let unveiled = codec.extract(&channels).expect("Extraction should not fail");

        prop_assert_eq!(unveiled.data, data);
        prop_assert_eq!(unveiled.extension, extension);
    }
}

// Property: the delimited framing round-trips as long as the data does not contain the delimiter
proptest! {
    #[test]
    fn prop_delimited_roundtrip(
        data in prop::collection::vec(0u8..0x41, 0..512),
        extension in "[a-z0-9.äöü]{0,12}",
        mut channels in carrier(2000..2600),
    ) {
        let codec = LsbCodec::new(CodecOptions::default().with_framing(Framing::delimited()));
        let payload = codec.build_payload(&data, &extension).expect("Payload should build");

        codec.embed(&mut channels, &payload).expect("Carrier should be large enough");
        let unveiled = codec.extract(&channels).expect("Extraction should not fail");

        prop_assert_eq!(unveiled.data, data);
        prop_assert_eq!(unveiled.extension, extension);
    }
}

// Property: embedding succeeds exactly when the payload fits into len / 8 bytes
proptest! {
    #[test]
    fn prop_capacity_boundary(
        framing in framing(),
        file_len in 0usize..300,
        buffer_len in 0usize..3000,
    ) {
        let codec = LsbCodec::new(CodecOptions::default().with_framing(framing));
        let payload = codec.build_payload(&vec![0x5a; file_len], "dat").expect("Payload should build");
        let original: Vec<u8> = (0..buffer_len).map(|i| (i % 256) as u8).collect();
        let mut channels = original.clone();

        let result = codec.embed(&mut channels, &payload);

        if payload.len() <= buffer_len / 8 {
            prop_assert!(result.is_ok());
        } else {
            let is_capacity_exceeded = matches!(
                result,
                Err(StashError::CapacityExceeded { required, available })
                    if required == payload.len() && available == buffer_len / 8
            );
            prop_assert!(is_capacity_exceeded);
            prop_assert_eq!(channels, original);
        }
    }
}

// Property: capacity analysis is a pure function of its inputs
proptest! {
    #[test]
    fn prop_analyze_is_deterministic(
        framing in framing(),
        channels in 0u8..8,
        pixels in 0u64..10_000_000,
    ) {
        let codec = LsbCodec::new(CodecOptions::default().with_framing(framing));

        match (codec.analyze(channels, pixels), codec.analyze(channels, pixels)) {
            (Ok(first), Ok(second)) => {
                prop_assert_eq!(first, second);
                prop_assert_eq!(first.max_bytes, pixels * u64::from(channels) / 8);
            }
            (Err(StashError::UnsupportedFormat { .. }), Err(StashError::UnsupportedFormat { .. })) => {
                prop_assert!(channels != 3 && channels != 4);
            }
            _ => prop_assert!(false, "results differ"),
        }
    }
}
