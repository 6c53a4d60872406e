use std::fmt;

use super::*;

const CASES: &[(&[u8], &str)] = &[
    (b"Hello", "nm=QNzV"),
    (b"Hell", "nm=QN"),
    (b"Hel", "nm=P"),
    (b"He", "nm."),
    (b"H", "nb"),
    (b"", ""),
    (b"Hello, World!", "nm=QNz.92jz/PV8aP"),
    (&[0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B], "HelloWorld"),
    (&[0x00; 4], "00000"),
    (&[0xFF; 4], "%nSc0"),
    (&[0xFF; 3], "%nS9"),
    (&[0xFF], "@@"),
];

#[test]
fn encode_cases() {
    for &(bytes, text) in CASES {
        let encoded = encode(bytes).expect("encoding must succeed");
        assert_eq!(encoded, text, "wrong encoding for {bytes:x?}");
    }
}

#[test]
fn decode_cases() {
    for &(bytes, text) in CASES {
        let decoded = decode(text).expect("decoding failed");
        assert_eq!(decoded.as_slice(), bytes, "wrong decoding for {text:?}");
    }
}

#[test]
fn round_trip_all_bytes() {
    let data: Vec<u8> = (0..=u8::MAX).collect();

    // every alignment of the tail group
    for skip in 0..GROUP_BYTES {
        round_trip_core(&data[skip..], encode, decode);
    }
}

#[test]
fn round_trip_every_length() {
    let data: Vec<u8> = (0..600u32)
        .map(|i| i.wrapping_mul(0x9E37_79B9).to_be_bytes()[0])
        .collect();

    for len in 0..data.len() {
        round_trip_core(&data[..len], encode, decode);
    }
}

#[test]
fn round_trip_tail_extremes() {
    // the padded tail group decodes to its highest possible value
    for len in 1..=8 {
        round_trip_core(&vec![0xFF; len], encode, decode);
        round_trip_core(&vec![0x00; len], encode, decode);
    }
}

#[test]
fn encoded_len_matches() {
    for len in 0..64 {
        let data = vec![0xA5; len];
        let encoded = encode(&data).expect("encoding must succeed");
        let pad = (4 - len % 4) % 4;

        assert_eq!(encoded.len(), 5 * len.div_ceil(4) - pad, "length for {len} bytes");
        assert_eq!(encoded_len(len), Some(encoded.len()), "encoded_len({len})");
        assert_eq!(decoded_len(encoded.len()), len, "decoded_len({})", encoded.len());
    }
}

#[test]
fn decoded_len_lone_char() {
    assert_eq!(decoded_len(1), 0);
    assert_eq!(decoded_len(6), 4);
}

#[test]
fn encoded_len_ceiling() {
    assert_eq!(encoded_len(usize::MAX), None);
    assert_eq!(encoded_len(isize::MAX.unsigned_abs()), None);

    // the largest multiple of 4 that still fits
    let max = (isize::MAX.unsigned_abs() / 5) * 4;
    assert!(encoded_len(max).is_some(), "{max} bytes must fit");
}

#[test]
fn encode_is_repeatable() {
    let data = b"The same input, twice.";
    let first = encode(data).expect("encoding must succeed");
    let second = encode(data).expect("encoding must succeed");
    assert_eq!(first, second);

    let first = decode(&first).expect("decoding failed");
    let second = decode(&second).expect("decoding failed");
    assert_eq!(first, second);
}

#[test]
fn encode_to_matches_encode() {
    for &(bytes, text) in CASES {
        let mut out = String::from(">");
        encode_to(&mut out, bytes).expect("write to String cannot fail");

        assert_eq!(out.strip_prefix('>'), Some(text), "appends after existing content");
    }
}

#[test]
fn encode_to_forwards_fmt_error() {
    struct Fail;

    impl fmt::Write for Fail {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    let err = encode_to(Fail, b"Hello").expect_err("writer fails");
    assert!(matches!(err, Error::Fmt(_)), "unexpected error: {err:?}");

    // nothing is written for empty input
    encode_to(Fail, b"").expect("writer is never called");
}

#[test]
fn decode_to_matches_decode() {
    for &(bytes, text) in CASES {
        let mut out = vec![0x42];
        decode_to(&mut out, text).expect("decoding failed");

        assert_eq!(&out[1..], bytes, "appends after existing content");
    }
}

#[test]
fn decode_to_forwards_io_error() {
    let mut buf = [0u8; 4];
    let err = decode_to(&mut buf[..], "nm=QNzV").expect_err("buffer too small");
    assert!(matches!(err, Error::Io(_)), "unexpected error: {err:?}");

    // the first group still made it
    assert_eq!(&buf, b"Hell");
}

#[test]
fn invalid_char_fails() {
    let cases: &[(&str, char, usize)] = &[
        ("nm=Q ", ' ', 4),
        ("~", '~', 0),
        ("nm=QNz\"", '"', 6),
        ("nm=QN\n", '\n', 5),
        ("nm=QN\u{7F}", '\u{7F}', 5),
        ("nm=QNzV_", '_', 7),
        ("nm\u{E9}QN", '\u{E9}', 2),
        ("nm=QN\u{1F98A}", '\u{1F98A}', 5),
    ];

    for &(input, expected_char, expected_index) in cases {
        match decode(input) {
            Err(Error::InvalidCharacter { char, index }) => {
                assert_eq!(char, expected_char, "wrong char for {input:?}");
                assert_eq!(index, expected_index, "wrong index for {input:?}");
            },
            other => panic!("{input:?} must be rejected, got {other:?}"),
        }
    }
}

#[test]
fn invalid_char_in_lone_tail_fails() {
    decode("nm=QN_").expect_err("lone tail char is still checked");
    assert_eq!(decode("nm=QN0").expect("valid lone tail"), b"Hell");
}

#[test]
fn zero_digit_is_valid() {
    assert_eq!(decode("00000").expect("zero digits are valid"), [0u8; 4]);
    assert_eq!(decode("00").expect("zero digits are valid"), [0u8]);
}

#[test]
fn group_overflow_fails() {
    let err = decode("%nSc0%nSc1").expect_err("85^5 - 1 doesn't fit");
    assert!(
        matches!(err, Error::GroupOverflow { index: 5 }),
        "unexpected error: {err:?}"
    );

    decode("#####").expect_err("all max digits");

    // padding the tail with 84 pushes this past u32::MAX
    decode("%nSc").expect_err("non-canonical tail");
}

#[test]
fn error_messages() {
    let err = decode("ab cd").expect_err("space is invalid");
    assert_eq!(err.to_string(), "invalid character ' ' at index 2");

    let err = decode("#####").expect_err("overflow");
    assert_eq!(err.to_string(), "character group at index 0 exceeds 32 bits");
}

fn round_trip_core<E: fmt::Debug, F: fmt::Debug>(
    bytes: &[u8],
    encode: impl FnOnce(&[u8]) -> Result<String, E>,
    decode: impl FnOnce(&str) -> Result<Vec<u8>, F>,
) {
    let encoded = encode(bytes).expect("encoding failed");
    let back = decode(&encoded).expect("decoding failed");

    assert_eq!(back.as_slice(), bytes);
}
