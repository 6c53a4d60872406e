#![allow(unused_crate_dependencies)]

/// Known byte sequences and their Z85 text.
fn vectors() -> Vec<(Vec<u8>, &'static str)> {
    let text = |s: &str| s.as_bytes().to_vec();
    vec![
        (text("Hello"), "nm=QNzV"),
        (text("Hell"), "nm=QN"),
        (text("Hel"), "nm=P"),
        (text("He"), "nm."),
        (text("H"), "nb"),
        (text(""), ""),
        (text("Hello, World!"), "nm=QNz.92jz/PV8aP"),
        (
            text("The quick brown 🦊 jumps over 13 lazy 🐶."),
            "ra]?=ADL#9yAN8bz*c7w[sMOnazM4oAc0duC4CXpf/6}*vs0hw[sL/Je=",
        ),
        (
            vec![0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B],
            "HelloWorld",
        ),
    ]
}

#[test]
fn encodes_vectors() {
    for (bytes, text) in vectors() {
        assert_eq!(
            z85::encode(&bytes).expect("encoding must succeed"),
            text,
            "encoding {bytes:x?}"
        );
    }
}

#[test]
fn decodes_vectors() {
    for (bytes, text) in vectors() {
        assert_eq!(
            z85::decode(text).expect("decoding failed"),
            bytes,
            "decoding {text:?}"
        );
    }
}

#[test]
fn empty_round_trip() {
    assert_eq!(z85::encode(&[]).expect("empty input"), "");
    assert!(z85::decode("").expect("empty input").is_empty(), "no bytes");
}

#[test]
fn rejects_out_of_alphabet() {
    for input in ["nm=QN zV", "nm,QN", "\0", "nm=QN~", "nm=QNz\u{A7}"] {
        let err = z85::decode(input).expect_err("input is outside the alphabet");
        assert!(
            matches!(err, z85::Error::InvalidCharacter { .. }),
            "{input:?} gave {err:?}"
        );
    }
}

#[test]
fn alphabet_round_trips() {
    // the alphabet itself is 85 chars: 17 full groups
    let text = std::str::from_utf8(z85::ALPHABET).expect("alphabet is ascii");
    let bytes = z85::decode(text).expect("alphabet is valid");

    assert_eq!(bytes.len(), 68);
    assert_eq!(z85::encode(&bytes).expect("encoding must succeed"), text);
}
