//! The digit tables shared by the encoder and decoder.

/// The Z85 alphabet. The character at index `i` represents the digit `i`.
pub const ALPHABET: &[u8; 85] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

/// The digit value used for characters missing from the last group.
///
/// This is the highest digit, so that the value of the padded group is at
/// least the value of the bytes it encodes.
pub const PAD_DIGIT: u8 = 84;

/// The lowest byte value present in [`DECODE`].
const OFFSET: u8 = 0x20;

/// Marks [`DECODE`] slots that aren't alphabet characters.
const INVALID: u8 = 0xFF;

/// Maps `byte - OFFSET` to its digit value for every printable ASCII byte.
static DECODE: [u8; 0x60] = build_decode_table();

#[expect(clippy::cast_possible_truncation)]
const fn build_decode_table() -> [u8; 0x60] {
    let mut table = [INVALID; 0x60];
    let mut digit = 0;
    while digit < ALPHABET.len() {
        table[(ALPHABET[digit] - OFFSET) as usize] = digit as u8;
        digit += 1;
    }

    table
}

/// Encodes a digit as its character.
#[inline]
pub fn char_of(digit: u32) -> u8 {
    debug_assert!(digit < 85, "digit out of range");
    ALPHABET[digit as usize]
}

/// Decodes a character byte to its digit value.
///
/// Returns [`None`] if the byte isn't part of the alphabet.
#[inline]
pub fn digit(byte: u8) -> Option<u8> {
    let index = usize::from(byte.checked_sub(OFFSET)?);
    match DECODE.get(index) {
        Some(&INVALID) | None => None,
        Some(&digit) => Some(digit),
    }
}
