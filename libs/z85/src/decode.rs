use std::io;

use super::alphabet::{PAD_DIGIT, digit};
use super::{Error, GROUP_BYTES, GROUP_CHARS, pad_size};

/// The exact amount of bytes a valid input of `char_len` characters decodes
/// to.
///
/// This can be used to reserve space in a buffer.
///
/// # Examples
///
/// ```
/// assert_eq!(z85::decoded_len(0), 0);
/// assert_eq!(z85::decoded_len(7), 5);
/// ```
#[must_use]
pub const fn decoded_len(char_len: usize) -> usize {
    char_len.div_ceil(GROUP_CHARS) * GROUP_BYTES - pad_size(char_len, GROUP_CHARS)
}

/// Decodes a string holding Z85 data.
///
/// Use [`encode`](crate::encode) to reverse the operation.
///
/// # Errors
///
/// Returns [`Error::InvalidCharacter`] if the input contains a character
/// outside the alphabet, and [`Error::GroupOverflow`] if a group of characters
/// encodes a value larger than [`u32::MAX`].
pub fn decode(input: &str) -> Result<Vec<u8>, Error> {
    let mut result = Vec::with_capacity(decoded_len(input.len()));
    decode_groups(input, |bytes| {
        result.extend_from_slice(bytes);
        Ok(())
    })?;

    Ok(result)
}

/// Decodes a string holding Z85 data, writing the bytes to a buffer.
///
/// # Errors
///
/// Returns [`Err`] if the data is invalid, as with [`decode`], or
/// [`Error::Io`] if `writer` returns [`Err`]. The input is processed one group
/// at a time, so a prefix of the output may have been written in either case.
pub fn decode_to<W: io::Write>(mut writer: W, input: &str) -> Result<(), Error> {
    decode_groups(input, |bytes| Ok(writer.write_all(bytes)?))
}

/// Decodes every group of `input`, passing the bytes to `emit`.
///
/// The last group is padded with [`PAD_DIGIT`] and only the bytes that aren't
/// padding are emitted. A lone trailing character emits nothing.
fn decode_groups(
    input: &str,
    mut emit: impl FnMut(&[u8]) -> Result<(), Error>,
) -> Result<(), Error> {
    let (groups, remainder) = input.as_bytes().as_chunks::<GROUP_CHARS>();
    for (index, group) in groups.iter().enumerate() {
        let offset = index * GROUP_CHARS;
        let digits = group_digits(input, offset, group)?;
        emit(&group_value(digits, offset)?.to_be_bytes())?;
    }

    if !remainder.is_empty() {
        let offset = groups.len() * GROUP_CHARS;
        let digits = group_digits(input, offset, remainder)?;

        let keep = GROUP_BYTES.saturating_sub(pad_size(remainder.len(), GROUP_CHARS));
        if keep != 0 {
            emit(&group_value(digits, offset)?.to_be_bytes()[..keep])?;
        }
    }

    Ok(())
}

/// Looks up the digits of a group. Missing characters are [`PAD_DIGIT`].
fn group_digits(input: &str, offset: usize, chars: &[u8]) -> Result<[u8; GROUP_CHARS], Error> {
    debug_assert!(chars.len() <= GROUP_CHARS, "group too long");

    let mut digits = [PAD_DIGIT; GROUP_CHARS];
    for (index, (d, &c)) in digits.iter_mut().zip(chars).enumerate() {
        *d = digit(c).ok_or_else(|| invalid_char(input, offset + index))?;
    }

    Ok(digits)
}

/// Accumulates the digits of a group, most significant first.
fn group_value(digits: [u8; GROUP_CHARS], offset: usize) -> Result<u32, Error> {
    // 85^5 - 1 needs 33 bits
    let value = digits
        .iter()
        .fold(0u64, |acc, &d| acc * 85 + u64::from(d));

    u32::try_from(value).map_err(|_| Error::GroupOverflow { index: offset })
}

fn invalid_char(input: &str, index: usize) -> Error {
    // the first rejected byte is always at a char boundary: ascii bytes are
    // either digits or rejected, and lead bytes come before continuation bytes
    let char = input
        .get(index..)
        .and_then(|s| s.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER);

    Error::InvalidCharacter { char, index }
}
