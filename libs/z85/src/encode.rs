use std::convert::Infallible;
use std::fmt;

use super::alphabet::char_of;
use super::{Error, GROUP_BYTES, GROUP_CHARS, pad_size};

/// The exact amount of characters `byte_len` bytes encode to.
///
/// Returns [`None`] if that amount exceeds [`isize::MAX`], which is the
/// upper bound for any allocation.
///
/// # Examples
///
/// ```
/// assert_eq!(z85::encoded_len(0), Some(0));
/// assert_eq!(z85::encoded_len(5), Some(7));
/// assert_eq!(z85::encoded_len(usize::MAX), None);
/// ```
#[must_use]
pub const fn encoded_len(byte_len: usize) -> Option<usize> {
    let Some(full) = byte_len.div_ceil(GROUP_BYTES).checked_mul(GROUP_CHARS) else {
        return None;
    };

    let len = full - pad_size(byte_len, GROUP_BYTES);
    if len <= isize::MAX.unsigned_abs() {
        Some(len)
    } else {
        None
    }
}

/// Encodes bytes as Z85, returning a [`String`] with the result.
///
/// The exact output length is computed up front, so this allocates exactly
/// once.
///
/// Use [`decode`](crate::decode) to reverse the operation.
///
/// # Errors
///
/// Returns [`Error::InputTooLarge`] if the result would exceed the maximum
/// allocation size. No other errors are returned.
pub fn encode(bytes: &[u8]) -> Result<String, Error> {
    let len = encoded_len(bytes.len()).ok_or(Error::InputTooLarge { len: bytes.len() })?;
    let mut result = Vec::with_capacity(len);

    let Ok(()) = encode_groups(bytes, |chars| {
        result.extend_from_slice(chars);
        Ok::<_, Infallible>(())
    });

    debug_assert_eq!(result.len(), len, "encoded_len must be exact");

    // SAFETY: every byte written is taken from `ALPHABET`, which is ASCII.
    Ok(unsafe { String::from_utf8_unchecked(result) })
}

/// Encodes bytes as Z85, writing the characters to a buffer.
///
/// Use [`decode_to`](crate::decode_to) to reverse the operation.
///
/// # Errors
///
/// Returns [`Error::InputTooLarge`] under the same conditions as [`encode`],
/// before anything is written. Returns [`Error::Fmt`] if `writer` returns
/// [`Err`]; in that case, a prefix of the output may have been written.
pub fn encode_to<W: fmt::Write>(mut writer: W, bytes: &[u8]) -> Result<(), Error> {
    if encoded_len(bytes.len()).is_none() {
        return Err(Error::InputTooLarge { len: bytes.len() });
    }

    encode_groups(bytes, |chars| writer.write_str(ascii_str(chars)))?;
    Ok(())
}

/// Encodes every group of `bytes`, passing the characters to `emit`.
///
/// The last group is zero-padded and only the characters that aren't padding
/// are emitted.
fn encode_groups<E>(
    bytes: &[u8],
    mut emit: impl FnMut(&[u8]) -> Result<(), E>,
) -> Result<(), E> {
    let (groups, remainder) = bytes.as_chunks::<GROUP_BYTES>();
    for &group in groups {
        emit(&encode_group(group))?;
    }

    if !remainder.is_empty() {
        let mut group = [0u8; GROUP_BYTES];
        group[..remainder.len()].copy_from_slice(remainder);

        let keep = GROUP_CHARS - pad_size(remainder.len(), GROUP_BYTES);
        emit(&encode_group(group)[..keep])?;
    }

    Ok(())
}

/// Encodes one big-endian group as its 5 digits, most significant first.
fn encode_group(group: [u8; GROUP_BYTES]) -> [u8; GROUP_CHARS] {
    let mut value = u32::from_be_bytes(group);
    let mut chars = [0u8; GROUP_CHARS];
    for c in chars.iter_mut().rev() {
        *c = char_of(value % 85);
        value /= 85;
    }

    chars
}

fn ascii_str(chars: &[u8]) -> &str {
    debug_assert!(chars.is_ascii(), "encoded chars must be ascii");

    // SAFETY: only called with bytes taken from `ALPHABET`.
    unsafe { std::str::from_utf8_unchecked(chars) }
}
