//! Encodes binary data as Z85 text and decodes it back.
//!
//! Z85 is the base-85 encoding defined by ZeroMQ RFC 32. Every 4 bytes of
//! input are read as one big-endian [`u32`] and written as 5 characters from a
//! fixed [alphabet](ALPHABET) of printable ASCII characters, most significant
//! digit first.
//!
//! Unlike the RFC, inputs do not need to be a multiple of 4 bytes long:
//!
//! - When encoding, the last group is padded with zero-bytes and, for every
//!   padding byte, one character is cut from the end of the output.
//! - When decoding, the last group is padded with the highest digit (`#`, 84)
//!   and, for every padding character, one byte is cut from the end of the
//!   output.
//!
//! This means `n` bytes always encode to `5 * ceil(n / 4) - pad` characters,
//! where `pad` is `(4 - n % 4) % 4`. See [`encoded_len`] and [`decoded_len`].
//!
//! Each direction has a pair of functions: [`encode`] and [`decode`] allocate
//! and return the result, [`encode_to`] and [`decode_to`] write to a buffer.
//!
//! # Examples
//!
//! ```
//! let text = z85::encode(b"Hello, World!")?;
//! assert_eq!(text, "nm=QNz.92jz/PV8aP");
//!
//! let bytes = z85::decode(&text)?;
//! assert_eq!(bytes, b"Hello, World!");
//! # Ok::<(), z85::Error>(())
//! ```

// for benchmarks and doc-comparisons
#[cfg(test)]
use {base64 as _, criterion as _, smallvec as _};

mod alphabet;
mod decode;
mod encode;
#[cfg(test)]
mod tests;

pub use alphabet::ALPHABET;
pub use decode::{decode, decode_to, decoded_len};
pub use encode::{encode, encode_to, encoded_len};

/// Byte count of a full group.
const GROUP_BYTES: usize = 4;

/// Amount of characters a full group is encoded as.
const GROUP_CHARS: usize = 5;

/// Error encoding or decoding Z85 data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A character of the input is not part of the alphabet.
    ///
    /// `index` is the byte offset of the character in the input.
    #[error("invalid character {char:?} at index {index}")]
    InvalidCharacter { char: char, index: usize },
    /// The encoded output would be larger than the largest possible
    /// allocation.
    #[error("input of {len} bytes is too large to encode")]
    InputTooLarge { len: usize },
    /// A group of characters encodes a value that doesn't fit into 4 bytes.
    ///
    /// `index` is the byte offset of the group in the input.
    #[error("character group at index {index} exceeds 32 bits")]
    GroupOverflow { index: usize },
    /// The written buffer returned an error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The written formatter returned an error.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

/// Amount of padding needed to fill the last group of `len` items.
const fn pad_size(len: usize, group: usize) -> usize {
    (group - len % group) % group
}
