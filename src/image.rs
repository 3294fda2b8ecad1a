//! Conversion between word vectors and the binary program image format.
//!
//! An image is the raw little-endian dump of the program's words,
//! starting at machine address 0. Reading and writing image files is
//! left to the host; this module only converts between the two
//! representations.

use std::error::Error as StdError;
use std::fmt;

use byteorder::ByteOrder;

use crate::{Endian, Word};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImageError {
    /// The byte image cannot be split into 16-bit words.
    OddLength(usize),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ImageError::OddLength(length) => {
                write!(f, "Image length {} is not a multiple of 2.", length)
            }
        }
    }
}

impl StdError for ImageError {}

/// Dumps `words` as little-endian bytes.
pub fn to_bytes(words: &[Word]) -> Vec<u8> {
    let mut bytes = vec![0; words.len() * 2];
    Endian::write_u16_into(words, &mut bytes[..]);
    bytes
}

/// Reassembles a word vector from a little-endian byte image.
///
/// # Errors
/// Returns [`ImageError::OddLength`](enum.ImageError.html) if `bytes`
/// does not divide into whole words.
pub fn from_bytes(bytes: &[u8]) -> Result<Vec<Word>, ImageError> {
    if bytes.len() % 2 != 0 {
        return Err(ImageError::OddLength(bytes.len()));
    }

    let mut words = vec![0; bytes.len() / 2];
    Endian::read_u16_into(bytes, &mut words[..]);
    Ok(words)
}
