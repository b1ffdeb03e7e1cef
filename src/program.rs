// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Loading Intcode programs
//!
//! The usual format is the one Advent of Code hands out: one line of comma-separated decimal
//! integers. Programs can also be stored as raw 64-bit words with [`from_bytes`].

use std::error::Error;
use std::fmt::{self, Display};
use std::num::ParseIntError;

/// A program failed to load
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseProgramError {
    /// The comma-separated field at `index` (0-indexed) wasn't a valid integer
    InvalidInt {
        /// position of the field within the line
        index: usize,
        /// the text of the field, trimmed
        text: String,
        /// why it failed to parse
        source: ParseIntError,
    },
    /// A binary program's length wasn't a multiple of 8. Contains the leftover bytes.
    IncompleteWord(Box<[u8]>),
}

impl Display for ParseProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInt {
                index,
                text,
                source,
            } => write!(f, "field {index} ({text:?}) is not a valid integer: {source}"),
            Self::IncompleteWord(rest) => {
                write!(f, "expected 8 bytes, got {}: {:02x?}", rest.len(), rest)
            }
        }
    }
}

impl Error for ParseProgramError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInt { source, .. } => Some(source),
            Self::IncompleteWord(_) => None,
        }
    }
}

/// Byte order of a binary program
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Endianness {
    /// least significant byte first
    Little,
    /// most significant byte first
    Big,
}

/// Parse a comma-separated program
///
/// Whitespace around each field, including a trailing newline, is ignored. An empty (or
/// all-whitespace) string is an empty program.
///
/// # Example
///
/// ```
/// use intcode::program::parse_program;
/// assert_eq!(parse_program("1,0,0,0,99\n").unwrap(), vec![1, 0, 0, 0, 99]);
/// assert!(parse_program("1,,99").is_err());
/// ```
///
/// # Errors
///
/// If any field is not a valid [`i64`], returns [`ParseProgramError::InvalidInt`] for the first
/// one.
pub fn parse_program(text: &str) -> Result<Vec<i64>, ParseProgramError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, field)| {
            field
                .parse()
                .map_err(|source| ParseProgramError::InvalidInt {
                    index,
                    text: field.to_owned(),
                    source,
                })
        })
        .collect()
}

/// Decode a binary program made up of 8-byte words
///
/// # Errors
///
/// If the length of `bytes` isn't a multiple of 8, returns
/// [`ParseProgramError::IncompleteWord`] with the leftover bytes.
pub fn from_bytes(bytes: &[u8], order: Endianness) -> Result<Vec<i64>, ParseProgramError> {
    let (words, remainder) = bytes.as_chunks::<8>();
    if !remainder.is_empty() {
        return Err(ParseProgramError::IncompleteWord(Box::from(remainder)));
    }
    let decode: fn([u8; 8]) -> i64 = match order {
        Endianness::Little => i64::from_le_bytes,
        Endianness::Big => i64::from_be_bytes,
    };
    Ok(words.iter().map(|w| decode(*w)).collect())
}
