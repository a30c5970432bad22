// SPDX-License-Identifier: MIT
//
// Error type for the few fallible edges of the crate.
//
// The emission path itself cannot fail: everything is appended to an
// in-memory buffer. Errors only appear when decoding a stored color word,
// when parsing a color mode from configuration, or when the sink rejects
// a flush.

use std::io;

use thiserror::Error;

/// Errors produced by `ansi-display`.
#[derive(Debug, Error)]
pub enum Error {
    /// The high byte of an encoded color word is not a known variant tag.
    #[error("invalid color tag {0:#04x}")]
    InvalidColorTag(u8),

    /// A color mode name that none of the known spellings match.
    #[error("unknown color mode: {0:?}")]
    UnknownColorMode(String),

    /// The output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias for `ansi-display` operations.
pub type Result<T> = std::result::Result<T, Error>;
