//! Error types for decoding and scanning world data.
//!
//! This module contains the [`Error`] type which represents every failure that
//! can occur while reading NBT documents, reading region cells, or running a
//! scan.
//!
//! Only a few variants are fatal to a scan ([`Error::NoCriteria`] and
//! [`Error::Csv`]). The rest describe a single file or cell, and the
//! orchestrator logs them and moves on.
//!
//! # Example
//!
//! ```
//! use nbt_finder::{Error, read_document_be};
//!
//! match read_document_be(&[0x0a, 0x00]) {
//!     Err(Error::EndOfFile) => {}
//!     other => panic!("expected EndOfFile, got {other:?}"),
//! }
//! ```

use std::fmt::{self, Display};
use std::io;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when decoding or
/// scanning world data.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred while reading a file or listing a directory.
    IO(io::Error),

    /// The input ended unexpectedly.
    ///
    /// This error occurs when the NBT data is truncated or incomplete, for
    /// example a compound that declares a string but ends before its content.
    EndOfFile,

    /// Extra bytes remain after the root tag of a document.
    TrailingData(usize),

    /// An invalid NBT tag type was encountered.
    ///
    /// NBT defines tag types 0-12. Any other byte where a tag type is expected
    /// yields this error with the offending byte.
    InvalidTagType(u8),

    /// A list element does not have the list's declared element kind.
    TagMismatch(u8, u8),

    /// The document root is an `End` tag.
    InvalidRoot,

    /// Containers nest deeper than the reader allows.
    DepthLimitExceeded,

    /// The region file header is truncated.
    MalformedRegion(usize),

    /// A region cell points outside the file or declares an impossible length.
    SectorOutOfBounds { offset: usize, len: usize },

    /// A gzip or zlib stream could not be inflated.
    Decompress(io::Error),

    /// A region cell uses a compression scheme this reader does not handle.
    UnsupportedCompression(u8),

    /// A scan was requested without a name or value filter.
    NoCriteria,

    /// The CSV report could not be written.
    Csv(csv::Error),
}

impl Error {
    /// Returns `true` when the failure came from the filesystem rather than
    /// from the content of the file.
    pub fn is_io(&self) -> bool {
        match self {
            Error::IO(_) => true,
            Error::Csv(error) => error.is_io_error(),
            _ => false,
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IO(error) => formatter.write_str(&error.to_string()),
            Error::EndOfFile => formatter.write_str("unexpected end of input"),
            Error::TrailingData(remaining_bytes) => formatter.write_str(&format!(
                "trailing data after end of input: {remaining_bytes} bytes remaining"
            )),
            Error::InvalidTagType(tag) => {
                formatter.write_str(&format!("invalid NBT tag type: {tag:#04x}"))
            }
            Error::TagMismatch(expected, actual) => formatter.write_str(&format!(
                "tag in list mismatch: expected {expected:#04x}, got {actual:#04x}"
            )),
            Error::InvalidRoot => formatter.write_str("document root is an end tag"),
            Error::DepthLimitExceeded => formatter.write_str("nesting depth limit exceeded"),
            Error::MalformedRegion(len) => formatter.write_str(&format!(
                "region header truncated: file is {len} bytes"
            )),
            Error::SectorOutOfBounds { offset, len } => formatter.write_str(&format!(
                "cell data out of bounds: offset {offset}, length {len}"
            )),
            Error::Decompress(error) => {
                formatter.write_str(&format!("decompression failed: {error}"))
            }
            Error::UnsupportedCompression(scheme) => formatter.write_str(&format!(
                "unsupported cell compression: {scheme}"
            )),
            Error::NoCriteria => {
                formatter.write_str("no search criteria: provide a tag name and/or value")
            }
            Error::Csv(error) => formatter.write_str(&error.to_string()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(error) | Error::Decompress(error) => Some(error),
            Error::Csv(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::IO(error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error)
    }
}
