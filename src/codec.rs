//! The decoding seam between the scanner and the file formats.
//!
//! The scanner only talks to [`Codec`]. [`AnvilCodec`] reads real world files,
//! and tests substitute an in-memory implementation.

use std::{fs, path::Path};

use zerocopy::BigEndian;

use crate::{Document, Result, read::read_compressed, region::RegionFile};

/// A 32×32 grid of independently decoded cells.
pub trait Region {
    /// `Ok(None)` is an absent cell; `Err` is a present but unreadable one.
    fn read_cell(&self, x: usize, z: usize) -> Result<Option<Document>>;
}

impl Region for RegionFile {
    #[inline]
    fn read_cell(&self, x: usize, z: usize) -> Result<Option<Document>> {
        RegionFile::read_cell(self, x, z)
    }
}

/// Turns files on disk into decoded documents.
///
/// An `Err` from either method is a file-level failure: the caller skips the
/// whole file.
pub trait Codec {
    type Region: Region;

    /// Decodes a single-structure file such as `playerdata/<uuid>.dat`.
    fn decode_file(&self, path: &Path) -> Result<Document>;

    /// Opens a region or entity file for cell-by-cell decoding.
    fn open_region(&self, path: &Path) -> Result<Self::Region>;
}

/// Java Edition codec: big-endian NBT, gzip/zlib/raw files, Anvil regions.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnvilCodec;

impl Codec for AnvilCodec {
    type Region = RegionFile;

    fn decode_file(&self, path: &Path) -> Result<Document> {
        let data = fs::read(path)?;
        read_compressed::<BigEndian>(&data)
    }

    fn open_region(&self, path: &Path) -> Result<RegionFile> {
        RegionFile::from_bytes(fs::read(path)?)
    }
}
