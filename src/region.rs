//! Anvil region files (`region/*.mca`, `entities/*.mca`).
//!
//! A region holds up to 32×32 cells. The first 4 KiB sector is a table of
//! big-endian `u32` locations (3-byte sector offset, 1-byte sector count),
//! followed by a 4 KiB timestamp table. Each populated cell starts with a
//! `u32` byte length and a compression byte.

use zerocopy::{BigEndian, byteorder};

use crate::{Compression, Document, Error, Result, cold_path, read::read_document};

/// Cells per region side.
pub const REGION_WIDTH: usize = 32;

pub const SECTOR_SIZE: usize = 4096;

const HEADER_SIZE: usize = SECTOR_SIZE * 2;

/// An Anvil region read fully into memory.
#[derive(Clone, Debug, Default)]
pub struct RegionFile {
    data: Vec<u8>,
}

impl RegionFile {
    /// Wraps the raw bytes of a region file.
    ///
    /// A zero-length file is a region with no cells. Anything else shorter
    /// than the two header tables is malformed.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if !data.is_empty() && data.len() < HEADER_SIZE {
            cold_path();
            return Err(Error::MalformedRegion(data.len()));
        }
        Ok(Self { data })
    }

    /// Location table entry for the cell, as `(sector offset, sector count)`.
    fn location(&self, x: usize, z: usize) -> (usize, usize) {
        if self.data.is_empty() {
            return (0, 0);
        }
        let index = (x % REGION_WIDTH + (z % REGION_WIDTH) * REGION_WIDTH) * 4;
        let mut entry = [0u8; 4];
        entry.copy_from_slice(&self.data[index..index + 4]);
        let entry = byteorder::U32::<BigEndian>::from_bytes(entry).get() as usize;
        (entry >> 8, entry & 0xff)
    }

    /// Decodes one cell. `Ok(None)` means the cell was never generated.
    pub fn read_cell(&self, x: usize, z: usize) -> Result<Option<Document>> {
        let (sector, count) = self.location(x, z);
        if sector == 0 && count == 0 {
            return Ok(None);
        }
        let offset = sector * SECTOR_SIZE;
        let out_of_bounds = Error::SectorOutOfBounds {
            offset,
            len: count * SECTOR_SIZE,
        };
        if sector < 2 || offset + 5 > self.data.len() {
            cold_path();
            return Err(out_of_bounds);
        }

        let mut len = [0u8; 4];
        len.copy_from_slice(&self.data[offset..offset + 4]);
        let len = byteorder::U32::<BigEndian>::from_bytes(len).get() as usize;
        if len == 0 || len + 4 > count * SECTOR_SIZE || offset + 4 + len > self.data.len() {
            cold_path();
            return Err(out_of_bounds);
        }

        let scheme = self.data[offset + 4];
        let payload = &self.data[offset + 5..offset + 4 + len];
        let compression = match scheme {
            1 => Compression::Gzip,
            2 => Compression::Zlib,
            3 => Compression::None,
            // LZ4 (4), custom (127) and external `.mcc` cells (bit 7 set)
            _ => {
                cold_path();
                return Err(Error::UnsupportedCompression(scheme));
            }
        };
        let payload = compression.decompress(payload)?;
        read_document::<BigEndian>(&payload).map(Some)
    }
}
