#![allow(dead_code)]

use std::{
    collections::HashMap,
    io::{self, Write},
    path::{Path, PathBuf},
};

use flate2::write::{GzEncoder, ZlibEncoder};
use nbt_finder::{Codec, Compound, Document, Error, List, Region, Result, Tag, Value};

// ==================== Value Builders ====================

pub fn compound<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Compound(entries.into_iter().collect::<Compound>())
}

pub fn list(items: Vec<Value>) -> Value {
    Value::List(List::try_from_values(items).unwrap())
}

pub fn empty_list(tag: Tag) -> Value {
    Value::List(List::new(tag))
}

pub fn pos(x: f64, y: f64, z: f64) -> Value {
    list(vec![x.into(), y.into(), z.into()])
}

/// A 1.18+ chunk with one chest at (10, 64, -5) holding a diamond.
pub fn chest_chunk() -> Document {
    Document::new(
        "",
        compound([
            ("DataVersion", 3465i32.into()),
            ("xPos", 0i32.into()),
            ("zPos", 0i32.into()),
            ("Status", "minecraft:full".into()),
            (
                "block_entities",
                list(vec![compound([
                    ("id", "minecraft:chest".into()),
                    ("x", 10i32.into()),
                    ("y", 64i32.into()),
                    ("z", (-5i32).into()),
                    ("keepPacked", 0i8.into()),
                    (
                        "Items",
                        list(vec![compound([
                            ("Slot", 0i8.into()),
                            ("id", "minecraft:diamond".into()),
                            ("count", 1i32.into()),
                        ])]),
                    ),
                ])]),
            ),
        ]),
    )
}

/// An entity sector with a dropped item and a cow.
pub fn entity_sector() -> Document {
    Document::new(
        "",
        compound([
            ("DataVersion", 3465i32.into()),
            ("Position", Value::IntArray(vec![0, 0])),
            (
                "Entities",
                list(vec![
                    compound([
                        ("id", "minecraft:item".into()),
                        ("Pos", pos(1.5, 64.0, 2.25)),
                        (
                            "Item",
                            compound([
                                ("id", "minecraft:diamond".into()),
                                ("count", 1i32.into()),
                            ]),
                        ),
                    ]),
                    compound([
                        ("id", "minecraft:cow".into()),
                        ("Pos", pos(5.0, 70.0, -3.5)),
                        ("Health", 10.0f32.into()),
                    ]),
                ]),
            ),
        ]),
    )
}

/// A player with an empty inventory and an elytra in the ender chest.
pub fn player_with_ender_elytra() -> Document {
    Document::new(
        "",
        compound([
            ("DataVersion", 3465i32.into()),
            ("Inventory", empty_list(Tag::End)),
            (
                "EnderItems",
                list(vec![compound([
                    ("Slot", 0i8.into()),
                    ("id", "minecraft:elytra".into()),
                    ("count", 1i32.into()),
                ])]),
            ),
            ("Pos", pos(0.5, 64.0, 0.5)),
        ]),
    )
}

// ==================== Binary Encoding ====================

pub fn encode(document: &Document) -> Vec<u8> {
    let mut out = vec![document.root.tag() as u8];
    write_string(&mut out, &document.name);
    write_payload(&mut out, &document.root);
    out
}

fn write_string(out: &mut Vec<u8>, value: &str) {
    out.extend_from_slice(&(value.len() as u16).to_be_bytes());
    out.extend_from_slice(value.as_bytes());
}

fn write_payload(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Byte(v) => out.push(*v as u8),
        Value::Short(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::Int(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::Long(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::Float(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::Double(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::ByteArray(v) => {
            out.extend_from_slice(&(v.len() as i32).to_be_bytes());
            out.extend(v.iter().map(|b| *b as u8));
        }
        Value::String(v) => write_string(out, v),
        Value::List(list) => {
            out.push(list.element_tag() as u8);
            out.extend_from_slice(&(list.len() as i32).to_be_bytes());
            for item in list {
                write_payload(out, item);
            }
        }
        Value::Compound(compound) => {
            for (name, child) in compound.iter() {
                out.push(child.tag() as u8);
                write_string(out, name);
                write_payload(out, child);
            }
            out.push(0);
        }
        Value::IntArray(v) => {
            out.extend_from_slice(&(v.len() as i32).to_be_bytes());
            for i in v {
                out.extend_from_slice(&i.to_be_bytes());
            }
        }
        Value::LongArray(v) => {
            out.extend_from_slice(&(v.len() as i32).to_be_bytes());
            for l in v {
                out.extend_from_slice(&l.to_be_bytes());
            }
        }
    }
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

// ==================== Region Files ====================

/// A raw region cell: grid position, compression byte and payload bytes.
pub struct RawCell {
    pub x: usize,
    pub z: usize,
    pub scheme: u8,
    pub payload: Vec<u8>,
}

impl RawCell {
    /// A zlib-compressed (scheme 2) cell, as the game writes them.
    pub fn zlib(x: usize, z: usize, document: &Document) -> Self {
        Self {
            x,
            z,
            scheme: 2,
            payload: zlib(&encode(document)),
        }
    }
}

/// Lays out cells one after another starting at sector 2.
pub fn region_bytes(cells: &[RawCell]) -> Vec<u8> {
    let mut header = vec![0u8; 8192];
    let mut body = Vec::new();
    for cell in cells {
        let sector = 2 + body.len() / 4096;
        let mut data = Vec::new();
        data.extend_from_slice(&(cell.payload.len() as u32 + 1).to_be_bytes());
        data.push(cell.scheme);
        data.extend_from_slice(&cell.payload);
        let count = data.len().div_ceil(4096);
        data.resize(count * 4096, 0);
        body.extend_from_slice(&data);

        let index = (cell.x + cell.z * 32) * 4;
        let location = ((sector as u32) << 8) | count as u32;
        header[index..index + 4].copy_from_slice(&location.to_be_bytes());
    }
    header.extend_from_slice(&body);
    header
}

pub fn region_of(cells: &[(usize, usize, Document)]) -> Vec<u8> {
    let cells: Vec<RawCell> = cells
        .iter()
        .map(|(x, z, document)| RawCell::zlib(*x, *z, document))
        .collect();
    region_bytes(&cells)
}

// ==================== In-Memory Codec ====================

/// Cells keyed by grid position; `None` marks a corrupt cell.
#[derive(Clone, Default)]
pub struct MemoryRegion {
    pub cells: HashMap<(usize, usize), Option<Document>>,
}

impl MemoryRegion {
    pub fn with(mut self, x: usize, z: usize, document: Document) -> Self {
        self.cells.insert((x, z), Some(document));
        self
    }

    pub fn corrupt(mut self, x: usize, z: usize) -> Self {
        self.cells.insert((x, z), None);
        self
    }
}

impl Region for MemoryRegion {
    fn read_cell(&self, x: usize, z: usize) -> Result<Option<Document>> {
        match self.cells.get(&(x, z)) {
            None => Ok(None),
            Some(Some(document)) => Ok(Some(document.clone())),
            Some(None) => Err(Error::EndOfFile),
        }
    }
}

#[derive(Default)]
pub struct MemoryCodec {
    pub files: HashMap<PathBuf, Document>,
    pub regions: HashMap<PathBuf, MemoryRegion>,
}

impl MemoryCodec {
    pub fn file(mut self, path: impl Into<PathBuf>, document: Document) -> Self {
        self.files.insert(path.into(), document);
        self
    }

    pub fn region(mut self, path: impl Into<PathBuf>, region: MemoryRegion) -> Self {
        self.regions.insert(path.into(), region);
        self
    }
}

fn not_found() -> Error {
    Error::IO(io::Error::from(io::ErrorKind::NotFound))
}

impl Codec for MemoryCodec {
    type Region = MemoryRegion;

    fn decode_file(&self, path: &Path) -> Result<Document> {
        self.files.get(path).cloned().ok_or_else(not_found)
    }

    fn open_region(&self, path: &Path) -> Result<MemoryRegion> {
        self.regions.get(path).cloned().ok_or_else(not_found)
    }
}
