//! Binary NBT decoding into owned [`Value`] trees.
//!
//! Java Edition files are big-endian; [`read_document`] is generic over the
//! byte order so little-endian input can be read the same way.

use std::{borrow::Cow, io::Read, marker::PhantomData};

use flate2::read::{GzDecoder, ZlibDecoder};
use zerocopy::{BigEndian, byteorder};

use crate::{ByteOrder, Compound, Error, List, MAX_DEPTH, Result, Tag, Value, cold_path};

/// A decoded NBT file or region cell: the root value and its name.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub name: String,
    pub root: Value,
}

impl Document {
    pub fn new(name: impl Into<String>, root: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }
}

/// Compression type detected from the leading bytes of a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Zlib,
}

impl Compression {
    pub fn detect(data: &[u8]) -> Self {
        if data.len() >= 2 {
            // Gzip magic: 0x1f 0x8b
            if data[0] == 0x1f && data[1] == 0x8b {
                return Compression::Gzip;
            }
            // Zlib magic: 0x78 followed by 0x01, 0x5e, 0x9c, or 0xda
            if data[0] == 0x78 && matches!(data[1], 0x01 | 0x5e | 0x9c | 0xda) {
                return Compression::Zlib;
            }
        }
        Compression::None
    }

    pub fn decompress(self, data: &[u8]) -> Result<Cow<'_, [u8]>> {
        let mut decompressed = Vec::new();
        let inflated = match self {
            Compression::None => return Ok(Cow::Borrowed(data)),
            Compression::Gzip => GzDecoder::new(data).read_to_end(&mut decompressed),
            Compression::Zlib => ZlibDecoder::new(data).read_to_end(&mut decompressed),
        };
        inflated.map_err(Error::Decompress)?;
        Ok(Cow::Owned(decompressed))
    }
}

/// Decodes an uncompressed document, rejecting trailing bytes.
pub fn read_document<O: ByteOrder>(data: &[u8]) -> Result<Document> {
    let mut reader = Reader::<O>::new(data);
    let tag_id = reader.u8()?;
    let tag = Tag::try_from(tag_id)?;
    if tag == Tag::End {
        cold_path();
        return Err(Error::InvalidRoot);
    }
    let name = reader.string()?;
    let root = reader.payload(tag, 0)?;
    let remaining = reader.remaining();
    if remaining != 0 {
        cold_path();
        return Err(Error::TrailingData(remaining));
    }
    Ok(Document { name, root })
}

#[inline]
pub fn read_document_be(data: &[u8]) -> Result<Document> {
    read_document::<BigEndian>(data)
}

/// Detects gzip/zlib compression, inflates, then decodes.
pub fn read_compressed<O: ByteOrder>(data: &[u8]) -> Result<Document> {
    let data = Compression::detect(data).decompress(data)?;
    read_document::<O>(&data)
}

struct Reader<'a, O: ByteOrder> {
    data: &'a [u8],
    pos: usize,
    _marker: PhantomData<O>,
}

impl<'a, O: ByteOrder> Reader<'a, O> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            cold_path();
            return Err(Error::EndOfFile);
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.take(N)?);
        Ok(bytes)
    }

    #[inline]
    fn u8(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    #[inline]
    fn u16(&mut self) -> Result<u16> {
        Ok(byteorder::U16::<O>::from_bytes(self.array()?).get())
    }

    #[inline]
    fn i32(&mut self) -> Result<i32> {
        Ok(byteorder::I32::<O>::from_bytes(self.array()?).get())
    }

    /// Array and list lengths; negative lengths read as empty.
    fn len(&mut self, element_size: usize) -> Result<usize> {
        let len = self.i32()?.max(0) as usize;
        if len.saturating_mul(element_size) > self.remaining() {
            cold_path();
            return Err(Error::EndOfFile);
        }
        Ok(len)
    }

    fn string(&mut self) -> Result<String> {
        let len = self.u16()? as usize;
        let bytes = self.take(len)?;
        Ok(simd_cesu8::mutf8::decode_lossy(bytes).into_owned())
    }

    fn payload(&mut self, tag: Tag, depth: usize) -> Result<Value> {
        Ok(match tag {
            Tag::End => {
                cold_path();
                return Err(Error::InvalidTagType(0));
            }
            Tag::Byte => Value::Byte(self.u8()? as i8),
            Tag::Short => Value::Short(byteorder::I16::<O>::from_bytes(self.array()?).get()),
            Tag::Int => Value::Int(self.i32()?),
            Tag::Long => Value::Long(byteorder::I64::<O>::from_bytes(self.array()?).get()),
            Tag::Float => Value::Float(byteorder::F32::<O>::from_bytes(self.array()?).get()),
            Tag::Double => Value::Double(byteorder::F64::<O>::from_bytes(self.array()?).get()),
            Tag::ByteArray => {
                let len = self.len(1)?;
                Value::ByteArray(self.take(len)?.iter().map(|&b| b as i8).collect())
            }
            Tag::String => Value::String(self.string()?),
            Tag::List => Value::List(self.list(depth + 1)?),
            Tag::Compound => Value::Compound(self.compound(depth + 1)?),
            Tag::IntArray => {
                let len = self.len(4)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.i32()?);
                }
                Value::IntArray(values)
            }
            Tag::LongArray => {
                let len = self.len(8)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(byteorder::I64::<O>::from_bytes(self.array()?).get());
                }
                Value::LongArray(values)
            }
        })
    }

    fn compound(&mut self, depth: usize) -> Result<Compound> {
        if depth > MAX_DEPTH {
            cold_path();
            return Err(Error::DepthLimitExceeded);
        }
        let mut compound = Compound::new();
        loop {
            let tag = Tag::try_from(self.u8()?)?;
            if tag == Tag::End {
                return Ok(compound);
            }
            let name = self.string()?;
            let value = self.payload(tag, depth)?;
            compound.insert(name, value);
        }
    }

    fn list(&mut self, depth: usize) -> Result<List> {
        if depth > MAX_DEPTH {
            cold_path();
            return Err(Error::DepthLimitExceeded);
        }
        let tag = Tag::try_from(self.u8()?)?;
        // every element kind takes at least one byte
        let len = self.len(1)?;
        let mut list = List::new(tag);
        if tag == Tag::End {
            if len != 0 {
                cold_path();
                return Err(Error::InvalidTagType(0));
            }
            return Ok(list);
        }
        for _ in 0..len {
            let value = self.payload(tag, depth)?;
            list.push(value)?;
        }
        Ok(list)
    }
}
