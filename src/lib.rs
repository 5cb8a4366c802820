//! Search Minecraft Java Edition world saves for NBT tags.
//!
//! The crate decodes player data, region (block entity) and entity files into
//! owned [`Value`] trees, walks every tree with [`search`], and enriches each
//! [`Hit`] with the context of the file it came from.
//!
//! ```
//! use nbt_finder::{Compound, SearchCriteria, Value, search};
//!
//! let mut item = Compound::new();
//! item.insert("id", "minecraft:elytra");
//! item.insert("count", 1i8);
//!
//! let criteria = SearchCriteria::new().name("id").value("minecraft:elytra");
//! let hits = search(&Value::Compound(item), Some(""), &criteria, "root");
//!
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].path, "root.id");
//! ```

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;

pub mod codec;
pub mod coords;
mod error;
pub mod extract;
pub mod matcher;
pub mod path;
pub mod read;
pub mod region;
pub mod report;
pub mod scan;
mod tag;
mod util;
mod value;

pub use codec::*;
pub use coords::*;
pub use error::*;
pub use extract::{DataSource, Finding};
pub use matcher::*;
pub use read::{Compression, Document, read_compressed, read_document, read_document_be};
pub use scan::*;
pub use tag::*;
pub use util::*;
pub use value::*;
