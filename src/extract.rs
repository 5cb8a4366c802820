//! Per-source drivers that run [`search`](crate::search) over a file and
//! attach the context of where each hit lives.

use std::{path::Path, sync::LazyLock};

use log::{debug, warn};
use regex::Regex;

use crate::{
    Codec, Compound, Coords, Document, Hit, List, NO_COORDS, NO_POS, Region, Result,
    SearchCriteria, Value, parse_coords,
    path::{cell_label, extend_index, extend_key},
    region::REGION_WIDTH,
    search, search_with,
};

pub const PLAYER_INVENTORY: &str = "Player Inventory";
pub const ENDER_CHEST: &str = "Ender Chest";
pub const PLAYER_OTHER: &str = "Player Data (Other)";
pub const UNKNOWN_ENTITY_TYPE: &str = "Unknown Entity Type";
pub const RAW_SECTOR_SEARCH: &str = "RawSectorSearch";

/// Block entity list segment of a chunk path, e.g. `.Level.TileEntities[4]`.
static BLOCK_ENTITY_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\.(?:Level\.)?(block_entities|BlockEntities|tile_entities|TileEntities)\[(\d+)\]",
    )
    .expect("block entity pattern is valid")
});

/// Where a finding came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataSource {
    PlayerData,
    RegionBlockEntity,
    EntityFile,
    MiscData,
}

impl DataSource {
    pub const ALL: [DataSource; 4] = [
        DataSource::PlayerData,
        DataSource::RegionBlockEntity,
        DataSource::EntityFile,
        DataSource::MiscData,
    ];

    /// Value of the report's `data_source` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            DataSource::PlayerData => "PlayerData",
            DataSource::RegionBlockEntity => "RegionFile_BlockEntity",
            DataSource::EntityFile => "EntityFile_Entity",
            DataSource::MiscData => "MiscData",
        }
    }

    /// Human readable plural used in console output.
    pub const fn description(self) -> &'static str {
        match self {
            DataSource::PlayerData => "player data",
            DataSource::RegionBlockEntity => "region files",
            DataSource::EntityFile => "entity files",
            DataSource::MiscData => "miscellaneous data files",
        }
    }
}

/// A [`Hit`] plus the context of the file and structure it was found in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub source: DataSource,
    pub file_name: String,
    /// Player id for player data, entity type for entity files, else empty.
    pub subject: String,
    pub location: String,
    /// Raw position string (`X:.., Y:.., Z:..`, `N/A` or `N/A_Pos`), if the
    /// source has positions at all.
    pub position: Option<String>,
    pub hit: Hit,
}

impl Finding {
    pub fn coords(&self) -> Coords {
        self.position.as_deref().map(parse_coords).unwrap_or_default()
    }
}

/// Findings of one grid file plus how its cells fared.
#[derive(Clone, Debug, Default)]
pub struct FileScan {
    pub findings: Vec<Finding>,
    pub cells_decoded: usize,
    pub cells_corrupt: usize,
}

/// Location category of a player data path.
pub fn classify_player_path(path: &str) -> &'static str {
    if is_under(path, "root.Inventory") {
        PLAYER_INVENTORY
    } else if is_under(path, "root.EnderItems") {
        ENDER_CHEST
    } else {
        PLAYER_OTHER
    }
}

fn is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Searches a `playerdata/<uuid>.dat` file.
pub fn scan_player_file<C: Codec>(
    codec: &C,
    path: &Path,
    criteria: &SearchCriteria,
) -> Result<Vec<Finding>> {
    let document = codec.decode_file(path)?;
    let file_name = file_name(path);
    let player_id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let root_name = Some(document.name.as_str());
    let findings: Vec<Finding> = search(&document.root, root_name, criteria, "root")
        .into_iter()
        .map(|hit| Finding {
            source: DataSource::PlayerData,
            file_name: file_name.clone(),
            subject: player_id.clone(),
            location: classify_player_path(&hit.path).to_owned(),
            position: None,
            hit,
        })
        .collect();
    debug!("{}: {} match(es)", path.display(), findings.len());
    Ok(findings)
}

/// Decodes every cell of a grid file, handing decoded cells to `visit`.
///
/// Absent cells are skipped silently; unreadable cells are logged and counted.
fn scan_cells<R: Region>(
    region: &R,
    file_name: &str,
    kind: &str,
    mut visit: impl FnMut(&str, Document, &mut Vec<Finding>),
) -> FileScan {
    let mut scan = FileScan::default();
    for x in 0..REGION_WIDTH {
        for z in 0..REGION_WIDTH {
            match region.read_cell(x, z) {
                Ok(None) => {}
                Ok(Some(document)) => {
                    scan.cells_decoded += 1;
                    visit(&cell_label(kind, x, z), document, &mut scan.findings);
                }
                Err(error) => {
                    scan.cells_corrupt += 1;
                    warn!("{file_name}: skipping {}: {error}", cell_label(kind, x, z));
                }
            }
        }
    }
    scan
}

/// Searches every chunk of a `region/*.mca` file.
pub fn scan_region_file<C: Codec>(
    codec: &C,
    path: &Path,
    criteria: &SearchCriteria,
) -> Result<FileScan> {
    let region = codec.open_region(path)?;
    let file_name = file_name(path);

    let scan = scan_cells(&region, &file_name, "Chunk", |label, chunk, findings| {
        search_with(&chunk.root, Some(chunk.name.as_str()), criteria, label, &mut |hit| {
            findings.push(Finding {
                source: DataSource::RegionBlockEntity,
                file_name: file_name.clone(),
                subject: String::new(),
                location: format!("BlockEntity in {label}"),
                position: Some(block_entity_position(&chunk.root, &hit.path)),
                hit,
            })
        });
    });
    debug!(
        "{}: {} chunk(s), {} match(es)",
        path.display(),
        scan.cells_decoded,
        scan.findings.len()
    );
    Ok(scan)
}

/// Position of the block entity that owns `path`, or [`NO_COORDS`].
///
/// The block entity list is looked up at the chunk root first and under
/// `Level` second; an empty root list falls through to `Level`.
pub fn block_entity_position(chunk: &Value, path: &str) -> String {
    let Some(captures) = BLOCK_ENTITY_SEGMENT.captures(path) else {
        return NO_COORDS.to_owned();
    };
    let list_name = &captures[1];
    let Ok(index) = captures[2].parse::<usize>() else {
        return NO_COORDS.to_owned();
    };

    let non_empty = |value: &&Value| value.as_list().is_some_and(|list| !list.is_empty());
    let block_entity = chunk
        .get(list_name)
        .filter(non_empty)
        .or_else(|| chunk.get("Level").and_then(|level| level.get(list_name)))
        .and_then(Value::as_list)
        .and_then(|list| list.get(index))
        .and_then(Value::as_compound);

    let scalar = |key| {
        block_entity
            .and_then(|entity| entity.get(key))
            .filter(|value| value.is_scalar())
    };
    match (scalar("x"), scalar("y"), scalar("z")) {
        (Some(x), Some(y), Some(z)) => {
            Coords::new(x.to_string(), y.to_string(), z.to_string()).to_string()
        }
        _ => NO_COORDS.to_owned(),
    }
}

/// Searches every sector of an `entities/*.mca` file.
pub fn scan_entity_file<C: Codec>(
    codec: &C,
    path: &Path,
    criteria: &SearchCriteria,
) -> Result<FileScan> {
    let region = codec.open_region(path)?;
    let file_name = file_name(path);
    let finding = |label: &str, subject: String, position: String, hit| Finding {
        source: DataSource::EntityFile,
        file_name: file_name.clone(),
        subject,
        location: format!("Entity in {label}"),
        position: Some(position),
        hit,
    };

    let scan = scan_cells(&region, &file_name, "Sector", |label, sector, findings| {
        let entities = |list: &List, prefix: &str, findings: &mut Vec<Finding>| {
            for (index, entity) in list.iter().enumerate() {
                let Some(compound) = entity.as_compound() else {
                    continue;
                };
                let subject = entity_type(compound);
                let position = entity_position(compound);
                let entity_path = extend_index(prefix, index);
                search_with(entity, None, criteria, &entity_path, &mut |hit| {
                    findings.push(finding(label, subject.clone(), position.clone(), hit))
                });
            }
        };

        match sector.root.get("Entities").and_then(Value::as_list) {
            Some(list) => entities(list, &extend_key(label, "Entities"), findings),
            None => match &sector.root {
                Value::List(list) => entities(list, label, findings),
                root => {
                    let root_name = Some(sector.name.as_str());
                    search_with(root, root_name, criteria, label, &mut |hit| {
                        findings.push(finding(
                            label,
                            RAW_SECTOR_SEARCH.to_owned(),
                            NO_COORDS.to_owned(),
                            hit,
                        ))
                    })
                }
            },
        }
    });
    debug!(
        "{}: {} sector(s), {} match(es)",
        path.display(),
        scan.cells_decoded,
        scan.findings.len()
    );
    Ok(scan)
}

/// The entity's `id`, or [`UNKNOWN_ENTITY_TYPE`].
pub fn entity_type(entity: &Compound) -> String {
    entity
        .get("id")
        .filter(|id| id.is_scalar())
        .map_or_else(|| UNKNOWN_ENTITY_TYPE.to_owned(), Value::to_string)
}

/// The entity's `Pos` to two decimals, or [`NO_POS`].
pub fn entity_position(entity: &Compound) -> String {
    let Some(pos) = entity.get("Pos").and_then(Value::as_list) else {
        return NO_POS.to_owned();
    };
    if pos.len() != 3 {
        return NO_POS.to_owned();
    }
    let component = |index| pos.get(index).and_then(Value::as_f64);
    match (component(0), component(1), component(2)) {
        (Some(x), Some(y), Some(z)) => format!("X:{x:.2}, Y:{y:.2}, Z:{z:.2}"),
        _ => NO_POS.to_owned(),
    }
}

/// Searches a single-structure file such as `data/WorldUUID.dat`.
///
/// `display_name` is used as the file name column and `description` as the
/// location category.
pub fn scan_misc_file<C: Codec>(
    codec: &C,
    path: &Path,
    display_name: &str,
    description: &str,
    criteria: &SearchCriteria,
) -> Result<Vec<Finding>> {
    let document = codec.decode_file(path)?;
    let root_path = if document.name.is_empty() {
        "root"
    } else {
        document.name.as_str()
    };

    let root_name = Some(document.name.as_str());
    let findings: Vec<Finding> = search(&document.root, root_name, criteria, root_path)
        .into_iter()
        .map(|hit| Finding {
            source: DataSource::MiscData,
            file_name: display_name.to_owned(),
            subject: String::new(),
            location: description.to_owned(),
            position: None,
            hit,
        })
        .collect();
    debug!("{}: {} match(es)", path.display(), findings.len());
    Ok(findings)
}
