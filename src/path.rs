//! NBT path strings such as `root.Inventory[2].tag.display.Name`.

/// Path of the compound child `name` under `parent`.
///
/// The first segment under an empty (unnamed root) path has no leading dot,
/// and a child with an empty name shares its parent's path.
pub fn extend_key(parent: &str, name: &str) -> String {
    match (parent.is_empty(), name.is_empty()) {
        (false, false) => format!("{parent}.{name}"),
        (true, _) => name.to_owned(),
        (false, true) => parent.to_owned(),
    }
}

/// Path of the list element at `index` under `parent`.
#[inline]
pub fn extend_index(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Label of a cell in a region grid, e.g. `Chunk[3,17]`.
#[inline]
pub fn cell_label(kind: &str, x: usize, z: usize) -> String {
    format!("{kind}[{x},{z}]")
}
