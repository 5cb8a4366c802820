//! Name/value search over decoded NBT trees.

use std::fmt::{self, Display};

use crate::{
    Value,
    path::{extend_index, extend_key},
};

/// How a node's name is tested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameFilter {
    /// Exact, case-sensitive name. Never matches unnamed list elements.
    Named(String),
    /// Matches only nodes without a name, i.e. list elements.
    Unnamed,
}

impl NameFilter {
    #[inline]
    pub fn matches(&self, name: Option<&str>) -> bool {
        match (self, name) {
            (NameFilter::Named(expected), Some(name)) => expected == name,
            (NameFilter::Unnamed, None) => true,
            _ => false,
        }
    }
}

/// What to look for. Absent filters always pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name: Option<NameFilter>,
    pub value: Option<String>,
}

impl SearchCriteria {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(NameFilter::Named(name.into()));
        self
    }

    pub fn unnamed(mut self) -> Self {
        self.name = Some(NameFilter::Unnamed);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// `true` when neither filter is set, which would match every node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none()
    }

    /// Tests a single node, ignoring its children.
    ///
    /// Lists and compounds never satisfy a value filter.
    pub fn matches(&self, name: Option<&str>, node: &Value) -> bool {
        if let Some(filter) = &self.name {
            if !filter.matches(name) {
                return false;
            }
        }
        match &self.value {
            None => true,
            Some(_) if !node.is_scalar() => false,
            Some(expected) => match node {
                Value::String(value) => value == expected,
                _ => node.to_string() == *expected,
            },
        }
    }
}

impl Display for SearchCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(NameFilter::Named(name)) => write!(f, "Name='{name}'")?,
            Some(NameFilter::Unnamed) => f.write_str("Name=<unnamed>")?,
            None => f.write_str("Name='*'")?,
        }
        write!(f, " Value='{}'", self.value.as_deref().unwrap_or("*"))
    }
}

/// A matching node: where it is, what it is called, and its value string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    pub path: String,
    pub name: String,
    pub value: String,
}

/// Collects every node under (and including) `node` that satisfies `criteria`.
///
/// `name` is the node's own name (`None` for list elements) and `path` its
/// address. Results are in depth-first order: compound children in stored
/// order, list elements by index.
pub fn search(node: &Value, name: Option<&str>, criteria: &SearchCriteria, path: &str) -> Vec<Hit> {
    let mut hits = Vec::new();
    search_with(node, name, criteria, path, &mut |hit| hits.push(hit));
    hits
}

/// Visitor form of [`search`].
pub fn search_with<F: FnMut(Hit)>(
    node: &Value,
    name: Option<&str>,
    criteria: &SearchCriteria,
    path: &str,
    visit: &mut F,
) {
    if criteria.matches(name, node) {
        let name = match name {
            Some(name) => name.to_owned(),
            None => format!("item_in_list_at_path_{path}"),
        };
        visit(Hit {
            path: path.to_owned(),
            name,
            value: node.to_string(),
        });
    }

    match node {
        Value::Compound(compound) => {
            for (child_name, child) in compound.iter() {
                let child_path = extend_key(path, child_name);
                search_with(child, Some(child_name), criteria, &child_path, visit);
            }
        }
        Value::List(list) => {
            for (index, child) in list.iter().enumerate() {
                let child_path = extend_index(path, index);
                search_with(child, None, criteria, &child_path, visit);
            }
        }
        _ => {}
    }
}
