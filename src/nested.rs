use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::fetch::FlatMapping;

/// A level of the nested secrets tree
pub type Table = BTreeMap<String, Node>;

/// Either a secret value or a table of further keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Value(String),
    Table(Table),
}

/// Split every dotted key into a path and build the tree it describes.
///
/// `a.b` and `a.c` end up as `{a: {b, c}}`. A key that would need a value and
/// a table at the same path is rejected.
pub fn unflatten(flat: &FlatMapping) -> Result<Table> {
    let mut root = Table::new();
    for (key, value) in flat.iter() {
        insert_path(&mut root, key, value)?;
    }
    Ok(root)
}

fn insert_path(root: &mut Table, key: &str, value: &str) -> Result<()> {
    let conflict = || Error::KeyConflict {
        key: key.to_string(),
    };

    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };

    let mut table = root;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        let node = table
            .entry(segment.to_string())
            .or_insert_with(|| Node::Table(Table::new()));
        table = match node {
            Node::Table(inner) => inner,
            Node::Value(_) => return Err(conflict()),
        };
    }

    if table.contains_key(leaf) {
        return Err(conflict());
    }
    table.insert(leaf.to_string(), Node::Value(value.to_string()));
    Ok(())
}
