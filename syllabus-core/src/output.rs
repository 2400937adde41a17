//! Writes the catalog graph as the assets config consumed downstream.

use crate::error::{CatalogError, Result};
use crate::graph::CatalogGraph;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;
use tracing::info;

const INDENT: &[u8] = b"    ";

/// Pretty-printed JSON for `graph`: four-space indent, non-ASCII kept
/// verbatim, entries in insertion order, trailing newline.
pub fn to_config_bytes(graph: &CatalogGraph) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    graph.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Write `graph` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_config(graph: &CatalogGraph, path: &Path) -> Result<()> {
    info!("Persisting assets configuration into {} ...", path.display());
    let contents = to_config_bytes(graph)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CatalogError::Serialization {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, contents).map_err(|source| CatalogError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}
