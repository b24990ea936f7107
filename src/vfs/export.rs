//! Export manifest
//!
//! A walkable listing of the whole store for packaging routines: folder
//! entries and file entries with content, paths relative to the root.

use crate::store::{NodeRecord, NodeType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExportEntry {
    Folder { path: String },
    File { path: String, content: String },
}

impl ExportEntry {
    pub fn path(&self) -> &str {
        match self {
            ExportEntry::Folder { path } | ExportEntry::File { path, .. } => path,
        }
    }
}

/// Build the manifest, sorted by relative path. A record at the bare root is skipped.
pub fn export_entries(records: &[NodeRecord]) -> Vec<ExportEntry> {
    let mut entries: Vec<ExportEntry> = records
        .iter()
        .filter_map(|record| {
            let relative = record.path.strip_prefix('/').unwrap_or(&record.path);
            if relative.is_empty() {
                return None;
            }
            Some(match record.node_type {
                NodeType::Folder => ExportEntry::Folder {
                    path: relative.to_string(),
                },
                NodeType::File => ExportEntry::File {
                    path: relative.to_string(),
                    content: record.content.clone().unwrap_or_default(),
                },
            })
        })
        .collect();
    entries.sort_by(|a, b| a.path().cmp(b.path()));
    entries
}
