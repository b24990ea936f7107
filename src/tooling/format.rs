//! Format trees and listings as human-readable text.

use crate::store::NodeRecord;
use crate::tree::TreeNode;
use chrono::{TimeZone, Utc};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Render a forest with box-drawing guides. Folders are bold blue.
pub fn format_tree_text(forest: &[TreeNode]) -> String {
    let mut out = String::new();
    render_level(forest, "", &mut out);
    if out.is_empty() {
        out.push_str("(empty)\n");
    }
    out
}

fn render_level(nodes: &[TreeNode], prefix: &str, out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let branch = if last { "└── " } else { "├── " };
        let label = if node.is_folder() {
            format!("{}/", node.name.bold().blue())
        } else {
            node.name.clone()
        };
        out.push_str(&format!("{}{}{}\n", prefix, branch, label));
        if node.is_folder() {
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render_level(node.children(), &child_prefix, out);
        }
    }
}

/// Render records as a table sorted by path.
pub fn format_listing_table(records: &[NodeRecord]) -> String {
    let mut sorted: Vec<&NodeRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Type", "Size", "Modified"]);
    for record in sorted {
        table.add_row(vec![
            record.path.clone(),
            record.node_type.to_string(),
            record.size.to_string(),
            format_timestamp(record.last_modified),
        ]);
    }
    format!("{}", table)
}

fn format_timestamp(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}
