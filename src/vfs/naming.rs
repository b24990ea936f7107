//! Default names for explorer-created nodes.

use crate::store::NodeType;
use crate::tree::path;
use std::collections::HashSet;

/// Candidate name for the `attempt`-th try: `Untitled.R`, `Untitled-1.R`, ...
/// for files and `NewFolder`, `NewFolder-1`, ... for folders.
pub fn untitled_name(node_type: NodeType, attempt: usize) -> String {
    match (node_type, attempt) {
        (NodeType::File, 0) => "Untitled.R".to_string(),
        (NodeType::File, n) => format!("Untitled-{}.R", n),
        (NodeType::Folder, 0) => "NewFolder".to_string(),
        (NodeType::Folder, n) => format!("NewFolder-{}", n),
    }
}

/// First untitled path under `parent` that is not in `existing`.
pub fn next_untitled_path(parent: &str, node_type: NodeType, existing: &HashSet<String>) -> String {
    let mut attempt = 0;
    loop {
        let candidate = path::join(parent, &untitled_name(node_type, attempt));
        if !existing.contains(&candidate) {
            return candidate;
        }
        attempt += 1;
    }
}
