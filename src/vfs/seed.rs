//! Initial project layout.

use crate::store::NodeRecord;
use crate::types::Timestamp;

/// Sub-tree holding the package sources
pub const PACKAGE_DIR: &str = "/Package";

/// Sub-tree holding uploaded reference material
pub const RESOURCES_DIR: &str = "/Resources";

pub const README_PATH: &str = "/README.md";

pub const README_CONTENT: &str = "# AI-Powered R Package Builder\n\n\
Welcome!\n\n\
This is a simple README file to get you started.\n\n\
You can edit this file and click \"Save\" to persist the changes.";

/// The records a fresh store is seeded with.
pub fn seed_records(now: Timestamp) -> Vec<NodeRecord> {
    vec![
        NodeRecord::folder(PACKAGE_DIR, now),
        NodeRecord::folder(RESOURCES_DIR, now),
        NodeRecord::file(README_PATH, README_CONTENT, now),
    ]
}
