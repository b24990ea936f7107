//! Virtual File System
//!
//! Hierarchical file and folder semantics layered over the flat node store:
//! create, save, cascading delete, cascading rename and recursive duplicate,
//! plus the seed layout and the export manifest.

pub mod export;
pub mod naming;
pub mod seed;
pub mod service;

pub use export::ExportEntry;
pub use seed::{PACKAGE_DIR, README_PATH, RESOURCES_DIR};
pub use service::FileSystem;
