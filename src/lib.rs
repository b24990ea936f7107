//! pkgfs: Virtual File System for R Package Authoring
//!
//! A path-addressed tree of files and folders layered over a flat key-value
//! store, with cascading delete, rename and duplicate applied atomically, and
//! a policy-restricted gateway for automated callers.

pub mod agent;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod vfs;
