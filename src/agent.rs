//! Agent Access Model
//!
//! Defines how an automated assistant reaches the file system. Mutations are
//! funnelled through a policy-checked gateway that narrows writes to a single
//! sub-tree; the underlying file system still enforces its own invariants.

pub mod policy;
pub mod tools;

pub use policy::{GatedAction, PathPolicy};
pub use tools::{AgentFileTools, CapabilityGateway, ResourceFile, ToolOutcome};
