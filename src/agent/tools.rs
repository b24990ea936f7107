//! Agent tools over the file system.

pub mod contract;
pub mod gateway;

pub use contract::{AgentFileTools, ResourceFile, ToolOutcome};
pub use gateway::CapabilityGateway;
