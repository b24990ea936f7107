//! Config composition: defaults plus ordered sources.

pub(crate) mod merge_policy;
pub mod service;
