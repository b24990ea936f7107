//! `PKGFS__*` environment overlay.
//!
//! Keys nest on `__`: `PKGFS__STORAGE__BACKEND=memory` sets `storage.backend`,
//! `PKGFS__POLICY__WRITABLE_PREFIX=/Sandbox` sets `policy.writable_prefix`.
//! The single-underscore `PKGFS_LOG*` variables belong to logging and are not
//! picked up here.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, Map};

const PREFIX: &str = "PKGFS";
const SEPARATOR: &str = "__";

fn source(vars: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix(PREFIX)
        .prefix_separator(SEPARATOR)
        .separator(SEPARATOR)
        .try_parsing(true)
        .source(vars)
}

/// Overlay the process environment.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(source(None)))
}
