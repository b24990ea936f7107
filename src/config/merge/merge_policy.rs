//! Built-in defaults applied before any source.

use crate::vfs::{PACKAGE_DIR, RESOURCES_DIR};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("storage.backend", "sled")?
        .set_default("policy.writable_prefix", PACKAGE_DIR)?
        .set_default("policy.resource_prefix", RESOURCES_DIR)?
        .set_default("logging.level", "info")
}
