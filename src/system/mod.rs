//! system
//!
//! Read-only access to the system-wide alias configuration.
//!
//! # Sources
//!
//! - [`RegistriesConf`] (default): one merged `registries.conf` file
//! - [`StaticSystemAliases`]: a view assembled in memory by the caller
//!
//! The user alias store always takes precedence over these sources; they
//! are only consulted when the user store has no entry for a name.

mod memory;
mod registries_conf;
mod traits;

pub use memory::StaticSystemAliases;
pub use registries_conf::RegistriesConf;
pub use traits::{SystemAliasSource, SystemAliases, SystemConfigError};
