//! skydesk-core — device records, the shared registry, and configuration.
//! The API crate and the daemon both depend on this one.

pub mod config;
pub mod registry;

pub use config::{ConfigError, ServerConfig, SkydeskConfig};
pub use registry::{unix_now, DeviceRecord, DeviceRegistry};

/// Service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "SkyDesk ID Server";

/// Service version reported by the root endpoint.
pub const SERVICE_VERSION: &str = "1.0";
