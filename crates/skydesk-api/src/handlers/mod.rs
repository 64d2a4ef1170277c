//! HTTP API handlers — exposes the device registry as JSON.

pub mod devices;
pub mod status;

use skydesk_core::DeviceRegistry;

#[derive(Clone)]
pub struct ApiState {
    pub registry: DeviceRegistry,
    /// Echo raw body parse errors in 500 responses instead of a generic message.
    pub expose_internal_errors: bool,
}

impl ApiState {
    pub fn new(registry: DeviceRegistry) -> Self {
        Self {
            registry,
            expose_internal_errors: false,
        }
    }
}

// Re-export handler functions for use in router setup.
pub use devices::{handle_devices, handle_lookup, handle_register};
pub use status::{handle_health, handle_root};
