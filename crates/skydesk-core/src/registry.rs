//! Device registry — maps device identifiers to their last claimed address.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use serde::Serialize;

/// Current record for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    /// Opaque identifier chosen by the client.
    pub device_id: String,

    /// Address the device claims to be reachable at. Not validated.
    pub address: String,

    /// Unix seconds of the most recent successful registration.
    pub last_seen: u64,
}

/// Seconds since the unix epoch. Clocks set before 1970 read as 0.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// The registry — shared between all request handlers.
///
/// Writes take the exclusive lock of the owning shard, reads a shared one,
/// so a lookup never observes a half-written record. Latest write wins.
#[derive(Clone, Default)]
pub struct DeviceRegistry {
    devices: Arc<DashMap<String, DeviceRecord>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            devices: Arc::new(DashMap::new()),
        }
    }

    /// Create or overwrite the record for `device_id`, stamped with the
    /// current time.
    pub fn register(&self, device_id: &str, address: &str) -> DeviceRecord {
        self.register_at(device_id, address, unix_now())
    }

    /// Create or overwrite the record for `device_id` with an explicit timestamp.
    pub fn register_at(&self, device_id: &str, address: &str, last_seen: u64) -> DeviceRecord {
        let record = DeviceRecord {
            device_id: device_id.to_string(),
            address: address.to_string(),
            last_seen,
        };
        self.devices.insert(device_id.to_string(), record.clone());
        record
    }

    /// Current record for `device_id`, if it ever registered.
    pub fn lookup(&self, device_id: &str) -> Option<DeviceRecord> {
        self.devices.get(device_id).map(|r| r.value().clone())
    }

    /// Copy of every record. Order follows the map's iteration order and
    /// is not stable between calls.
    pub fn snapshot(&self) -> Vec<DeviceRecord> {
        self.devices.iter().map(|e| e.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
