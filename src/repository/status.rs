// src/repository/status.rs
use crate::config::Config;
use crate::error::FleetError;
use crate::models::instance::ServerInstance;
use crate::models::region::Region;
use crate::storage::KeyValueStore;
use log::debug;

pub const STATUS_KEY_ROOT: &str = "serverstatus.minecraft";

pub fn status_key(region: Region, name: &str) -> String {
    format!("{}.{}.{}", STATUS_KEY_ROOT, region.name(), name)
}

fn region_from_key(key: &str) -> Region {
    key.split('.')
        .nth(2)
        .map(Region::from_name)
        .unwrap_or(Region::ALL)
}

// Read-only view over the ephemeral heartbeat records. Heartbeats are
// written by the server processes themselves; this side only scans,
// parses, and judges staleness.
pub struct StatusRepository<'a> {
    store: &'a dyn KeyValueStore,
    config: &'a Config,
}

impl<'a> StatusRepository<'a> {
    pub fn new(store: &'a dyn KeyValueStore, config: &'a Config) -> Self {
        Self { store, config }
    }

    pub fn staleness_threshold_ms(&self) -> u64 {
        self.config.staleness_threshold_ms
    }

    pub fn list_instance_keys(&self, region: Option<Region>) -> Vec<String> {
        match region {
            None => self.store.scan_keys(&format!("{}.*.*", STATUS_KEY_ROOT)),
            Some(region) => region
                .scan_regions()
                .iter()
                .flat_map(|r| {
                    self.store
                        .scan_keys(&format!("{}.{}.*", STATUS_KEY_ROOT, r.name()))
                })
                .collect(),
        }
    }

    pub fn instance_exists(&self, name: &str, region: Region) -> bool {
        self.store.get_string(&status_key(region, name)).is_some()
    }

    // A key that vanished between scan and read is a normal race with the
    // heartbeat TTL, reported as InstanceNotFound; malformed JSON is a
    // Decode error and surfaces.
    pub fn parse_instance(&self, key: &str) -> Result<ServerInstance, FleetError> {
        let blob = self
            .store
            .get_string(key)
            .ok_or_else(|| FleetError::InstanceNotFound(key.to_string()))?;
        let mut instance: ServerInstance =
            serde_json::from_str(&blob).map_err(|e| FleetError::Decode {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        instance.region = region_from_key(key);
        Ok(instance)
    }

    // All parseable instances for the given keys; vanished keys are skipped
    // quietly, decode errors abort the whole read.
    fn parse_all(&self, keys: Vec<String>) -> Result<Vec<ServerInstance>, FleetError> {
        let mut instances = Vec::with_capacity(keys.len());
        for key in keys {
            match self.parse_instance(&key) {
                Ok(instance) => instances.push(instance),
                Err(FleetError::InstanceNotFound(key)) => {
                    debug!("heartbeat {} expired between scan and read", key);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(instances)
    }

    pub fn instances(&self, region: Option<Region>) -> Result<Vec<ServerInstance>, FleetError> {
        self.parse_all(self.list_instance_keys(region))
    }

    // All present instances of a group: name starts with "<prefix>-",
    // matched at the key level so SKY never picks up SKY2.
    pub fn instances_of_group(
        &self,
        prefix: &str,
        region: Region,
    ) -> Result<Vec<ServerInstance>, FleetError> {
        let keys = region
            .scan_regions()
            .iter()
            .flat_map(|r| {
                self.store
                    .scan_keys(&format!("{}.{}.{}-*", STATUS_KEY_ROOT, r.name(), prefix))
            })
            .collect();
        self.parse_all(keys)
    }
}
