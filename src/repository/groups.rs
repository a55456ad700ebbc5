// src/repository/groups.rs
use crate::config::Config;
use crate::error::FleetError;
use crate::models::group::ServerGroup;
use crate::ports;
use crate::storage::KeyValueStore;
use log::{debug, info};
use std::collections::HashMap;

pub const GROUP_KEY_ROOT: &str = "servergroups";

pub fn group_key(prefix: &str) -> String {
    format!("{}.{}", GROUP_KEY_ROOT, prefix)
}

// CRUD over servergroups.<prefix> hash records plus the membership index
// set. Every read-then-write here is compare-then-act against a store
// shared with other writers: no locking, last writer wins, documented.
pub struct GroupRepository<'a> {
    store: &'a dyn KeyValueStore,
    config: &'a Config,
}

impl<'a> GroupRepository<'a> {
    pub fn new(store: &'a dyn KeyValueStore, config: &'a Config) -> Self {
        Self { store, config }
    }

    pub fn exists(&self, prefix: &str) -> bool {
        !self.store.scan_keys(&group_key(prefix)).is_empty()
    }

    // Idempotent: an existing record keeps its stored fields, the incoming
    // group's values are discarded.
    pub fn create(&self, group: &ServerGroup) {
        if self.exists(&group.prefix) {
            debug!("group {} already exists, create is a no-op", group.prefix);
            return;
        }
        self.store.add_to_set(GROUP_KEY_ROOT, &group.prefix);
        self.store.set_hash(&group_key(&group.prefix), group.encode());
        info!(
            "created group {} (port section {}, region {})",
            group.prefix, group.port_section, group.region
        );
    }

    // Idempotent: deleting an absent group does nothing.
    pub fn delete(&self, prefix: &str) {
        if !self.exists(prefix) {
            return;
        }
        self.store.remove_from_set(GROUP_KEY_ROOT, prefix);
        self.store.delete_key(&group_key(prefix));
        info!("deleted group {}", prefix);
    }

    // Delete-then-create; a concurrent reader inside the window observes
    // "does not exist".
    pub fn overwrite(&self, group: &ServerGroup) {
        self.delete(&group.prefix);
        self.create(group);
    }

    pub fn load(&self, prefix: &str) -> Result<ServerGroup, FleetError> {
        let fields = self
            .store
            .get_hash(&group_key(prefix))
            .ok_or_else(|| FleetError::GroupNotFound(prefix.to_string()))?;
        Ok(ServerGroup::decode(&fields))
    }

    pub fn list_prefixes(&self) -> Vec<String> {
        self.store
            .scan_keys(&format!("{}.*", GROUP_KEY_ROOT))
            .into_iter()
            .map(|key| key.trim_start_matches(&format!("{}.", GROUP_KEY_ROOT)).to_string())
            .collect()
    }

    pub fn all_groups(&self) -> Vec<ServerGroup> {
        self.list_prefixes()
            .iter()
            .filter_map(|prefix| self.load(prefix).ok())
            .collect()
    }

    pub fn port_sections(&self) -> Vec<u16> {
        self.all_groups()
            .iter()
            .map(|group| group.port_section)
            .collect()
    }

    pub fn next_available_port(&self) -> Result<u16, FleetError> {
        ports::allocate_port(&self.port_sections(), self.config)
    }

    fn write_total_servers(&self, prefix: &str, count: u32) {
        let mut fields = HashMap::new();
        fields.insert("totalServers".to_string(), count.to_string());
        self.store.set_hash(&group_key(prefix), fields);
    }

    pub fn increment_total_servers(&self, prefix: &str) -> Result<u32, FleetError> {
        let group = self.load(prefix)?;
        let count = group.total_servers + 1;
        self.write_total_servers(prefix, count);
        debug!("group {} desired count {} -> {}", prefix, group.total_servers, count);
        Ok(count)
    }

    // Clamped at zero: decrementing an empty group is a no-op, not an error.
    pub fn decrement_total_servers(&self, prefix: &str) -> Result<u32, FleetError> {
        let group = self.load(prefix)?;
        if group.total_servers == 0 {
            return Ok(0);
        }
        let count = group.total_servers - 1;
        self.write_total_servers(prefix, count);
        debug!("group {} desired count {} -> {}", prefix, group.total_servers, count);
        Ok(count)
    }

    pub fn set_total_servers(&self, prefix: &str, count: u32) -> Result<(), FleetError> {
        if !self.exists(prefix) {
            return Err(FleetError::GroupNotFound(prefix.to_string()));
        }
        self.write_total_servers(prefix, count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    fn sky_group(port_section: u16) -> ServerGroup {
        let mut group = ServerGroup::new("SKY", 512, 0, 0, port_section, true, "arcade.zip", "Arcade.jar", "plugins/Arcade");
        group.pvp = true;
        group
    }

    #[test]
    fn create_registers_record_and_index() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        repo.create(&sky_group(25565));
        assert!(repo.exists("SKY"));
        assert!(store.set_members(GROUP_KEY_ROOT).contains("SKY"));
        assert_eq!(repo.list_prefixes(), vec!["SKY".to_string()]);
    }

    #[test]
    fn create_is_idempotent_first_write_wins() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        repo.create(&sky_group(25565));

        let mut second = sky_group(25800);
        second.ram = 2048;
        repo.create(&second);

        let stored = repo.load("SKY").unwrap();
        assert_eq!(stored.port_section, 25565);
        assert_eq!(stored.ram, 512);
    }

    #[test]
    fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        repo.delete("SKY");
        repo.create(&sky_group(25565));
        repo.delete("SKY");
        repo.delete("SKY");
        assert!(!repo.exists("SKY"));
        assert!(!store.set_members(GROUP_KEY_ROOT).contains("SKY"));
    }

    #[test]
    fn overwrite_replaces_stored_fields() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        repo.create(&sky_group(25565));
        let mut updated = sky_group(25565);
        updated.ram = 1024;
        repo.overwrite(&updated);

        assert_eq!(repo.load("SKY").unwrap().ram, 1024);
    }

    #[test]
    fn load_missing_group_errors() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);
        assert!(matches!(
            repo.load("SKY"),
            Err(FleetError::GroupNotFound(_))
        ));
    }

    #[test]
    fn decrement_clamps_at_zero() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        repo.create(&sky_group(25565));
        assert_eq!(repo.increment_total_servers("SKY").unwrap(), 1);
        assert_eq!(repo.decrement_total_servers("SKY").unwrap(), 0);
        assert_eq!(repo.decrement_total_servers("SKY").unwrap(), 0);
        assert_eq!(repo.load("SKY").unwrap().total_servers, 0);
    }

    #[test]
    fn count_updates_leave_other_fields_alone() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        repo.create(&sky_group(25565));
        repo.set_total_servers("SKY", 7).unwrap();
        let stored = repo.load("SKY").unwrap();
        assert_eq!(stored.total_servers, 7);
        assert!(stored.pvp);
        assert_eq!(stored.world_zip, "arcade.zip");
    }

    #[test]
    fn next_available_port_avoids_existing_sections() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        repo.create(&sky_group(25500));
        for _ in 0..50 {
            let port = repo.next_available_port().unwrap();
            assert!(port.abs_diff(25500) > config.port_conflict_band);
        }
    }
}
