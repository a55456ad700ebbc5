// src/reconciler.rs
use crate::config::Config;
use crate::error::FleetError;
use crate::models::group::ServerGroup;
use crate::models::instance::ServerInstance;
use crate::models::region::Region;
use crate::process::ProcessController;
use crate::repository::groups::GroupRepository;
use crate::repository::status::{status_key, StatusRepository};
use crate::storage::KeyValueStore;
use crate::utils::now_ms;
use log::{info, warn};

// Per-group desired vs. actual snapshot for status output.
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub prefix: String,
    pub port_section: u16,
    pub desired_servers: u32,
    pub launched_servers: usize,
    pub online_servers: usize,
    pub player_count: u32,
}

// Joins the durable group records with the ephemeral heartbeats to answer
// liveness, capacity, and drift. The group->instance relationship is
// recomputed on every query from the name prefix, never cached.
pub struct FleetReconciler<'a> {
    store: &'a dyn KeyValueStore,
    config: &'a Config,
    groups: GroupRepository<'a>,
    status: StatusRepository<'a>,
}

impl<'a> FleetReconciler<'a> {
    pub fn new(store: &'a dyn KeyValueStore, config: &'a Config) -> Self {
        Self {
            store,
            config,
            groups: GroupRepository::new(store, config),
            status: StatusRepository::new(store, config),
        }
    }

    pub fn groups(&self) -> &GroupRepository<'a> {
        &self.groups
    }

    pub fn status(&self) -> &StatusRepository<'a> {
        &self.status
    }

    pub fn instances_of_group(
        &self,
        prefix: &str,
        region: Region,
    ) -> Result<Vec<ServerInstance>, FleetError> {
        self.status.instances_of_group(prefix, region)
    }

    fn filter_region(instances: Vec<ServerInstance>, region: Option<Region>) -> Vec<ServerInstance> {
        match region {
            None | Some(Region::ALL) => instances,
            Some(region) => instances
                .into_iter()
                .filter(|instance| region.matches(instance.region))
                .collect(),
        }
    }

    // "now" is captured by the caller and threaded through so one query
    // judges every instance against the same instant.
    pub fn alive_instances_at(
        &self,
        region: Option<Region>,
        now: u64,
    ) -> Result<Vec<ServerInstance>, FleetError> {
        let instances = Self::filter_region(self.status.instances(region)?, region);
        Ok(instances
            .into_iter()
            .filter(|instance| instance.is_online_at(now, self.config.staleness_threshold_ms))
            .collect())
    }

    pub fn alive_instances(&self, region: Option<Region>) -> Result<Vec<ServerInstance>, FleetError> {
        self.alive_instances_at(region, now_ms())
    }

    // Present but stale. An instance with no record at all is not dead, it
    // is gone.
    pub fn dead_instances_at(&self, now: u64) -> Result<Vec<ServerInstance>, FleetError> {
        let instances = self.status.instances(None)?;
        Ok(instances
            .into_iter()
            .filter(|instance| !instance.is_online_at(now, self.config.staleness_threshold_ms))
            .collect())
    }

    pub fn dead_instances(&self) -> Result<Vec<ServerInstance>, FleetError> {
        self.dead_instances_at(now_ms())
    }

    pub fn ram_in_use_at(&self, region: Option<Region>, now: u64) -> Result<u64, FleetError> {
        Ok(self
            .alive_instances_at(region, now)?
            .iter()
            .map(|instance| instance.ram)
            .sum())
    }

    pub fn ram_in_use(&self, region: Option<Region>) -> Result<u64, FleetError> {
        self.ram_in_use_at(region, now_ms())
    }

    // One global ram budget across every region; true at exact equality.
    pub fn has_capacity(&self, group: &ServerGroup) -> Result<bool, FleetError> {
        Ok(group.ram + self.ram_in_use(None)? <= self.config.max_ram_mb)
    }

    // Kill and clear every stale instance. A refused kill is logged and
    // skipped; the batch always runs to completion. Returns the instances
    // actually reaped.
    pub fn reap_dead_instances(
        &self,
        controller: &dyn ProcessController,
    ) -> Result<Vec<ServerInstance>, FleetError> {
        let mut reaped = Vec::new();
        for instance in self.dead_instances()? {
            if let Err(e) = controller.kill_instance(&instance.name) {
                warn!("failed to kill dead instance {}: {}", instance.name, e);
                continue;
            }
            self.store
                .delete_key(&status_key(instance.region, &instance.name));
            info!("reaped dead instance {}", instance.name);
            reaped.push(instance);
        }
        Ok(reaped)
    }

    pub fn deploy_servers(&self, prefix: &str, count: u32) -> Result<(), FleetError> {
        for _ in 0..count {
            self.groups.increment_total_servers(prefix)?;
        }
        Ok(())
    }

    pub fn remove_servers(&self, prefix: &str, count: u32) -> Result<(), FleetError> {
        for _ in 0..count {
            self.groups.decrement_total_servers(prefix)?;
        }
        Ok(())
    }

    pub fn group_summaries_at(&self, now: u64) -> Result<Vec<GroupSummary>, FleetError> {
        let mut summaries = Vec::new();
        let mut prefixes = self.groups.list_prefixes();
        prefixes.sort();
        for prefix in prefixes {
            let group = self.groups.load(&prefix)?;
            let instances = self.status.instances_of_group(&prefix, group.region)?;
            let online: Vec<_> = instances
                .iter()
                .filter(|instance| instance.is_online_at(now, self.config.staleness_threshold_ms))
                .collect();
            summaries.push(GroupSummary {
                player_count: online.iter().map(|instance| instance.player_count).sum(),
                online_servers: online.len(),
                launched_servers: instances.len(),
                desired_servers: group.total_servers,
                port_section: group.port_section,
                prefix,
            });
        }
        Ok(summaries)
    }

    pub fn group_summaries(&self) -> Result<Vec<GroupSummary>, FleetError> {
        self.group_summaries_at(now_ms())
    }
}
