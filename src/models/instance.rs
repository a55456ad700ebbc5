// src/models/instance.rs
use crate::error::FleetError;
use crate::models::motd::MotdInfo;
use crate::models::region::Region;
use crate::utils::now_ms;
use serde::Deserialize;
use std::hash::{Hash, Hasher};

// One running server process, as published by the process itself on every
// heartbeat. Existence of the record means "was alive at least once";
// liveness is derived from current_time, never from presence.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInstance {
    #[serde(rename = "_name")]
    pub name: String,
    #[serde(rename = "_group")]
    pub group: String,
    #[serde(rename = "_motd")]
    pub motd: String,
    #[serde(rename = "_playerCount")]
    pub player_count: u32,
    #[serde(rename = "_maxPlayerCount")]
    pub max_player_count: u32,
    #[serde(rename = "_tps")]
    pub tps: u32,
    #[serde(rename = "_ram")]
    pub ram: u64,
    #[serde(rename = "_maxRam")]
    pub max_ram: u64,
    #[serde(rename = "_publicAddress")]
    pub public_address: String,
    #[serde(rename = "_port")]
    pub port: u16,
    #[serde(rename = "_donorsOnline")]
    pub donors_online: u32,
    #[serde(rename = "_startUpDate")]
    pub start_up_date: u64,
    #[serde(rename = "_currentTime")]
    pub current_time: u64,
    // Not part of the heartbeat blob; recovered from the record's key.
    #[serde(skip)]
    pub region: Region,
}

impl ServerInstance {
    pub fn group_prefix(&self) -> &str {
        self.name.split('-').next().unwrap_or(&self.name)
    }

    // The liveness rule. Boundary inclusive: a heartbeat exactly
    // staleness_ms old still counts as online. Clock skew that puts
    // current_time ahead of now reads as age zero.
    pub fn is_online_at(&self, now: u64, staleness_ms: u64) -> bool {
        now.saturating_sub(self.current_time) <= staleness_ms
    }

    pub fn is_online(&self, staleness_ms: u64) -> bool {
        self.is_online_at(now_ms(), staleness_ms)
    }

    pub fn uptime_ms(&self) -> u64 {
        self.current_time.saturating_sub(self.start_up_date)
    }

    pub fn motd_info(&self) -> Result<Option<MotdInfo>, FleetError> {
        MotdInfo::parse(&self.motd)
    }

    pub fn needs_restart(&self, staleness_ms: u64) -> bool {
        self.is_online(staleness_ms)
            && (self.motd.contains("Restarting") || self.motd.contains("Finished"))
    }
}

// Instances are identified by name alone; two reads of the same heartbeat
// compare equal even if the counters moved between them.
impl PartialEq for ServerInstance {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ServerInstance {}

impl Hash for ServerInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heartbeat_json(name: &str, current_time: u64) -> String {
        format!(
            r#"{{"_name":"{}","_group":"SKY","_motd":"A Minecraft Server","_playerCount":7,"_maxPlayerCount":12,"_tps":20,"_ram":512,"_maxRam":1024,"_publicAddress":"10.0.0.5","_port":25565,"_donorsOnline":1,"_startUpDate":1000,"_currentTime":{}}}"#,
            name, current_time
        )
    }

    #[test]
    fn decodes_heartbeat_blob() {
        let server: ServerInstance =
            serde_json::from_str(&heartbeat_json("SKY-1", 50_000)).unwrap();
        assert_eq!(server.name, "SKY-1");
        assert_eq!(server.group_prefix(), "SKY");
        assert_eq!(server.ram, 512);
        assert_eq!(server.port, 25565);
        assert_eq!(server.uptime_ms(), 49_000);
    }

    #[test]
    fn staleness_boundary_is_inclusive() {
        let server: ServerInstance =
            serde_json::from_str(&heartbeat_json("SKY-1", 50_000)).unwrap();
        assert!(server.is_online_at(60_000, 10_000));
        assert!(!server.is_online_at(60_001, 10_000));
    }

    #[test]
    fn future_heartbeat_counts_as_online() {
        let server: ServerInstance =
            serde_json::from_str(&heartbeat_json("SKY-1", 70_000)).unwrap();
        assert!(server.is_online_at(60_000, 10_000));
    }

    #[test]
    fn equality_is_by_name() {
        let a: ServerInstance = serde_json::from_str(&heartbeat_json("SKY-1", 1)).unwrap();
        let b: ServerInstance = serde_json::from_str(&heartbeat_json("SKY-1", 99)).unwrap();
        assert_eq!(a, b);
    }
}
