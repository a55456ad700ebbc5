// src/models/group.rs
use crate::models::region::Region;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

// Durable template for one class of servers. Stored as a flat string map
// under servergroups.<prefix>; instance n of the group binds
// port_section + n.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerGroup {
    pub prefix: String,
    pub ram: u64,
    pub total_servers: u32,
    pub joinable_servers: u32,
    pub port_section: u16,
    pub arcade_group: bool,
    pub world_zip: String,
    pub plugin: String,
    pub config_path: String,
    pub name: String,
    pub host: String,
    pub min_players: u32,
    pub max_players: u32,
    pub pvp: bool,
    pub tournament: bool,
    pub tournament_points: bool,
    pub games: String,
    pub modes: String,
    pub booster_group: String,
    pub server_type: String,
    pub add_no_cheat: bool,
    pub add_world_edit: bool,
    pub team_rejoin: bool,
    pub team_auto_join: bool,
    pub team_force_balance: bool,
    pub game_auto_start: bool,
    pub game_timeout: bool,
    pub game_voting: bool,
    pub map_voting: bool,
    pub reward_gems: bool,
    pub reward_items: bool,
    pub reward_stats: bool,
    pub reward_achievements: bool,
    pub hotbar_inventory: bool,
    pub hotbar_hub_clock: bool,
    pub player_kick_idle: bool,
    pub hard_max_player_cap: bool,
    pub staff_only: bool,
    pub whitelist: bool,
    pub resource_pack: String,
    pub region: Region,
    pub team_server_key: String,
    pub portal_bottom_corner_location: String,
    pub portal_top_corner_location: String,
    pub npc_name: String,
    pub cpu: u32,
}

fn bool_str(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

fn get_str(fields: &HashMap<String, String>, key: &str, default: &str) -> String {
    fields
        .get(key)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn get_num<T: std::str::FromStr>(fields: &HashMap<String, String>, key: &str, default: T) -> T {
    fields
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// A stored boolean is the literal string "true"; anything else reads false.
fn get_bool(fields: &HashMap<String, String>, key: &str) -> bool {
    fields.get(key).map(|v| v == "true").unwrap_or(false)
}

impl ServerGroup {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        prefix: &str,
        ram: u64,
        total_servers: u32,
        joinable_servers: u32,
        port_section: u16,
        arcade_group: bool,
        world_zip: &str,
        plugin: &str,
        config_path: &str,
    ) -> Self {
        Self {
            prefix: prefix.to_string(),
            ram,
            total_servers,
            joinable_servers,
            port_section,
            arcade_group,
            world_zip: world_zip.to_string(),
            plugin: plugin.to_string(),
            config_path: config_path.to_string(),
            name: prefix.to_string(),
            host: String::new(),
            min_players: 1,
            max_players: 50,
            pvp: false,
            tournament: false,
            tournament_points: false,
            games: "null".to_string(),
            modes: String::new(),
            booster_group: String::new(),
            server_type: "dedicated".to_string(),
            add_no_cheat: false,
            add_world_edit: false,
            team_rejoin: false,
            team_auto_join: false,
            team_force_balance: false,
            game_auto_start: false,
            game_timeout: false,
            game_voting: false,
            map_voting: false,
            reward_gems: false,
            reward_items: false,
            reward_stats: false,
            reward_achievements: false,
            hotbar_inventory: false,
            hotbar_hub_clock: false,
            player_kick_idle: false,
            hard_max_player_cap: false,
            staff_only: false,
            whitelist: false,
            resource_pack: String::new(),
            // New groups default to US; the ALL fallback only applies when
            // decoding an unrecognized stored value.
            region: Region::US,
            team_server_key: String::new(),
            portal_bottom_corner_location: String::new(),
            portal_top_corner_location: String::new(),
            npc_name: String::new(),
            cpu: 1,
        }
    }

    // The stored field schema, enumerated once. encode and decode must stay
    // in lockstep; round-tripping a group through both is the contract.
    pub fn encode(&self) -> HashMap<String, String> {
        let mut fields = HashMap::new();
        fields.insert("prefix".to_string(), self.prefix.clone());
        fields.insert("ram".to_string(), self.ram.to_string());
        fields.insert("totalServers".to_string(), self.total_servers.to_string());
        fields.insert(
            "joinableServers".to_string(),
            self.joinable_servers.to_string(),
        );
        fields.insert("portSection".to_string(), self.port_section.to_string());
        fields.insert("arcadeGroup".to_string(), bool_str(self.arcade_group));
        fields.insert("worldZip".to_string(), self.world_zip.clone());
        fields.insert("plugin".to_string(), self.plugin.clone());
        fields.insert("configPath".to_string(), self.config_path.clone());
        fields.insert("name".to_string(), self.name.clone());
        fields.insert("host".to_string(), self.host.clone());
        fields.insert("minPlayers".to_string(), self.min_players.to_string());
        fields.insert("maxPlayers".to_string(), self.max_players.to_string());
        fields.insert("pvp".to_string(), bool_str(self.pvp));
        fields.insert("tournament".to_string(), bool_str(self.tournament));
        fields.insert(
            "tournamentPoints".to_string(),
            bool_str(self.tournament_points),
        );
        fields.insert("games".to_string(), self.games.clone());
        fields.insert("modes".to_string(), self.modes.clone());
        fields.insert("boosterGroup".to_string(), self.booster_group.clone());
        fields.insert("serverType".to_string(), self.server_type.clone());
        fields.insert("addNoCheat".to_string(), bool_str(self.add_no_cheat));
        fields.insert("addWorldEdit".to_string(), bool_str(self.add_world_edit));
        fields.insert("teamRejoin".to_string(), bool_str(self.team_rejoin));
        fields.insert("teamAutoJoin".to_string(), bool_str(self.team_auto_join));
        fields.insert(
            "teamForceBalance".to_string(),
            bool_str(self.team_force_balance),
        );
        fields.insert("gameAutoStart".to_string(), bool_str(self.game_auto_start));
        fields.insert("gameTimeout".to_string(), bool_str(self.game_timeout));
        fields.insert("gameVoting".to_string(), bool_str(self.game_voting));
        fields.insert("mapVoting".to_string(), bool_str(self.map_voting));
        fields.insert("rewardGems".to_string(), bool_str(self.reward_gems));
        fields.insert("rewardItems".to_string(), bool_str(self.reward_items));
        fields.insert("rewardStats".to_string(), bool_str(self.reward_stats));
        fields.insert(
            "rewardAchievements".to_string(),
            bool_str(self.reward_achievements),
        );
        fields.insert(
            "hotbarInventory".to_string(),
            bool_str(self.hotbar_inventory),
        );
        fields.insert("hotbarHubClock".to_string(), bool_str(self.hotbar_hub_clock));
        fields.insert("playerKickIdle".to_string(), bool_str(self.player_kick_idle));
        fields.insert(
            "hardMaxPlayerCap".to_string(),
            bool_str(self.hard_max_player_cap),
        );
        fields.insert("staffOnly".to_string(), bool_str(self.staff_only));
        fields.insert("whitelist".to_string(), bool_str(self.whitelist));
        fields.insert("resourcePack".to_string(), self.resource_pack.clone());
        fields.insert("region".to_string(), self.region.name().to_string());
        fields.insert("teamServerKey".to_string(), self.team_server_key.clone());
        fields.insert(
            "portalBottomCornerLocation".to_string(),
            self.portal_bottom_corner_location.clone(),
        );
        fields.insert(
            "portalTopCornerLocation".to_string(),
            self.portal_top_corner_location.clone(),
        );
        fields.insert("npcName".to_string(), self.npc_name.clone());
        fields.insert("cpu".to_string(), self.cpu.to_string());
        fields
    }

    // Best-effort reconstruction: a partially written or legacy-shaped hash
    // still decodes, with documented per-field defaults filling the gaps.
    pub fn decode(fields: &HashMap<String, String>) -> Self {
        let prefix = get_str(fields, "prefix", "");
        Self {
            ram: get_num(fields, "ram", 512),
            total_servers: get_num(fields, "totalServers", 0),
            joinable_servers: get_num(fields, "joinableServers", 0),
            port_section: get_num(fields, "portSection", 0),
            arcade_group: get_bool(fields, "arcadeGroup"),
            world_zip: get_str(fields, "worldZip", "lobby.zip"),
            plugin: get_str(fields, "plugin", "Hub.jar"),
            config_path: get_str(fields, "configPath", "plugins/Hub"),
            name: get_str(fields, "name", &prefix),
            host: get_str(fields, "host", ""),
            min_players: get_num(fields, "minPlayers", 1),
            max_players: get_num(fields, "maxPlayers", 50),
            pvp: get_bool(fields, "pvp"),
            tournament: get_bool(fields, "tournament"),
            tournament_points: get_bool(fields, "tournamentPoints"),
            games: get_str(fields, "games", "null"),
            modes: get_str(fields, "modes", ""),
            booster_group: get_str(fields, "boosterGroup", ""),
            server_type: get_str(fields, "serverType", "dedicated"),
            // The one boolean whose absence reads true.
            add_no_cheat: fields.get("addNoCheat").map(|v| v == "true").unwrap_or(true),
            add_world_edit: get_bool(fields, "addWorldEdit"),
            team_rejoin: get_bool(fields, "teamRejoin"),
            team_auto_join: get_bool(fields, "teamAutoJoin"),
            team_force_balance: get_bool(fields, "teamForceBalance"),
            game_auto_start: get_bool(fields, "gameAutoStart"),
            game_timeout: get_bool(fields, "gameTimeout"),
            game_voting: get_bool(fields, "gameVoting"),
            map_voting: get_bool(fields, "mapVoting"),
            reward_gems: get_bool(fields, "rewardGems"),
            reward_items: get_bool(fields, "rewardItems"),
            reward_stats: get_bool(fields, "rewardStats"),
            reward_achievements: get_bool(fields, "rewardAchievements"),
            hotbar_inventory: get_bool(fields, "hotbarInventory"),
            hotbar_hub_clock: get_bool(fields, "hotbarHubClock"),
            player_kick_idle: get_bool(fields, "playerKickIdle"),
            hard_max_player_cap: get_bool(fields, "hardMaxPlayerCap"),
            staff_only: get_bool(fields, "staffOnly"),
            whitelist: get_bool(fields, "whitelist"),
            resource_pack: get_str(fields, "resourcePack", ""),
            region: Region::from_name(&get_str(fields, "region", "")),
            team_server_key: get_str(fields, "teamServerKey", ""),
            portal_bottom_corner_location: get_str(fields, "portalBottomCornerLocation", ""),
            portal_top_corner_location: get_str(fields, "portalTopCornerLocation", ""),
            npc_name: get_str(fields, "npcName", ""),
            cpu: get_num(fields, "cpu", 1),
            prefix,
        }
    }

    pub fn is_player_server(&self) -> bool {
        self.server_type == "Player"
    }

    pub fn is_event_server(&self) -> bool {
        self.server_type == "Community"
    }

    pub fn instance_port(&self, instance_number: u32) -> u32 {
        self.port_section as u32 + instance_number
    }
}

impl PartialEq for ServerGroup {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix
    }
}

impl Eq for ServerGroup {}

impl Hash for ServerGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.prefix.hash(state);
    }
}
