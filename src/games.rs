// src/games.rs
use crate::error::FleetError;
use crate::models::group::ServerGroup;
use crate::repository::groups::GroupRepository;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

// The named game kinds operators can deploy without hand-writing a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Micro,
    MixedArcade,
    Draw,
    Build,
    TurfWars,
    SpeedBuilders,
    HideSeek,
    CakeWarsDuos,
    CakeWarsTeams,
    SurvivalGames,
    SurvivalGamesTeams,
    Skywars,
    SkywarsTeams,
    Bridges,
    MineStrike,
    Smash,
    SmashTeams,
    ChampionsDom,
    ChampionsCtf,
    Clans,
    ClansHub,
}

impl GameKind {
    pub fn all() -> &'static [GameKind] {
        &[
            Self::Micro,
            Self::MixedArcade,
            Self::Draw,
            Self::Build,
            Self::TurfWars,
            Self::SpeedBuilders,
            Self::HideSeek,
            Self::CakeWarsDuos,
            Self::CakeWarsTeams,
            Self::SurvivalGames,
            Self::SurvivalGamesTeams,
            Self::Skywars,
            Self::SkywarsTeams,
            Self::Bridges,
            Self::MineStrike,
            Self::Smash,
            Self::SmashTeams,
            Self::ChampionsDom,
            Self::ChampionsCtf,
            Self::Clans,
            Self::ClansHub,
        ]
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

lazy_static! {
    // Gamemode display name -> the prefixes that serve it.
    static ref GAMEMODE_PREFIXES: HashMap<&'static str, &'static [&'static str]> = {
        let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        m.insert("Master Builders", &["BLD"]);
        m.insert("Draw My Thing", &["DMT"]);
        m.insert("Micro Battles", &["MB"]);
        m.insert("Mixed Arcade", &["MIN"]);
        m.insert("Turf Wars", &["TF"]);
        m.insert("Speed Builders", &["SB"]);
        m.insert("Block Hunt", &["BH"]);
        m.insert("Cake Wars", &["CW2", "CW4"]);
        m.insert("Survival Games", &["HG", "SG2"]);
        m.insert("Skywars", &["SKY", "SKY2"]);
        m.insert("The Bridges", &["BR"]);
        m.insert("Mine-Strike", &["MS"]);
        m.insert("Super Smash Mobs", &["SSM", "SSM2"]);
        m.insert("Champions", &["DOM", "CTF"]);
        m.insert("Clans", &["ClansHub", "Clans"]);
        m
    };

    // Solo prefix -> the teams prefix it pairs with.
    static ref TEAM_SERVER_KEYS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("SKY", "SKY2");
        m.insert("HG", "SG2");
        m.insert("SSM", "SSM2");
        m.insert("DOM", "CTF");
        m.insert("CW4", "CW2");
        m
    };

    // Prefix -> hub games entry, for prefixes with their own display id.
    static ref PREFIX_GAME_DISPLAY: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("CW2", "CakeWarsDuos");
        m.insert("CW4", "CakeWars4");
        m.insert("HG", "SurvivalGames");
        m.insert("SG2", "SurvivalGamesTeams");
        m.insert("SKY", "Skywars");
        m.insert("SKY2", "SkywarsTeams");
        m.insert("SSM", "Smash");
        m.insert("SSM2", "SmashTeams");
        m.insert("DOM", "ChampionsDominate");
        m.insert("CTF", "ChampionsCTF");
        m
    };

    static ref GAMEMODE_GAME_DISPLAY: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("Master Builders", "Build");
        m.insert("Draw My Thing", "Draw");
        m.insert("Micro Battles", "Micro");
        m.insert("Turf Wars", "TurfWars");
        m.insert("Speed Builders", "SpeedBuilders");
        m.insert("Block Hunt", "HideSeek");
        m.insert("The Bridges", "Bridges");
        m.insert("Mine-Strike", "MineStrike");
        m
    };

    static ref GAMEMODE_BOOSTER_GROUPS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("Master Builders", "MasterBuilders");
        m.insert("Draw My Thing", "Draw_My_Thing");
        m.insert("Micro Battles", "Arcade");
        m.insert("Mixed Arcade", "Arcade");
        m.insert("Turf Wars", "Arcade");
        m.insert("Speed Builders", "Speed_Builders");
        m.insert("Block Hunt", "Block_Hunt");
        m.insert("Cake Wars", "Cake_Wars");
        m.insert("Survival Games", "Survival_Games");
        m.insert("Skywars", "Skywars");
        m.insert("The Bridges", "Bridges");
        m.insert("Mine-Strike", "MineStrike");
        m.insert("Super Smash Mobs", "Smash_Mobs");
        m.insert("Champions", "Champions");
        m
    };
}

// The Mixed Arcade rotation is spelled out explicitly rather than derived.
const MIXED_ARCADE_GAMES: &str = "BaconBrawl,Lobbers,DeathTag,DragonEscape,Dragons,Evolution,\
Micro,MilkCow,Paintball,Quiver,Runner,Sheep,Snake,SneakyAssassins,Spleef,SquidShooter,\
TurfWars,WitherAssault";

pub fn npc_name_from_prefix(prefix: &str) -> &'static str {
    GAMEMODE_PREFIXES
        .iter()
        .find(|(_, prefixes)| prefixes.contains(&prefix))
        .map(|(gamemode, _)| *gamemode)
        .unwrap_or("")
}

// Preset parameters for one game kind; converting to a ServerGroup fills
// in the derived display metadata and allocates a port.
#[derive(Debug, Clone)]
pub struct GameTemplate {
    pub kind: GameKind,
    pub prefix: &'static str,
    pub min_players: u32,
    pub max_players: u32,
    pub arcade_group: bool,
    pub world_zip: &'static str,
    pub plugin: &'static str,
    pub config_path: &'static str,
    pub pvp: bool,
    pub server_type: &'static str,
    pub add_no_cheat: bool,
    pub add_world_edit: bool,
    pub team_auto_join: bool,
    pub game_auto_start: bool,
    pub game_timeout: bool,
    pub map_voting: bool,
    pub reward_gems: bool,
    pub reward_items: bool,
    pub reward_stats: bool,
    pub reward_achievements: bool,
    pub hotbar_inventory: bool,
    pub hotbar_hub_clock: bool,
    pub player_kick_idle: bool,
}

impl GameTemplate {
    fn arcade(kind: GameKind, prefix: &'static str, min_players: u32, max_players: u32) -> Self {
        Self {
            kind,
            prefix,
            min_players,
            max_players,
            arcade_group: true,
            world_zip: "arcade.zip",
            plugin: "Arcade.jar",
            config_path: "plugins/Arcade",
            pvp: true,
            server_type: "Minigames",
            add_no_cheat: true,
            add_world_edit: false,
            team_auto_join: true,
            game_auto_start: true,
            game_timeout: true,
            map_voting: true,
            reward_gems: true,
            reward_items: true,
            reward_stats: true,
            reward_achievements: true,
            hotbar_inventory: true,
            hotbar_hub_clock: true,
            player_kick_idle: true,
        }
    }

    fn clans(
        kind: GameKind,
        prefix: &'static str,
        world_zip: &'static str,
        plugin: &'static str,
        config_path: &'static str,
    ) -> Self {
        Self {
            kind,
            prefix,
            min_players: 1,
            max_players: 50,
            arcade_group: false,
            world_zip,
            plugin,
            config_path,
            pvp: false,
            server_type: "dedicated",
            add_no_cheat: false,
            add_world_edit: true,
            team_auto_join: false,
            game_auto_start: false,
            game_timeout: true,
            map_voting: false,
            reward_gems: true,
            reward_items: true,
            reward_stats: true,
            reward_achievements: false,
            hotbar_inventory: true,
            hotbar_hub_clock: false,
            player_kick_idle: true,
        }
    }

    pub fn for_kind(kind: GameKind) -> GameTemplate {
        match kind {
            GameKind::Micro => Self::arcade(kind, "MB", 8, 16),
            GameKind::MixedArcade => Self::arcade(kind, "MIN", 8, 24),
            GameKind::Draw => Self::arcade(kind, "DMT", 5, 8),
            GameKind::Build => Self::arcade(kind, "BLD", 8, 12),
            GameKind::TurfWars => Self::arcade(kind, "TF", 8, 16),
            GameKind::SpeedBuilders => Self::arcade(kind, "SB", 4, 8),
            GameKind::HideSeek => Self::arcade(kind, "BH", 12, 24),
            GameKind::CakeWarsDuos => Self::arcade(kind, "CW2", 10, 16),
            GameKind::CakeWarsTeams => Self::arcade(kind, "CW4", 10, 16),
            GameKind::SurvivalGames => Self::arcade(kind, "HG", 12, 24),
            GameKind::SurvivalGamesTeams => Self::arcade(kind, "SG2", 12, 24),
            GameKind::Skywars => Self::arcade(kind, "SKY", 8, 12),
            GameKind::SkywarsTeams => Self::arcade(kind, "SKY2", 8, 12),
            GameKind::Bridges => Self::arcade(kind, "BR", 20, 40),
            GameKind::MineStrike => Self::arcade(kind, "MS", 8, 16),
            GameKind::Smash => Self::arcade(kind, "SSM", 4, 6),
            GameKind::SmashTeams => Self::arcade(kind, "SSM2", 4, 6),
            GameKind::ChampionsDom => Self::arcade(kind, "DOM", 8, 10),
            GameKind::ChampionsCtf => Self::arcade(kind, "CTF", 10, 16),
            GameKind::Clans => Self::clans(kind, "Clans", "clans.zip", "Clans.jar", "plugins/Clans"),
            GameKind::ClansHub => {
                Self::clans(kind, "ClansHub", "clanshub.zip", "ClansHub.jar", "plugins/ClansHub")
            }
        }
    }

    fn games_display(&self, npc_name: &str) -> String {
        if self.prefix == "MIN" {
            return MIXED_ARCADE_GAMES.to_string();
        }
        PREFIX_GAME_DISPLAY
            .get(self.prefix)
            .or_else(|| GAMEMODE_GAME_DISPLAY.get(npc_name))
            .unwrap_or(&"null")
            .to_string()
    }

    // Materialize the template. An existing group wins outright: its stored
    // record is returned untouched, matching idempotent-create semantics.
    pub fn to_server_group(&self, repo: &GroupRepository) -> Result<ServerGroup, FleetError> {
        if repo.exists(self.prefix) {
            return repo.load(self.prefix);
        }

        let mut npc_name = npc_name_from_prefix(self.prefix).to_string();
        let booster_group = GAMEMODE_BOOSTER_GROUPS
            .get(npc_name.as_str())
            .unwrap_or(&"")
            .to_string();
        let games = self.games_display(&npc_name);
        let team_server_key = TEAM_SERVER_KEYS.get(self.prefix).unwrap_or(&"").to_string();
        // Teams-side prefixes are reached through their solo twin; they get
        // no hub NPC of their own.
        if TEAM_SERVER_KEYS.values().any(|teams| *teams == self.prefix) {
            npc_name.clear();
        }

        let port_section = repo.next_available_port()?;
        let mut group = ServerGroup::new(
            self.prefix,
            512,
            0,
            0,
            port_section,
            self.arcade_group,
            self.world_zip,
            self.plugin,
            self.config_path,
        );
        group.min_players = self.min_players;
        group.max_players = self.max_players;
        group.pvp = self.pvp;
        group.server_type = self.server_type.to_string();
        group.add_no_cheat = self.add_no_cheat;
        group.add_world_edit = self.add_world_edit;
        group.team_auto_join = self.team_auto_join;
        group.game_auto_start = self.game_auto_start;
        group.game_timeout = self.game_timeout;
        group.map_voting = self.map_voting;
        group.reward_gems = self.reward_gems;
        group.reward_items = self.reward_items;
        group.reward_stats = self.reward_stats;
        group.reward_achievements = self.reward_achievements;
        group.hotbar_inventory = self.hotbar_inventory;
        group.hotbar_hub_clock = self.hotbar_hub_clock;
        group.player_kick_idle = self.player_kick_idle;
        group.games = games;
        group.booster_group = booster_group;
        group.npc_name = npc_name;
        group.team_server_key = team_server_key;
        Ok(group)
    }

    // Template straight into the store; a no-op when the group exists.
    pub fn create(&self, repo: &GroupRepository) -> Result<ServerGroup, FleetError> {
        let group = self.to_server_group(repo)?;
        repo.create(&group);
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::memory::MemoryStore;

    #[test]
    fn skywars_template_fills_display_metadata() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        let group = GameTemplate::for_kind(GameKind::Skywars)
            .to_server_group(&repo)
            .unwrap();
        assert_eq!(group.prefix, "SKY");
        assert_eq!(group.games, "Skywars");
        assert_eq!(group.npc_name, "Skywars");
        assert_eq!(group.booster_group, "Skywars");
        assert_eq!(group.team_server_key, "SKY2");
        assert!(group.arcade_group);
        assert_eq!(group.server_type, "Minigames");
    }

    #[test]
    fn teams_twin_has_no_npc() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        let group = GameTemplate::for_kind(GameKind::SkywarsTeams)
            .to_server_group(&repo)
            .unwrap();
        assert_eq!(group.prefix, "SKY2");
        assert_eq!(group.npc_name, "");
        assert_eq!(group.games, "SkywarsTeams");
    }

    #[test]
    fn mixed_arcade_lists_rotation_games() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        let group = GameTemplate::for_kind(GameKind::MixedArcade)
            .to_server_group(&repo)
            .unwrap();
        assert!(group.games.contains("BaconBrawl"));
        assert!(group.games.contains("WitherAssault"));
        assert_eq!(group.booster_group, "Arcade");
    }

    #[test]
    fn template_create_respects_existing_group() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        let first = GameTemplate::for_kind(GameKind::Build).create(&repo).unwrap();
        let again = GameTemplate::for_kind(GameKind::Build).create(&repo).unwrap();
        assert_eq!(first.port_section, again.port_section);
        assert_eq!(repo.list_prefixes().len(), 1);
    }

    #[test]
    fn clans_template_is_not_arcade() {
        let store = MemoryStore::new();
        let config = Config::default();
        let repo = GroupRepository::new(&store, &config);

        let group = GameTemplate::for_kind(GameKind::Clans)
            .to_server_group(&repo)
            .unwrap();
        assert!(!group.arcade_group);
        assert_eq!(group.server_type, "dedicated");
        assert_eq!(group.plugin, "Clans.jar");
        assert_eq!(group.max_players, 50);
    }

    #[test]
    fn every_kind_resolves_a_template() {
        for kind in GameKind::all() {
            let template = GameTemplate::for_kind(*kind);
            assert!(!template.prefix.is_empty());
            assert!(template.min_players <= template.max_players);
        }
    }
}
