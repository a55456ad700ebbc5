// src/models/motd.rs
use crate::error::FleetError;
use serde::{Deserialize, Serialize};

// Heartbeats from a server with no game attached carry this literal motd
// instead of the JSON status blob.
pub const NO_GAME_SENTINEL: &str = "A Minecraft Server";

// Closed enumeration: these values drive game-join routing, so an
// unrecognized value is a decode error, never a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatusDisplay {
    AlwaysOpen,
    Starting,
    Voting,
    Waiting,
    InProgress,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameJoinStatus {
    Open,
    RanksOnly,
    Closed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MotdInfo {
    #[serde(rename = "_game")]
    pub game: Option<String>,
    #[serde(rename = "_mode")]
    pub mode: Option<String>,
    #[serde(rename = "_status")]
    pub status: GameStatusDisplay,
    #[serde(rename = "_joinable")]
    pub joinable: GameJoinStatus,
}

impl MotdInfo {
    // None means "no game attached", not an error.
    pub fn parse(motd: &str) -> Result<Option<MotdInfo>, FleetError> {
        if motd.is_empty() || motd == NO_GAME_SENTINEL {
            return Ok(None);
        }
        serde_json::from_str(motd)
            .map(Some)
            .map_err(|e| FleetError::Decode {
                key: "motd".to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_motd_has_no_attributes() {
        assert!(MotdInfo::parse(NO_GAME_SENTINEL).unwrap().is_none());
        assert!(MotdInfo::parse("").unwrap().is_none());
    }

    #[test]
    fn structured_motd_exposes_attributes() {
        let motd = r#"{"_game":"Skywars","_mode":"Solo","_status":"IN_PROGRESS","_joinable":"RANKS_ONLY"}"#;
        let info = MotdInfo::parse(motd).unwrap().unwrap();
        assert_eq!(info.game.as_deref(), Some("Skywars"));
        assert_eq!(info.mode.as_deref(), Some("Solo"));
        assert_eq!(info.status, GameStatusDisplay::InProgress);
        assert_eq!(info.joinable, GameJoinStatus::RanksOnly);
    }

    #[test]
    fn unknown_status_is_a_hard_error() {
        let motd = r#"{"_game":"Skywars","_mode":"Solo","_status":"PAUSED","_joinable":"OPEN"}"#;
        assert!(matches!(
            MotdInfo::parse(motd),
            Err(FleetError::Decode { .. })
        ));
    }
}
