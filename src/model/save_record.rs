use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::serde_as;
use serde_with::TimestampMilliSeconds;
use std::time::SystemTime;

/// Per-game audio preference, stored inside the save record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSettings {
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub muted: bool,
}

fn default_volume() -> f64 {
    1.0
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            volume: 1.0,
            muted: false,
        }
    }
}

/// One game's persisted statistics. Field names on the wire are camelCase,
/// timestamps are integer milliseconds since the Unix epoch.
///
/// `session_start` is transient: it exists only while a play session is open
/// and is never written to storage, so a crash mid-session cannot inflate
/// `total_play_time` after a reload.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub game_id: String,
    #[serde(default)]
    pub play_count: u32,
    /// Cumulative seconds across all closed sessions. Only ever increases.
    #[serde(default)]
    pub total_play_time: u64,
    #[serde(default)]
    #[serde_as(as = "Option<TimestampMilliSeconds>")]
    pub last_played: Option<SystemTime>,
    #[serde(default)]
    #[serde_as(as = "Option<TimestampMilliSeconds>")]
    pub first_played: Option<SystemTime>,
    #[serde(default)]
    pub is_favorite: bool,
    /// Best score ever reported. Ratchets upward only.
    #[serde(default)]
    pub high_score: Option<i64>,
    #[serde(default)]
    pub custom_data: IndexMap<String, Value>,
    #[serde(default)]
    pub settings: GameSettings,
    #[serde(skip)]
    pub session_start: Option<SystemTime>,
}

impl SaveRecord {
    /// Default save structure for a game that has no stored record yet.
    pub fn new(game_id: &str) -> Self {
        SaveRecord {
            game_id: game_id.to_string(),
            play_count: 0,
            total_play_time: 0,
            last_played: None,
            first_played: None,
            is_favorite: false,
            high_score: None,
            custom_data: IndexMap::new(),
            settings: GameSettings::default(),
            session_start: None,
        }
    }

    pub fn has_open_session(&self) -> bool {
        self.session_start.is_some()
    }
}
