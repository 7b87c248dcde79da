use indexmap::IndexMap;
use itertools::Itertools;
use log::{error, trace};
use serde_json::Value;
use std::time::SystemTime;

use super::clock::{Clock, SystemClock};
use super::format;
use super::storage::SaveStorage;
use crate::model::{SaveRecord, TotalStats};

/// Default truncation for the recently-played and most-played listings.
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Save store for the game portal: one record per game id, persisted as a
/// single JSON object in an injected storage slot.
///
/// Every mutating operation rewrites the whole store. Faults on the storage
/// side never reach the caller; a failed read recovers to an empty store and
/// a failed write leaves the in-memory state authoritative for the rest of
/// the session.
pub struct SaveSystem {
    storage: Box<dyn SaveStorage>,
    clock: Box<dyn Clock>,
    saves: IndexMap<String, SaveRecord>,
}

fn elapsed_seconds(session_start: SystemTime, now: SystemTime) -> u64 {
    now.duration_since(session_start).unwrap_or_default().as_secs()
}

impl SaveSystem {
    pub fn new(storage: impl SaveStorage + 'static) -> Self {
        Self::with_clock(storage, SystemClock)
    }

    pub fn with_clock(storage: impl SaveStorage + 'static, clock: impl Clock + 'static) -> Self {
        let storage = Box::new(storage);
        let saves = Self::load_saves(storage.as_ref());
        SaveSystem {
            storage,
            clock: Box::new(clock),
            saves,
        }
    }

    fn load_saves(storage: &dyn SaveStorage) -> IndexMap<String, SaveRecord> {
        match storage.read() {
            Ok(Some(contents)) => match serde_json::from_str(&contents) {
                Ok(saves) => saves,
                Err(e) => {
                    error!("Discarding unreadable save data: {}", e);
                    IndexMap::new()
                }
            },
            Ok(None) => IndexMap::new(),
            Err(e) => {
                error!("Error loading saves: {}", e);
                IndexMap::new()
            }
        }
    }

    fn persist_saves(&mut self) {
        let contents = match serde_json::to_string(&self.saves) {
            Ok(contents) => contents,
            Err(e) => {
                error!("Error serializing saves: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.write(&contents) {
            error!("Error saving data: {}", e);
        }
    }

    /// The stored record for `game_id`, or a default record (not yet
    /// persisted) if the game has never been touched.
    pub fn get_game_save(&self, game_id: &str) -> SaveRecord {
        self.saves
            .get(game_id)
            .cloned()
            .unwrap_or_else(|| SaveRecord::new(game_id))
    }

    /// Record the start of a play session: bump the play count, stamp
    /// `last_played`, and open a session.
    pub fn start_game(&mut self, game_id: &str) -> SaveRecord {
        let now = self.clock.now();
        let save = self.saves.entry(game_id.to_string()).or_insert_with(|| {
            let mut save = SaveRecord::new(game_id);
            save.first_played = Some(now);
            save
        });

        save.play_count += 1;
        save.last_played = Some(now);
        if save.session_start.is_some() {
            // Last start wins: the dangling session's elapsed time is
            // dropped, not credited. Revisit here if that policy changes.
            trace!("Reopening session for {} over an unclosed one", game_id);
        }
        save.session_start = Some(now);
        let updated = save.clone();

        self.persist_saves();
        updated
    }

    /// Close the open session and credit its elapsed whole seconds to
    /// `total_play_time`. No-op when no session is open, so calling this
    /// twice credits the time once.
    pub fn end_game(&mut self, game_id: &str) {
        let now = self.clock.now();
        let Some(save) = self.saves.get_mut(game_id) else {
            return;
        };
        let Some(session_start) = save.session_start.take() else {
            return;
        };

        let session_time = elapsed_seconds(session_start, now);
        save.total_play_time += session_time;
        trace!("Session for {} closed after {}s", game_id, session_time);
        self.persist_saves();
    }

    /// Live play-time estimate: stored total plus the open session's elapsed
    /// time, if any. Read-only, nothing is persisted.
    pub fn update_play_time(&self, game_id: &str) -> u64 {
        let Some(save) = self.saves.get(game_id) else {
            return 0;
        };
        match save.session_start {
            Some(session_start) => {
                save.total_play_time + elapsed_seconds(session_start, self.clock.now())
            }
            None => save.total_play_time,
        }
    }

    /// Ratchet the high score upward. Returns true only when `score` beats
    /// the stored best (a tie is not a new record).
    pub fn set_high_score(&mut self, game_id: &str, score: i64) -> bool {
        let save = self
            .saves
            .entry(game_id.to_string())
            .or_insert_with(|| SaveRecord::new(game_id));

        let is_new_record = save.high_score.map_or(true, |best| score > best);
        if is_new_record {
            save.high_score = Some(score);
            self.persist_saves();
        }
        is_new_record
    }

    pub fn save_custom_data(&mut self, game_id: &str, key: &str, value: Value) {
        let save = self
            .saves
            .entry(game_id.to_string())
            .or_insert_with(|| SaveRecord::new(game_id));
        save.custom_data.insert(key.to_string(), value);
        self.persist_saves();
    }

    pub fn get_custom_data(&self, game_id: &str, key: &str) -> Option<&Value> {
        self.saves.get(game_id)?.custom_data.get(key)
    }

    /// Flip the favorite flag, returning the new value.
    pub fn toggle_favorite(&mut self, game_id: &str) -> bool {
        let save = self
            .saves
            .entry(game_id.to_string())
            .or_insert_with(|| SaveRecord::new(game_id));
        save.is_favorite = !save.is_favorite;
        let is_favorite = save.is_favorite;

        self.persist_saves();
        is_favorite
    }

    /// Ids of all favorited games, in store insertion order. The order is
    /// not guaranteed stable across imports or clears.
    pub fn get_favorites(&self) -> Vec<String> {
        self.saves
            .values()
            .filter(|save| save.is_favorite)
            .map(|save| save.game_id.clone())
            .collect()
    }

    /// Played games, most recent first. Stable sort, so equal timestamps
    /// keep insertion order.
    pub fn get_recently_played(&self, limit: usize) -> Vec<SaveRecord> {
        self.saves
            .values()
            .filter(|save| save.last_played.is_some())
            .sorted_by(|a, b| b.last_played.cmp(&a.last_played))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Played games, highest play count first. Stable sort.
    pub fn get_most_played(&self, limit: usize) -> Vec<SaveRecord> {
        self.saves
            .values()
            .filter(|save| save.play_count > 0)
            .sorted_by(|a, b| b.play_count.cmp(&a.play_count))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn get_total_stats(&self) -> TotalStats {
        let mut stats = TotalStats::default();
        for save in self.saves.values() {
            if save.play_count > 0 {
                stats.total_games_played += 1;
            }
            stats.total_play_count += u64::from(save.play_count);
            stats.total_play_time += save.total_play_time;
            if save.is_favorite {
                stats.total_favorites += 1;
            }
        }
        stats
    }

    /// Pretty-printed snapshot of the whole store, for backup.
    pub fn export_saves(&self) -> String {
        serde_json::to_string_pretty(&self.saves).unwrap_or_else(|e| {
            error!("Error exporting saves: {}", e);
            "{}".to_string()
        })
    }

    /// Merge a backup blob into the store: imported ids replace existing
    /// records wholesale, ids absent from the blob are untouched. On parse
    /// failure nothing changes and false is returned.
    pub fn import_saves(&mut self, blob: &str) -> bool {
        match serde_json::from_str::<IndexMap<String, SaveRecord>>(blob) {
            Ok(imported) => {
                self.saves.extend(imported);
                self.persist_saves();
                true
            }
            Err(e) => {
                error!("Error importing saves: {}", e);
                false
            }
        }
    }

    pub fn clear_all_saves(&mut self) {
        self.saves.clear();
        self.persist_saves();
    }

    pub fn clear_game_save(&mut self, game_id: &str) {
        self.saves.shift_remove(game_id);
        self.persist_saves();
    }

    /// `format::format_last_played` against this store's clock.
    pub fn format_last_played(&self, timestamp: Option<SystemTime>) -> String {
        format::format_last_played(timestamp, self.clock.now())
    }
}
