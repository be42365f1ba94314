//! Local leaderboard and user store
//!
//! Shares its LocalStorage keys and JSON shapes with the dashboard page, so
//! both sides see one consistent data set. Malformed stored data is treated
//! as empty, never as an error.

use serde::{Deserialize, Serialize};

/// Maximum number of leaderboard entries kept
pub const MAX_LEADERBOARD_ENTRIES: usize = 50;

/// LocalStorage keys shared with the dashboard
pub const SCORES_KEY: &str = "flappy_bird_scores";
pub const USERS_KEY: &str = "flappy_bird_users";
pub const CURRENT_USER_KEY: &str = "flappy_bird_current_user";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub username: String,
    pub score: u32,
}

/// A registered user, in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
}

/// Score leaderboard, sorted descending, one entry per username
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse stored JSON; anything unreadable yields an empty board
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".into())
    }

    /// Best recorded score for a user
    pub fn best_for(&self, username: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.username == username)
            .map(|e| e.score)
    }

    /// Record a run: one entry per username keeping the maximum score, then
    /// re-sort descending and truncate to the cap. Returns true when the
    /// board changed.
    pub fn record(&mut self, username: &str, score: u32) -> bool {
        let changed = match self.entries.iter_mut().find(|e| e.username == username) {
            Some(existing) => {
                if score > existing.score {
                    existing.score = score;
                    true
                } else {
                    false
                }
            }
            None => {
                self.entries.push(ScoreEntry {
                    username: username.to_string(),
                    score,
                });
                true
            }
        };
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        changed
    }

    /// Load the shared leaderboard from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(SCORES_KEY) {
                return Self::from_json(&json);
            }
        }
        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(SCORES_KEY, &self.to_json());
            log::info!("Leaderboard saved ({} entries)", self.entries.len());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Parse the registered-user list; unreadable data yields an empty list
pub fn users_from_json(json: &str) -> Vec<UserRecord> {
    serde_json::from_str(json).unwrap_or_default()
}

/// Load the registered users from LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load_users() -> Vec<UserRecord> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(json)) = storage.get_item(USERS_KEY) {
            return users_from_json(&json);
        }
    }
    Vec::new()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_users() -> Vec<UserRecord> {
    Vec::new()
}

/// Persisted current user, set by the dashboard on login/signup (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn current_user() -> Option<String> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()?;
    storage
        .get_item(CURRENT_USER_KEY)
        .ok()
        .flatten()
        .filter(|s| !s.is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_user() -> Option<String> {
    None
}

/// Resolve the submitting username through the fallback chain: persisted
/// current user, then the dashboard's displayed name, then the most
/// recently registered user. `None` means submission must be refused.
pub fn resolve_username(
    persisted: Option<String>,
    displayed: Option<String>,
    users: &[UserRecord],
) -> Option<String> {
    if let Some(name) = persisted.filter(|s| !s.trim().is_empty()) {
        return Some(name);
    }
    if let Some(name) = displayed
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        return Some(name);
    }
    users.last().map(|u| u.username.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_maximum() {
        let mut board = Leaderboard::new();
        board.record("ada", 7);
        assert!(board.record("ada", 10));
        assert_eq!(board.best_for("ada"), Some(10));

        // A lower score later never regresses the entry
        assert!(!board.record("ada", 5));
        assert_eq!(board.best_for("ada"), Some(10));
        assert_eq!(board.entries.len(), 1);
    }

    #[test]
    fn test_sorted_descending() {
        let mut board = Leaderboard::new();
        board.record("low", 3);
        board.record("high", 30);
        board.record("mid", 12);
        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![30, 12, 3]);
    }

    #[test]
    fn test_truncates_to_cap() {
        let mut board = Leaderboard::new();
        for i in 0..80u32 {
            board.record(&format!("player{i}"), i);
        }
        assert_eq!(board.entries.len(), MAX_LEADERBOARD_ENTRIES);
        // The survivors are the top 50
        assert!(board.entries.iter().all(|e| e.score >= 30));
    }

    #[test]
    fn test_malformed_json_is_empty() {
        assert!(Leaderboard::from_json("not json").entries.is_empty());
        assert!(Leaderboard::from_json("{\"weird\":1}").entries.is_empty());
        assert!(users_from_json("garbage").is_empty());
    }

    #[test]
    fn test_json_round_trip_matches_dashboard_shape() {
        let mut board = Leaderboard::new();
        board.record("ada", 10);
        let json = board.to_json();
        assert_eq!(json, r#"[{"username":"ada","score":10}]"#);
        let back = Leaderboard::from_json(&json);
        assert_eq!(back.entries, board.entries);
    }

    #[test]
    fn test_resolve_prefers_persisted_user() {
        let users = vec![UserRecord {
            username: "newest".into(),
        }];
        let name = resolve_username(
            Some("stored".into()),
            Some("displayed".into()),
            &users,
        );
        assert_eq!(name.as_deref(), Some("stored"));
    }

    #[test]
    fn test_resolve_falls_back_to_displayed() {
        let name = resolve_username(None, Some("  shown  ".into()), &[]);
        assert_eq!(name.as_deref(), Some("shown"));
    }

    #[test]
    fn test_resolve_falls_back_to_last_registered() {
        let users = vec![
            UserRecord {
                username: "first".into(),
            },
            UserRecord {
                username: "last".into(),
            },
        ];
        let name = resolve_username(None, None, &users);
        assert_eq!(name.as_deref(), Some("last"));
    }

    #[test]
    fn test_resolve_fails_with_no_candidates() {
        assert_eq!(resolve_username(None, Some("   ".into()), &[]), None);
        assert_eq!(resolve_username(Some(String::new()), None, &[]), None);
    }
}
