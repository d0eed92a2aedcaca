//! High score leaderboard system
//!
//! Persisted to LocalStorage under `highScores`, tracks top 10 scores.
//! The stored form is a plain JSON array of `{name, score}` objects so a
//! hand-edited value still loads.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError, load_json, save_json};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player's name as entered
    pub name: String,
    /// Food eaten in the round
    pub score: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ScoreBoard {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Normalise loaded data: sorted, capped
    fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Check if a score would make it onto the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a score for `name`.
    ///
    /// Blank names are rejected. Otherwise the entry goes after every entry
    /// with an equal or higher score and the board is cut to the top 10.
    /// Returns the rank achieved, or None if rejected or cut.
    pub fn submit(&mut self, name: &str, score: u64) -> Option<usize> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let entry = ScoreEntry {
            name: name.to_string(),
            score,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Display lines for the score list, `name: score`
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.name, e.score))
            .collect()
    }
}

/// Leaderboard bound to a key-value store
pub struct ScoreStore<S: KeyValueStore> {
    store: S,
    board: ScoreBoard,
}

impl<S: KeyValueStore> ScoreStore<S> {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "highScores";

    /// Load the board; absent or malformed data starts empty
    pub fn load(store: S) -> Self {
        let board = match load_json::<Vec<ScoreEntry>, _>(&store, Self::STORAGE_KEY) {
            Some(entries) => {
                let board = ScoreBoard::from_entries(entries);
                log::info!("Loaded {} high scores", board.len());
                board
            }
            None => {
                log::info!("No high scores found, starting fresh");
                ScoreBoard::new()
            }
        };
        Self { store, board }
    }

    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    /// Submit and persist. Rejected submissions don't touch storage.
    pub fn submit(&mut self, name: &str, score: u64) -> Option<usize> {
        if name.trim().is_empty() {
            log::debug!("Ignoring score submission with blank name");
            return None;
        }
        let rank = self.board.submit(name, score);
        if let Err(e) = self.save() {
            log::warn!("High scores not saved: {}", e);
        }
        rank
    }

    /// Save high scores
    pub fn save(&mut self) -> Result<(), StoreError> {
        save_json(&mut self.store, Self::STORAGE_KEY, &self.board)?;
        log::info!("High scores saved ({} entries)", self.board.len());
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn names(board: &ScoreBoard) -> Vec<(&str, u64)> {
        board
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.score))
            .collect()
    }

    #[test]
    fn test_submit_orders_descending() {
        let mut board = ScoreBoard::new();
        board.submit("A", 5);
        board.submit("B", 9);
        board.submit("C", 1);
        assert_eq!(board.submit("D", 7), Some(2));
        assert_eq!(names(&board), vec![("B", 9), ("D", 7), ("A", 5), ("C", 1)]);
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.submit("", 5), None);
        assert_eq!(board.submit("   ", 5), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_eleventh_higher_score_evicts_lowest() {
        let mut board = ScoreBoard::new();
        for i in 1..=10 {
            board.submit(&format!("P{}", i), i);
        }
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert!(!board.qualifies(1));
        assert_eq!(board.submit("Top", 50), Some(1));
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), Some(50));
        assert!(board.entries.iter().all(|e| e.name != "P1"));
    }

    #[test]
    fn test_low_score_on_full_board_is_cut() {
        let mut board = ScoreBoard::new();
        for i in 0..10 {
            board.submit("X", 10 + i);
        }
        assert_eq!(board.submit("Low", 1), None);
        assert!(board.entries.iter().all(|e| e.name != "Low"));
    }

    #[test]
    fn test_ties_keep_earlier_first() {
        let mut board = ScoreBoard::new();
        board.submit("First", 4);
        assert_eq!(board.submit("Second", 4), Some(2));
        assert_eq!(names(&board), vec![("First", 4), ("Second", 4)]);
    }

    #[test]
    fn test_potential_rank() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.potential_rank(0), Some(1));
        board.submit("A", 10);
        board.submit("B", 5);
        assert_eq!(board.potential_rank(7), Some(2));
        assert_eq!(board.potential_rank(1), Some(3));
    }

    #[test]
    fn test_lines() {
        let mut board = ScoreBoard::new();
        board.submit(" Ada ", 3);
        assert_eq!(board.lines(), vec!["Ada: 3".to_string()]);
    }

    #[test]
    fn test_store_round_trip() {
        let mut scores = ScoreStore::load(MemoryStore::new());
        scores.submit("A", 5);
        scores.submit("B", 9);
        scores.submit("", 100);
        let expected = scores.board().clone();

        let reloaded = ScoreStore::load(scores.into_store());
        assert_eq!(reloaded.board(), &expected);
        assert_eq!(reloaded.board().len(), 2);
    }

    #[test]
    fn test_store_wire_format() {
        let mut scores = ScoreStore::load(MemoryStore::new());
        scores.submit("Ann", 3);
        let json = scores
            .store()
            .get(ScoreStore::<MemoryStore>::STORAGE_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(json, r#"[{"name":"Ann","score":3}]"#);
    }

    #[test]
    fn test_store_tolerates_corruption() {
        let mut store = MemoryStore::new();
        store.set("highScores", "]]garbage").unwrap();
        let scores = ScoreStore::load(store);
        assert!(scores.board().is_empty());
    }

    #[test]
    fn test_store_normalises_hand_edited_data() {
        let mut store = MemoryStore::new();
        let mut raw: Vec<String> = (0..12)
            .map(|i| format!(r#"{{"name":"p{}","score":{}}}"#, i, i))
            .collect();
        raw.reverse();
        raw.rotate_left(3);
        store.set("highScores", &format!("[{}]", raw.join(","))).unwrap();

        let scores = ScoreStore::load(store);
        let board = scores.board();
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), Some(11));
        assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
