//! Input mapping
//!
//! Keyboard keys, swipe gestures and direction-pad touches all become a
//! [`Direction`] intent before they reach the game state.

use glam::Vec2;

use super::state::Direction;

/// Side length of the on-screen direction pad (CSS pixels)
pub const DPAD_SIZE: f32 = 150.0;
/// Edge band of the pad that triggers a direction
pub const DPAD_EDGE: f32 = 50.0;

impl Direction {
    /// Map a `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Whether the browser should suppress the key's default action (page scroll)
pub fn is_arrow_key(key: &str) -> bool {
    matches!(key, "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight")
}

/// Classify a swipe from `start` to `current`.
///
/// The dominant axis wins; ties go vertical. Movements shorter than
/// `min_distance` on the dominant axis are ignored.
pub fn classify_swipe(start: Vec2, current: Vec2, min_distance: f32) -> Option<Direction> {
    let delta = current - start;
    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    if ax > ay {
        if ax < min_distance {
            return None;
        }
        Some(if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        if ay < min_distance || ay == 0.0 {
            return None;
        }
        Some(if delta.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Classify a touch on the direction pad, `pos` relative to its top-left.
///
/// Horizontal bands take priority over vertical ones; the centre is dead.
pub fn classify_dpad(pos: Vec2) -> Option<Direction> {
    if pos.x < DPAD_EDGE {
        Some(Direction::Left)
    } else if pos.x > DPAD_SIZE - DPAD_EDGE {
        Some(Direction::Right)
    } else if pos.y < DPAD_EDGE {
        Some(Direction::Up)
    } else if pos.y > DPAD_SIZE - DPAD_EDGE {
        Some(Direction::Down)
    } else {
        None
    }
}

/// Tracks one touch to turn start/move pairs into swipes
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
    min_distance: f32,
}

impl SwipeTracker {
    pub fn new(min_distance: f32) -> Self {
        Self {
            start: None,
            min_distance: min_distance.max(0.0),
        }
    }

    /// Touch started
    pub fn begin(&mut self, pos: Vec2) {
        self.start = Some(pos);
    }

    /// Touch moved. A recognised swipe re-anchors at `pos` so one long
    /// gesture can chain turns.
    pub fn update(&mut self, pos: Vec2) -> Option<Direction> {
        let start = self.start?;
        let dir = classify_swipe(start, pos, self.min_distance)?;
        self.start = Some(pos);
        Some(dir)
    }

    /// Touch ended or cancelled
    pub fn end(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("d"), Some(Direction::Right));
        assert_eq!(Direction::from_key("Enter"), None);
        assert!(is_arrow_key("ArrowLeft"));
        assert!(!is_arrow_key("a"));
    }

    #[test]
    fn test_swipe_dominant_axis() {
        let o = Vec2::new(100.0, 100.0);
        assert_eq!(classify_swipe(o, Vec2::new(140.0, 110.0), 0.0), Some(Direction::Right));
        assert_eq!(classify_swipe(o, Vec2::new(60.0, 90.0), 0.0), Some(Direction::Left));
        assert_eq!(classify_swipe(o, Vec2::new(95.0, 150.0), 0.0), Some(Direction::Down));
        assert_eq!(classify_swipe(o, Vec2::new(110.0, 40.0), 0.0), Some(Direction::Up));
    }

    #[test]
    fn test_swipe_threshold() {
        let o = Vec2::ZERO;
        assert_eq!(classify_swipe(o, Vec2::new(5.0, 0.0), 10.0), None);
        assert_eq!(classify_swipe(o, Vec2::new(12.0, 0.0), 10.0), Some(Direction::Right));
        assert_eq!(classify_swipe(o, o, 0.0), None);
    }

    #[test]
    fn test_dpad_zones() {
        assert_eq!(classify_dpad(Vec2::new(10.0, 75.0)), Some(Direction::Left));
        assert_eq!(classify_dpad(Vec2::new(140.0, 75.0)), Some(Direction::Right));
        assert_eq!(classify_dpad(Vec2::new(75.0, 10.0)), Some(Direction::Up));
        assert_eq!(classify_dpad(Vec2::new(75.0, 140.0)), Some(Direction::Down));
        assert_eq!(classify_dpad(Vec2::new(75.0, 75.0)), None);
        // Corner: horizontal wins
        assert_eq!(classify_dpad(Vec2::new(10.0, 10.0)), Some(Direction::Left));
    }

    #[test]
    fn test_swipe_tracker_chains() {
        let mut tracker = SwipeTracker::new(10.0);
        assert_eq!(tracker.update(Vec2::new(50.0, 0.0)), None);

        tracker.begin(Vec2::ZERO);
        assert_eq!(tracker.update(Vec2::new(4.0, 0.0)), None);
        assert_eq!(tracker.update(Vec2::new(30.0, 2.0)), Some(Direction::Right));
        // Re-anchored at (30, 2)
        assert_eq!(tracker.update(Vec2::new(32.0, 40.0)), Some(Direction::Down));

        tracker.end();
        assert_eq!(tracker.update(Vec2::new(0.0, 0.0)), None);
    }
}
