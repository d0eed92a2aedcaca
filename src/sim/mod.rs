//! Grid simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Design-space coordinates only
//! - Seeded RNG only
//! - One tick = one cell

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::Collision;
pub use input::{SwipeTracker, classify_dpad, classify_swipe, is_arrow_key};
pub use state::{Direction, GameState, PlayArea, Point};
pub use tick::{TickInput, TickOutcome, autopilot_direction, tick};
