//! Snake Canvas - A responsive browser Snake game
//!
//! Core modules:
//! - `sim`: Grid simulation (snake, food, input mapping, collisions)
//! - `layout`: Viewport scaling from design space to device pixels
//! - `renderer`: 2D drawing on an abstract surface (canvas on the web)
//! - `lifecycle`: Countdown / running / game-over state machine
//! - `platform`: Browser timers and DOM
//! - `highscores`: Top-ten board persisted as JSON
//! - `settings`: Persisted tuning knobs
//! - `persistence`: Key-value storage (LocalStorage on web)

pub mod highscores;
pub mod layout;
pub mod lifecycle;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::{ScoreBoard, ScoreEntry, ScoreStore};
pub use layout::Layout;
pub use lifecycle::{Lifecycle, LifecycleEvent, Phase, Schedule};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Design resolution all gameplay coordinates live in
    pub const DESIGN_WIDTH: f32 = 920.0;
    pub const DESIGN_HEIGHT: f32 = 720.0;

    /// Play area rectangle in design space
    pub const PLAY_AREA_X1: i32 = 138;
    pub const PLAY_AREA_Y1: i32 = 109;
    pub const PLAY_AREA_X2: i32 = 788;
    pub const PLAY_AREA_Y2: i32 = 606;

    /// Size of one grid cell in design space
    pub const CELL_SIZE: i32 = 20;

    /// Snake spawns this many cells right of and below the play area origin
    pub const SPAWN_OFFSET_CELLS: i32 = 5;

    /// Simulation tick interval at scale 1.0
    pub const BASE_TICK_MS: u32 = 100;
    /// Countdown tick interval (real seconds)
    pub const COUNTDOWN_TICK_MS: u32 = 1000;
    /// Countdown starts from this value
    pub const COUNTDOWN_FROM: i32 = 3;

    /// Scale floor for degenerate viewports (zero-sized windows)
    pub const MIN_SCALE: f32 = 0.05;
}
