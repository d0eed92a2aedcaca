//! Platform abstraction layer
//!
//! Browser pieces the driver needs:
//! - Repeating timers with clean cancellation
//! - DOM around the canvas (game-over modal, score list)

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod timer;

#[cfg(target_arch = "wasm32")]
pub use dom::DomUi;
#[cfg(target_arch = "wasm32")]
pub use timer::{Interval, Scheduler};
