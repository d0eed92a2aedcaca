//! Repeating browser timers
//!
//! An [`Interval`] owns its JS callback and clears the browser timer when
//! cancelled or dropped. The [`Scheduler`] holds at most one active interval.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::lifecycle::TimerKind;

/// `setInterval` handle plus the closure it calls
pub struct Interval {
    handle: i32,
    cancelled: bool,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    /// Call `callback` every `interval_ms` milliseconds until cancelled
    pub fn start(interval_ms: u32, callback: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::<dyn FnMut()>::new(callback);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            interval_ms.min(i32::MAX as u32) as i32,
        )?;
        Ok(Self {
            handle,
            cancelled: false,
            _callback: callback,
        })
    }

    /// Stop the timer. The closure stays alive until the value is dropped.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
        self.cancelled = true;
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// The single active timer.
///
/// Timers are usually replaced from inside their own callback, so the
/// outgoing interval is cancelled but parked until the next replacement
/// instead of freeing a closure that is still executing.
#[derive(Default)]
pub struct Scheduler {
    active: Option<(TimerKind, Interval)>,
    retired: Option<Interval>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active timer with `next` (or nothing)
    pub fn replace(&mut self, next: Option<(TimerKind, Interval)>) {
        if let Some((kind, mut old)) = self.active.take() {
            old.cancel();
            log::debug!("Stopped {:?} timer", kind);
            self.retired = Some(old);
        }
        if let Some((kind, _)) = &next {
            log::debug!("Started {:?} timer", kind);
        }
        self.active = next;
    }
}
