//! `requestAnimationFrame`-backed ticker.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::scheduler::Ticker;

/// Holds the frame callback for as long as a scheduler may request frames, and
/// cancels the pending frame when dropped so the callback is never invoked after
/// it is freed.
pub struct RafTicker {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
    pending: Option<i32>,
}

impl RafTicker {
    pub fn new(window: Window, on_frame: impl FnMut(f64) + 'static) -> Self {
        Self {
            window,
            callback: Closure::wrap(Box::new(on_frame) as Box<dyn FnMut(f64)>),
            pending: None,
        }
    }
}

impl Ticker for RafTicker {
    fn request_tick(&mut self) {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => self.pending = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

impl Drop for RafTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
