//! Repeating timer handle over `setInterval`
//!
//! The callback closure lives as long as the handle. Cancelling (or dropping)
//! clears the interval, so no timer survives the owner.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::error::{Error, Result};

/// A running `setInterval`
pub struct Interval {
    id: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    /// Call `callback` every `period_ms` until cancelled or dropped
    pub fn start(period_ms: u32, callback: impl FnMut() + 'static) -> Result<Self> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let closure = Closure::<dyn FnMut()>::new(callback);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms as i32,
        )?;
        Ok(Self {
            id: Some(id),
            _closure: closure,
        })
    }

    /// Stop the interval. Later calls are no-ops.
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(id);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
