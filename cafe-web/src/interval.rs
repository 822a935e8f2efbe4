//! `setInterval` handle that stops firing when dropped.
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

pub struct IntervalTask {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl IntervalTask {
    /// Run `tick` every `period_ms` until the task is dropped.
    ///
    /// # Errors
    /// Returns an error if there is no window or the interval cannot be set.
    pub fn start(period_ms: u32, tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = crate::dom::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let callback = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        )?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for IntervalTask {
    fn drop(&mut self) {
        if let Some(window) = crate::dom::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
