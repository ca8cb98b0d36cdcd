use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Batches repaint requests via `requestAnimationFrame`.
///
/// Call `mark_dirty()` whenever drawable state changes. The render function
/// fires at most once per vsync, coalescing all dirty marks in between. The
/// scenes drawn here are static, so no frame ever re-arms itself.
pub struct RenderScheduler {
    inner: Rc<Inner>,
}

struct Inner {
    window: Option<web_sys::Window>,
    scheduled: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl RenderScheduler {
    pub fn new(render_fn: impl Fn() + 'static) -> Self {
        let inner = Rc::new(Inner {
            window: web_sys::window(),
            scheduled: Cell::new(false),
            raf_id: Cell::new(None),
            callback: RefCell::new(None),
        });

        let inner_cb = inner.clone();
        let cb = Closure::<dyn FnMut()>::new(move || {
            inner_cb.scheduled.set(false);
            inner_cb.raf_id.set(None);
            render_fn();
        });
        *inner.callback.borrow_mut() = Some(cb);

        Self { inner }
    }

    /// Request a repaint. Cheap when a frame is already pending.
    pub fn mark_dirty(&self) {
        if self.inner.scheduled.get() {
            return;
        }
        self.inner.scheduled.set(true);
        let cb_ref = self.inner.callback.borrow();
        let (Some(cb), Some(window)) = (cb_ref.as_ref(), self.inner.window.as_ref()) else {
            self.inner.scheduled.set(false);
            return;
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.inner.raf_id.set(Some(id)),
            Err(_) => self.inner.scheduled.set(false),
        }
    }
}

impl Drop for RenderScheduler {
    fn drop(&mut self) {
        if let Some(raf_id) = self.inner.raf_id.replace(None)
            && let Some(window) = self.inner.window.as_ref()
        {
            let _ = window.cancel_animation_frame(raf_id);
        }
        self.inner.scheduled.set(false);
        // Break the callback->inner reference cycle on teardown.
        self.inner.callback.borrow_mut().take();
    }
}
