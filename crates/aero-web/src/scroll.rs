//! DOM side of scroll sampling: a passive `scroll` listener feeding the core
//! [`ScrollSampler`], plus a flush timer armed once per throttle window.

use crate::dom::{self, EventListener};
use aero_core::ScrollSampler;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub fn now_ms(clock: &Instant) -> f64 {
    clock.elapsed().as_secs_f64() * 1000.0
}

pub struct ScrollWiring {
    window: web::Window,
    sampler: Rc<RefCell<ScrollSampler>>,
    timer: Rc<Cell<Option<i32>>>,
    _flush: Rc<Closure<dyn FnMut()>>,
    _listener: EventListener,
}

impl ScrollWiring {
    /// Mount the sampler (publishing the initial value) and start listening.
    pub fn attach(
        window: &web::Window,
        sampler: Rc<RefCell<ScrollSampler>>,
        clock: Instant,
    ) -> Result<Self, JsValue> {
        sampler.borrow_mut().mount(dom::scroll_metrics(window));

        let timer: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let flush = {
            let sampler = sampler.clone();
            let timer = timer.clone();
            Rc::new(Closure::wrap(Box::new(move || {
                timer.set(None);
                sampler.borrow_mut().poll(now_ms(&clock));
            }) as Box<dyn FnMut()>))
        };

        let listener = {
            let window_ev = window.clone();
            let sampler = sampler.clone();
            let timer = timer.clone();
            let flush = flush.clone();
            EventListener::new(window, "scroll", true, move || {
                let metrics = dom::scroll_metrics(&window_ev);
                let now = now_ms(&clock);
                let mut s = sampler.borrow_mut();
                s.on_scroll(now, metrics);
                // an armed timer already covers the open window
                if timer.get().is_some() {
                    return;
                }
                let Some(due) = s.due_ms() else {
                    return;
                };
                match window_ev.set_timeout_with_callback_and_timeout_and_arguments_0(
                    (*flush).as_ref().unchecked_ref(),
                    (due - now).max(0.0).ceil() as i32,
                ) {
                    Ok(id) => timer.set(Some(id)),
                    Err(e) => log::warn!("scroll flush timer not armed: {:?}", e),
                }
            })?
        };

        Ok(Self {
            window: window.clone(),
            sampler,
            timer,
            _flush: flush,
            _listener: listener,
        })
    }
}

impl Drop for ScrollWiring {
    fn drop(&mut self) {
        if let Some(id) = self.timer.take() {
            self.window.clear_timeout_with_handle(id);
        }
        self.sampler.borrow_mut().cancel();
    }
}
