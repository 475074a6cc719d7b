use crate::render;
use crate::scroll::now_ms;
use aero_core::{AssetState, FrameInput, LineBatch, SceneAnimator, ScrollProgress, ScrollSampler};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: SceneAnimator,
    pub progress: ScrollProgress,
    pub sampler: Rc<RefCell<ScrollSampler>>,
    pub asset: Rc<RefCell<AssetState>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub batch: LineBatch,

    pub clock: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        // land any scroll sample whose throttle window has passed
        self.sampler.borrow_mut().poll(now_ms(&self.clock));

        let input = FrameInput {
            elapsed_sec: self.clock.elapsed().as_secs_f64(),
            progress: self.progress.get(),
            model_ready: self.asset.borrow().is_ready(),
        };
        let frame = self.scene.tick(input);

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        let view_proj =
            self.scene
                .build_lines(&frame, &self.asset.borrow(), g.aspect(), &mut self.batch);
        if let Err(e) = g.render(view_proj, &self.batch.vertices) {
            log::error!("render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Running `requestAnimationFrame` loop; [`FrameLoop::stop`] ends it.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    pub fn stop(&self) {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        // breaks the closure's self-reference
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Option<i32> {
    let w = web::window()?;
    let guard = tick.borrow();
    let cb = guard.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> FrameLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let running = Rc::new(Cell::new(true));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let running_tick = running.clone();
    let raf_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        raf_tick.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    raf_id.set(request_frame(&tick));

    FrameLoop {
        running,
        raf_id,
        tick,
    }
}
