#![cfg(target_arch = "wasm32")]
use aero_core::{
    AssetState, LineBatch, SceneAnimator, SceneConfig, ScrollProgress, ScrollSampler,
};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod asset;
mod dom;
mod frame;
mod render;
mod scroll;

const CANVAS_ID: &str = "aero-canvas";
const MODEL_URL: &str = "/sr71.obj";

/// Everything that must be torn down when the scene leaves the page.
struct SceneHandle {
    progress: ScrollProgress,
    frame_loop: frame::FrameLoop,
    _scroll: scroll::ScrollWiring,
    _resize: dom::EventListener,
}

impl SceneHandle {
    fn scroll_progress(&self) -> f32 {
        self.progress.get()
    }

    /// Dropping the wiring removes the listeners and clears the pending timer.
    fn unmount(self) {
        self.frame_loop.stop();
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<SceneHandle>> = const { RefCell::new(None) };
    static MOUNTING: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("aero-web starting");
    mount();
    Ok(())
}

/// Mount the scene on `#aero-canvas`. Each mount gets a fresh intro and camera.
/// No-op while a scene is mounted or mounting.
#[wasm_bindgen]
pub fn mount() {
    if MOUNTED.with(|m| m.borrow().is_some()) || MOUNTING.with(Cell::get) {
        log::warn!("scene already mounted");
        return;
    }
    MOUNTING.with(|m| m.set(true));
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
        MOUNTING.with(|m| m.set(false));
    });
}

/// Latest published scroll progress, or 0 when nothing is mounted.
#[wasm_bindgen(js_name = "scrollProgress")]
pub fn scroll_progress() -> f32 {
    MOUNTED.with(|m| m.borrow().as_ref().map(SceneHandle::scroll_progress).unwrap_or(0.0))
}

/// Stop the frame loop, remove listeners and drop any pending scroll update.
#[wasm_bindgen]
pub fn unmount() {
    let scene = MOUNTED.with(|m| m.borrow_mut().take());
    if let Some(scene) = scene {
        scene.unmount();
        log::info!("scene unmounted");
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = SceneConfig::default();
    config.validate()?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    let resize = dom::wire_canvas_resize(&window, &canvas).map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Model loads in the background; the fallback silhouette shows meanwhile
    let asset = Rc::new(RefCell::new(AssetState::Loading));
    asset::spawn_model_load(MODEL_URL.to_string(), config.edges.threshold_deg, asset.clone());

    let clock = Instant::now();
    let progress = ScrollProgress::new();
    let sampler = Rc::new(RefCell::new(ScrollSampler::new(
        progress.clone(),
        config.scroll.throttle_ms,
    )));
    let scroll_wiring = scroll::ScrollWiring::attach(&window, sampler.clone(), clock)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    log::info!("scroll sampler mounted at progress {:.3}", progress.get());

    let mut scene = SceneAnimator::new(config, StdRng::from_entropy());
    scene.reset_camera();

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_some() {
        log::info!("WebGPU ready");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        progress: progress.clone(),
        sampler,
        asset,
        canvas,
        gpu,
        batch: LineBatch::with_capacity(2048),
        clock,
    }));
    let frame_loop = frame::start_loop(frame_ctx);

    log::info!("scene mounted");
    MOUNTED.with(|m| {
        *m.borrow_mut() = Some(SceneHandle {
            progress,
            frame_loop,
            _scroll: scroll_wiring,
            _resize: resize,
        });
    });
    Ok(())
}
