use aero_core::{load_obj_edges, AssetState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: {:?}", e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {url}: not a Response: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {url}: HTTP {}", resp.status());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("read {url}: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch and parse the centerpiece model in the background.
///
/// `asset` stays `Loading` (fallback visible) until this resolves, and becomes
/// `Failed` on any error so the fallback remains.
pub fn spawn_model_load(url: String, threshold_deg: f32, asset: Rc<RefCell<AssetState>>) {
    spawn_local(async move {
        let result = fetch_bytes(&url)
            .await
            .and_then(|bytes| load_obj_edges(&bytes, threshold_deg).map_err(anyhow::Error::from));
        let next = match result {
            Ok(mesh) => {
                log::info!("model {} ready ({} edges)", url, mesh.len());
                AssetState::Ready(mesh)
            }
            Err(e) => {
                log::warn!("model {} unavailable, keeping fallback: {:?}", url, e);
                AssetState::Failed
            }
        };
        *asset.borrow_mut() = next;
    });
}
