//! Interop with the PDF.js rendering engine.
//!
//! The engine is a black box loaded from its CDN on first use and
//! reached through `window.pdfjsLib`. All access goes through `Reflect`
//! behind thin typed wrappers, so the engine's own shapes never leak
//! past this module.

use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlScriptElement};

use folio_core::ViewerError;

use crate::dom;

const ENGINE_GLOBAL: &str = "pdfjsLib";
const ENGINE_SCRIPT_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/pdf.js/3.11.174/pdf.min.js";
const ENGINE_WORKER_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/pdf.js/3.11.174/pdf.worker.min.js";
const CANCEL_ERROR_NAME: &str = "RenderingCancelledException";

/// Loads the engine script unless a previous viewer on this page
/// already did; the global is probed first and reused.
pub(crate) async fn ensure_engine() -> Result<(), ViewerError> {
    if engine_global().is_some() {
        return Ok(());
    }
    inject_engine_script().await.map_err(|err| {
        gloo::console::warn!("engine script failed", dom::js_err(err));
        ViewerError::EngineLoad
    })?;
    let engine = engine_global().ok_or(ViewerError::EngineLoad)?;
    configure_worker(&engine).map_err(|_| ViewerError::EngineLoad)
}

pub(crate) async fn open_document(url: &str) -> Result<PdfDocument, ViewerError> {
    let engine = engine_global().ok_or(ViewerError::EngineLoad)?;
    let task = call1(&engine, "getDocument", &JsValue::from_str(url))
        .map_err(|_| ViewerError::DocumentLoad)?;
    let promise: Promise = get(&task, "promise")
        .and_then(JsCast::dyn_into)
        .map_err(|_| ViewerError::DocumentLoad)?;
    let raw = JsFuture::from(promise).await.map_err(|err| {
        gloo::console::warn!("document load failed", dom::js_err(err));
        ViewerError::DocumentLoad
    })?;
    Ok(PdfDocument { raw })
}

#[derive(Clone)]
pub(crate) struct PdfDocument {
    raw: JsValue,
}

impl PdfDocument {
    pub(crate) fn page_count(&self) -> u32 {
        number_prop(&self.raw, "numPages") as u32
    }

    pub(crate) async fn page(&self, index: u32) -> Result<PdfPage, ViewerError> {
        let promise: Promise = call1(&self.raw, "getPage", &JsValue::from_f64(index as f64))
            .and_then(JsCast::dyn_into)
            .map_err(render_err)?;
        let raw = JsFuture::from(promise).await.map_err(render_err)?;
        Ok(PdfPage { raw })
    }
}

pub(crate) struct PdfPage {
    raw: JsValue,
}

impl PdfPage {
    /// Intrinsic page rotation in degrees; 0 when the engine reports
    /// none.
    pub(crate) fn rotation(&self) -> f64 {
        number_prop(&self.raw, "rotate")
    }

    pub(crate) fn viewport(&self, scale: f64, rotation: f64) -> Result<PageViewport, ViewerError> {
        let params = Object::new();
        set_prop(&params, "scale", &JsValue::from_f64(scale)).map_err(render_err)?;
        set_prop(&params, "rotation", &JsValue::from_f64(rotation)).map_err(render_err)?;
        let raw = call1(&self.raw, "getViewport", &params).map_err(render_err)?;
        Ok(PageViewport { raw })
    }

    /// Starts rasterizing this page into `ctx`, scaled by the device
    /// pixel ratio. The returned task is cancellable and must be
    /// awaited for the outcome.
    pub(crate) fn render(
        &self,
        ctx: &CanvasRenderingContext2d,
        viewport: &PageViewport,
        pixel_ratio: f64,
    ) -> Result<RenderTask, ViewerError> {
        let transform: Array = [pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0]
            .into_iter()
            .map(JsValue::from)
            .collect();
        let params = Object::new();
        set_prop(&params, "canvasContext", ctx.as_ref()).map_err(render_err)?;
        set_prop(&params, "viewport", &viewport.raw).map_err(render_err)?;
        set_prop(&params, "transform", &transform).map_err(render_err)?;
        let raw = call1(&self.raw, "render", &params).map_err(render_err)?;
        Ok(RenderTask { raw })
    }
}

pub(crate) struct PageViewport {
    raw: JsValue,
}

impl PageViewport {
    pub(crate) fn width(&self) -> f64 {
        number_prop(&self.raw, "width")
    }

    pub(crate) fn height(&self) -> f64 {
        number_prop(&self.raw, "height")
    }
}

#[derive(Clone)]
pub(crate) struct RenderTask {
    raw: JsValue,
}

impl RenderTask {
    /// Cooperative cancellation; the acknowledgment surfaces through
    /// the completion promise as [`ViewerError::Cancelled`].
    pub(crate) fn cancel(&self) {
        let _ = call0(&self.raw, "cancel");
    }

    pub(crate) async fn completed(&self) -> Result<(), ViewerError> {
        let promise: Promise = get(&self.raw, "promise")
            .and_then(JsCast::dyn_into)
            .map_err(render_err)?;
        JsFuture::from(promise)
            .await
            .map_err(classify_render_error)?;
        Ok(())
    }
}

fn engine_global() -> Option<Object> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(ENGINE_GLOBAL)).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    value.dyn_into::<Object>().ok()
}

async fn inject_engine_script() -> Result<(), JsValue> {
    let document =
        dom::document().ok_or_else(|| JsValue::from_str("missing document"))?;
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("missing document head"))?;
    let script: HtmlScriptElement = dom::create(&document, "script")?;
    script.set_src(ENGINE_SCRIPT_URL);
    let script_for_promise = script.clone();
    let promise = Promise::new(&mut |resolve, reject| {
        let onload = Closure::once(move |_: web_sys::Event| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once(move |_: web_sys::Event| {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("engine script error"));
        });
        script_for_promise.set_onload(Some(onload.as_ref().unchecked_ref()));
        script_for_promise.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();
    });
    head.append_child(&script)?;
    let _ = JsFuture::from(promise).await?;
    Ok(())
}

fn configure_worker(engine: &Object) -> Result<(), JsValue> {
    let options = get(engine, "GlobalWorkerOptions")?;
    set_prop(&options, "workerSrc", &JsValue::from_str(ENGINE_WORKER_URL))
}

fn classify_render_error(error: JsValue) -> ViewerError {
    if error_name(&error).as_deref() == Some(CANCEL_ERROR_NAME) {
        ViewerError::Cancelled
    } else {
        ViewerError::Render(dom::js_err(error))
    }
}

fn error_name(error: &JsValue) -> Option<String> {
    Reflect::get(error, &JsValue::from_str("name"))
        .ok()?
        .as_string()
}

fn render_err(error: JsValue) -> ViewerError {
    ViewerError::Render(dom::js_err(error))
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
}

fn number_prop(target: &JsValue, key: &str) -> f64 {
    get(target, key)
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

fn set_prop(target: &JsValue, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

fn call0(target: &JsValue, method: &str) -> Result<JsValue, JsValue> {
    let func: Function = get(target, method)?.dyn_into()?;
    func.call0(target)
}

fn call1(target: &JsValue, method: &str, arg: &JsValue) -> Result<JsValue, JsValue> {
    let func: Function = get(target, method)?.dyn_into()?;
    func.call1(target, arg)
}
