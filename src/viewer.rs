//! PDF document viewer.
//!
//! Owns one remote document's lifecycle: lazy engine load, document
//! load, page rasterization onto a canvas at a fixed scale, and the
//! interaction layer on top (page navigation, zoom, pan, fullscreen).
//!
//! Rasterization happens once per page at [`RENDER_SCALE`] adjusted for
//! the device pixel ratio; zoom afterwards is a CSS transform plus a
//! wrapper resize, never a re-render. At most one rasterization is in
//! flight: navigating again cancels the outstanding task and its late
//! completion is discarded, so the last navigation always wins.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, HtmlButtonElement, HtmlCanvasElement,
    HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent, WheelEvent,
};

use folio_core::zoom::{self, percent_label};
use folio_core::{
    clamp_zoom, touch_distance, DragAnchor, Pager, Pinch, RenderPass, RenderSeq, TouchPan,
    ViewerError, ViewerPhase, RENDER_SCALE, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};

use crate::dom;
use crate::pdfjs;

pub(crate) const MOUNT_ID: &str = "pdf-viewer-container";
pub(crate) const PDF_PATH_ATTR: &str = "data-pdf-path";

const FULLSCREEN_CLASS: &str = "fullscreen";
const DRAGGING_CLASS: &str = "dragging";

/// UI handles resolved once at construction. Everything here is built
/// by the viewer itself, so the handles are owned rather than optional;
/// only the mount point comes from the host page.
struct ViewerElements {
    wrapper: HtmlElement,
    container: HtmlElement,
    canvas_wrapper: HtmlElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    prev_btn: HtmlButtonElement,
    next_btn: HtmlButtonElement,
    page_info: HtmlElement,
    zoom_slider: HtmlInputElement,
    zoom_percent: HtmlElement,
    fullscreen_btn: HtmlButtonElement,
    zoom_in_btn: HtmlButtonElement,
    zoom_out_btn: HtmlButtonElement,
    loading: HtmlElement,
}

struct ViewerState {
    pager: Pager,
    zoom: f64,
    /// Canvas CSS size as rendered, before the display transform.
    base_width: f64,
    base_height: f64,
    phase: ViewerPhase,
}

pub(crate) struct PdfViewer {
    elements: ViewerElements,
    document: RefCell<Option<pdfjs::PdfDocument>>,
    state: RefCell<ViewerState>,
    render_seq: RefCell<RenderSeq>,
    active_render: RefCell<Option<pdfjs::RenderTask>>,
    drag: Cell<Option<DragAnchor>>,
    touch_pan: Cell<Option<TouchPan>>,
    pinch: Cell<Option<Pinch>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl PdfViewer {
    /// Activates only when the mount point exists and names a source
    /// document; anything else is a silent no-op.
    pub(crate) fn mount(document: &Document) -> Option<Rc<Self>> {
        let mount = document.get_element_by_id(MOUNT_ID)?;
        let Some(pdf_url) = mount.get_attribute(PDF_PATH_ATTR) else {
            console::warn!("pdf viewer: mount point has no document path");
            return None;
        };
        let elements = match build_viewer_dom(document, &mount) {
            Ok(elements) => elements,
            Err(err) => {
                console::warn!("pdf viewer: dom build failed", dom::js_err(err));
                return None;
            }
        };
        let viewer = Rc::new(Self {
            elements,
            document: RefCell::new(None),
            state: RefCell::new(ViewerState {
                pager: Pager::new(),
                zoom: ZOOM_DEFAULT,
                base_width: 0.0,
                base_height: 0.0,
                phase: ViewerPhase::Booting,
            }),
            render_seq: RefCell::new(RenderSeq::new()),
            active_render: RefCell::new(None),
            drag: Cell::new(None),
            touch_pan: Cell::new(None),
            pinch: Cell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        viewer.attach_listeners();
        viewer.start_load(pdf_url);
        Some(viewer)
    }

    fn start_load(self: &Rc<Self>, url: String) {
        self.set_phase(ViewerPhase::LoadingEngine);
        let viewer = Rc::clone(self);
        spawn_local(async move {
            if let Err(err) = viewer.load(url).await {
                viewer.fail(err);
            }
        });
    }

    async fn load(self: &Rc<Self>, url: String) -> Result<(), ViewerError> {
        pdfjs::ensure_engine().await?;
        self.set_phase(ViewerPhase::LoadingDocument);
        let document = pdfjs::open_document(&url).await?;
        let total = document.page_count();
        *self.document.borrow_mut() = Some(document);
        self.state.borrow_mut().pager.set_total(total);
        let _ = self.elements.loading.style().set_property("display", "none");
        console::log!("pdf loaded, pages:", total);
        self.update_page_info();
        self.render_current();
        Ok(())
    }

    /// Terminal load failure: message replaces the loading indicator,
    /// no retry.
    fn fail(&self, err: ViewerError) {
        self.set_phase(ViewerPhase::Failed);
        console::error!("pdf viewer:", err.to_string());
        if let Some(message) = err.user_message() {
            self.elements.loading.set_text_content(Some(message));
        }
    }

    fn set_phase(&self, phase: ViewerPhase) {
        self.state.borrow_mut().phase = phase;
    }

    fn go_prev(self: &Rc<Self>) {
        if self.state.borrow_mut().pager.prev().is_some() {
            self.render_current();
        }
    }

    fn go_next(self: &Rc<Self>) {
        if self.state.borrow_mut().pager.next().is_some() {
            self.render_current();
        }
    }

    /// Starts rasterizing the current page, superseding any outstanding
    /// render.
    fn render_current(self: &Rc<Self>) {
        if self.state.borrow().phase.is_terminal() || self.document.borrow().is_none() {
            return;
        }
        if let Some(task) = self.active_render.borrow_mut().take() {
            task.cancel();
        }
        let pass = self.render_seq.borrow_mut().begin();
        self.set_phase(ViewerPhase::Rendering);
        let viewer = Rc::clone(self);
        spawn_local(async move {
            match viewer.render_pass(pass).await {
                Ok(()) => {}
                Err(err) if err.is_cancelled() => {}
                Err(err) => {
                    console::warn!("page render failed", err.to_string());
                    viewer.set_phase(ViewerPhase::Idle);
                }
            }
        });
    }

    async fn render_pass(self: &Rc<Self>, pass: RenderPass) -> Result<(), ViewerError> {
        let (doc, page_index) = {
            let doc = self.document.borrow().clone();
            let page_index = self.state.borrow().pager.current();
            (doc, page_index)
        };
        let Some(doc) = doc else {
            return Ok(());
        };
        let page = doc.page(page_index).await?;
        if !self.render_seq.borrow().is_current(&pass) {
            return Err(ViewerError::Cancelled);
        }

        let rotation = page.rotation();
        let viewport = page.viewport(RENDER_SCALE, rotation)?;
        let width = viewport.width();
        let height = viewport.height();
        let pixel_ratio = web_sys::window()
            .map(|window| window.device_pixel_ratio())
            .unwrap_or(1.0);

        // Backing store at device resolution, CSS size at viewport size.
        let canvas = &self.elements.canvas;
        canvas.set_width((width * pixel_ratio) as u32);
        canvas.set_height((height * pixel_ratio) as u32);
        let canvas_style = canvas.style();
        let _ = canvas_style.set_property("width", &format!("{width}px"));
        let _ = canvas_style.set_property("height", &format!("{height}px"));
        {
            let mut state = self.state.borrow_mut();
            state.base_width = width;
            state.base_height = height;
        }

        let task = page.render(&self.elements.ctx, &viewport, pixel_ratio)?;
        *self.active_render.borrow_mut() = Some(task.clone());
        let completion = task.completed().await;
        if !self.render_seq.borrow_mut().finish(&pass) {
            return Err(ViewerError::Cancelled);
        }
        self.active_render.borrow_mut().take();
        completion?;

        // Fresh raster: scroll home, reapply the display zoom to the
        // new dimensions, refresh label and button state.
        self.elements.container.set_scroll_left(0);
        self.elements.container.set_scroll_top(0);
        let current_zoom = self.state.borrow().zoom;
        self.apply_zoom(current_zoom);
        self.update_page_info();
        self.set_phase(ViewerPhase::Idle);
        Ok(())
    }

    /// Single funnel for every zoom path. Clamps, sets the canvas
    /// transform, resizes the scrollable wrapper to the zoomed
    /// footprint, and syncs slider and percent label.
    fn apply_zoom(&self, requested: f64) {
        let zoom = clamp_zoom(requested);
        let (base_width, base_height) = {
            let mut state = self.state.borrow_mut();
            state.zoom = zoom;
            (state.base_width, state.base_height)
        };
        let canvas_style = self.elements.canvas.style();
        let _ = canvas_style.set_property("transform", &format!("scale({zoom})"));
        let _ = canvas_style.set_property("transform-origin", "0 0");
        let wrapper_style = self.elements.canvas_wrapper.style();
        let _ = wrapper_style.set_property("width", &format!("{}px", base_width * zoom));
        let _ = wrapper_style.set_property("height", &format!("{}px", base_height * zoom));
        self.elements.zoom_slider.set_value(&zoom.to_string());
        self.elements
            .zoom_percent
            .set_text_content(Some(&percent_label(zoom)));
    }

    fn update_page_info(&self) {
        let state = self.state.borrow();
        self.elements
            .page_info
            .set_text_content(Some(&state.pager.label()));
        self.elements.prev_btn.set_disabled(!state.pager.can_prev());
        self.elements.next_btn.set_disabled(!state.pager.can_next());
    }

    fn toggle_fullscreen(&self) {
        let Some(document) = dom::document() else {
            return;
        };
        if document.fullscreen_element().is_none() {
            if self.elements.wrapper.request_fullscreen().is_ok() {
                let _ = self.elements.wrapper.class_list().add_1(FULLSCREEN_CLASS);
            }
        } else {
            self.exit_fullscreen(&document);
        }
    }

    fn exit_fullscreen(&self, document: &Document) {
        document.exit_fullscreen();
        let _ = self.elements.wrapper.class_list().remove_1(FULLSCREEN_CLASS);
    }

    fn is_fullscreen(&self) -> bool {
        self.elements.wrapper.class_list().contains(FULLSCREEN_CLASS)
    }

    fn attach_listeners(self: &Rc<Self>) {
        let mut listeners = self.listeners.borrow_mut();

        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.prev_btn,
            "click",
            move |_: &Event| viewer.go_prev(),
        ));

        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.next_btn,
            "click",
            move |_: &Event| viewer.go_next(),
        ));

        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.fullscreen_btn,
            "click",
            move |_: &Event| viewer.toggle_fullscreen(),
        ));

        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.zoom_in_btn,
            "click",
            move |_: &Event| {
                let current = viewer.state.borrow().zoom;
                viewer.apply_zoom(zoom::step_in(current));
            },
        ));

        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.zoom_out_btn,
            "click",
            move |_: &Event| {
                let current = viewer.state.borrow().zoom;
                viewer.apply_zoom(zoom::step_out(current));
            },
        ));

        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.zoom_slider,
            "input",
            move |_: &Event| {
                if let Ok(value) = viewer.elements.zoom_slider.value().parse::<f64>() {
                    viewer.apply_zoom(value);
                }
            },
        ));

        self.attach_wheel_zoom(&mut listeners);
        self.attach_mouse_drag(&mut listeners);
        self.attach_touch(&mut listeners);
        self.attach_keyboard(&mut listeners);
    }

    fn attach_wheel_zoom(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        let viewer = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.elements.container,
            "wheel",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                if !event.ctrl_key() && !event.meta_key() {
                    return;
                }
                event.prevent_default();
                let current = viewer.state.borrow().zoom;
                viewer.apply_zoom(zoom::from_wheel(current, event.delta_y()));
            },
        ));
    }

    fn attach_mouse_drag(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.container,
            "mousedown",
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let container = &viewer.elements.container;
                viewer.drag.set(Some(DragAnchor::begin(
                    event.client_x() as f64,
                    event.client_y() as f64,
                    container.scroll_left() as f64,
                    container.scroll_top() as f64,
                )));
                let _ = container.class_list().add_1(DRAGGING_CLASS);
            },
        ));

        let viewer = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.elements.container,
            "mousemove",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                let Some(anchor) = viewer.drag.get() else {
                    return;
                };
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                event.prevent_default();
                let (left, top) =
                    anchor.scroll_for(event.client_x() as f64, event.client_y() as f64);
                let container = &viewer.elements.container;
                container.set_scroll_left(left as i32);
                container.set_scroll_top(top as i32);
            },
        ));

        for release_event in ["mouseup", "mouseleave"] {
            let viewer = Rc::clone(self);
            listeners.push(EventListener::new(
                &self.elements.container,
                release_event,
                move |_: &Event| {
                    viewer.drag.set(None);
                    let _ = viewer
                        .elements
                        .container
                        .class_list()
                        .remove_1(DRAGGING_CLASS);
                },
            ));
        }
    }

    fn attach_touch(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.container,
            "touchstart",
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let touches = event.touches();
                match touches.length() {
                    1 => {
                        if let Some(touch) = touches.get(0) {
                            viewer.touch_pan.set(Some(TouchPan::begin(
                                touch.client_x() as f64,
                                touch.client_y() as f64,
                            )));
                        }
                    }
                    2 => {
                        viewer.touch_pan.set(None);
                        if let (Some(a), Some(b)) = (touches.get(0), touches.get(1)) {
                            let distance = touch_distance(
                                (a.client_x() - b.client_x()) as f64,
                                (a.client_y() - b.client_y()) as f64,
                            );
                            let start_zoom = viewer.state.borrow().zoom;
                            viewer.pinch.set(Some(Pinch::begin(distance, start_zoom)));
                        }
                    }
                    _ => {}
                }
            },
        ));

        let viewer = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.elements.container,
            "touchmove",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let touches = event.touches();
                if touches.length() == 1 {
                    let Some(touch) = touches.get(0) else {
                        return;
                    };
                    let Some(mut pan) = viewer.touch_pan.get() else {
                        return;
                    };
                    let (dx, dy) =
                        pan.advance(touch.client_x() as f64, touch.client_y() as f64);
                    viewer.touch_pan.set(Some(pan));
                    let container = &viewer.elements.container;
                    container.set_scroll_left(container.scroll_left() + dx as i32);
                    container.set_scroll_top(container.scroll_top() + dy as i32);
                } else if touches.length() == 2 {
                    let Some(pinch) = viewer.pinch.get() else {
                        return;
                    };
                    let (Some(a), Some(b)) = (touches.get(0), touches.get(1)) else {
                        return;
                    };
                    event.prevent_default();
                    let distance = touch_distance(
                        (a.client_x() - b.client_x()) as f64,
                        (a.client_y() - b.client_y()) as f64,
                    );
                    viewer.apply_zoom(pinch.zoom_for(distance));
                }
            },
        ));

        for end_event in ["touchend", "touchcancel"] {
            let viewer = Rc::clone(self);
            listeners.push(EventListener::new(
                &self.elements.container,
                end_event,
                move |event: &Event| {
                    let Some(event) = event.dyn_ref::<TouchEvent>() else {
                        return;
                    };
                    let remaining = event.touches().length();
                    if remaining < 2 {
                        viewer.pinch.set(None);
                    }
                    if remaining == 0 {
                        viewer.touch_pan.set(None);
                    }
                },
            ));
        }
    }

    /// Arrow keys page only while fullscreen, so the viewer never
    /// hijacks normal page scrolling; Escape exits.
    fn attach_keyboard(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        let Some(document) = dom::document() else {
            return;
        };

        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(&document, "keydown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if !viewer.is_fullscreen() {
                return;
            }
            match event.key().as_str() {
                "ArrowLeft" => viewer.go_prev(),
                "ArrowRight" => viewer.go_next(),
                "Escape" => {
                    if let Some(document) = dom::document() {
                        viewer.exit_fullscreen(&document);
                    }
                }
                _ => {}
            }
        }));

        // Keep the marker class honest when the browser leaves
        // fullscreen on its own (native Escape handling).
        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(
            &document,
            "fullscreenchange",
            move |_: &Event| {
                let Some(document) = dom::document() else {
                    return;
                };
                if document.fullscreen_element().is_none() {
                    let _ = viewer
                        .elements
                        .wrapper
                        .class_list()
                        .remove_1(FULLSCREEN_CLASS);
                }
            },
        ));
    }
}

fn build_viewer_dom(document: &Document, mount: &Element) -> Result<ViewerElements, JsValue> {
    let wrapper: HtmlElement = dom::create(document, "div")?;
    wrapper.set_class_name("pdf-viewer-wrapper");

    let container: HtmlElement = dom::create(document, "div")?;
    container.set_class_name("pdf-canvas-container");
    container.set_id("pdf-canvas-container");

    let canvas_wrapper: HtmlElement = dom::create(document, "div")?;
    canvas_wrapper.set_class_name("pdf-canvas-wrapper");
    canvas_wrapper.set_id("pdf-canvas-wrapper");

    let canvas: HtmlCanvasElement = dom::create(document, "canvas")?;
    canvas.set_id("pdf-canvas");

    canvas_wrapper.append_child(&canvas)?;
    container.append_child(&canvas_wrapper)?;
    wrapper.append_child(&container)?;

    let prev_btn = nav_button(document, "pdf-nav-btn pdf-prev", "pdf-prev", "Previous page", "←")?;
    let next_btn = nav_button(document, "pdf-nav-btn pdf-next", "pdf-next", "Next page", "→")?;
    wrapper.append_child(&prev_btn)?;
    wrapper.append_child(&next_btn)?;

    let controls: HtmlElement = dom::create(document, "div")?;
    controls.set_class_name("pdf-controls");

    let page_info: HtmlElement = dom::create(document, "span")?;
    page_info.set_class_name("pdf-page-info");
    page_info.set_id("pdf-page-info");
    page_info.set_text_content(Some("Page 1 of 1"));
    controls.append_child(&page_info)?;

    let fullscreen_btn = nav_button(
        document,
        "pdf-fullscreen-btn",
        "pdf-fullscreen",
        "Fullscreen",
        "⛶",
    )?;
    controls.append_child(&fullscreen_btn)?;
    wrapper.append_child(&controls)?;

    let zoom_controls: HtmlElement = dom::create(document, "div")?;
    zoom_controls.set_class_name("pdf-zoom-controls");

    let zoom_out_btn = nav_button(document, "zoom-btn zoom-out", "zoom-out", "Zoom out", "−")?;
    zoom_controls.append_child(&zoom_out_btn)?;

    let zoom_slider: HtmlInputElement = dom::create(document, "input")?;
    zoom_slider.set_type("range");
    zoom_slider.set_class_name("zoom-slider");
    zoom_slider.set_id("zoom-slider");
    zoom_slider.set_min(&ZOOM_MIN.to_string());
    zoom_slider.set_max(&ZOOM_MAX.to_string());
    zoom_slider.set_step(&ZOOM_STEP.to_string());
    zoom_slider.set_value(&ZOOM_DEFAULT.to_string());
    zoom_slider.set_attribute("aria-label", "Zoom level")?;
    zoom_controls.append_child(&zoom_slider)?;

    let zoom_in_btn = nav_button(document, "zoom-btn zoom-in", "zoom-in", "Zoom in", "+")?;
    zoom_controls.append_child(&zoom_in_btn)?;

    let zoom_percent: HtmlElement = dom::create(document, "span")?;
    zoom_percent.set_class_name("zoom-percent");
    zoom_percent.set_id("zoom-percent");
    zoom_percent.set_text_content(Some(&percent_label(ZOOM_DEFAULT)));
    zoom_controls.append_child(&zoom_percent)?;
    wrapper.append_child(&zoom_controls)?;

    let loading: HtmlElement = dom::create(document, "div")?;
    loading.set_class_name("pdf-loading");
    loading.set_id("pdf-loading");
    loading.set_text_content(Some("Loading PDF..."));
    wrapper.append_child(&loading)?;

    mount.set_inner_html("");
    mount.append_child(&wrapper)?;

    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    Ok(ViewerElements {
        wrapper,
        container,
        canvas_wrapper,
        canvas,
        ctx,
        prev_btn,
        next_btn,
        page_info,
        zoom_slider,
        zoom_percent,
        fullscreen_btn,
        zoom_in_btn,
        zoom_out_btn,
        loading,
    })
}

fn nav_button(
    document: &Document,
    class: &str,
    id: &str,
    label: &str,
    glyph: &str,
) -> Result<HtmlButtonElement, JsValue> {
    let button: HtmlButtonElement = dom::create(document, "button")?;
    button.set_class_name(class);
    button.set_id(id);
    button.set_attribute("aria-label", label)?;
    button.set_text_content(Some(glyph));
    Ok(button)
}
