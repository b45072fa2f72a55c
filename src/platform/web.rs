//! Browser DOM helpers: canvas, overlay and ball image loading

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlImageElement, Window};

use super::{INSTRUCTIONS_HTML, INSTRUCTIONS_STYLE, canvas_pixel_size};
use crate::error::SceneError;
use crate::textures::{BallMap, BallTextures};

pub fn window() -> Result<Window, SceneError> {
    web_sys::window().ok_or(SceneError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, SceneError> {
    window.document().ok_or(SceneError::NoDocument)
}

fn body(document: &Document) -> Result<HtmlElement, SceneError> {
    document
        .body()
        .ok_or_else(|| SceneError::Dom("document has no body".to_string()))
}

/// Canvas backing-store size for the current window
pub fn window_pixel_size(window: &Window) -> (u32, u32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    canvas_pixel_size(width, height, window.device_pixel_ratio())
}

/// Create a full-window canvas and append it to `<body>`
pub fn create_canvas(window: &Window, document: &Document) -> Result<HtmlCanvasElement, SceneError> {
    let body = body(document)?;
    let body_style = body.style();
    body_style.set_property("margin", "0")?;
    body_style.set_property("overflow", "hidden")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| SceneError::Dom("created element is not a canvas".to_string()))?;
    let style = canvas.style();
    style.set_property("display", "block")?;
    style.set_property("width", "100vw")?;
    style.set_property("height", "100vh")?;
    style.set_property("touch-action", "none")?;

    let (width, height) = window_pixel_size(window);
    canvas.set_width(width);
    canvas.set_height(height);
    body.append_child(&canvas)?;

    log::info!("Canvas {}x{} appended to body", width, height);
    Ok(canvas)
}

/// Append the controls overlay to `<body>`
pub fn show_instructions(document: &Document) -> Result<(), SceneError> {
    let overlay: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| SceneError::Dom("created element is not an HTML element".to_string()))?;
    let style = overlay.style();
    for (property, value) in INSTRUCTIONS_STYLE {
        style.set_property(property, value)?;
    }
    overlay.set_inner_html(INSTRUCTIONS_HTML);
    body(document)?.append_child(&overlay)?;
    Ok(())
}

/// Page query string, e.g. `?color=raw`
pub fn query_string(window: &Window) -> String {
    window.location().search().unwrap_or_default()
}

/// Outcome of one ball image, delivered from a DOM callback
pub enum ImageEvent {
    Loaded(BallMap, HtmlImageElement),
    Failed(BallMap, String),
}

/// Filled by image callbacks, drained by the frame loop
pub type ImageQueue = Rc<RefCell<Vec<ImageEvent>>>;

/// Start loading every ball map. Results arrive in `queue` in whatever order
/// the browser finishes them.
pub fn load_ball_maps(textures: &BallTextures, queue: &ImageQueue) -> Result<(), SceneError> {
    for map in BallMap::ALL {
        let url = textures.url(map);
        let image = HtmlImageElement::new()?;
        image.set_cross_origin(Some("anonymous"));

        let onload = {
            let queue = queue.clone();
            let image = image.clone();
            Closure::<dyn FnMut()>::new(move || {
                queue
                    .borrow_mut()
                    .push(ImageEvent::Loaded(map, image.clone()));
            })
        };
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror = {
            let queue = queue.clone();
            let url = url.clone();
            Closure::<dyn FnMut()>::new(move || {
                queue
                    .borrow_mut()
                    .push(ImageEvent::Failed(map, format!("could not load {url}")));
            })
        };
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        log::debug!("Requesting {}", url);
        image.set_src(&url);
    }
    Ok(())
}
