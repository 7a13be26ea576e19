use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, Node, Storage, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Wrap a thrown JavaScript value for `?` in `anyhow` contexts.
#[must_use]
pub fn js_error(value: &JsValue) -> anyhow::Error {
    anyhow::anyhow!(js_error_message(value))
}

/// Log an error message to the browser console.
///
/// Used before the logger is installed.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Look up an element by id as an `HtmlElement`.
#[must_use]
pub fn html_element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Element an event was dispatched to.
///
/// Text node targets resolve to their parent element.
#[must_use]
pub fn event_element(event: &Event) -> Option<Element> {
    let target = event.target()?;
    match target.dyn_into::<Element>() {
        Ok(el) => Some(el),
        Err(other) => other
            .dyn_into::<Node>()
            .ok()
            .and_then(|node| node.parent_element()),
    }
}

/// `closest` that treats an invalid selector as no match.
#[must_use]
pub fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

/// Whether `inner` is `outer` or one of its descendants.
#[must_use]
pub fn contains(outer: &Element, inner: &Element) -> bool {
    let node: &Node = inner;
    outer.contains(Some(node))
}

pub fn set_expanded(element: &Element, expanded: bool) {
    let _ = element.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}
