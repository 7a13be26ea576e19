//! Applies scroll pins to `<body>`.

use sitechrome_core::{PINNED_PROPERTIES, ScrollPin, ScrollProbe};
use web_sys::{Document, HtmlElement, Window};

/// Read the page's current vertical offset from both sources.
#[must_use]
pub fn probe(window: &Window, document: &Document) -> ScrollProbe {
    ScrollProbe::new(
        window.scroll_y().ok(),
        document
            .document_element()
            .map(|root| f64::from(root.scroll_top())),
    )
}

/// Fix the body in place at the pinned offset.
pub fn pin(body: &HtmlElement, pin: &ScrollPin) {
    let style = body.style();
    for (property, value) in pin.styles() {
        let _ = style.set_property(property, &value);
    }
}

/// Clear the pin and scroll back to `offset`.
pub fn release(window: &Window, body: &HtmlElement, offset: f64) {
    let style = body.style();
    for property in PINNED_PROPERTIES {
        let _ = style.remove_property(property);
    }
    window.scroll_to_with_x_and_y(0.0, offset);
}
