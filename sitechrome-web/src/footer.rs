use web_sys::Document;

/// Write the current year into the footer element `id`, if present.
pub fn set_year(document: &Document, id: &str) {
    if let Some(node) = document.get_element_by_id(id) {
        let year = js_sys::Date::new_0().get_full_year();
        node.set_text_content(Some(&year.to_string()));
    }
}
