use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use super::error::DashboardError;

pub fn document() -> Result<Document, DashboardError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| DashboardError::Js("no document available".to_string()))
}

/// Element by id, or `MissingElement` if this page doesn't have it
pub fn require_element(document: &Document, id: &str) -> Result<Element, DashboardError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DashboardError::MissingElement(id.to_string()))
}

/// First element found among several ids. Templates have used different
/// ids for the same slot over time.
pub fn first_element(document: &Document, ids: &[&str]) -> Option<Element> {
    ids.iter().find_map(|id| document.get_element_by_id(id))
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Inputs get their value set, everything else its text content
pub fn set_display_text(element: &Element, text: &str) {
    match element.dyn_ref::<HtmlInputElement>() {
        Some(input) => input.set_value(text),
        None => element.set_text_content(Some(text)),
    }
}

/// Show or hide with the utility `hidden` class the templates use
pub fn set_hidden(element: &Element, hidden: bool) {
    let _ = element.class_list().toggle_with_force("hidden", hidden);
}

/// Current value of an input or select, if the element has one
pub fn value_of(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    element
        .dyn_ref::<web_sys::HtmlSelectElement>()
        .map(|select| select.value())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_hidden_class_toggles() {
        let document = document().unwrap();
        let div = document.create_element("div").unwrap();
        set_hidden(&div, true);
        assert!(div.class_list().contains("hidden"));
        set_hidden(&div, false);
        assert!(!div.class_list().contains("hidden"));
    }

    #[wasm_bindgen_test]
    fn test_missing_element_is_reported() {
        let document = document().unwrap();
        let err = require_element(&document, "definitely-not-here").unwrap_err();
        assert!(err.is_missing_element());
    }
}
