use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::services::{dom, DashboardError, Logger};

const COMPONENT: &str = "clickable-rows";

const ROW_SELECTOR: &str = ".clickable-row";
const INTERACTIVE_SELECTOR: &str = "a, button, input, select, textarea, label";

/// Where a click on `row` should go, if anywhere. Clicks on links and form
/// controls inside the row keep their own behavior.
fn navigation_target(row: &Element, event: &Event) -> Option<String> {
    let href = row.get_attribute("data-href").filter(|href| !href.is_empty())?;
    let origin = event.target()?.dyn_into::<Element>().ok()?;
    match origin.closest(INTERACTIVE_SELECTOR) {
        Ok(Some(interactive)) if row.contains(Some(&*interactive)) => None,
        _ => Some(href),
    }
}

fn navigate(href: &str) -> Result<(), DashboardError> {
    let window = web_sys::window().ok_or_else(|| DashboardError::Js("no window".to_string()))?;
    window.location().set_href(href).map_err(DashboardError::js)
}

pub fn bind(document: &Document) -> Vec<EventListener> {
    dom::query_all(document, ROW_SELECTOR)
        .into_iter()
        .map(|row| {
            let target = row.clone();
            EventListener::new(&row, "click", move |event| {
                if let Some(href) = navigation_target(&target, event) {
                    if let Err(e) = navigate(&href) {
                        Logger::error_with_component(COMPONENT, &format!("Navigation failed: {}", e));
                    }
                }
            })
        })
        .collect()
}
