use gloo::events::EventListener;
use shared::billing::{custom_field_hidden, next_payment_preview};
use std::rc::Rc;
use web_sys::{Document, Element};

use crate::services::{dom, Logger};

const COMPONENT: &str = "billing-cycle";

const CYCLE_SELECT_ID: &str = "id_billing_cycle";
const CUSTOM_FIELD_IDS: [&str; 2] = ["custom-months-field", "custom-months-wrapper"];
const CUSTOM_MONTHS_INPUT_ID: &str = "id_custom_months";
const START_INPUT_IDS: [&str; 2] = ["start-month", "id_start_billing_month"];
const PREVIEW_IDS: [&str; 2] = ["next-payment-date", "next-payment-preview"];

/// The billing fields of a student form. Only the cycle select is required;
/// the rest are optional on any given page.
pub struct BillingForm {
    cycle: Element,
    custom_field: Option<Element>,
    custom_months: Option<Element>,
    start: Option<Element>,
    preview: Option<Element>,
}

impl BillingForm {
    pub fn find(document: &Document) -> Option<Self> {
        let cycle = document.get_element_by_id(CYCLE_SELECT_ID)?;
        Some(Self {
            cycle,
            custom_field: dom::first_element(document, &CUSTOM_FIELD_IDS),
            custom_months: document.get_element_by_id(CUSTOM_MONTHS_INPUT_ID),
            start: dom::first_element(document, &START_INPUT_IDS),
            preview: dom::first_element(document, &PREVIEW_IDS),
        })
    }

    fn cycle_value(&self) -> String {
        dom::value_of(&self.cycle).unwrap_or_default()
    }

    /// Show the custom months field only for the custom cycle
    pub fn sync_visibility(&self) {
        if let Some(field) = &self.custom_field {
            dom::set_hidden(field, custom_field_hidden(&self.cycle_value()));
        }
    }

    /// Recompute the next payment date, or the placeholder if the inputs
    /// don't give one
    pub fn sync_preview(&self) {
        let (Some(start), Some(preview)) = (&self.start, &self.preview) else {
            return;
        };
        let start_value = dom::value_of(start).unwrap_or_default();
        let custom_months = self.custom_months.as_ref().and_then(dom::value_of);
        let text = next_payment_preview(&start_value, &self.cycle_value(), custom_months.as_deref());
        dom::set_display_text(preview, &text);
    }

    pub fn sync(&self) {
        self.sync_visibility();
        self.sync_preview();
    }
}

/// Apply the toggles now and on every edit of the billing fields
pub fn bind(document: &Document) -> Vec<EventListener> {
    let Some(form) = BillingForm::find(document) else {
        Logger::debug_with_component(COMPONENT, "No billing cycle select on this page");
        return Vec::new();
    };
    let form = Rc::new(form);
    form.sync();

    let mut listeners = Vec::new();
    {
        let synced = form.clone();
        listeners.push(EventListener::new(&form.cycle, "change", move |_| synced.sync()));
    }

    let previewed: Vec<Element> = [&form.start, &form.custom_months]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    for input in previewed {
        for event in ["change", "input"] {
            let synced = form.clone();
            listeners.push(EventListener::new(&input, event, move |_| synced.sync_preview()));
        }
    }

    listeners
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Event, HtmlInputElement, HtmlSelectElement};

    wasm_bindgen_test_configure!(run_in_browser);

    struct Fixture {
        root: Element,
        select: HtmlSelectElement,
        wrapper: Element,
        start: HtmlInputElement,
        preview: Element,
    }

    fn fixture(initial_cycle: &str) -> Fixture {
        let document = dom::document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(
            r#"<select id="id_billing_cycle">
                   <option value="MONTHLY">Monthly</option>
                   <option value="QUARTERLY">Quarterly</option>
                   <option value="ANNUAL">Annual</option>
                   <option value="CUSTOM">Custom</option>
               </select>
               <div id="custom-months-field"><input id="id_custom_months" value="2"></div>
               <input id="start-month" value="2024-01">
               <span id="next-payment-date"></span>"#,
        );
        document.body().unwrap().append_child(&root).unwrap();

        let select: HtmlSelectElement = document.get_element_by_id("id_billing_cycle").unwrap().unchecked_into();
        select.set_value(initial_cycle);
        Fixture {
            root,
            select,
            wrapper: document.get_element_by_id("custom-months-field").unwrap(),
            start: document.get_element_by_id("start-month").unwrap().unchecked_into(),
            preview: document.get_element_by_id("next-payment-date").unwrap(),
        }
    }

    fn fire(target: &Element, kind: &str) {
        target.dispatch_event(&Event::new(kind).unwrap()).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_custom_field_follows_cycle() {
        let f = fixture("MONTHLY");
        let _listeners = bind(&dom::document().unwrap());
        assert!(f.wrapper.class_list().contains("hidden"));
        assert_eq!(f.preview.text_content().unwrap(), "2024-02");

        f.select.set_value("CUSTOM");
        fire(&f.select, "change");
        assert!(!f.wrapper.class_list().contains("hidden"));
        assert_eq!(f.preview.text_content().unwrap(), "2024-03");

        f.select.set_value("QUARTERLY");
        fire(&f.select, "change");
        assert!(f.wrapper.class_list().contains("hidden"));
        assert_eq!(f.preview.text_content().unwrap(), "2024-04");
        f.root.remove();
    }

    #[wasm_bindgen_test]
    fn test_invalid_start_clears_preview() {
        let f = fixture("ANNUAL");
        let _listeners = bind(&dom::document().unwrap());
        assert_eq!(f.preview.text_content().unwrap(), "2025-01");

        f.start.set_value("");
        fire(&f.start, "input");
        assert_eq!(f.preview.text_content().unwrap(), shared::NEXT_DATE_PLACEHOLDER);
        f.root.remove();
    }
}
