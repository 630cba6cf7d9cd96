use gloo::events::EventListener;
use shared::selection::{format_total, selection_total};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::services::{dom, Logger};

const COMPONENT: &str = "selection-total";

/// Where one group of checkboxes lives on the page and where its total goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionGroup {
    pub item_selector: &'static str,
    /// Candidate ids for the total display; the first one present wins
    pub total_ids: &'static [&'static str],
    pub select_all_id: Option<&'static str>,
}

pub const INVOICES: SelectionGroup = SelectionGroup {
    item_selector: ".invoice-checkbox",
    total_ids: &["selected-total"],
    select_all_id: Some("select-all"),
};

pub const FEES: SelectionGroup = SelectionGroup {
    item_selector: ".fee-checkbox",
    total_ids: &["total-fee", "total-fees"],
    select_all_id: None,
};

/// A group resolved against the page. Items are collected once at bind time.
struct BoundGroup {
    items: Vec<HtmlInputElement>,
    total: Element,
}

impl BoundGroup {
    fn resolve(document: &Document, group: &SelectionGroup) -> Option<Self> {
        let total = dom::first_element(document, group.total_ids)?;
        let items = dom::query_all(document, group.item_selector)
            .into_iter()
            .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
            .collect();
        Some(Self { items, total })
    }

    fn recompute(&self) {
        let amounts: Vec<(bool, String)> = self
            .items
            .iter()
            .map(|item| (item.checked(), item.get_attribute("data-amount").unwrap_or_default()))
            .collect();
        let total = selection_total(amounts.iter().map(|(checked, amount)| (*checked, amount.as_str())));
        dom::set_display_text(&self.total, &format_total(total));
    }

    fn set_all(&self, checked: bool) {
        for item in &self.items {
            item.set_checked(checked);
        }
        self.recompute();
    }
}

/// Keep the group's total in step with its checkboxes
pub fn bind_group(document: &Document, group: &SelectionGroup) -> Vec<EventListener> {
    let Some(bound) = BoundGroup::resolve(document, group) else {
        Logger::debug_with_component(
            COMPONENT,
            &format!("No total display for {}", group.item_selector),
        );
        return Vec::new();
    };
    let bound = Rc::new(bound);
    bound.recompute();

    let mut listeners: Vec<EventListener> = bound
        .items
        .iter()
        .map(|item| {
            let group = bound.clone();
            EventListener::new(item, "change", move |_| group.recompute())
        })
        .collect();

    let select_all = group
        .select_all_id
        .and_then(|id| document.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok());
    if let Some(select_all) = select_all {
        let group = bound.clone();
        let toggle = select_all.clone();
        listeners.push(EventListener::new(&select_all, "change", move |_| {
            group.set_all(toggle.checked())
        }));
    }

    listeners
}

pub fn bind(document: &Document) -> Vec<EventListener> {
    [INVOICES, FEES]
        .iter()
        .flat_map(|group| bind_group(document, group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_do_not_share_selectors() {
        assert_ne!(INVOICES.item_selector, FEES.item_selector);
        assert!(INVOICES.total_ids.iter().all(|id| !FEES.total_ids.contains(id)));
        assert!(FEES.select_all_id.is_none());
    }
}
