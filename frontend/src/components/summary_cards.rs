use shared::{format_grouped, format_money, SummaryResponse};
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::services::{dom, ApiClient, Logger};

const COMPONENT: &str = "summary-cards";

/// Display text for each card, keyed by the element id it goes into
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTexts {
    pub total_revenue: String,
    pub pending_invoices: String,
    pub paid_invoices: String,
    pub total_unpaid: String,
}

impl SummaryTexts {
    pub fn from_summary(summary: &SummaryResponse, currency: &str) -> Self {
        Self {
            total_revenue: format_money(currency, summary.total_revenue),
            pending_invoices: format_grouped(summary.pending_invoices),
            paid_invoices: format!(
                "{} / {}",
                format_grouped(summary.paid_invoices),
                format_grouped(summary.unconfirmed_invoices)
            ),
            total_unpaid: format_money(currency, summary.total_unpaid),
        }
    }

    fn slots(&self) -> [(&'static str, &str); 4] {
        [
            ("totalRevenue", self.total_revenue.as_str()),
            ("pendingInvoices", self.pending_invoices.as_str()),
            ("paidInvoices", self.paid_invoices.as_str()),
            ("totalUnpaid", self.total_unpaid.as_str()),
        ]
    }

    /// Write into whichever slots this page has. Returns how many were filled.
    pub fn write(&self, document: &Document) -> usize {
        self.slots()
            .iter()
            .filter_map(|(id, text)| {
                let element = document.get_element_by_id(id)?;
                dom::set_display_text(&element, text);
                Some(())
            })
            .count()
    }
}

/// Fetch the totals and fill in the summary cards. A failure is logged and
/// the placeholders stay as they are.
pub fn load(document: &Document, api: &ApiClient, currency: &str) {
    let document = document.clone();
    let api = api.clone();
    let currency = currency.to_string();

    spawn_local(async move {
        match api.get_summary().await {
            Ok(summary) => {
                let filled = SummaryTexts::from_summary(&summary, &currency).write(&document);
                Logger::debug_with_component(COMPONENT, &format!("Filled {} summary cards", filled));
            }
            Err(e) => {
                Logger::error_with_component(COMPONENT, &format!("Error loading summary cards: {}", e));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> SummaryResponse {
        SummaryResponse {
            total_revenue: 15250.75,
            pending_invoices: 12.0,
            paid_invoices: 1040.0,
            unconfirmed_invoices: 3.0,
            total_unpaid: 4800.0,
        }
    }

    #[test]
    fn test_card_texts() {
        let texts = SummaryTexts::from_summary(&summary(), "ETB");
        assert_eq!(texts.total_revenue, "ETB 15,250.75");
        assert_eq!(texts.pending_invoices, "12");
        assert_eq!(texts.paid_invoices, "1,040 / 3");
        assert_eq!(texts.total_unpaid, "ETB 4,800");
    }

    #[test]
    fn test_slot_ids() {
        let texts = SummaryTexts::from_summary(&summary(), "ETB");
        let ids: Vec<&str> = texts.slots().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, ["totalRevenue", "pendingInvoices", "paidInvoices", "totalUnpaid"]);
    }
}
