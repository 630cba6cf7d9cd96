use shared::Series;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlCanvasElement};

use super::definitions::{self, ChartDefinition};
use super::renderer::ChartHandle;
use super::{canvas_for, fetch_series};
use crate::components::toast::{self, ToastKind};
use crate::services::polling::{Poller, RequestSequencer, Ticket};
use crate::services::{ApiClient, DashboardConfig, DashboardError, Logger};

pub const UPDATED_MESSAGE: &str = "📊 Invoice chart updated";
pub const FAILED_MESSAGE: &str = "⚠️ Failed to update chart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Applied {
    Created,
    Updated,
}

/// The invoice status donut and everything it needs between polls
struct LiveChart {
    definition: ChartDefinition,
    canvas: HtmlCanvasElement,
    api: ApiClient,
    toast_duration_ms: u32,
    chart: RefCell<Option<ChartHandle>>,
    sequencer: RefCell<RequestSequencer>,
}

impl LiveChart {
    /// First data builds the chart; later data updates it in place
    fn apply(&self, series: Series) -> Result<Applied, DashboardError> {
        let mut chart = self.chart.borrow_mut();
        match chart.as_mut() {
            Some(existing) => {
                existing.update(series)?;
                Ok(Applied::Updated)
            }
            None => {
                *chart = Some(ChartHandle::create(
                    self.canvas.clone(),
                    self.definition.kind.clone(),
                    series,
                )?);
                Ok(Applied::Created)
            }
        }
    }

    fn new(definition: ChartDefinition, canvas: HtmlCanvasElement, api: &ApiClient, config: &DashboardConfig) -> Self {
        Self {
            definition,
            canvas,
            api: api.clone(),
            toast_duration_ms: config.toast_duration_ms,
            chart: RefCell::new(None),
            sequencer: RefCell::new(RequestSequencer::new()),
        }
    }

    /// Close out one request. `None` means a newer response already won and
    /// this one was dropped.
    fn settle(&self, ticket: Ticket, result: Result<Series, DashboardError>) -> Option<Result<Applied, DashboardError>> {
        let fresh = self.sequencer.borrow_mut().finish(ticket);
        match result {
            Ok(series) if fresh => Some(self.apply(series)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        }
    }

    fn begin(&self, initial: bool) -> Option<Ticket> {
        let mut sequencer = self.sequencer.borrow_mut();
        if initial {
            Some(sequencer.begin())
        } else {
            sequencer.try_begin()
        }
    }
}

/// Draw the invoice status chart and keep it fresh. Returns the poller,
/// which stops refreshing when dropped, or `None` if the page has no such
/// chart.
pub fn start_invoice_status(document: &Document, api: &ApiClient, config: &DashboardConfig) -> Option<Poller> {
    let definition = definitions::invoice_status();
    let canvas = match canvas_for(document, &definition) {
        Ok(canvas) => canvas,
        Err(e) => {
            Logger::debug_with_component(definition.component, &e.to_string());
            return None;
        }
    };

    let live = Rc::new(LiveChart::new(definition, canvas, api, config));

    refresh(live.clone(), true);

    let ticking = live.clone();
    Some(Poller::start(config.invoice_poll_interval_ms, move || {
        refresh(ticking.clone(), false)
    }))
}

fn refresh(live: Rc<LiveChart>, initial: bool) {
    let component = live.definition.component;
    let Some(ticket) = live.begin(initial) else {
        Logger::debug_with_component(component, "Previous refresh still running, skipping this tick");
        return;
    };

    spawn_local(async move {
        let result = fetch_series(&live.api, live.definition.endpoint).await;
        let Some(outcome) = live.settle(ticket, result) else {
            Logger::debug_with_component(component, "Discarding out-of-date response");
            return;
        };

        match outcome {
            Ok(Applied::Created) => {
                Logger::debug_with_component(component, "Invoice status chart created");
            }
            Ok(Applied::Updated) => {
                toast::show(UPDATED_MESSAGE, ToastKind::Info, live.toast_duration_ms);
            }
            Err(e) => {
                Logger::error_with_component(component, &format!("Error loading invoice status chart: {}", e));
                toast::show(FAILED_MESSAGE, ToastKind::Error, live.toast_duration_ms);
            }
        }
    });
}
