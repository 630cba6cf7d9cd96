mod components;
mod services;

use gloo::events::EventListener;
use std::cell::RefCell;
use web_sys::{Document, Window};

use components::{billing_cycle, charts, clickable_rows, selection_total, summary_cards};
use services::polling::Poller;
use services::{scroll, service_worker, ApiClient, DashboardConfig, Logger};

const COMPONENT: &str = "dashboard";

/// Page-lifetime state. Dropping it detaches every listener and stops the
/// invoice status poll.
struct Dashboard {
    document: Document,
    api: ApiClient,
    config: DashboardConfig,
    listeners: Vec<EventListener>,
    poller: Option<Poller>,
}

thread_local! {
    static DASHBOARD: RefCell<Option<Dashboard>> = RefCell::new(None);
}

impl Dashboard {
    fn start(window: &Window, document: Document, config: DashboardConfig) -> Self {
        let api = ApiClient::with_base_url(config.api_base_url.clone());

        summary_cards::load(&document, &api, &config.currency_prefix);
        charts::render_charts(&document, &api);
        let poller = charts::start_invoice_status(&document, &api, &config);

        let mut listeners = Vec::new();
        listeners.extend(billing_cycle::bind(&document));
        listeners.extend(selection_total::bind(&document));
        listeners.extend(clickable_rows::bind(&document));
        listeners.extend(scroll::bind(window, &config.scroll_storage_key));

        service_worker::register(window, &config.service_worker_url);

        Self {
            document,
            api,
            config,
            listeners,
            poller,
        }
    }

    fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            Logger::debug_with_component(COMPONENT, "Page hidden, polling stopped");
            poller.cancel();
        }
    }

    /// Back from the back/forward cache
    fn resume_polling(&mut self) {
        if self.poller.is_none() {
            self.poller = charts::start_invoice_status(&self.document, &self.api, &self.config);
        }
    }
}

fn with_dashboard(f: impl FnOnce(&mut Dashboard)) {
    DASHBOARD.with(|slot| {
        if let Some(dashboard) = slot.borrow_mut().as_mut() {
            f(dashboard);
        }
    });
}

fn boot(window: Window) {
    let Some(document) = window.document() else {
        Logger::error_with_component(COMPONENT, "No document to attach to");
        return;
    };
    let config = DashboardConfig::from_document(&document);
    Logger::set_debug(config.debug);

    let mut dashboard = Dashboard::start(&window, document, config);
    dashboard.listeners.push(EventListener::new(&window, "pagehide", |_| {
        with_dashboard(Dashboard::stop_polling)
    }));
    dashboard.listeners.push(EventListener::new(&window, "pageshow", |_| {
        with_dashboard(Dashboard::resume_polling)
    }));

    Logger::debug_with_component(COMPONENT, "Dashboard ready");
    DASHBOARD.with(|slot| *slot.borrow_mut() = Some(dashboard));
}

fn main() {
    // The worker bootstrap loads this module too; its handlers call the
    // exported cache functions directly
    if service_worker::in_worker() {
        return;
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let loading = window
        .document()
        .map(|document| document.ready_state() == "loading")
        .unwrap_or(false);

    if loading {
        let target = window.clone();
        EventListener::once(&window, "DOMContentLoaded", move |_| boot(target)).forget();
    } else {
        boot(window);
    }
}
