use gloo::events::EventListener;
use gloo::storage::{SessionStorage, Storage};
use std::rc::Rc;
use web_sys::Window;

use super::logging::Logger;

const COMPONENT: &str = "scroll-position";

/// Somewhere to keep a scroll offset between an unload and the next load
pub trait ScrollStore {
    fn load(&self, key: &str) -> Option<f64>;
    fn save(&self, key: &str, offset: f64);
    fn clear(&self, key: &str);
}

/// Browser session storage, scoped to the current tab
pub struct SessionScrollStore;

impl ScrollStore for SessionScrollStore {
    fn load(&self, key: &str) -> Option<f64> {
        SessionStorage::get::<f64>(key).ok()
    }

    fn save(&self, key: &str, offset: f64) {
        if let Err(e) = SessionStorage::set(key, offset) {
            Logger::warn_with_component(COMPONENT, &format!("Could not store scroll offset: {}", e));
        }
    }

    fn clear(&self, key: &str) {
        SessionStorage::delete(key);
    }
}

/// Remembers the vertical scroll offset across one navigation or reload
pub struct ScrollPersistence<S: ScrollStore> {
    store: S,
    key: String,
}

impl<S: ScrollStore> ScrollPersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn remember(&self, offset: f64) {
        self.store.save(&self.key, offset.max(0.0).round());
    }

    /// Take the stored offset, if any. It is cleared so a later reload
    /// without scrolling doesn't jump back to a stale position.
    pub fn take(&self) -> Option<f64> {
        let offset = self.store.load(&self.key)?;
        self.store.clear(&self.key);
        Some(offset)
    }
}

/// Save on `beforeunload`, restore once on `load`
pub fn bind(window: &Window, storage_key: &str) -> Vec<EventListener> {
    let persistence = Rc::new(ScrollPersistence::new(SessionScrollStore, storage_key));

    let on_unload = {
        let persistence = persistence.clone();
        let target = window.clone();
        EventListener::new(window, "beforeunload", move |_| {
            persistence.remember(target.scroll_y().unwrap_or(0.0));
        })
    };

    let already_loaded = window
        .document()
        .map(|document| document.ready_state() == "complete")
        .unwrap_or(false);

    let mut listeners = vec![on_unload];
    if already_loaded {
        restore(window, &persistence);
    } else {
        let target = window.clone();
        listeners.push(EventListener::once(window, "load", move |_| {
            restore(&target, &persistence);
        }));
    }
    listeners
}

fn restore(window: &Window, persistence: &ScrollPersistence<SessionScrollStore>) {
    if let Some(offset) = persistence.take() {
        Logger::debug_with_component(COMPONENT, &format!("Restoring scroll offset {}", offset));
        window.scroll_to_with_x_and_y(0.0, offset);
    }
}
