use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::services::{dom, Logger};

const BASE_CLASSES: &str = "fixed bottom-6 right-6 px-4 py-2 rounded-lg shadow-lg text-white text-sm z-50";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

impl ToastKind {
    fn background(&self) -> &'static str {
        match self {
            ToastKind::Info => "bg-primary-600",
            ToastKind::Error => "bg-red-500",
        }
    }

    pub fn classes(&self) -> String {
        format!("{} {}", BASE_CLASSES, self.background())
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: AttrValue,
    pub kind: ToastKind,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let role = match props.kind {
        ToastKind::Info => "status",
        ToastKind::Error => "alert",
    };

    html! {
        <div class={props.kind.classes()} role={role}>
            { props.message.clone() }
        </div>
    }
}

/// Pop a short-lived notification in the bottom right corner
pub fn show(message: &str, kind: ToastKind, duration_ms: u32) {
    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            Logger::warn_with_component("toast", &e.to_string());
            return;
        }
    };
    let Some(body) = document.body() else {
        return;
    };
    let Ok(host) = document.create_element("div") else {
        Logger::warn_with_component("toast", "Could not create toast container");
        return;
    };
    if body.append_child(&host).is_err() {
        return;
    }

    let app = yew::Renderer::<Toast>::with_root_and_props(
        host.clone(),
        ToastProps {
            message: AttrValue::from(message.to_string()),
            kind,
        },
    )
    .render();

    Timeout::new(duration_ms, move || {
        app.destroy();
        host.remove();
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_by_kind() {
        assert!(ToastKind::Info.classes().ends_with("bg-primary-600"));
        assert!(ToastKind::Error.classes().ends_with("bg-red-500"));
        assert!(ToastKind::Error.classes().starts_with("fixed bottom-6 right-6"));
    }
}
