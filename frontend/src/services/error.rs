use shared::SeriesError;
use wasm_bindgen::JsValue;

/// Everything that can go wrong while enhancing a dashboard page.
///
/// None of these are fatal; each unit logs its own failure and the rest of
/// the page keeps working.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("malformed series: {0}")]
    MalformedSeries(#[from] SeriesError),

    #[error("element #{0} is not on this page")]
    MissingElement(String),

    #[error("failed to draw chart: {0}")]
    Render(String),

    #[error("browser call failed: {0}")]
    Js(String),
}

impl DashboardError {
    /// Wrap a rejected promise or thrown JS value
    pub fn js(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        DashboardError::Js(message)
    }

    pub fn render(err: impl std::fmt::Display) -> Self {
        DashboardError::Render(err.to_string())
    }

    pub fn is_missing_element(&self) -> bool {
        matches!(self, DashboardError::MissingElement(_))
    }
}

impl From<gloo::net::Error> for DashboardError {
    fn from(err: gloo::net::Error) -> Self {
        DashboardError::Network(err.to_string())
    }
}
