use web_sys::Document;

/// Runtime settings for the dashboard scripts.
///
/// Defaults match the production pages; a template can override any of
/// them with `data-*` attributes on `<body>`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Prefix for every API path. Empty means same origin.
    pub api_base_url: String,
    pub invoice_poll_interval_ms: u32,
    pub toast_duration_ms: u32,
    pub scroll_storage_key: String,
    pub currency_prefix: String,
    pub service_worker_url: String,
    pub debug: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            invoice_poll_interval_ms: 30_000,
            toast_duration_ms: 3_000,
            scroll_storage_key: "scrollPos".to_string(),
            currency_prefix: "ETB".to_string(),
            service_worker_url: "/static/js/sw.js".to_string(),
            debug: false,
        }
    }
}

impl DashboardConfig {
    /// Read overrides from the body's data attributes
    pub fn from_document(document: &Document) -> Self {
        match document.body() {
            Some(body) => Self::from_attributes(|name| body.get_attribute(name)),
            None => Self::default(),
        }
    }

    /// Build a config from an attribute lookup. Numeric values that don't
    /// parse (or are zero) keep their defaults.
    pub fn from_attributes<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("data-api-base") {
            config.api_base_url = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(interval) = lookup("data-poll-interval").and_then(|v| parse_positive(&v)) {
            config.invoice_poll_interval_ms = interval;
        }
        if let Some(duration) = lookup("data-toast-duration").and_then(|v| parse_positive(&v)) {
            config.toast_duration_ms = duration;
        }
        if let Some(currency) = lookup("data-currency").filter(|v| !v.trim().is_empty()) {
            config.currency_prefix = currency.trim().to_string();
        }
        if let Some(url) = lookup("data-sw-url").filter(|v| !v.trim().is_empty()) {
            config.service_worker_url = url.trim().to_string();
        }
        if let Some(debug) = lookup("data-debug") {
            config.debug = !matches!(debug.trim(), "false" | "0");
        }

        config
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> DashboardConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_attributes(|name| attributes.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.invoice_poll_interval_ms, 30_000);
        assert_eq!(config.toast_duration_ms, 3_000);
        assert_eq!(config.scroll_storage_key, "scrollPos");
        assert_eq!(config.api_base_url, "");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("data-api-base", "https://school.example/"),
            ("data-poll-interval", "10000"),
            ("data-currency", "USD"),
            ("data-debug", ""),
        ]);
        assert_eq!(config.api_base_url, "https://school.example");
        assert_eq!(config.invoice_poll_interval_ms, 10_000);
        assert_eq!(config.currency_prefix, "USD");
        assert!(config.debug);
    }

    #[test]
    fn test_bad_numbers_keep_defaults() {
        let config = config_from(&[
            ("data-poll-interval", "soon"),
            ("data-toast-duration", "0"),
            ("data-debug", "false"),
        ]);
        assert_eq!(config.invoice_poll_interval_ms, 30_000);
        assert_eq!(config.toast_duration_ms, 3_000);
        assert!(!config.debug);
    }
}
