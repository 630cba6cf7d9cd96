use gloo::net::http::Request;
use serde::de::DeserializeOwned;
use shared::{ChartEndpoint, ChartResponse, SummaryResponse, SUMMARY_PATH};

use super::error::DashboardError;

/// API client for the dashboard's read-only JSON endpoints
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client that talks to the page's own origin
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// Create a client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Get the label/value series behind one chart
    pub async fn get_chart(&self, endpoint: ChartEndpoint) -> Result<ChartResponse, DashboardError> {
        self.get_json(endpoint.path()).await
    }

    /// Get the totals for the summary cards
    pub async fn get_summary(&self) -> Result<SummaryResponse, DashboardError> {
        self.get_json(SUMMARY_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        let url = self.url(path);
        let response = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.ok() {
            return Err(DashboardError::Status {
                status: response.status(),
                url,
            });
        }

        // Read the body as text first so a login page or HTML error shows
        // up in the log instead of a bare parse failure.
        let body = response.text().await?;
        parse_body(&url, &body)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_body<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, DashboardError> {
    serde_json::from_str(body).map_err(|e| DashboardError::Parse {
        url: url.to_string(),
        message: format!("{} (body starts with {:?})", e, snippet(body)),
    })
}

fn snippet(body: &str) -> String {
    body.trim().chars().take(60).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_joined_to_base() {
        assert_eq!(ApiClient::new().url("/api/summary/"), "/api/summary/");
        let client = ApiClient::with_base_url("http://localhost:8000".to_string());
        assert_eq!(
            client.url(ChartEndpoint::InvoiceStatus.path()),
            "http://localhost:8000/api/invoice-status/"
        );
    }

    #[test]
    fn test_parse_body_accepts_chart_json() {
        let parsed: ChartResponse =
            parse_body("/api/charts/fees-status/", r#"{"labels":["PAID"],"data":[4]}"#).unwrap();
        assert_eq!(parsed.data, vec![4.0]);
    }

    #[test]
    fn test_parse_body_reports_html_pages() {
        let err = parse_body::<ChartResponse>("/api/summary/", "<!DOCTYPE html><html>login</html>")
            .unwrap_err();
        match err {
            DashboardError::Parse { url, message } => {
                assert_eq!(url, "/api/summary/");
                assert!(message.contains("<!DOCTYPE html>"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
