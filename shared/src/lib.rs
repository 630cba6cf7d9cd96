use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod billing;
pub mod format;
pub mod selection;

pub use billing::{
    custom_field_hidden, next_payment_preview, BillingCycle, BillingStart, NEXT_DATE_PLACEHOLDER,
};
pub use format::{format_grouped, format_money};
pub use selection::{format_total, parse_amount, selection_total};

/// Labelled series returned by every chart endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    pub labels: Vec<String>,
    /// Counts or amounts; decimal amounts may arrive as JSON strings
    #[serde(deserialize_with = "deserialize_number_list")]
    pub data: Vec<f64>,
}

/// Aggregate totals shown on the dashboard summary cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(deserialize_with = "deserialize_number")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub pending_invoices: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub paid_invoices: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub unconfirmed_invoices: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub total_unpaid: f64,
}

/// The read-only JSON endpoints the dashboard consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartEndpoint {
    FeesStatus,
    StudentsByDivision,
    MonthlyCollections,
    RevenueTrend,
    InvoiceStatus,
}

impl ChartEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ChartEndpoint::FeesStatus => "/api/charts/fees-status/",
            ChartEndpoint::StudentsByDivision => "/api/charts/students-by-division/",
            ChartEndpoint::MonthlyCollections => "/api/charts/monthly-collections/",
            ChartEndpoint::RevenueTrend => "/api/revenue-trend/",
            ChartEndpoint::InvoiceStatus => "/api/invoice-status/",
        }
    }
}

pub const SUMMARY_PATH: &str = "/api/summary/";

/// Django's JSON encoder turns `Decimal` into a string, so accept both forms.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrText::Number(value) => Ok(value),
            NumberOrText::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, got {:?}", text))),
        }
    }
}

fn deserialize_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrText::deserialize(deserializer)?.into_f64()
}

fn deserialize_number_list<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<NumberOrText>::deserialize(deserializer)?
        .into_iter()
        .map(NumberOrText::into_f64)
        .collect()
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    #[error("series has {labels} labels but {values} values")]
    LengthMismatch { labels: usize, values: usize },
}

/// Labelled numeric data bound to one chart.
///
/// Labels and values always have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl Series {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if labels.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of categories (slices, bars or points) the chart shows
    pub fn category_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Largest value, or zero for an empty or all-negative series
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Update the series in place from a fresh response.
    ///
    /// Values are overwritten element by element; labels are only replaced
    /// when the backend sent a different set.
    pub fn apply(&mut self, update: Series) {
        if self.labels != update.labels {
            self.labels = update.labels;
        }
        self.values.clear();
        self.values.extend(update.values);
    }
}

impl TryFrom<ChartResponse> for Series {
    type Error = SeriesError;

    fn try_from(response: ChartResponse) -> Result<Self, Self::Error> {
        Series::new(response.labels, response.data)
    }
}

impl fmt::Display for ChartEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_response_accepts_numbers_and_decimal_strings() {
        let json = r#"{"labels": ["Jan 2024", "Feb 2024"], "data": [1200, "350.50"]}"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.labels, vec!["Jan 2024", "Feb 2024"]);
        assert_eq!(response.data, vec![1200.0, 350.5]);
    }

    #[test]
    fn test_chart_response_rejects_non_numeric_data() {
        let json = r#"{"labels": ["Paid"], "data": ["lots"]}"#;
        assert!(serde_json::from_str::<ChartResponse>(json).is_err());
    }

    #[test]
    fn test_summary_response_parses_backend_payload() {
        let json = r#"{
            "total_revenue": "15250.75",
            "paid_invoices": 40,
            "unconfirmed_invoices": 3,
            "pending_invoices": 12,
            "total_unpaid": 4800
        }"#;
        let summary: SummaryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_revenue, 15250.75);
        assert_eq!(summary.paid_invoices, 40.0);
        assert_eq!(summary.unconfirmed_invoices, 3.0);
        assert_eq!(summary.pending_invoices, 12.0);
        assert_eq!(summary.total_unpaid, 4800.0);
    }

    #[test]
    fn test_summary_response_missing_field_is_an_error() {
        let json = r#"{"total_revenue": 1, "pending_invoices": 2}"#;
        assert!(serde_json::from_str::<SummaryResponse>(json).is_err());
    }

    #[test]
    fn test_series_category_count_matches_labels() {
        let response = ChartResponse {
            labels: vec!["Paid".into(), "Unpaid".into(), "Opening Balance".into()],
            data: vec![10.0, 4.0, 1.0],
        };
        let series = Series::try_from(response).unwrap();
        assert_eq!(series.category_count(), 3);
        assert_eq!(series.total(), 15.0);
        assert_eq!(series.max_value(), 10.0);
    }

    #[test]
    fn test_series_rejects_length_mismatch() {
        let err = Series::new(vec!["A".into()], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, SeriesError::LengthMismatch { labels: 1, values: 2 });
    }

    #[test]
    fn test_series_apply_keeps_labels_and_replaces_values() {
        let labels = vec!["Paid".to_string(), "Unpaid".to_string()];
        let mut series = Series::new(labels.clone(), vec![1.0, 2.0]).unwrap();
        series.apply(Series::new(labels.clone(), vec![5.0, 0.0]).unwrap());
        assert_eq!(series.labels(), labels.as_slice());
        assert_eq!(series.values(), &[5.0, 0.0]);

        series.apply(Series::new(vec!["No Data".into()], vec![0.0]).unwrap());
        assert_eq!(series.category_count(), 1);
        assert_eq!(series.labels()[0], "No Data");
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(ChartEndpoint::FeesStatus.path(), "/api/charts/fees-status/");
        assert_eq!(ChartEndpoint::RevenueTrend.to_string(), "/api/revenue-trend/");
        assert_eq!(ChartEndpoint::InvoiceStatus.path(), "/api/invoice-status/");
    }
}
