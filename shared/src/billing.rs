use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Shown instead of a next payment date whenever the inputs don't add up.
pub const NEXT_DATE_PLACEHOLDER: &str = "N/A";

/// Select value that reveals the custom months field
pub const CUSTOM_CYCLE_VALUE: &str = "CUSTOM";

/// How often a student is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    /// Every `n` months, as entered in the custom months field
    Custom(u32),
}

impl BillingCycle {
    /// Parse a select value. `custom_months` is only consulted for `CUSTOM`
    /// and must be a positive whole number.
    pub fn from_select(value: &str, custom_months: Option<&str>) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MONTHLY" => Some(BillingCycle::Monthly),
            "QUARTERLY" => Some(BillingCycle::Quarterly),
            "SEMI_ANNUAL" | "SEMI_ANNUALLY" => Some(BillingCycle::SemiAnnual),
            "ANNUAL" | "ANNUALLY" | "YEARLY" => Some(BillingCycle::Annual),
            CUSTOM_CYCLE_VALUE => custom_months
                .and_then(|months| months.trim().parse::<u32>().ok())
                .filter(|months| *months > 0)
                .map(BillingCycle::Custom),
            _ => None,
        }
    }

    pub fn months(&self) -> u32 {
        match self {
            BillingCycle::Monthly => 1,
            BillingCycle::Quarterly => 3,
            BillingCycle::SemiAnnual => 6,
            BillingCycle::Annual => 12,
            BillingCycle::Custom(months) => *months,
        }
    }
}

/// Whether the custom months field should be hidden for a select value.
/// Matches the case-insensitive parsing in [`BillingCycle::from_select`].
pub fn custom_field_hidden(cycle_value: &str) -> bool {
    !cycle_value.trim().eq_ignore_ascii_case(CUSTOM_CYCLE_VALUE)
}

/// A start of billing as typed into either a month (`YYYY-MM`) or a date
/// (`YYYY-MM-DD`) input. The precision is kept so the result can be shown
/// the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingStart {
    Month(NaiveDate),
    Day(NaiveDate),
}

impl BillingStart {
    pub fn date(&self) -> NaiveDate {
        match self {
            BillingStart::Month(date) | BillingStart::Day(date) => *date,
        }
    }

    /// Advance by one billing cycle. Days past the end of the target month
    /// are clamped to its last day.
    pub fn advance(&self, cycle: BillingCycle) -> Option<BillingStart> {
        let next = self.date().checked_add_months(Months::new(cycle.months()))?;
        Some(match self {
            BillingStart::Month(_) => BillingStart::Month(next),
            BillingStart::Day(_) => BillingStart::Day(next),
        })
    }
}

impl FromStr for BillingStart {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Ok(BillingStart::Day(date)),
            Err(_) => NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
                .map(BillingStart::Month),
        }
    }
}

impl fmt::Display for BillingStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingStart::Month(date) => write!(f, "{:04}-{:02}", date.year(), date.month()),
            BillingStart::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Text for the next payment preview given the raw form values.
pub fn next_payment_preview(start: &str, cycle_value: &str, custom_months: Option<&str>) -> String {
    let next = start
        .parse::<BillingStart>()
        .ok()
        .zip(BillingCycle::from_select(cycle_value, custom_months))
        .and_then(|(start, cycle)| start.advance(cycle));

    match next {
        Some(next) => next.to_string(),
        None => NEXT_DATE_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_field_visibility() {
        assert!(!custom_field_hidden("CUSTOM"));
        assert!(custom_field_hidden("MONTHLY"));
        assert!(custom_field_hidden("QUARTERLY"));
        assert!(custom_field_hidden(""));
    }

    #[test]
    fn test_custom_field_follows_cycle_parsing_case() {
        for value in ["custom", "Custom", " CUSTOM "] {
            assert!(!custom_field_hidden(value));
            assert_eq!(
                BillingCycle::from_select(value, Some("2")),
                Some(BillingCycle::Custom(2))
            );
        }
        assert_eq!(next_payment_preview("2024-01", "custom", Some("2")), "2024-03");
    }

    #[test]
    fn test_next_month_for_standard_cycles() {
        assert_eq!(next_payment_preview("2024-01", "MONTHLY", None), "2024-02");
        assert_eq!(next_payment_preview("2024-01", "QUARTERLY", None), "2024-04");
        assert_eq!(next_payment_preview("2024-01", "ANNUAL", None), "2025-01");
        assert_eq!(next_payment_preview("2024-11", "SEMI_ANNUAL", None), "2025-05");
    }

    #[test]
    fn test_next_date_keeps_day_precision_and_clamps() {
        assert_eq!(next_payment_preview("2024-01-15", "MONTHLY", None), "2024-02-15");
        assert_eq!(next_payment_preview("2024-01-31", "MONTHLY", None), "2024-02-29");
    }

    #[test]
    fn test_custom_cycle_uses_custom_months() {
        assert_eq!(next_payment_preview("2024-01", "CUSTOM", Some("5")), "2024-06");
        assert_eq!(next_payment_preview("2024-01", "CUSTOM", Some("0")), NEXT_DATE_PLACEHOLDER);
        assert_eq!(next_payment_preview("2024-01", "CUSTOM", Some("")), NEXT_DATE_PLACEHOLDER);
        assert_eq!(next_payment_preview("2024-01", "CUSTOM", None), NEXT_DATE_PLACEHOLDER);
    }

    #[test]
    fn test_invalid_start_yields_placeholder() {
        assert_eq!(next_payment_preview("", "MONTHLY", None), NEXT_DATE_PLACEHOLDER);
        assert_eq!(next_payment_preview("2024-13", "MONTHLY", None), NEXT_DATE_PLACEHOLDER);
        assert_eq!(next_payment_preview("next week", "MONTHLY", None), NEXT_DATE_PLACEHOLDER);
    }

    #[test]
    fn test_unknown_cycle_yields_placeholder() {
        assert_eq!(next_payment_preview("2024-01", "WEEKLY", None), NEXT_DATE_PLACEHOLDER);
    }
}
