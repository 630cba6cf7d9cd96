/// Parse a `data-amount` value. Anything that isn't a finite number counts
/// as zero so one bad row can't poison the whole total.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .unwrap_or(0.0)
}

/// Sum the amounts of every checked item.
pub fn selection_total<'a, I>(items: I) -> f64
where
    I: IntoIterator<Item = (bool, &'a str)>,
{
    items
        .into_iter()
        .filter(|(checked, _)| *checked)
        .map(|(_, amount)| parse_amount(amount))
        .sum()
}

/// Two-decimal display used by every selection total
pub fn format_total(total: f64) -> String {
    format!("{:.2}", total)
}
