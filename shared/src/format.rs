const FRACTION_DIGITS: usize = 3;

/// Format a number the way `Number.toLocaleString("en-US")` does: comma
/// grouped thousands, at most three fraction digits rounded half up from the
/// shortest decimal form, no trailing zeros, and a sign on negative zero.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return match value {
            v if v.is_nan() => "NaN".to_string(),
            v if v > 0.0 => "∞".to_string(),
            _ => "-∞".to_string(),
        };
    }

    // `Display` gives the shortest representation that round-trips, never
    // in exponent form
    let shortest = value.abs().to_string();
    let (integer, fraction) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));
    let (integer, fraction) = round_half_up(integer, fraction);

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}

/// Round decimal digits to `FRACTION_DIGITS` places, carrying into the
/// integer part when needed.
fn round_half_up(integer: &str, fraction: &str) -> (String, String) {
    if fraction.len() <= FRACTION_DIGITS {
        return (integer.to_string(), fraction.to_string());
    }

    let round_up = fraction.as_bytes()[FRACTION_DIGITS] >= b'5';
    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().take(FRACTION_DIGITS))
        .map(|b| b - b'0')
        .collect();

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    let (integer, fraction) = text.split_at(text.len() - FRACTION_DIGITS);
    (integer.to_string(), fraction.to_string())
}

/// Grouped amount with a currency prefix, e.g. `ETB 12,500`
pub fn format_money(prefix: &str, value: f64) -> String {
    format!("{} {}", prefix, format_grouped(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(1234567.0), "1,234,567");
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(format_grouped(15250.75), "15,250.75");
        assert_eq!(format_grouped(1.5), "1.5");
        assert_eq!(format_grouped(2.0004), "2");
        assert_eq!(format_grouped(0.1234), "0.123");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_grouped(-1234.5), "-1,234.5");
        assert_eq!(format_grouped(-0.0001), "-0");
        assert_eq!(format_grouped(-0.0), "-0");
    }

    #[test]
    fn test_rounds_shortest_decimal_half_up() {
        assert_eq!(format_grouped(1.0005), "1.001");
        assert_eq!(format_grouped(0.9995), "1");
        assert_eq!(format_grouped(999_999.9996), "1,000,000");
        assert_eq!(format_grouped(2.0004), "2");
    }

    #[test]
    fn test_money_prefix() {
        assert_eq!(format_money("ETB", 4800.0), "ETB 4,800");
    }
}
