//! Number formatting for money, rates, and percentages.

/// Formats dollars with thousands separators and cents: `$1,234.50`.
///
/// ```
/// use crewrate_ui::format::format_money;
/// assert_eq!(format_money(1234.5), "$1,234.50");
/// assert_eq!(format_money(-3.0), "-$3.00");
/// ```
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Like [`format_money`] but always carries a sign unless the amount rounds
/// to zero: `+$4.10`, `-$4.10`, `$0.00`.
pub fn format_signed_money(amount: f64) -> String {
    let formatted = format_money(amount);
    if formatted.starts_with('-') || formatted == "$0.00" {
        formatted
    } else {
        format!("+{formatted}")
    }
}

/// Formats an hourly rate: `$96.00/hr`.
pub fn format_rate(rate: f64) -> String {
    format!("{}/hr", format_money(rate))
}

/// Formats a percentage with at most two decimals: `37.5%`, `30%`.
pub fn format_percent(percent: f64) -> String {
    format!("{}%", format_number(percent))
}

/// Formats a quantity with at most two decimals and no trailing zeros.
pub fn format_number(value: f64) -> String {
    if value.abs() < 0.005 {
        return "0".to_string();
    }
    let fixed = format!("{value:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(96.0), "$96.00");
        assert_eq!(format_money(28.756), "$28.76");
        assert_eq!(format_money(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_money(1000.0), "$1,000.00");
        assert_eq!(format_money(-0.001), "$0.00");
    }

    #[test]
    fn signed_money() {
        assert_eq!(format_signed_money(4.1), "+$4.10");
        assert_eq!(format_signed_money(-12.0), "-$12.00");
        assert_eq!(format_signed_money(0.001), "$0.00");
    }

    #[test]
    fn rates_and_percents() {
        assert_eq!(format_rate(96.0), "$96.00/hr");
        assert_eq!(format_percent(30.0), "30%");
        assert_eq!(format_percent(37.5), "37.5%");
        assert_eq!(format_percent(12.25), "12.25%");
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-0.0), "0");
    }
}
