/// Format a value as whole-dollar USD with thousands grouping, e.g.
/// `1234 -> "$1,234"`.
pub fn usd(value: f64) -> String {
    let negative = value < 0.0;
    let mut n = value.abs().round() as u128;
    let mut groups: Vec<String> = Vec::new();
    loop {
        let group = n % 1000;
        n /= 1000;
        if n == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{:03}", group));
    }
    groups.reverse();
    let digits = groups.join(",");
    if negative {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Render a value the way it appears in the dataset: integers without a
/// trailing `.0`, everything else with the default float formatting.
pub fn raw_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(usd(1234.0), "$1,234");
        assert_eq!(usd(1_000_000.0), "$1,000,000");
        assert_eq!(usd(760_505_847.0), "$760,505,847");
    }

    #[test]
    fn small_and_zero() {
        assert_eq!(usd(0.0), "$0");
        assert_eq!(usd(999.0), "$999");
        assert_eq!(usd(1000.0), "$1,000");
    }

    #[test]
    fn rounds_to_whole_dollars() {
        assert_eq!(usd(1234.49), "$1,234");
        assert_eq!(usd(1234.5), "$1,235");
    }

    #[test]
    fn negative_values() {
        assert_eq!(usd(-1234.0), "-$1,234");
    }

    #[test]
    fn raw_values_drop_integer_fraction() {
        assert_eq!(raw_value(123456789.0), "123456789");
        assert_eq!(raw_value(12.5), "12.5");
    }
}
