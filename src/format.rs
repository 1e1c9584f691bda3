//! Number formatting used when rendering cards.

/// Compact money/count notation: `1.23B`, `4.50M`, `7.00k`, `12.00`.
pub fn compact_number(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.2}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.2}k", value / 1_000.0)
    } else {
        format!("{:.2}", value)
    }
}

/// Percentage with two decimals: `12.50%`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Percentage change with explicit sign: `+3.10%`, `-0.25%`.
pub fn signed_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

/// Chart axis label: `45k` above a thousand, plain integer otherwise.
pub fn axis_label(value: u64) -> String {
    if value >= 1000 {
        format!("{:.0}k", value as f64 / 1000.0)
    } else {
        value.to_string()
    }
}

/// Follower count as shown in author tooltips: `1.5k followers`.
pub fn followers_label(value: u64) -> String {
    format!("{:.1}k followers", value as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_number() {
        assert_eq!(compact_number(2_500_000_000.0), "2.50B");
        assert_eq!(compact_number(1_234_567.0), "1.23M");
        assert_eq!(compact_number(7_000.0), "7.00k");
        assert_eq!(compact_number(12.0), "12.00");
        assert_eq!(compact_number(-3_000.0), "-3.00k");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(12.5), "12.50%");
        assert_eq!(signed_percent(3.1), "+3.10%");
        assert_eq!(signed_percent(0.0), "+0.00%");
        assert_eq!(signed_percent(-0.25), "-0.25%");
    }

    #[test]
    fn test_axis_label() {
        assert_eq!(axis_label(999), "999");
        assert_eq!(axis_label(45_000), "45k");
    }

    #[test]
    fn test_followers_label() {
        assert_eq!(followers_label(1500), "1.5k followers");
        assert_eq!(followers_label(0), "0.0k followers");
    }
}
