use colored::{ColoredString, Colorize};

use crate::models::ConfidenceTier;

/// Format a signed amount as dollars with two decimals: -42.50 -> "-$42.50"
pub fn money(val: f64) -> String {
    if val < 0.0 {
        format!("-${:.2}", val.abs())
    } else {
        format!("${:.2}", val)
    }
}

/// File size in megabytes, as shown next to the selected file.
pub fn size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Colored High/Medium/Low badge for a confidence score.
pub fn confidence_badge(confidence: f64) -> ColoredString {
    match ConfidenceTier::from_score(confidence) {
        ConfidenceTier::High => "High".green(),
        ConfidenceTier::Medium => "Medium".yellow(),
        ConfidenceTier::Low => "Low".red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(6.5), "$6.50");
        assert_eq!(money(-42.5), "-$42.50");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1234.567), "$1234.57");
    }

    #[test]
    fn test_size_mb() {
        assert_eq!(size_mb(1024 * 1024), "1.00 MB");
        assert_eq!(size_mb(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
        assert_eq!(size_mb(0), "0.00 MB");
    }

    #[test]
    fn test_confidence_badge_tiers() {
        assert!(confidence_badge(0.9).to_string().contains("High"));
        assert!(confidence_badge(0.5).to_string().contains("Medium"));
        assert!(confidence_badge(0.1).to_string().contains("Low"));
    }
}
