use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};

// Get current local timestamp as a formatted string
pub fn current_local_timestamp_str(format_str: &str) -> String {
    let now: DateTime<Local> = Local::now();
    now.format(format_str).to_string()
}

/// True when every specifier in `format_str` is one chrono understands.
/// Formatting with an unknown specifier panics on `to_string()`.
pub fn is_valid_strftime(format_str: &str) -> bool {
    StrftimeItems::new(format_str).all(|item| !matches!(item, Item::Error))
}

/// Stand-in counter value when the persisted counter is unusable.
/// Not unique; collisions are resolved by the allocator's retry loop.
pub fn fallback_counter_value() -> u64 {
    Utc::now().timestamp_millis().rem_euclid(100_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_stays_below_five_digits() {
        assert!(fallback_counter_value() < 100_000);
    }

    #[test]
    fn date_format_is_eight_digits() {
        let date = current_local_timestamp_str("%Y%m%d");
        assert_eq!(date.len(), 8);
        assert!(date.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn unknown_specifiers_are_invalid() {
        assert!(is_valid_strftime("%Y%m%d"));
        assert!(is_valid_strftime("day-%d_%H"));
        assert!(!is_valid_strftime("%Q"));
    }
}
