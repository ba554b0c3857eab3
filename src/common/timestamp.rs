//! Takeout timestamp cleanup
//!
//! Takeout JSON stores times as ISO-8601 strings (`2024-01-02T03:04:05Z`).
//! Reports show them as `2024-01-02 03:04:05`. This is a textual rewrite only;
//! no timezone conversion happens.

/// Normalize a Takeout timestamp for display.
///
/// Every `T` becomes a space and every `Z` is removed, so
/// fractional seconds survive (`...05.123Z` -> `...05.123`).
pub fn normalize_timestamp(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c != 'Z')
        .map(|c| if c == 'T' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(normalize_timestamp("2024-01-02T03:04:05Z"), "2024-01-02 03:04:05");
        assert_eq!(
            normalize_timestamp("2023-11-30T23:59:59.123Z"),
            "2023-11-30 23:59:59.123"
        );
        assert_eq!(normalize_timestamp("2024-01-02 03:04:05"), "2024-01-02 03:04:05");
        assert_eq!(normalize_timestamp(""), "");
    }

    #[test]
    fn test_no_t_or_z_left() {
        let out = normalize_timestamp("2021-06-01T12:00:00Z");
        assert!(!out.contains('T'));
        assert!(!out.ends_with('Z'));
    }
}
