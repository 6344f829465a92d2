use std::cmp::Ordering;

/// Case-insensitive substring check.
/// `needle` must already be lowercased; callers lowercase the search term once per query.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(needle)
}

/// Compare two strings ignoring case, without allocating
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let lower_a = a.chars().flat_map(char::to_lowercase);
    let lower_b = b.chars().flat_map(char::to_lowercase);
    lower_a.cmp(lower_b)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if let Ok(d) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        d.format("%b %d, %Y").to_string()
    } else {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Basketball Varsity", "varsity"));
        assert!(contains_ignore_case("S1024", "s10"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Chess Club", "soccer"));
    }

    #[test]
    fn test_cmp_ignore_case() {
        assert_eq!(cmp_ignore_case("alpha", "ALPHA"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("Alpha", "beta"), Ordering::Less);
        assert_eq!(cmp_ignore_case("gamma", "Beta"), Ordering::Greater);
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-05-03T09:00:00+08:00"), "May 03, 2026");
        assert_eq!(format_date("2026-05-03"), "May 03, 2026");
        assert_eq!(format_date("next week"), "next week");
    }
}
