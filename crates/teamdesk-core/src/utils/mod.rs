//! Utility functions for string matching and formatting.

pub mod format;

pub use format::{cmp_ignore_case, contains_ignore_case, format_date, truncate_string};
