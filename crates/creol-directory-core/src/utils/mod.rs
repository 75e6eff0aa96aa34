//! Utility functions for string cleanup and lenient parsing.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{
    collapse_whitespace, parse_leading_int, parse_truthy, sanitize_email, sanitize_text,
    sanitize_url, strip_tags, truncate_string,
};
