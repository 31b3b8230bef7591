//! Resource URL id extraction
//!
//! The API references entities by URL (`.../episode/28`). The numeric id is
//! the final path segment.

use regex::Regex;
use std::sync::OnceLock;

/// Extract the numeric id from the trailing path segment of a resource URL
///
/// Accepts `.../<digits>` and `.../<digits>/`. Anything else, including ids
/// that do not fit in a `u32`, yields `None`.
///
/// ```
/// use rm_compare::extract_id;
///
/// assert_eq!(extract_id("https://rickandmortyapi.com/api/episode/42/"), Some(42));
/// assert_eq!(extract_id("abc123"), None);
/// ```
pub fn extract_id(url: &str) -> Option<u32> {
    static ID_REGEX: OnceLock<Regex> = OnceLock::new();

    // ASCII digits only; `\d` would also accept other Unicode digits
    let re = ID_REGEX.get_or_init(|| Regex::new(r"/([0-9]+)/?$").unwrap());

    let captures = re.captures(url)?;
    captures.get(1)?.as_str().parse().ok()
}
