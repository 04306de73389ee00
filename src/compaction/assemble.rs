//! Section assembly
//!
//! Joins compressed units and enforces the section's hard length bound.

use serde::{Deserialize, Serialize};

use super::clean::collapse_whitespace;
use super::truncate::{char_len, take_chars, ELLIPSIS};

/// Final output for one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenedSection {
    /// Inferred title, never length-limited; may be empty
    pub title: String,
    pub text: String,
}

/// Join `units` with `joiner` and cut the result to `target` characters.
///
/// Separator overhead can push the joined text past the budget; in that case the
/// text is cut to `target - 1` characters followed by an ellipsis.
pub fn assemble(title: &str, units: &[String], target: usize, joiner: &str) -> ShortenedSection {
    let joined = units
        .iter()
        .filter(|u| !u.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(joiner);
    let joined = collapse_whitespace(&joined);

    let text = if char_len(&joined) > target {
        format!("{}{}", take_chars(&joined, target.saturating_sub(1)), ELLIPSIS)
    } else {
        joined
    };

    ShortenedSection {
        title: title.to_string(),
        text,
    }
}
