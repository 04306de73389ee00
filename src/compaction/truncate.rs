//! Unit truncation
//!
//! All lengths are in characters (Unicode scalar values), never bytes.

use lazy_static::lazy_static;
use regex::Regex;

/// Marker inserted where text was elided
pub const ELLIPSIS: char = '…';
/// At or below this many characters a unit is hard-cut without a marker
pub const HARD_CUT_THRESHOLD: usize = 6;
/// Joiner used when packing clauses back together
const CLAUSE_JOINER: &str = ", ";

lazy_static! {
    static ref CLAUSE_BREAK: Regex = Regex::new(r"[,;:\-–—]").unwrap();
}

/// Length in characters
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// First `n` characters of `text`
pub fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Last `n` characters of `text`
pub fn last_chars(text: &str, n: usize) -> &str {
    let len = char_len(text);
    if n >= len {
        return text;
    }
    match text.char_indices().nth(len - n) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

/// Shorten `unit` to at most `allowed` characters.
///
/// Keeps the head (60%) and tail of the unit around an ellipsis. Units that must
/// fit in `HARD_CUT_THRESHOLD` characters or fewer are cut without a marker.
pub fn truncate(unit: &str, allowed: usize) -> String {
    if char_len(unit) <= allowed {
        return unit.to_string();
    }
    if allowed <= HARD_CUT_THRESHOLD {
        return take_chars(unit, allowed).to_string();
    }

    let head_len = allowed * 3 / 5;
    // One character is reserved for the ellipsis
    let tail_len = allowed - head_len - 1;
    let head = take_chars(unit, head_len).trim_end();

    if tail_len == 0 {
        return format!("{}{}", take_chars(unit, allowed - 1), ELLIPSIS);
    }
    let tail = last_chars(unit, tail_len).trim_start();
    format!("{}{}{}", head, ELLIPSIS, tail)
}

/// Keep whole clauses, left to right, while they fit in `allowed`.
///
/// Returns `None` when the unit has fewer than two clauses or no clause fits.
/// A clause that does not fit is skipped; later, shorter clauses are still tried.
pub fn pack_clauses(unit: &str, allowed: usize) -> Option<String> {
    let clauses: Vec<&str> = CLAUSE_BREAK
        .split(unit)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if clauses.len() < 2 {
        return None;
    }

    let joiner_len = char_len(CLAUSE_JOINER);
    let mut packed = String::new();
    let mut used = 0;
    for clause in clauses {
        let gap = if packed.is_empty() { 0 } else { joiner_len };
        let len = char_len(clause);
        if used + gap + len > allowed {
            continue;
        }
        if !packed.is_empty() {
            packed.push_str(CLAUSE_JOINER);
        }
        packed.push_str(clause);
        used += gap + len;
    }

    if packed.is_empty() {
        None
    } else {
        Some(packed)
    }
}
