//! Unit cleaning
//!
//! Strips bracketed asides and filler words, then normalizes whitespace.
//! Each step and the whole pipeline are idempotent.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::Lexicon;

lazy_static! {
    // Non-nested, non-greedy: each span ends at the first matching closer
    static ref BRACKETED: Regex = Regex::new(r"\([^)]*\)|\[[^\]]*\]|\{[^}]*\}").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Remove round, square and curly bracketed spans
pub fn strip_brackets(text: &str) -> String {
    BRACKETED.replace_all(text, "").into_owned()
}

/// Collapse whitespace runs to one space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Removes configured filler words at word boundaries
#[derive(Debug, Clone)]
pub struct Cleaner {
    fillers: Option<Regex>,
}

impl Cleaner {
    pub fn new(lexicon: &Lexicon) -> Result<Self, regex::Error> {
        let mut words: Vec<&str> = lexicon
            .filler_words
            .iter()
            .map(String::as_str)
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Ok(Self { fillers: None });
        }

        // Longest first so "등의" is preferred over "등" at the same position
        words.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));
        let alternation = words.iter().map(|w| regex::escape(w)).collect::<Vec<_>>().join("|");
        let fillers = Regex::new(&format!(r"\b(?:{})\b", alternation))?;

        Ok(Self {
            fillers: Some(fillers),
        })
    }

    /// Remove filler words; surrounding whitespace is left for [`collapse_whitespace`]
    pub fn strip_fillers(&self, text: &str) -> String {
        match &self.fillers {
            Some(re) => re.replace_all(text, "").into_owned(),
            None => text.to_string(),
        }
    }

    /// Full cleaning: brackets, fillers, whitespace
    pub fn clean(&self, unit: &str) -> String {
        collapse_whitespace(&self.strip_fillers(&strip_brackets(unit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> Cleaner {
        Cleaner::new(&Lexicon::default()).unwrap()
    }

    #[test]
    fn test_strip_brackets() {
        assert_eq!(strip_brackets("분석(부가설명)함"), "분석함");
        assert_eq!(strip_brackets("a[b]c{d}e(f)g"), "aceg");
        // Non-nested: the span stops at the first closer
        assert_eq!(strip_brackets("a(b(c)d)e"), "ad)e");
        assert_eq!(strip_brackets("열린 괄호만 (있음"), "열린 괄호만 (있음");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_strip_fillers_word_boundary() {
        let c = cleaner();
        assert_eq!(collapse_whitespace(&c.strip_fillers("또한 발표를 하였다")), "발표를 하였다");
        // Attached to other word characters: kept
        assert_eq!(c.strip_fillers("수행하였다"), "수행하였다");
        assert_eq!(collapse_whitespace(&c.strip_fillers("독서 등의 활동")), "독서");
    }

    #[test]
    fn test_clean_pipeline() {
        let c = cleaner();
        assert_eq!(
            c.clean("소설을 읽고 분석하였다(부가설명). 또한 발표를 수행하였다."),
            "소설을 읽고 분석하였다. 발표를 수행하였다."
        );
    }

    #[test]
    fn test_clean_idempotent() {
        let c = cleaner();
        let samples = [
            "소설을 읽고 분석하였다(부가설명). 또한 발표를 수행하였다.",
            "a(b(c)d)e [x] {y} 및 및 등 등의",
            "  특히   주로 (괄호 [안] 괄호) 보고서 ",
            "(열림만 있음 ] } )",
            "그리고또한 또한그리고 그리고",
            "",
        ];
        for s in samples {
            let once = c.clean(s);
            assert_eq!(c.clean(&once), once, "not idempotent for {:?}", s);
            assert_eq!(strip_brackets(&strip_brackets(s)), strip_brackets(s));
            assert_eq!(collapse_whitespace(&collapse_whitespace(s)), collapse_whitespace(s));
        }
    }

    #[test]
    fn test_no_fillers_configured() {
        let lexicon = Lexicon {
            filler_words: Vec::new(),
            ..Lexicon::default()
        };
        let c = Cleaner::new(&lexicon).unwrap();
        assert_eq!(c.clean("또한 (x) 발표"), "또한 발표");
    }
}
