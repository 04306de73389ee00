//! Section and unit segmentation
//!
//! Splits raw input into blank-line separated sections, infers an optional
//! subject title for each, and splits section bodies into atomic units.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::{Lexicon, SegmentMode};

/// Maximum length (chars) of a first line treated as a bare title
pub const TITLE_MAX_CHARS: usize = 20;

/// Characters that end a sentence in sentence mode
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

lazy_static! {
    static ref SECTION_BREAK: Regex = Regex::new(r"\n\s*\n").unwrap();
    static ref LABELLED_TITLE: Regex = Regex::new(r"^([\w가-힣 ]{1,20}[:\-]\s*)(.*)$").unwrap();
}

/// A block of input separated from its neighbours by blank lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Inferred subject title, empty when none was found
    pub title: String,
    pub body: String,
}

/// Splits documents into sections and section bodies into units
#[derive(Debug, Clone)]
pub struct Segmenter {
    title_markers: Vec<String>,
    item_splitter: Option<Regex>,
}

impl Segmenter {
    pub fn new(lexicon: &Lexicon) -> Result<Self, regex::Error> {
        let item_splitter = if lexicon.item_separators.is_empty() {
            None
        } else {
            let class: String = lexicon
                .item_separators
                .iter()
                .map(|c| regex::escape(&c.to_string()))
                .collect();
            Some(Regex::new(&format!(r"[{}]\s*", class))?)
        };

        Ok(Self {
            title_markers: lexicon.title_markers.clone(),
            item_splitter,
        })
    }

    /// Split a document into sections, in input order.
    ///
    /// Chunks that are empty after trimming are skipped.
    pub fn segment(&self, document: &str) -> Vec<Section> {
        SECTION_BREAK
            .split(document.trim())
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| self.parse_section(chunk))
            .collect()
    }

    fn parse_section(&self, chunk: &str) -> Section {
        let lines: Vec<&str> = chunk.lines().collect();
        let first = lines.first().map(|l| l.trim()).unwrap_or_default();

        if let Some(caps) = LABELLED_TITLE.captures(first) {
            let label = caps.get(1).map_or("", |m| m.as_str());
            let rest = caps.get(2).map_or("", |m| m.as_str());
            let title = label.trim_end_matches(|c: char| c == ':' || c == ' ' || c == '-');

            let mut body_lines = vec![rest.trim()];
            body_lines.extend(lines[1..].iter().map(|l| l.trim()));

            return Section {
                title: title.to_string(),
                body: body_lines.join("\n"),
            };
        }

        if self.looks_like_title(first) {
            return Section {
                title: first.to_string(),
                body: lines[1..].join("\n"),
            };
        }

        Section {
            title: String::new(),
            body: chunk.to_string(),
        }
    }

    /// A short first line carrying a subject marker is a title on its own
    fn looks_like_title(&self, line: &str) -> bool {
        line.chars().count() <= TITLE_MAX_CHARS
            && self.title_markers.iter().any(|m| !m.is_empty() && line.contains(m.as_str()))
    }

    /// Split a section body into atomic units, order preserved
    pub fn split_units(&self, body: &str, mode: SegmentMode) -> Vec<String> {
        match mode {
            SegmentMode::LineItem => self.split_items(body),
            SegmentMode::Sentence => split_sentences(body),
        }
    }

    fn split_items(&self, body: &str) -> Vec<String> {
        let mut items = Vec::new();
        for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match &self.item_splitter {
                Some(splitter) => {
                    items.extend(
                        splitter
                            .split(line)
                            .map(str::trim)
                            .filter(|p| !p.is_empty())
                            .map(str::to_string),
                    );
                }
                None => items.push(line.to_string()),
            }
        }
        items
    }
}

/// Split on sentence-ending punctuation followed by whitespace, or on newlines
fn split_sentences(body: &str) -> Vec<String> {
    let mut units = Vec::new();
    let mut current = String::new();
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            flush_unit(&mut units, &mut current);
            continue;
        }
        current.push(c);
        if SENTENCE_TERMINATORS.contains(&c) && chars.peek().map_or(true, |n| n.is_whitespace()) {
            flush_unit(&mut units, &mut current);
        }
    }
    flush_unit(&mut units, &mut current);

    units
}

fn flush_unit(units: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        units.push(trimmed.to_string());
    }
    current.clear();
}
