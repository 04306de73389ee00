//! Input decoding and result export
//!
//! The boundary between the shortening core and whatever collects input and
//! delivers output: uploaded bytes come in, a downloadable text document goes out.

use std::string::FromUtf8Error;
use thiserror::Error;

use crate::compaction::ShortenedSection;

const UTF8_BOM: char = '\u{feff}';

/// Uploaded bytes were not valid UTF-8
#[derive(Error, Debug)]
#[error("Input is not UTF-8 text: {0}")]
pub struct DecodeError(#[from] FromUtf8Error);

/// Decode uploaded bytes as UTF-8, dropping a leading byte-order mark
pub fn decode_upload(bytes: Vec<u8>) -> Result<String, DecodeError> {
    let text = String::from_utf8(bytes)?;
    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(text),
    }
}

/// Render sections in the download format.
///
/// Each section is written as `"{title}:\n{text}\n\n"`; an untitled section
/// keeps the empty header line.
pub fn render_export(sections: &[ShortenedSection]) -> String {
    let mut out = String::new();
    for section in sections {
        if !section.title.is_empty() {
            out.push_str(&section.title);
            out.push(':');
        }
        out.push('\n');
        out.push_str(&section.text);
        out.push_str("\n\n");
    }
    out
}
