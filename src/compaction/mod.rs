//! Text Compaction Module
//!
//! Rule-based shortening of sectioned free text to a per-section character budget:
//! segment, score, clean, allocate, truncate, assemble.

pub mod assemble;
pub mod budget;
pub mod clean;
pub mod pipeline;
pub mod score;
pub mod segment;
pub mod truncate;

// Re-export public types for external use
pub use assemble::{assemble, ShortenedSection};
pub use budget::{allocate, allocation_sizes, Allocation, MIN_ALLOCATION, PRESERVE_ORDER_FLOOR, PRIORITY_FLOOR};
pub use clean::{collapse_whitespace, strip_brackets, Cleaner};
pub use pipeline::{shorten_document, ShortenError, Shortener};
pub use score::{ScoredUnit, Scorer};
pub use segment::{Section, Segmenter};
pub use truncate::{char_len, truncate, ELLIPSIS, HARD_CUT_THRESHOLD};
