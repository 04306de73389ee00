// Seteuk Library
// Exports the shortening core for use by the CLI binary and other front ends

pub mod compaction;
pub mod config;
pub mod export;

// Re-export commonly used types for CLI
pub use compaction::{
    shorten_document, ShortenError, ShortenedSection, Shortener,
    Section, Segmenter, ScoredUnit, Scorer, Cleaner, Allocation,
    allocate, assemble, truncate, char_len,
};
pub use config::{
    ShortenConfig, Lexicon, SegmentMode, FillStrategy, ConfigError, default_config_path,
};
pub use export::{decode_upload, render_export, DecodeError};
