//! Shortener Configuration
//!
//! Segmentation mode, ordering policy, fill strategy and the keyword lexicon.
//! Loaded from a JSON file when one is present, otherwise built from defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name under the platform config dir
const APP_IDENTIFIER: &str = "seteuk";
/// Config file name inside the app config dir
const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config file not found: {0}")]
    NotFound(String),
    #[error("Config directory not found")]
    NoConfigDir,
}

/// How a section body is split into atomic units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentMode {
    /// Lines, then delimiter-separated items within each line
    #[default]
    LineItem,
    /// Sentences ending in `.`, `!`, `?` or a newline
    Sentence,
}

impl SegmentMode {
    /// Separator placed between units when a section is reassembled
    pub fn joiner(&self) -> &'static str {
        match self {
            SegmentMode::LineItem => "; ",
            SegmentMode::Sentence => " ",
        }
    }
}

/// How the section budget is spent across units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// Every unit gets a share of the budget and is compressed to fit it
    #[default]
    Proportional,
    /// Whole units are emitted until one no longer fits; that one is truncated and emission stops
    Greedy,
}

/// Keyword and delimiter data used by the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lexicon {
    /// Words that raise a unit's priority score
    pub important_words: Vec<String>,
    /// Low-information words removed during cleaning
    pub filler_words: Vec<String>,
    /// Substrings that mark a short first line as a subject title
    pub title_markers: Vec<String>,
    /// Characters that split a line into items (line-item mode)
    pub item_separators: Vec<char>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            important_words: to_strings(&[
                "탐구", "분석", "발표", "토론", "주도", "심화", "역량", "능력", "이해", "논리",
                "창의", "협력", "적극", "성장", "우수", "탁월", "문제해결",
            ]),
            filler_words: to_strings(&[
                "또한", "그리고", "및", "같이", "등", "등의", "특히", "주로", "보다", "많이", "약간",
                "수행", "수업", "활동", "관찰", "실험", "연구", "사용", "활용", "적용", "개선", "제안",
            ]),
            title_markers: to_strings(&["과", "교과"]),
            item_separators: vec![';', '·', '/', 'ㆍ', '•', ','],
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShortenConfig {
    pub mode: SegmentMode,
    /// Reorder units by descending importance score before budgeting
    pub priority: bool,
    pub fill: FillStrategy,
    pub lexicon: Lexicon,
}

impl ShortenConfig {
    pub fn with_mode(mut self, mode: SegmentMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_fill(mut self, fill: FillStrategy) -> Self {
        self.fill = fill;
        self
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// if a file is there, and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.display().to_string()));
                }
                Self::load_from(p)
            }
            None => {
                let default_path = match default_config_path() {
                    Ok(p) => p,
                    Err(ConfigError::NoConfigDir) => {
                        tracing::debug!("No platform config dir, using built-in defaults");
                        return Ok(Self::default());
                    }
                    Err(e) => return Err(e),
                };
                if default_path.exists() {
                    Self::load_from(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ShortenConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded shortener config");
        Ok(config)
    }
}

/// Default config file location (`<config_dir>/seteuk/config.json`)
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_IDENTIFIER).join(CONFIG_FILE))
}
