//! Shortening pipeline
//!
//! Segment, score, allocate, compress and assemble, one section at a time.
//! The pipeline holds only immutable configuration; every call is independent.

use thiserror::Error;

use super::assemble::{assemble, ShortenedSection};
use super::budget::{allocate, order_units, MIN_ALLOCATION};
use super::clean::{collapse_whitespace, strip_brackets, Cleaner};
use super::score::{ScoredUnit, Scorer};
use super::segment::{Section, Segmenter};
use super::truncate::{char_len, pack_clauses, truncate};
use crate::config::{FillStrategy, SegmentMode, ShortenConfig};

#[derive(Error, Debug)]
pub enum ShortenError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid lexicon pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A configured shortening pipeline
#[derive(Debug, Clone)]
pub struct Shortener {
    config: ShortenConfig,
    segmenter: Segmenter,
    scorer: Scorer,
    cleaner: Cleaner,
}

impl Shortener {
    pub fn new(config: ShortenConfig) -> Result<Self, ShortenError> {
        let segmenter = Segmenter::new(&config.lexicon)?;
        let scorer = Scorer::new(&config.lexicon);
        let cleaner = Cleaner::new(&config.lexicon)?;
        Ok(Self {
            config,
            segmenter,
            scorer,
            cleaner,
        })
    }

    /// Sections of `text` as the pipeline sees them, before shortening
    pub fn sections(&self, text: &str) -> Vec<Section> {
        self.segmenter.segment(text)
    }

    /// Shorten every section of `text` to at most `target_length` characters.
    ///
    /// Empty or whitespace-only input yields an empty result.
    pub fn shorten(
        &self,
        text: &str,
        target_length: usize,
    ) -> Result<Vec<ShortenedSection>, ShortenError> {
        if target_length == 0 {
            return Err(ShortenError::InvalidConfiguration(
                "target length must be a positive number of characters".to_string(),
            ));
        }

        let sections = self.sections(text);
        tracing::debug!(
            sections = sections.len(),
            target_length,
            mode = ?self.config.mode,
            priority = self.config.priority,
            fill = ?self.config.fill,
            "Shortening document"
        );

        Ok(sections
            .iter()
            .map(|section| self.shorten_section(section, target_length))
            .collect())
    }

    /// Shorten a single section
    pub fn shorten_section(&self, section: &Section, target_length: usize) -> ShortenedSection {
        let body = section.body.trim();
        if char_len(body) <= target_length {
            return ShortenedSection {
                title: section.title.clone(),
                text: body.to_string(),
            };
        }

        let units = self.segmenter.split_units(body, self.config.mode);
        if units.is_empty() {
            let text = self.compress_unit(body, target_length);
            return assemble(&section.title, &[text], target_length, self.joiner());
        }

        let scored = self.scorer.score_units(units);
        let compressed = match self.config.fill {
            FillStrategy::Proportional => self.fill_proportional(scored, target_length),
            FillStrategy::Greedy => self.fill_greedy(scored, target_length),
        };

        tracing::debug!(
            title = %section.title,
            units = compressed.len(),
            "Section compressed"
        );
        assemble(&section.title, &compressed, target_length, self.joiner())
    }

    fn joiner(&self) -> &'static str {
        self.config.mode.joiner()
    }

    fn fill_proportional(&self, units: Vec<ScoredUnit>, target_length: usize) -> Vec<String> {
        let allocations = allocate(units, target_length, self.config.priority);
        tracing::debug!(
            allocations = ?allocations.iter().map(|a| a.chars).collect::<Vec<_>>(),
            "Allocated section budget"
        );
        allocations
            .iter()
            .map(|a| self.compress_unit(&a.unit.text, a.chars))
            .collect()
    }

    /// Emit whole units while they fit; truncate the first that does not, then stop
    fn fill_greedy(&self, mut units: Vec<ScoredUnit>, target_length: usize) -> Vec<String> {
        order_units(&mut units, self.config.priority);
        let separator = char_len(self.joiner());

        let mut emitted = Vec::new();
        let mut used = 0;
        for unit in units {
            let cleaned = self.cleaner.clean(&unit.text);
            if cleaned.is_empty() {
                continue;
            }

            let gap = if emitted.is_empty() { 0 } else { separator };
            let len = char_len(&cleaned);
            if used + gap + len <= target_length {
                used += gap + len;
                emitted.push(cleaned);
                continue;
            }

            let remaining = target_length.saturating_sub(used + gap);
            if remaining >= MIN_ALLOCATION {
                emitted.push(truncate(&cleaned, remaining));
            }
            break;
        }
        emitted
    }

    /// Compress one unit to `allowed` characters.
    ///
    /// Tries, in order, and stops at the first result that fits: the unit as is,
    /// bracket removal, filler removal, clause packing, head/tail truncation.
    pub fn compress_unit(&self, unit: &str, allowed: usize) -> String {
        let unit = unit.trim();
        if char_len(unit) <= allowed {
            return unit.to_string();
        }

        let without_brackets = collapse_whitespace(&strip_brackets(unit));
        if char_len(&without_brackets) <= allowed {
            return without_brackets;
        }

        let cleaned = collapse_whitespace(&self.cleaner.strip_fillers(&without_brackets));
        if char_len(&cleaned) <= allowed {
            return cleaned;
        }

        if let Some(packed) = pack_clauses(&cleaned, allowed) {
            return packed;
        }

        truncate(&cleaned, allowed)
    }
}

/// Shorten `text` with the default lexicon
pub fn shorten_document(
    text: &str,
    target_length: usize,
    mode: SegmentMode,
    priority: bool,
) -> Result<Vec<ShortenedSection>, ShortenError> {
    let config = ShortenConfig::default()
        .with_mode(mode)
        .with_priority(priority);
    Shortener::new(config)?.shorten(text, target_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Lexicon;
    use crate::export::render_export;

    const SCENARIO_ONE: &str = "국어: 소설을 읽고 분석하였다(부가설명). 또한 발표를 수행하였다.";
    const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

    fn shortener(config: ShortenConfig) -> Shortener {
        Shortener::new(config).unwrap()
    }

    #[test]
    fn test_labelled_section_both_sentences_kept() {
        for mode in [SegmentMode::LineItem, SegmentMode::Sentence] {
            let result = shorten_document(SCENARIO_ONE, 20, mode, false).unwrap();
            assert_eq!(result.len(), 1);
            assert_eq!(result[0].title, "국어");
            let text = &result[0].text;
            assert!(char_len(text) <= 20, "{:?}: {}", mode, text);
            assert!(text.contains("소설"), "{:?}: {}", mode, text);
            assert!(text.contains("였다."), "{:?}: {}", mode, text);
            assert!(!text.contains("부가설명"));
        }
    }

    #[test]
    fn test_labelled_section_line_item_output() {
        let result = shorten_document(SCENARIO_ONE, 20, SegmentMode::LineItem, false).unwrap();
        assert_eq!(result[0].text, "소설을 읽고 분석하였다…수행하였다.");
    }

    #[test]
    fn test_short_sections_unchanged() {
        let text = "국어 시간에 소설을 읽음\n\n수학 시간에 문제를 풂";
        let result = shorten_document(text, 100, SegmentMode::LineItem, false).unwrap();
        assert_eq!(
            result,
            vec![
                ShortenedSection {
                    title: String::new(),
                    text: "국어 시간에 소설을 읽음".to_string(),
                },
                ShortenedSection {
                    title: String::new(),
                    text: "수학 시간에 문제를 풂".to_string(),
                },
            ]
        );
        assert_eq!(
            render_export(&result),
            "\n국어 시간에 소설을 읽음\n\n\n수학 시간에 문제를 풂\n\n"
        );
    }

    #[test]
    fn test_unpunctuated_unit_head_tail() {
        let result = shorten_document(ALPHABET, 15, SegmentMode::LineItem, false).unwrap();
        assert_eq!(result[0].title, "");
        assert_eq!(result[0].text, "abcdefghi…vwxyz");
    }

    #[test]
    fn test_tiny_target_hard_cut() {
        for mode in [SegmentMode::LineItem, SegmentMode::Sentence] {
            let result = shorten_document(ALPHABET, 5, mode, false).unwrap();
            assert_eq!(result[0].text, "abcde");
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(shorten_document("", 100, SegmentMode::LineItem, false).unwrap().is_empty());
        assert!(shorten_document(" \n\n\t ", 100, SegmentMode::Sentence, true).unwrap().is_empty());
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(matches!(
            shorten_document("국어: 발표", 0, SegmentMode::LineItem, false),
            Err(ShortenError::InvalidConfiguration(_))
        ));
        // Rejected before looking at the input
        assert!(matches!(
            shorten_document("", 0, SegmentMode::LineItem, false),
            Err(ShortenError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_no_op_on_short_input() {
        let text = "짧은 (괄호) 문장, 또한 쉼표";
        let result = shorten_document(text, 50, SegmentMode::LineItem, true).unwrap();
        assert_eq!(result[0].text, text);
    }

    #[test]
    fn test_length_bound_holds() {
        let document = "국어: 소설 「소나기」를 읽고 인물의 심리 변화를 분석함(모둠 토론), 독서 감상문 작성; 발표 수행\n\
                        시를 창작하여 낭송함 / 문학 작품의 시대적 배경을 탐구함\n\n\
                        수학 - 함수의 극한을 이해하고 문제를 해결함. 또한 통계 프로젝트를 수행하였다! 탐구 보고서 제출?\n\n\
                        과학과\n실험 설계 및 결과 분석, 오차 원인 탐구, 보고서 작성, 발표, 질의응답, 동료 평가, 후속 탐구 계획";
        for mode in [SegmentMode::LineItem, SegmentMode::Sentence] {
            for priority in [false, true] {
                for fill in [FillStrategy::Proportional, FillStrategy::Greedy] {
                    let s = shortener(
                        ShortenConfig::default()
                            .with_mode(mode)
                            .with_priority(priority)
                            .with_fill(fill),
                    );
                    for target in 1..=120 {
                        let result = s.shorten(document, target).unwrap();
                        assert_eq!(result.len(), 3);
                        for section in &result {
                            assert!(
                                char_len(&section.text) <= target,
                                "mode={:?} priority={} fill={:?} target={} text={}",
                                mode,
                                priority,
                                fill,
                                target,
                                section.text
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_priority_reorders_units() {
        let config = ShortenConfig {
            priority: true,
            lexicon: Lexicon {
                important_words: vec!["탐구".to_string()],
                filler_words: Vec::new(),
                ..Lexicon::default()
            },
            ..ShortenConfig::default()
        };
        let text = "첫째 항목입니다, 둘째 항목은 탐구 탐구, 셋째 항목은 탐구";
        let result = shortener(config).shorten(text, 30).unwrap();
        assert_eq!(result[0].text, "둘째 항목은…탐구; 셋째 항목은 탐구; 첫째 항목입니다");
    }

    #[test]
    fn test_preserve_order_keeps_units() {
        let text = "첫째 항목입니다, 둘째 항목은 탐구 탐구, 셋째 항목은 탐구";
        let result = shorten_document(text, 30, SegmentMode::LineItem, false).unwrap();
        assert!(result[0].text.starts_with("첫째"));
    }

    #[test]
    fn test_greedy_fill_sentences() {
        let config = ShortenConfig::default()
            .with_mode(SegmentMode::Sentence)
            .with_fill(FillStrategy::Greedy);
        let text = "짧은 문장이다. 두 번째 문장도 있다. 세 번째 문장은 조금 더 길게 씁니다.";
        // 8 + 1 + 12 = 21 chars emitted whole, 30 - 22 = 8 left for the third sentence
        let result = shortener(config).shorten(text, 30).unwrap();
        assert_eq!(result[0].text, "짧은 문장이다. 두 번째 문장도 있다. 세 번째…니다.");
        assert!(char_len(&result[0].text) <= 30);
    }

    #[test]
    fn test_greedy_fill_drops_tiny_remainder() {
        let config = ShortenConfig::default()
            .with_mode(SegmentMode::Sentence)
            .with_fill(FillStrategy::Greedy);
        let text = "짧은 문장이다. 두 번째 문장도 있다. 세 번째 문장.";
        let result = shortener(config).shorten(text, 22).unwrap();
        assert_eq!(result[0].text, "짧은 문장이다. 두 번째 문장도 있다.");
    }

    #[test]
    fn test_compress_unit_steps() {
        let s = shortener(ShortenConfig::default());
        // Fits already: untouched, fillers included
        assert_eq!(s.compress_unit(" 또한 발표 ", 10), "또한 발표");
        // Brackets alone are enough
        assert_eq!(s.compress_unit("발표(모둠)함", 4), "발표함");
        // Fillers needed as well
        assert_eq!(s.compress_unit("또한 발표(모둠)함", 4), "발표함");
        // Clause packing
        assert_eq!(
            s.compress_unit("독서 토론 참여, 보고서를 아주 길게 작성하여 제출함, 발표", 12),
            "독서 토론 참여, 발표"
        );
        // Head and tail
        assert_eq!(s.compress_unit(ALPHABET, 15), "abcdefghi…vwxyz");
    }

    #[test]
    fn test_title_only_section() {
        let result = shorten_document("국어:\n\n수학: 함수", 10, SegmentMode::LineItem, false).unwrap();
        assert_eq!(result[0].title, "국어");
        assert_eq!(result[0].text, "");
        assert_eq!(result[1].title, "수학");
        assert_eq!(result[1].text, "함수");
    }

    #[test]
    fn test_body_without_units_compressed_whole() {
        // Every line is only separators, so splitting yields no units
        let body = ";".repeat(24);
        let result = shorten_document(&body, 10, SegmentMode::LineItem, false).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "");
        assert_eq!(result[0].text, ";;;;;;…;;;");
    }

    #[test]
    fn test_shortener_is_reusable() {
        let s = shortener(ShortenConfig::default());
        let first = s.shorten(SCENARIO_ONE, 20).unwrap();
        let second = s.shorten(SCENARIO_ONE, 20).unwrap();
        assert_eq!(first, second);
    }
}
