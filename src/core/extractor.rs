use aho_corasick::{AhoCorasick, MatchKind};
use serde::Deserialize;

use crate::error::MatchError;
use crate::models::{MatchedSkillSet, SkillDictionary};

/// How a dictionary entry must sit in the text to count as found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Any contiguous occurrence counts ("java" is found inside "javascript")
    #[default]
    Substring,
    /// The characters around the occurrence must not be alphanumeric
    WordBoundary,
}

/// Multi-pattern skill scanner
///
/// Builds an Aho-Corasick automaton over the dictionary once, so each
/// extraction is a single pass over the text regardless of dictionary size.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    dictionary: SkillDictionary,
    automaton: AhoCorasick,
    mode: MatchMode,
}

impl SkillExtractor {
    pub fn new(dictionary: SkillDictionary, mode: MatchMode) -> Result<Self, MatchError> {
        // Standard semantics are required for overlapping search
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(dictionary.iter().map(|s| s.as_str()))
            .map_err(|e| {
                MatchError::Configuration(format!("Failed to build skill matcher: {}", e))
            })?;

        tracing::debug!(
            "Skill extractor built with {} patterns ({:?} mode)",
            dictionary.len(),
            mode
        );

        Ok(Self {
            dictionary,
            automaton,
            mode,
        })
    }

    pub fn dictionary(&self) -> &SkillDictionary {
        &self.dictionary
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Find every dictionary skill present in `text`
    ///
    /// The text is lowercased once. The result follows dictionary order, not
    /// the order of appearance in the text.
    pub fn extract(&self, text: &str) -> MatchedSkillSet {
        if text.is_empty() {
            return MatchedSkillSet::default();
        }

        let normalized = text.to_lowercase();
        let mut found = vec![false; self.dictionary.len()];
        let mut remaining = found.len();

        for mat in self.automaton.find_overlapping_iter(&normalized) {
            let id = mat.pattern().as_usize();
            if found[id] {
                continue;
            }
            if self.mode == MatchMode::WordBoundary
                && !is_word_bounded(&normalized, mat.start(), mat.end())
            {
                continue;
            }

            found[id] = true;
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }

        found
            .iter()
            .enumerate()
            .filter(|(_, hit)| **hit)
            .filter_map(|(id, _)| self.dictionary.get(id).cloned())
            .collect()
    }
}

/// Substring extraction against `dictionary`
///
/// Convenience wrapper for one-off calls. Long-lived callers should build a
/// `SkillExtractor` once and reuse it.
pub fn extract(text: &str, dictionary: &SkillDictionary) -> Result<MatchedSkillSet, MatchError> {
    let extractor = SkillExtractor::new(dictionary.clone(), MatchMode::Substring)?;
    Ok(extractor.extract(text))
}

/// Check that the match `[start, end)` is not glued to other word characters
#[inline]
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text
        .get(..start)
        .and_then(|head| head.chars().next_back());
    let after = text.get(end..).and_then(|tail| tail.chars().next());

    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
