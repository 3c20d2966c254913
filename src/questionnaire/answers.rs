use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Questionnaire;

/// One respondent's answers: Likert ratings keyed by question key, plus the
/// planned team size. Built fresh per analysis run and never mutated by the
/// scorer.
///
/// The scorer itself accepts whatever ratings it is given; range checking is
/// the loader's job (see `validate`), so partial questionnaires score fine.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnswerSet {
    /// Question key -> rating on the 1..=5 scale.
    #[serde(default)]
    pub ratings: BTreeMap<String, f64>,

    /// Planned size of the delivery team. Only consulted by the team-size
    /// adjustment; absent means the adjustment falls back to its default.
    #[serde(default)]
    pub team_size: Option<u32>,
}

pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 5.0;

impl AnswerSet {
    /// Validate ratings and team size before they reach the scorer.
    /// Returns all validation errors at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (key, rating) in &self.ratings {
            if !rating.is_finite() || *rating < RATING_MIN || *rating > RATING_MAX {
                errors.push(format!(
                    "answers: rating for '{}' is {}, expected a value between {} and {}",
                    key, rating, RATING_MIN, RATING_MAX
                ));
            }
        }

        if self.team_size == Some(0) {
            errors.push("answers: team_size must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Rating keys that the questionnaire does not ask about. Harmless to the
    /// scorer unless a profile happens to reference them, but worth flagging
    /// as probable typos.
    pub fn unknown_keys(&self, questionnaire: &Questionnaire) -> Vec<String> {
        self.ratings
            .keys()
            .filter(|key| !questionnaire.contains_key(key))
            .cloned()
            .collect()
    }
}

/// Load an answers file (YAML, or JSON by extension).
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or cannot be
/// parsed.
pub fn load_answers(path: &Path) -> Result<AnswerSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file at {}", path.display()))?;
    crate::config::parse_document(path, &content)
        .with_context(|| format!("Failed to parse answers file at {}", path.display()))
}
