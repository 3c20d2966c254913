use std::collections::BTreeMap;

use super::config::KnowledgeBase;
use crate::questionnaire::AnswerSet;

/// How one methodology arrived at its share of the result.
#[derive(Debug, Clone)]
pub struct MethodologyBreakdown {
    pub name: String,
    /// Weighted squared distance over the overlapping question keys
    pub distance: f64,
    /// Similarity in [0, 1] before the team-size adjustment
    pub raw: f64,
    /// Similarity after the team-size adjustment, before normalization
    pub adjusted: f64,
    /// Normalized share of the total, in [0, 100]
    pub share: f64,
}

/// Normalized suitability scores for one scoring run.
///
/// `shares` sums to 100 across all methodologies that scored at all; an empty
/// map means no methodology overlapped the answers, which callers treat as
/// "insufficient data", not an error.
#[derive(Debug, Clone, Default)]
pub struct ScoreResult {
    /// Methodology name -> share of the total, in [0, 100]
    pub shares: BTreeMap<String, f64>,
    pub breakdown: Vec<MethodologyBreakdown>,
}

impl ScoreResult {
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// The methodology with the strictly highest share. Ties go to the first
    /// name in map iteration order, i.e. the lexicographically smallest
    /// methodology name.
    pub fn top(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (name, &share) in &self.shares {
            if best.map_or(true, |(_, s)| share > s) {
                best = Some((name, share));
            }
        }
        best
    }
}

/// Score every methodology in the knowledge base against the given answers.
///
/// Pure and deterministic: each methodology's weighted squared distance to
/// its ideal profile is folded into a similarity in (0, 1], the team-size
/// adjustment multiplies the affected raw scores, and the results are
/// normalized to percentage shares. Profile keys the answers do not cover
/// are skipped outright, so partial answer sets score only on what they
/// share with each profile. A methodology whose profile shares no key with
/// the answers scores 0.0 regardless of distance.
pub fn calculate_scores(answers: &AnswerSet, knowledge: &KnowledgeBase) -> ScoreResult {
    let mut distances: BTreeMap<String, f64> = BTreeMap::new();
    let mut raw_scores: BTreeMap<String, f64> = BTreeMap::new();

    for (name, profile) in &knowledge.profiles {
        let mut distance = 0.0;
        let mut overlap = false;
        for (key, ideal) in profile {
            if let Some(rating) = answers.ratings.get(key) {
                overlap = true;
                distance += knowledge.weight(key) * (rating - ideal).powi(2);
            }
        }

        let raw = if distance > 0.0 {
            1.0 / (1.0 + distance.sqrt())
        } else if overlap {
            // Zero distance on at least one shared dimension: perfect match
            1.0
        } else {
            // No shared dimension at all: not scoreable
            0.0
        };

        distances.insert(name.clone(), distance);
        raw_scores.insert(name.clone(), raw);
    }

    // Team-size adjustment multiplies raw scores before normalization
    let mut adjusted = raw_scores.clone();
    knowledge.adjustment.apply(answers, &mut adjusted);

    let total: f64 = adjusted.values().sum();
    if total == 0.0 {
        return ScoreResult::default();
    }

    let shares: BTreeMap<String, f64> = adjusted
        .iter()
        .map(|(name, score)| (name.clone(), 100.0 * score / total))
        .collect();

    let breakdown = shares
        .iter()
        .map(|(name, &share)| MethodologyBreakdown {
            name: name.clone(),
            distance: distances[name],
            raw: raw_scores[name],
            adjusted: adjusted[name],
            share,
        })
        .collect();

    ScoreResult { shares, breakdown }
}
