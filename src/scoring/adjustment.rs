use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::questionnaire::AnswerSet;

#[derive(Debug, Clone)]
pub enum SizeRange {
    LessThan(u32),
    LessEqual(u32),
    GreaterThan(u32),
    GreaterEqual(u32),
    Equal(u32),
    Between(u32, u32), // Inclusive range: N-M
}

impl SizeRange {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(SizeRange::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(SizeRange::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix(">") {
            Ok(SizeRange::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<") {
            Ok(SizeRange::LessThan(val.trim().parse()?))
        } else if s.contains('-') && !s.starts_with('-') {
            // Range format: "3-9"
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() == 2 {
                let low: u32 = parts[0].trim().parse()?;
                let high: u32 = parts[1].trim().parse()?;
                Ok(SizeRange::Between(low, high))
            } else {
                bail!("Invalid range format: {}", s)
            }
        } else {
            Ok(SizeRange::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: u32) -> bool {
        match self {
            SizeRange::LessThan(n) => value < *n,
            SizeRange::LessEqual(n) => value <= *n,
            SizeRange::GreaterThan(n) => value > *n,
            SizeRange::GreaterEqual(n) => value >= *n,
            SizeRange::Equal(n) => value == *n,
            SizeRange::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

/// One team-size rule: when the team size falls in `range`, each methodology
/// named in `boost` has its raw score multiplied by the given factor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SizeRule {
    /// Team-size range expression (e.g. "3-9", ">9", "<3")
    pub range: String,

    /// Methodology name -> score multiplier
    pub boost: BTreeMap<String, f64>,
}

/// Team-size adjustment applied to raw scores before normalization.
///
/// The adjustment only fires when the answers contain the `trigger` question,
/// which ties it to the one phase that asks that question. Rules are checked
/// in order and the first matching range wins; a team size matching no rule
/// leaves every score untouched. Boost entries naming a methodology that was
/// not scored are skipped (validation warns about them at startup).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TeamSizeAdjustment {
    /// Question key whose presence in the answers enables the adjustment
    pub trigger: String,

    /// Team size assumed when the answers carry none (default: 10)
    #[serde(default = "default_team_size")]
    pub default_size: u32,

    pub rules: Vec<SizeRule>,
}

fn default_team_size() -> u32 {
    10
}

impl TeamSizeAdjustment {
    /// Apply the first matching rule to `scores` in place.
    pub fn apply(&self, answers: &AnswerSet, scores: &mut BTreeMap<String, f64>) {
        if !answers.ratings.contains_key(&self.trigger) {
            return;
        }
        let team_size = answers.team_size.unwrap_or(self.default_size);

        for rule in &self.rules {
            if let Ok(range) = SizeRange::parse(&rule.range) {
                if range.matches(team_size) {
                    for (methodology, multiplier) in &rule.boost {
                        if let Some(score) = scores.get_mut(methodology) {
                            *score *= multiplier;
                        }
                    }
                    return; // First matching rule wins
                }
            }
        }
    }
}

impl Default for TeamSizeAdjustment {
    /// The built-in adjustment: small teams favor Agile and Lean, larger
    /// teams favor Predictive and Hybrid, teams under three people get no
    /// adjustment at all.
    fn default() -> Self {
        TeamSizeAdjustment {
            trigger: "team_autonomy".to_string(),
            default_size: 10,
            rules: vec![
                SizeRule {
                    range: "3-9".to_string(),
                    boost: BTreeMap::from([
                        ("Agile".to_string(), 1.2),
                        ("Lean".to_string(), 1.1),
                    ]),
                },
                SizeRule {
                    range: ">9".to_string(),
                    boost: BTreeMap::from([
                        ("Predictive".to_string(), 1.1),
                        ("Hybrid".to_string(), 1.1),
                    ]),
                },
            ],
        }
    }
}
