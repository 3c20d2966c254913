use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::questionnaire::{AnswerSet, Phase, Questionnaire};
use crate::scoring::{calculate_scores, KnowledgeBase, ScoreResult};

/// Phase -> winning methodology name. Phases where no methodology scored are
/// absent, not placeholders.
pub type Recommendation = BTreeMap<Phase, String>;

/// The full scoring picture for one phase.
#[derive(Debug, Clone)]
pub struct PhaseOutcome {
    pub phase: Phase,
    pub scores: ScoreResult,
}

impl PhaseOutcome {
    pub fn pick(&self) -> Option<(&str, f64)> {
        self.scores.top()
    }
}

/// Score each PDCA phase independently against its own slice of the answers.
///
/// Each phase sees only the ratings for its own questions, so the scorer
/// stays phase-agnostic and is driven entirely by which keys it receives.
/// The team size rides along only into the phase that asks the adjustment's
/// trigger question; everywhere else it is withheld so it cannot influence
/// the outcome.
pub fn analyze_phases(
    answers: &AnswerSet,
    questionnaire: &Questionnaire,
    knowledge: &KnowledgeBase,
) -> Vec<PhaseOutcome> {
    Phase::ALL
        .iter()
        .map(|&phase| PhaseOutcome {
            phase,
            scores: calculate_scores(&phase_answers(answers, questionnaire, knowledge, phase), knowledge),
        })
        .collect()
}

/// The top-level recommendation: the best-scoring methodology per phase.
/// Ties go to the lexicographically smallest methodology name (see
/// `ScoreResult::top`).
pub fn recommend_per_phase(
    answers: &AnswerSet,
    questionnaire: &Questionnaire,
    knowledge: &KnowledgeBase,
) -> Recommendation {
    analyze_phases(answers, questionnaire, knowledge)
        .iter()
        .filter_map(|outcome| {
            outcome
                .pick()
                .map(|(name, _)| (outcome.phase, name.to_string()))
        })
        .collect()
}

fn phase_answers(
    answers: &AnswerSet,
    questionnaire: &Questionnaire,
    knowledge: &KnowledgeBase,
    phase: Phase,
) -> AnswerSet {
    let keys: BTreeSet<&str> = questionnaire.keys_for(phase).collect();

    let ratings = answers
        .ratings
        .iter()
        .filter(|(key, _)| keys.contains(key.as_str()))
        .map(|(key, value)| (key.clone(), *value))
        .collect();

    let team_size = if keys.contains(knowledge.adjustment.trigger.as_str()) {
        answers.team_size
    } else {
        None
    };

    AnswerSet { ratings, team_size }
}
