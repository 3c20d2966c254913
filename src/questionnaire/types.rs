use std::fmt;

use serde::{Deserialize, Serialize};

/// One phase of the PDCA cycle. The enum order is the cycle order and is the
/// order phases are analyzed and displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Plan,
    Do,
    Check,
    Act,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Plan, Phase::Do, Phase::Check, Phase::Act];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Plan => "Plan",
            Phase::Do => "Do",
            Phase::Check => "Check",
            Phase::Act => "Act",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single questionnaire item. The key is what profiles and answers refer
/// to; the prompt is display-only.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Question {
    pub key: String,
    pub prompt: String,
}

/// The questions asked for one phase, in presentation order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PhaseSection {
    pub phase: Phase,
    pub questions: Vec<Question>,
}

/// The full questionnaire: a partition of question keys across the four
/// phases. Each key must belong to exactly one phase (see `validate`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Questionnaire {
    pub sections: Vec<PhaseSection>,
}

impl Questionnaire {
    /// All questions belonging to `phase`, in questionnaire order.
    pub fn questions_for(&self, phase: Phase) -> impl Iterator<Item = &Question> {
        self.sections
            .iter()
            .filter(move |s| s.phase == phase)
            .flat_map(|s| s.questions.iter())
    }

    /// The question keys belonging to `phase`.
    pub fn keys_for(&self, phase: Phase) -> impl Iterator<Item = &str> {
        self.questions_for(phase).map(|q| q.key.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.sections
            .iter()
            .flat_map(|s| s.questions.iter())
            .any(|q| q.key == key)
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// Validate the phase partition.
    /// Returns all validation errors at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let mut seen: Vec<&str> = Vec::new();

        for section in &self.sections {
            if section.questions.is_empty() {
                errors.push(format!(
                    "questionnaire: phase '{}' has no questions",
                    section.phase
                ));
            }
            for question in &section.questions {
                if question.key.trim().is_empty() {
                    errors.push(format!(
                        "questionnaire: phase '{}' has a question with an empty key",
                        section.phase
                    ));
                } else if seen.contains(&question.key.as_str()) {
                    errors.push(format!(
                        "questionnaire: question key '{}' appears in more than one place",
                        question.key
                    ));
                } else {
                    seen.push(&question.key);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for Questionnaire {
    /// The built-in questionnaire: ten questions across the four phases.
    fn default() -> Self {
        fn q(key: &str, prompt: &str) -> Question {
            Question {
                key: key.to_string(),
                prompt: prompt.to_string(),
            }
        }

        Questionnaire {
            sections: vec![
                PhaseSection {
                    phase: Phase::Plan,
                    questions: vec![
                        q(
                            "requirements_stability",
                            "How stable and well understood are the requirements?",
                        ),
                        q("problem_complexity", "How complex is the problem being solved?"),
                        q(
                            "customer_involvement",
                            "How involved will the customer be during this phase?",
                        ),
                    ],
                },
                PhaseSection {
                    phase: Phase::Do,
                    questions: vec![
                        q(
                            "work_divisibility",
                            "Can the work be split into small independent increments?",
                        ),
                        q(
                            "team_autonomy",
                            "How autonomous and experienced is the delivery team?",
                        ),
                        q(
                            "technology_maturity",
                            "How stable and mature is the technology in use?",
                        ),
                    ],
                },
                PhaseSection {
                    phase: Phase::Check,
                    questions: vec![
                        q(
                            "delivery_pressure",
                            "How important are frequent progress checks and early delivery of value?",
                        ),
                        q(
                            "business_impact",
                            "How critical to the business is the result under review?",
                        ),
                    ],
                },
                PhaseSection {
                    phase: Phase::Act,
                    questions: vec![
                        q(
                            "organizational_culture",
                            "Does the organizational culture support adapting and rolling out change?",
                        ),
                        q(
                            "flow_management",
                            "Does the process need to stay flexible and allow continuous adjustment?",
                        ),
                    ],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order_is_cycle_order() {
        assert_eq!(Phase::ALL, [Phase::Plan, Phase::Do, Phase::Check, Phase::Act]);
        assert!(Phase::Plan < Phase::Do);
        assert!(Phase::Check < Phase::Act);
    }

    #[test]
    fn test_phase_serde_lowercase() {
        let phase: Phase = serde_saphyr::from_str("do").unwrap();
        assert_eq!(phase, Phase::Do);
        assert_eq!(serde_saphyr::to_string(&Phase::Check).unwrap().trim(), "check");
    }

    #[test]
    fn test_default_questionnaire_covers_all_phases() {
        let questionnaire = Questionnaire::default();
        for phase in Phase::ALL {
            assert!(
                questionnaire.questions_for(phase).count() > 0,
                "phase {} has no questions",
                phase
            );
        }
        assert_eq!(questionnaire.question_count(), 10);
    }

    #[test]
    fn test_default_questionnaire_is_valid() {
        assert!(Questionnaire::default().validate().is_ok());
    }

    #[test]
    fn test_keys_for_returns_only_phase_keys() {
        let questionnaire = Questionnaire::default();
        let plan_keys: Vec<&str> = questionnaire.keys_for(Phase::Plan).collect();
        assert_eq!(
            plan_keys,
            vec!["requirements_stability", "problem_complexity", "customer_involvement"]
        );
        assert!(!plan_keys.contains(&"team_autonomy"));
    }

    #[test]
    fn test_validate_rejects_duplicate_keys() {
        let questionnaire = Questionnaire {
            sections: vec![
                PhaseSection {
                    phase: Phase::Plan,
                    questions: vec![Question {
                        key: "scope".to_string(),
                        prompt: "How fixed is the scope?".to_string(),
                    }],
                },
                PhaseSection {
                    phase: Phase::Do,
                    questions: vec![Question {
                        key: "scope".to_string(),
                        prompt: "Same key again".to_string(),
                    }],
                },
            ],
        };
        let errors = questionnaire.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'scope'"));
    }

    #[test]
    fn test_validate_rejects_empty_section() {
        let questionnaire = Questionnaire {
            sections: vec![PhaseSection {
                phase: Phase::Act,
                questions: vec![],
            }],
        };
        let errors = questionnaire.validate().unwrap_err();
        assert!(errors[0].contains("'Act'"));
    }

    #[test]
    fn test_questionnaire_parses_from_yaml() {
        let yaml = r#"
- phase: plan
  questions:
    - key: scope_clarity
      prompt: "How clear is the scope?"
- phase: check
  questions:
    - key: review_cadence
      prompt: "How often are results reviewed?"
"#;
        let questionnaire: Questionnaire = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(questionnaire.sections.len(), 2);
        assert_eq!(questionnaire.sections[0].phase, Phase::Plan);
        assert!(questionnaire.contains_key("review_cadence"));
        assert!(!questionnaire.contains_key("scope"));
    }
}
