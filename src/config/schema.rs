use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::questionnaire::Questionnaire;
use crate::scoring::{KnowledgeBase, Profile, TeamSizeAdjustment};

/// The config file as written on disk. Profiles are the only required part;
/// weights, adjustment rules, and the questionnaire all fall back to the
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub profiles: BTreeMap<String, Profile>,

    #[serde(default)]
    pub weights: BTreeMap<String, f64>,

    #[serde(default)]
    pub team_size_adjustment: Option<TeamSizeAdjustment>,

    #[serde(default)]
    pub questionnaire: Option<Questionnaire>,
}

impl Config {
    /// The immutable knowledge base the scorer runs against.
    pub fn knowledge(&self) -> KnowledgeBase {
        KnowledgeBase {
            profiles: self.profiles.clone(),
            weights: self.weights.clone(),
            adjustment: self.team_size_adjustment.clone().unwrap_or_default(),
        }
    }

    pub fn questionnaire(&self) -> Questionnaire {
        self.questionnaire.clone().unwrap_or_default()
    }

    /// The starter config written by `init`: the built-in knowledge base and
    /// questionnaire, spelled out so users have something concrete to edit.
    pub fn starter() -> Config {
        let knowledge = KnowledgeBase::default();
        Config {
            profiles: knowledge.profiles,
            weights: knowledge.weights,
            team_size_adjustment: Some(knowledge.adjustment),
            questionnaire: Some(Questionnaire::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parse() {
        let yaml = r#"
profiles:
  Agile:
    requirements_stability: 2
  Predictive:
    requirements_stability: 5
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.profiles.len(), 2);
        assert!(config.weights.is_empty());
        assert!(config.team_size_adjustment.is_none());
        assert!(config.questionnaire.is_none());

        // Defaults fill in when derived views are built
        let knowledge = config.knowledge();
        assert_eq!(knowledge.adjustment, TeamSizeAdjustment::default());
        assert_eq!(config.questionnaire().question_count(), 10);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
profiles:
  Agile:
    pace: 5
weights:
  pace: 2.0
team_size_adjustment:
  trigger: pace
  default_size: 8
  rules:
    - range: "<5"
      boost:
        Agile: 1.5
questionnaire:
  - phase: do
    questions:
      - key: pace
        prompt: "How fast does the team iterate?"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.weights["pace"], 2.0);

        let adjustment = config.team_size_adjustment.as_ref().unwrap();
        assert_eq!(adjustment.default_size, 8);
        assert_eq!(adjustment.rules[0].boost["Agile"], 1.5);

        let questionnaire = config.questionnaire();
        assert_eq!(questionnaire.question_count(), 1);
        assert!(questionnaire.contains_key("pace"));
    }

    #[test]
    fn test_config_missing_profiles_fails() {
        let yaml = r#"
weights:
  pace: 2.0
"#;
        let parsed: Result<Config, _> = serde_saphyr::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_json_config_parse() {
        // JSON configs are accepted too: same shape, profiles and weights
        // at the top level
        let json = r#"{
            "profiles": {"Agile": {"pace": 5}},
            "weights": {"pace": 1.5}
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.profiles["Agile"]["pace"], 5.0);
        assert_eq!(config.weights["pace"], 1.5);
    }

    #[test]
    fn test_starter_config_roundtrip() {
        let config = Config::starter();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
