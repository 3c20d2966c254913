use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::adjustment::TeamSizeAdjustment;

/// A methodology's ideal answer vector: question key -> ideal rating.
pub type Profile = BTreeMap<String, f64>;

/// The knowledge base the scorer runs against.
///
/// Defines how methodology suitability is calculated: each methodology's
/// ideal answer profile, the per-question importance weights, and the
/// team-size adjustment rules. Loaded once at startup and immutable for the
/// process lifetime.
///
/// Example YAML:
/// ```yaml
/// profiles:
///   Agile:
///     requirements_stability: 2
///     customer_involvement: 5
///   Predictive:
///     requirements_stability: 5
///     customer_involvement: 2
/// weights:
///   requirements_stability: 1.5
/// team_size_adjustment:
///   trigger: team_autonomy
///   rules:
///     - { range: "3-9", boost: { Agile: 1.2 } }
///     - { range: ">9", boost: { Predictive: 1.1 } }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct KnowledgeBase {
    /// Methodology name -> ideal answer profile
    pub profiles: BTreeMap<String, Profile>,

    /// Question key -> relative importance. Keys absent from the table
    /// weigh 1.0.
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,

    /// Team-size adjustment rules (default: the built-in rules)
    #[serde(default, rename = "team_size_adjustment")]
    pub adjustment: TeamSizeAdjustment,
}

impl KnowledgeBase {
    pub fn weight(&self, key: &str) -> f64 {
        self.weights.get(key).copied().unwrap_or(1.0)
    }
}

impl Default for KnowledgeBase {
    /// The built-in knowledge base: four methodologies profiled over the ten
    /// built-in questionnaire keys.
    fn default() -> Self {
        fn profile(values: [(&str, f64); 10]) -> Profile {
            values
                .into_iter()
                .map(|(key, ideal)| (key.to_string(), ideal))
                .collect()
        }

        let profiles = BTreeMap::from([
            (
                "Agile".to_string(),
                profile([
                    ("requirements_stability", 2.0),
                    ("problem_complexity", 4.0),
                    ("customer_involvement", 5.0),
                    ("work_divisibility", 5.0),
                    ("team_autonomy", 5.0),
                    ("technology_maturity", 3.0),
                    ("delivery_pressure", 5.0),
                    ("business_impact", 3.0),
                    ("organizational_culture", 5.0),
                    ("flow_management", 4.0),
                ]),
            ),
            (
                "Lean".to_string(),
                profile([
                    ("requirements_stability", 3.0),
                    ("problem_complexity", 3.0),
                    ("customer_involvement", 4.0),
                    ("work_divisibility", 4.0),
                    ("team_autonomy", 4.0),
                    ("technology_maturity", 4.0),
                    ("delivery_pressure", 4.0),
                    ("business_impact", 3.0),
                    ("organizational_culture", 4.0),
                    ("flow_management", 5.0),
                ]),
            ),
            (
                "Predictive".to_string(),
                profile([
                    ("requirements_stability", 5.0),
                    ("problem_complexity", 2.0),
                    ("customer_involvement", 2.0),
                    ("work_divisibility", 2.0),
                    ("team_autonomy", 2.0),
                    ("technology_maturity", 5.0),
                    ("delivery_pressure", 2.0),
                    ("business_impact", 5.0),
                    ("organizational_culture", 2.0),
                    ("flow_management", 1.0),
                ]),
            ),
            (
                "Hybrid".to_string(),
                profile([
                    ("requirements_stability", 4.0),
                    ("problem_complexity", 3.0),
                    ("customer_involvement", 3.0),
                    ("work_divisibility", 3.0),
                    ("team_autonomy", 3.0),
                    ("technology_maturity", 4.0),
                    ("delivery_pressure", 3.0),
                    ("business_impact", 4.0),
                    ("organizational_culture", 3.0),
                    ("flow_management", 3.0),
                ]),
            ),
        ]);

        let weights = BTreeMap::from([
            ("requirements_stability".to_string(), 1.5),
            ("problem_complexity".to_string(), 1.0),
            ("customer_involvement".to_string(), 1.2),
            ("work_divisibility".to_string(), 1.0),
            ("team_autonomy".to_string(), 1.3),
            ("technology_maturity".to_string(), 1.0),
            ("delivery_pressure".to_string(), 1.2),
            ("business_impact".to_string(), 1.4),
            ("organizational_culture".to_string(), 1.1),
            ("flow_management".to_string(), 1.0),
        ]);

        KnowledgeBase {
            profiles,
            weights,
            adjustment: TeamSizeAdjustment::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_knowledge_base() {
        let knowledge = KnowledgeBase::default();
        assert_eq!(knowledge.profiles.len(), 4);
        assert!(knowledge.profiles.contains_key("Agile"));
        assert!(knowledge.profiles.contains_key("Predictive"));
        assert_eq!(knowledge.weight("requirements_stability"), 1.5);
    }

    #[test]
    fn test_weight_defaults_to_one() {
        let knowledge = KnowledgeBase {
            profiles: BTreeMap::new(),
            weights: BTreeMap::new(),
            adjustment: TeamSizeAdjustment::default(),
        };
        assert_eq!(knowledge.weight("anything"), 1.0);
    }

    #[test]
    fn test_knowledge_base_serde_roundtrip() {
        let knowledge = KnowledgeBase::default();
        let yaml = serde_saphyr::to_string(&knowledge).unwrap();
        let parsed: KnowledgeBase = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(knowledge, parsed);
    }

    #[test]
    fn test_partial_knowledge_base_parse() {
        let yaml = r#"
profiles:
  Agile:
    requirements_stability: 2
"#;
        let knowledge: KnowledgeBase = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(knowledge.profiles.len(), 1);
        assert!(knowledge.weights.is_empty());
        // Adjustment falls back to the built-in rules
        assert_eq!(knowledge.adjustment, TeamSizeAdjustment::default());
    }
}
