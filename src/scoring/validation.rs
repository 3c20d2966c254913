use super::adjustment::SizeRange;
use super::config::KnowledgeBase;

/// Validate the knowledge base at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_knowledge(knowledge: &KnowledgeBase) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if knowledge.profiles.is_empty() {
        errors.push("profiles: at least one methodology profile is required".to_string());
    }

    for (name, profile) in &knowledge.profiles {
        if profile.is_empty() {
            errors.push(format!("profiles.{}: profile has no question keys", name));
        }
        for (key, ideal) in profile {
            if !ideal.is_finite() {
                errors.push(format!(
                    "profiles.{}.{}: ideal value must be a finite number",
                    name, key
                ));
            }
        }
    }

    for (key, weight) in &knowledge.weights {
        if !weight.is_finite() || *weight <= 0.0 {
            errors.push(format!(
                "weights.{}: must be a positive number, got {}",
                key, weight
            ));
        }
    }

    let adjustment = &knowledge.adjustment;
    if adjustment.trigger.trim().is_empty() {
        errors.push("team_size_adjustment.trigger: must not be empty".to_string());
    }
    if adjustment.default_size == 0 {
        errors.push("team_size_adjustment.default_size: must be at least 1".to_string());
    }
    for (i, rule) in adjustment.rules.iter().enumerate() {
        if let Err(e) = SizeRange::parse(&rule.range) {
            errors.push(format!(
                "team_size_adjustment.rules[{}].range: invalid '{}' - {}",
                i, rule.range, e
            ));
        }
        for (methodology, multiplier) in &rule.boost {
            if !multiplier.is_finite() || *multiplier <= 0.0 {
                errors.push(format!(
                    "team_size_adjustment.rules[{}].boost.{}: must be a positive number, got {}",
                    i, methodology, multiplier
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Non-fatal findings: adjustment boosts naming methodologies that have no
/// profile are silent no-ops at scoring time, which usually means a typo or
/// a renamed profile. Reported as warnings so a misspelled name does not
/// quietly disable a rule.
pub fn lint_knowledge(knowledge: &KnowledgeBase) -> Vec<String> {
    let mut warnings = Vec::new();

    for (i, rule) in knowledge.adjustment.rules.iter().enumerate() {
        for methodology in rule.boost.keys() {
            if !knowledge.profiles.contains_key(methodology) {
                warnings.push(format!(
                    "team_size_adjustment.rules[{}]: boost target '{}' has no profile and will never apply",
                    i, methodology
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::scoring::adjustment::{SizeRule, TeamSizeAdjustment};

    #[test]
    fn test_default_knowledge_is_valid() {
        let knowledge = KnowledgeBase::default();
        assert!(validate_knowledge(&knowledge).is_ok());
        assert!(lint_knowledge(&knowledge).is_empty());
    }

    #[test]
    fn test_empty_profiles_rejected() {
        let knowledge = KnowledgeBase {
            profiles: BTreeMap::new(),
            weights: BTreeMap::new(),
            adjustment: TeamSizeAdjustment::default(),
        };
        let errors = validate_knowledge(&knowledge).unwrap_err();
        assert!(errors[0].contains("at least one methodology"));
    }

    #[test]
    fn test_nonpositive_weight_rejected() {
        let mut knowledge = KnowledgeBase::default();
        knowledge.weights.insert("team_autonomy".to_string(), 0.0);
        let errors = validate_knowledge(&knowledge).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("weights.team_autonomy"));
    }

    #[test]
    fn test_invalid_rule_range_rejected() {
        let mut knowledge = KnowledgeBase::default();
        knowledge.adjustment.rules[0].range = "a few".to_string();
        let errors = validate_knowledge(&knowledge).unwrap_err();
        assert!(errors[0].contains("rules[0].range"));
    }

    #[test]
    fn test_nonpositive_multiplier_rejected() {
        let mut knowledge = KnowledgeBase::default();
        knowledge.adjustment.rules[0]
            .boost
            .insert("Agile".to_string(), -1.0);
        let errors = validate_knowledge(&knowledge).unwrap_err();
        assert!(errors[0].contains("boost.Agile"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut knowledge = KnowledgeBase::default();
        knowledge.weights.insert("a".to_string(), -1.0); // Error 1
        knowledge.adjustment.default_size = 0; // Error 2
        let errors = validate_knowledge(&knowledge).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_lint_flags_unknown_boost_target() {
        let mut knowledge = KnowledgeBase::default();
        knowledge.adjustment.rules.push(SizeRule {
            range: "<3".to_string(),
            boost: BTreeMap::from([("Predictve".to_string(), 1.1)]),
        });
        let warnings = lint_knowledge(&knowledge);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'Predictve'"));
    }
}
