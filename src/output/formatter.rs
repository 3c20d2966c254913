use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::questionnaire::Questionnaire;
use crate::recommend::PhaseOutcome;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a normalized share as a percentage ("75.0%"). Whole numbers drop
/// the decimal ("100%").
pub fn format_share(share: f64) -> String {
    let formatted = format!("{:.1}%", share);
    formatted.replace(".0%", "%")
}

/// Format the per-phase recommendations as the main result listing.
/// Phases with no scoreable methodology show as "no recommendation".
pub fn format_recommendations(outcomes: &[PhaseOutcome], use_colors: bool) -> String {
    let mut lines = vec!["Recommended approach per PDCA phase:".to_string()];

    let label_width = outcomes
        .iter()
        .map(|o| o.phase.label().len())
        .max()
        .unwrap_or(0);

    for outcome in outcomes {
        let label = format!("{:<width$}", outcome.phase.label(), width = label_width);
        let line = match outcome.pick() {
            Some((methodology, share)) => {
                if use_colors {
                    format!(
                        "  {}  {} {}",
                        label.bold(),
                        methodology.green(),
                        format!("({})", format_share(share)).dimmed()
                    )
                } else {
                    format!("  {}  {} ({})", label, methodology, format_share(share))
                }
            }
            None => {
                let note = "no recommendation (insufficient data)";
                if use_colors {
                    format!("  {}  {}", label.bold(), note.dimmed())
                } else {
                    format!("  {}  {}", label, note)
                }
            }
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Format one phase's full score table for verbose mode, highest share
/// first: share, methodology, distance, and raw similarity.
pub fn format_phase_breakdown(outcome: &PhaseOutcome, use_colors: bool) -> String {
    if outcome.scores.is_empty() {
        return format!("{}: no methodology could be scored", outcome.phase);
    }

    let mut rows = outcome.scores.breakdown.clone();
    rows.sort_by(|a, b| {
        b.share
            .partial_cmp(&a.share)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);

    let mut lines = vec![format!("{}:", outcome.phase)];
    for row in &rows {
        let share = format!("{:>6}", format_share(row.share));
        let name = format!("{:<width$}", row.name, width = name_width);
        let detail = format!("distance {:.2}, similarity {:.3}", row.distance, row.raw);
        if use_colors {
            lines.push(format!("  {}  {}  {}", share.bold(), name, detail.dimmed()));
        } else {
            lines.push(format!("  {}  {}  {}", share, name, detail));
        }
    }

    lines.join("\n")
}

/// Format recommendations as tab-separated values for scripting
/// Columns: phase, methodology, share (no headers, no colors)
pub fn format_tsv(outcomes: &[PhaseOutcome]) -> String {
    outcomes
        .iter()
        .filter_map(|outcome| {
            outcome.pick().map(|(methodology, share)| {
                format!("{}\t{}\t{}", outcome.phase, methodology, share.round() as i64)
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the questionnaire listing: each phase with its question keys and
/// prompts, prompts truncated to the terminal width.
pub fn format_questionnaire(questionnaire: &Questionnaire, use_colors: bool) -> String {
    let term_width = get_terminal_width();

    let key_width = questionnaire
        .sections
        .iter()
        .flat_map(|s| s.questions.iter())
        .map(|q| q.key.len())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for section in &questionnaire.sections {
        if use_colors {
            lines.push(format!("{}", section.phase.label().bold()));
        } else {
            lines.push(section.phase.label().to_string());
        }
        for question in &section.questions {
            let key = format!("{:<width$}", question.key, width = key_width);
            let prompt = match term_width {
                // Key column plus indentation and separator
                Some(width) if width > key_width + 8 => {
                    truncate_prompt(&question.prompt, width - key_width - 4)
                }
                // No terminal (pipe), don't truncate
                _ => question.prompt.clone(),
            };
            if use_colors {
                lines.push(format!("  {}  {}", key.cyan(), prompt));
            } else {
                lines.push(format!("  {}  {}", key, prompt));
            }
        }
        lines.push(String::new());
    }

    // Drop the trailing blank line
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a prompt to fit available width, accounting for Unicode
fn truncate_prompt(prompt: &str, max_width: usize) -> String {
    let chars: Vec<char> = prompt.chars().collect();
    if chars.len() <= max_width {
        prompt.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::questionnaire::Phase;
    use crate::recommend::PhaseOutcome;
    use crate::scoring::{MethodologyBreakdown, ScoreResult};

    fn outcome(phase: Phase, shares: &[(&str, f64)]) -> PhaseOutcome {
        let share_map: BTreeMap<String, f64> = shares
            .iter()
            .map(|(name, share)| (name.to_string(), *share))
            .collect();
        let breakdown = share_map
            .iter()
            .map(|(name, &share)| MethodologyBreakdown {
                name: name.clone(),
                distance: 1.0,
                raw: 0.5,
                adjusted: 0.5,
                share,
            })
            .collect();
        PhaseOutcome {
            phase,
            scores: ScoreResult {
                shares: share_map,
                breakdown,
            },
        }
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(75.0), "75%");
        assert_eq!(format_share(33.333), "33.3%");
        assert_eq!(format_share(100.0), "100%");
    }

    #[test]
    fn test_format_recommendations_lists_winners() {
        let outcomes = vec![
            outcome(Phase::Plan, &[("Agile", 60.0), ("Predictive", 40.0)]),
            outcome(Phase::Do, &[("Lean", 100.0)]),
        ];
        let text = format_recommendations(&outcomes, false);
        assert!(text.contains("Plan"));
        assert!(text.contains("Agile (60%)"));
        assert!(text.contains("Lean (100%)"));
    }

    #[test]
    fn test_format_recommendations_marks_empty_phases() {
        let outcomes = vec![outcome(Phase::Check, &[])];
        let text = format_recommendations(&outcomes, false);
        assert!(text.contains("no recommendation"));
    }

    #[test]
    fn test_format_phase_breakdown_sorts_by_share() {
        let text = format_phase_breakdown(
            &outcome(Phase::Act, &[("Agile", 25.0), ("Hybrid", 75.0)]),
            false,
        );
        let agile_pos = text.find("Agile").unwrap();
        let hybrid_pos = text.find("Hybrid").unwrap();
        assert!(hybrid_pos < agile_pos);
    }

    #[test]
    fn test_format_tsv_skips_empty_phases() {
        let outcomes = vec![
            outcome(Phase::Plan, &[("Agile", 60.0), ("Predictive", 40.0)]),
            outcome(Phase::Do, &[]),
        ];
        let tsv = format_tsv(&outcomes);
        assert_eq!(tsv, "Plan\tAgile\t60");
    }

    #[test]
    fn test_truncate_prompt_adds_ellipsis() {
        assert_eq!(truncate_prompt("How stable is it?", 50), "How stable is it?");
        assert_eq!(truncate_prompt("How stable is it?", 10), "How sta...");
    }

    #[test]
    fn test_format_questionnaire_lists_keys() {
        let text = format_questionnaire(&Questionnaire::default(), false);
        assert!(text.contains("Plan"));
        assert!(text.contains("requirements_stability"));
        assert!(text.contains("team_autonomy"));
    }
}
