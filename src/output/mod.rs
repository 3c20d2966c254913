mod formatter;

pub use formatter::{
    format_phase_breakdown, format_questionnaire, format_recommendations, format_share,
    format_tsv, should_use_colors,
};
