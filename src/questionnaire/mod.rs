mod answers;
mod types;

pub use answers::{load_answers, AnswerSet};
pub use types::{Phase, PhaseSection, Question, Questionnaire};
