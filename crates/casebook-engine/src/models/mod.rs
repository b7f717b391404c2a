pub mod answer;
pub mod case;
pub mod diagnostic;

pub use answer::{Answer, AnswerKey};
pub use case::{AnswerOption, Case, Question};
pub use diagnostic::{Diagnostic, Extraction, SkipKind};
