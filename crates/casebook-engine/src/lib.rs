pub mod codegen;
pub mod io;
pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use codegen::{case_id, exam::exam_id, generate, question_id};
pub use io::*;
pub use models::*;
pub use parsing::{SessionRecords, SourceDocument, parse_answer_key, parse_case, parse_session};
