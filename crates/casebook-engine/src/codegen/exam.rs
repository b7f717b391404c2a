//! Optional `Exam` export that ties the generated cases together.

use std::fmt;

use casebook_config::ConversionPolicy;

use crate::parsing::SessionRecords;

use super::literal::{camel_identifier, string_literal};

/// Exam id, e.g. `cfa-level-2-session-2`.
pub fn exam_id(policy: &ConversionPolicy, session: u32) -> String {
    format!("{}-session-{session}", policy.exam_id_prefix)
}

/// Name of the exported constant, e.g. `cfaLevel2Session2Exam`.
pub fn exam_const_name(policy: &ConversionPolicy, session: u32) -> String {
    format!("{}Exam", camel_identifier(&exam_id(policy, session)))
}

pub(crate) fn write_exam(
    f: &mut fmt::Formatter<'_>,
    records: &SessionRecords,
    session: u32,
    policy: &ConversionPolicy,
) -> fmt::Result {
    let total = records.question_count();
    let topics: Vec<&str> = if total > 0 {
        vec![policy.subject_tag.as_str()]
    } else {
        vec![]
    };
    let time_limit = u64::from(policy.time_limit_per_question) * total as u64;

    writeln!(
        f,
        "export const {}: Exam = {{",
        exam_const_name(policy, session)
    )?;
    writeln!(f, "  id: {},", string_literal(&exam_id(policy, session)))?;
    writeln!(
        f,
        "  name: {},",
        string_literal(&format!("{} - Session {session}", policy.exam_title))
    )?;
    writeln!(
        f,
        "  description: {},",
        string_literal(&format!("Item Sets: {}", topics.join(", ")))
    )?;
    writeln!(f, "  category: {},", string_literal(&policy.category))?;
    if !policy.level.is_empty() {
        writeln!(f, "  level: {},", string_literal(&policy.level))?;
    }
    writeln!(f, "  structure: \"case-study\",")?;
    writeln!(f, "  totalQuestions: {total},")?;
    writeln!(f, "  timeLimit: {time_limit},")?;
    writeln!(f, "  passingScore: {},", policy.passing_score)?;
    writeln!(f, "  difficulty: {},", string_literal(&policy.difficulty))?;
    let topics = topics
        .iter()
        .map(|t| string_literal(t))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(f, "  topics: [{topics}],")?;
    writeln!(f, "  questions: [],")?;
    let cases = records
        .cases
        .iter()
        .map(|c| format!("case{}", c.ordinal))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(f, "  cases: [{cases}],")?;
    writeln!(f, "}};")
}
