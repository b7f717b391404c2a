//! # Declaration Generation
//!
//! Renders [`SessionRecords`] as a TypeScript module of typed literals for the
//! exam application's static data. The output is a scaffold meant for manual
//! review, not a round-trip-safe serialization.
//!
//! Layout of a generated module:
//!
//! ```text
//! import type { Case, CaseQuestion, Difficulty } from "@/types/exam";
//!
//! function q(...): CaseQuestion { ... }
//!
//! const case1: Case = { id: "cfa-l2-s2-case1", ..., questions: [q("cfa-l2-s2-c1-q1", ...)] };
//! ```

pub mod exam;
pub mod literal;

use std::collections::HashSet;
use std::fmt;

use casebook_config::ConversionPolicy;

use crate::models::{Case, Question};
use crate::parsing::{SessionRecords, text::truncate_chars};

use literal::{string_literal, template_literal};

/// Generates the TypeScript declarations for one session.
pub fn generate(records: &SessionRecords, session: u32, policy: &ConversionPolicy) -> String {
    warn_on_duplicate_ids(records, session, policy);
    TsModule {
        records,
        session,
        policy,
    }
    .to_string()
}

/// Id of a case declaration, e.g. `cfa-l2-s2-case1`.
pub fn case_id(policy: &ConversionPolicy, session: u32, ordinal: usize) -> String {
    format!("{}-s{session}-case{ordinal}", policy.id_prefix)
}

/// Id of a question, e.g. `cfa-l2-s2-c1-q1`, using the display number.
pub fn question_id(
    policy: &ConversionPolicy,
    session: u32,
    ordinal: usize,
    display_number: u32,
) -> String {
    format!("{}-s{session}-c{ordinal}-q{display_number}", policy.id_prefix)
}

struct TsModule<'a> {
    records: &'a SessionRecords,
    session: u32,
    policy: &'a ConversionPolicy,
}

impl fmt::Display for TsModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        for case in &self.records.cases {
            self.write_case(f, case)?;
        }
        if self.policy.emit_exam {
            exam::write_exam(f, self.records, self.session, self.policy)?;
        }
        Ok(())
    }
}

impl TsModule<'_> {
    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let imports = if self.policy.emit_exam {
            "Exam, Case, CaseQuestion, Difficulty"
        } else {
            "Case, CaseQuestion, Difficulty"
        };
        writeln!(
            f,
            "import type {{ {imports} }} from {};",
            string_literal(&self.policy.types_module)
        )?;
        writeln!(f)?;
        writeln!(f, "function q(")?;
        writeln!(f, "  id: string, qNum: number, text: string,")?;
        writeln!(f, "  opts: {{ id: string; label: string; text: string }}[],")?;
        writeln!(f, "  correct: string, explanation: string, topic: string")?;
        writeln!(f, "): CaseQuestion {{")?;
        writeln!(f, "  return {{")?;
        writeln!(f, "    id,")?;
        writeln!(f, "    questionNumber: qNum,")?;
        writeln!(
            f,
            "    text, topic, difficulty: {} as Difficulty,",
            string_literal(&self.policy.difficulty)
        )?;
        writeln!(f, "    options: opts, correctAnswer: correct, explanation,")?;
        writeln!(f, "  }};")?;
        writeln!(f, "}}")?;
        writeln!(f)
    }

    fn write_case(&self, f: &mut fmt::Formatter<'_>, case: &Case) -> fmt::Result {
        let policy = self.policy;
        writeln!(f, "const case{}: Case = {{", case.ordinal)?;
        writeln!(
            f,
            "  id: {},",
            string_literal(&case_id(policy, self.session, case.ordinal))
        )?;
        writeln!(f, "  caseNumber: {},", case.ordinal)?;
        if let Some(title) = &case.title {
            writeln!(f, "  title: {},", string_literal(title))?;
        }
        writeln!(
            f,
            "  content: {},",
            template_literal(truncate_chars(&case.narrative, policy.case_text_cap))
        )?;
        writeln!(f, "  questions: [")?;
        for question in &case.questions {
            self.write_question(f, case.ordinal, question)?;
        }
        writeln!(f, "  ],")?;
        writeln!(f, "}};")?;
        writeln!(f)
    }

    fn write_question(
        &self,
        f: &mut fmt::Formatter<'_>,
        ordinal: usize,
        question: &Question,
    ) -> fmt::Result {
        let policy = self.policy;
        let display = policy.numbering.display_number(question.number);
        let answer = self
            .records
            .answers
            .resolve(question.number, &policy.fallback_answer);

        let options = question
            .options
            .iter()
            .map(|o| {
                format!(
                    "{{ id: {}, label: {}, text: {} }}",
                    string_literal(&o.id),
                    string_literal(&o.label),
                    string_literal(truncate_chars(&o.text, policy.option_text_cap))
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            f,
            "    q({}, {display}, {}, [{options}], {}, {}, {}),",
            string_literal(&question_id(policy, self.session, ordinal, display)),
            string_literal(truncate_chars(&question.prompt, policy.question_text_cap)),
            string_literal(&answer.correct),
            string_literal(truncate_chars(
                &answer.explanation,
                policy.generated_explanation_cap
            )),
            string_literal(&policy.subject_tag),
        )
    }
}

fn warn_on_duplicate_ids(records: &SessionRecords, session: u32, policy: &ConversionPolicy) {
    let mut seen = HashSet::new();
    for case in &records.cases {
        for question in &case.questions {
            let display = policy.numbering.display_number(question.number);
            let id = question_id(policy, session, case.ordinal, display);
            if !seen.insert(id.clone()) {
                log::warn!(
                    "question id {id} is generated more than once (source question {})",
                    question.number
                );
            }
        }
    }
}
