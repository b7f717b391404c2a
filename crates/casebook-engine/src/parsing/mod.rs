//! # Markup Extraction
//!
//! Two-phase, line-based parsing of study-material markup.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineKind` from local facts only (heading, bold span, option, answer
//!    marker, explanation).
//! 2. **Block Construction** (`cases`, `answers`): builders split the lines at
//!    `### Question <n>` headings and turn each block into a record.
//!
//! ## Skipped Input
//!
//! Fragments that do not have the expected shape never stop a batch. They
//! contribute nothing to the output and are reported as [`Diagnostic`]s in
//! the returned [`Extraction`].

pub mod answers;
pub mod cases;
pub mod classify;
pub mod text;

#[cfg(test)]
mod tests;

use casebook_config::ConversionPolicy;

use crate::models::{AnswerKey, Case, Diagnostic, Extraction, SkipKind};

pub use answers::AnswerKeyBuilder;
pub use cases::CaseBuilder;
pub use classify::{LineClass, LineKind, MarkupLineClassifier, classify_lines};

/// Characters of the offending line kept in a [`Diagnostic`].
const FRAGMENT_PREVIEW: usize = 60;

/// Lines from one `### Question <n>` heading up to the end of its block.
struct QuestionBlock<'a> {
    heading: LineClass<'a>,
    number: u32,
    lines: Vec<LineClass<'a>>,
}

impl<'a> QuestionBlock<'a> {
    fn new(heading: LineClass<'a>, number: u32) -> Self {
        Self {
            heading,
            number,
            lines: vec![],
        }
    }
}

fn skipped(document: &str, line: usize, raw: &str, kind: SkipKind) -> Diagnostic {
    Diagnostic {
        document: document.to_string(),
        line,
        kind,
        fragment: text::preview(raw.trim(), FRAGMENT_PREVIEW),
    }
}

/// A named markup document held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Label used in diagnostics, usually the file path.
    pub name: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Everything extracted for one exam session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecords {
    pub cases: Vec<Case>,
    pub answers: AnswerKey,
}

impl SessionRecords {
    pub fn question_count(&self) -> usize {
        self.cases.iter().map(Case::question_count).sum()
    }
}

/// Extracts one case (narrative plus question blocks) from a case document.
pub fn parse_case(
    document: &str,
    ordinal: usize,
    text: &str,
    policy: &ConversionPolicy,
) -> Extraction<Case> {
    let mut builder = CaseBuilder::new(document, policy);
    for line in classify_lines(text) {
        builder.push(line);
    }
    let (case, diagnostics) = builder.finish(ordinal);
    Extraction::new(case, diagnostics)
}

/// Extracts the question-number lookup from an answer-key document.
pub fn parse_answer_key(
    document: &str,
    text: &str,
    policy: &ConversionPolicy,
) -> Extraction<AnswerKey> {
    let mut builder = AnswerKeyBuilder::new(document, policy);
    for line in classify_lines(text) {
        builder.push(line);
    }
    let (key, diagnostics) = builder.finish();
    Extraction::new(key, diagnostics)
}

/// Extracts every case document, numbered 1..=n in order, plus the answer key.
pub fn parse_session(
    cases: &[SourceDocument],
    answers: &SourceDocument,
    policy: &ConversionPolicy,
) -> Extraction<SessionRecords> {
    let mut diagnostics: Vec<Diagnostic> = vec![];
    let mut parsed = Vec::with_capacity(cases.len());

    for (idx, doc) in cases.iter().enumerate() {
        let extraction = parse_case(&doc.name, idx + 1, &doc.text, policy);
        diagnostics.extend(extraction.diagnostics);
        parsed.push(extraction.value);
    }

    let key = parse_answer_key(&answers.name, &answers.text, policy);
    diagnostics.extend(key.diagnostics);

    Extraction::new(
        SessionRecords {
            cases: parsed,
            answers: key.value,
        },
        diagnostics,
    )
}
