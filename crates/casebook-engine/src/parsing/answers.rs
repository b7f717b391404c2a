use casebook_config::ConversionPolicy;

use crate::models::{Answer, AnswerKey, Diagnostic, SkipKind};

use super::{
    QuestionBlock,
    classify::{LineClass, LineKind},
    skipped,
    text::truncate_chars,
};

/// Builds an [`AnswerKey`] from classified lines of an answer-key document.
///
/// Expected block shape:
///
/// ```text
/// ### Question 3
/// **Answer: B**
/// Explanation: Because X.
/// ```
///
/// The explanation runs to the next heading or thematic break and is cut to
/// `explanation_cap` characters.
pub struct AnswerKeyBuilder<'a> {
    document: &'a str,
    policy: &'a ConversionPolicy,
    block: Option<QuestionBlock<'a>>,
    key: AnswerKey,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> AnswerKeyBuilder<'a> {
    pub fn new(document: &'a str, policy: &'a ConversionPolicy) -> Self {
        Self {
            document,
            policy,
            block: None,
            key: AnswerKey::new(),
            diagnostics: vec![],
        }
    }

    pub fn push(&mut self, line: LineClass<'a>) {
        match line.kind {
            LineKind::QuestionHeading(number) => {
                self.flush_block();
                self.block = Some(QuestionBlock::new(line, number));
            }
            LineKind::OtherHeading(_) | LineKind::Rule => self.flush_block(),
            // Preamble and text after a closed block carry no answers.
            _ => {
                if let Some(block) = self.block.as_mut() {
                    block.lines.push(line);
                }
            }
        }
    }

    pub fn finish(mut self) -> (AnswerKey, Vec<Diagnostic>) {
        self.flush_block();
        (self.key, self.diagnostics)
    }

    fn flush_block(&mut self) {
        let Some(block) = self.block.take() else {
            return;
        };
        let number = block.number;
        if let Some(answer) = self.parse_block(block) {
            log::debug!(
                "{}: answer {} for question {number}",
                self.document,
                answer.correct
            );
            if self.key.insert(number, answer).is_some() {
                log::debug!(
                    "{}: question {number} answered twice, keeping the later one",
                    self.document
                );
            }
        }
    }

    fn parse_block(&mut self, block: QuestionBlock<'a>) -> Option<Answer> {
        let heading = block.heading;
        let mut lines = block.lines.into_iter();

        let correct = match lines.find(|l| l.kind != LineKind::Blank) {
            Some(LineClass {
                kind: LineKind::AnswerMarker(letter),
                number,
                raw,
            }) => {
                let letter = letter.to_ascii_uppercase();
                if !self.policy.accepts_option_letter(letter) {
                    self.skip(number, raw, SkipKind::UnrecognizedAnswer);
                    return None;
                }
                letter.to_ascii_lowercase().to_string()
            }
            _ => {
                self.skip(heading.number, heading.raw, SkipKind::MissingAnswer);
                return None;
            }
        };

        let Some(LineClass {
            kind: LineKind::Explanation(first),
            ..
        }) = lines.find(|l| l.kind != LineKind::Blank)
        else {
            self.skip(heading.number, heading.raw, SkipKind::MissingExplanation);
            return None;
        };

        let mut parts = vec![first];
        parts.extend(lines.map(|l| l.raw.to_string()));
        let explanation = parts.join("\n");

        Some(Answer {
            correct,
            explanation: truncate_chars(explanation.trim(), self.policy.explanation_cap)
                .to_string(),
        })
    }

    fn skip(&mut self, line: usize, raw: &str, kind: SkipKind) {
        self.diagnostics
            .push(skipped(self.document, line, raw, kind));
    }
}
