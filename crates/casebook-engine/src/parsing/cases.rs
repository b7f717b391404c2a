use casebook_config::ConversionPolicy;

use crate::models::{AnswerOption, Case, Diagnostic, Question, SkipKind};

use super::{
    QuestionBlock,
    classify::{LineClass, LineKind},
    skipped,
};

/// Builds a [`Case`] from classified lines of a case document.
///
/// Everything before the first question heading is narrative; each heading
/// opens a question block that runs to the next heading of any kind or end
/// of input. Lines after a question block closed by another heading (exhibits,
/// section titles) belong to no question and are ignored.
/// Blocks that do not have the expected shape are dropped and reported.
pub struct CaseBuilder<'a> {
    document: &'a str,
    policy: &'a ConversionPolicy,
    narrative: Vec<LineClass<'a>>,
    block: Option<QuestionBlock<'a>>,
    in_questions: bool,
    questions: Vec<Question>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> CaseBuilder<'a> {
    pub fn new(document: &'a str, policy: &'a ConversionPolicy) -> Self {
        Self {
            document,
            policy,
            narrative: vec![],
            block: None,
            in_questions: false,
            questions: vec![],
            diagnostics: vec![],
        }
    }

    pub fn push(&mut self, line: LineClass<'a>) {
        match line.kind {
            LineKind::QuestionHeading(number) => {
                self.flush_block();
                self.in_questions = true;
                self.block = Some(QuestionBlock::new(line, number));
            }
            LineKind::OtherHeading(_) if self.in_questions => {
                log::debug!(
                    "{}:{}: heading closes question section",
                    self.document,
                    line.number
                );
                self.flush_block();
            }
            _ => match self.block.as_mut() {
                Some(block) => block.lines.push(line),
                None if !self.in_questions => self.narrative.push(line),
                None => {}
            },
        }
    }

    pub fn finish(mut self, ordinal: usize) -> (Case, Vec<Diagnostic>) {
        self.flush_block();
        let (title, narrative) = split_title(&self.narrative);
        let case = Case {
            ordinal,
            title,
            narrative,
            questions: self.questions,
        };
        (case, self.diagnostics)
    }

    fn flush_block(&mut self) {
        let Some(block) = self.block.take() else {
            return;
        };
        if let Some(question) = self.parse_block(block) {
            log::debug!(
                "{}: question {} with {} options",
                self.document,
                question.number,
                question.options.len()
            );
            self.questions.push(question);
        }
    }

    fn parse_block(&mut self, block: QuestionBlock<'a>) -> Option<Question> {
        let mut lines = block
            .lines
            .into_iter()
            .skip_while(|l| l.kind == LineKind::Blank);

        let prompt = match lines.next() {
            Some(LineClass {
                kind:
                    LineKind::Bold {
                        opens: true,
                        closes: true,
                        text,
                    },
                ..
            }) => text,
            Some(LineClass {
                kind:
                    LineKind::Bold {
                        opens: true,
                        closes: false,
                        text,
                    },
                ..
            }) => {
                let mut parts = vec![text];
                loop {
                    match lines.next() {
                        Some(line) if matches!(line.kind, LineKind::Option { .. }) => {
                            self.skip(&line, SkipKind::UnclosedPrompt);
                            return None;
                        }
                        Some(line) => {
                            let trimmed = line.raw.trim();
                            if let Some(last) = trimmed.strip_suffix("**") {
                                parts.push(last.trim().to_string());
                                break;
                            }
                            parts.push(trimmed.to_string());
                        }
                        None => {
                            self.skip(&block.heading, SkipKind::UnclosedPrompt);
                            return None;
                        }
                    }
                }
                parts.join("\n").trim().to_string()
            }
            _ => {
                self.skip(&block.heading, SkipKind::MissingPrompt);
                return None;
            }
        };

        if prompt.is_empty() {
            self.skip(&block.heading, SkipKind::MissingPrompt);
            return None;
        }

        let mut options = vec![];
        let mut current: Option<(char, Vec<String>)> = None;

        for line in lines {
            match &line.kind {
                LineKind::Option { letter, text } if self.policy.accepts_option_letter(*letter) => {
                    flush_option(&mut options, current.take());
                    current = Some((*letter, vec![text.clone()]));
                }
                LineKind::Option { .. } | LineKind::Dash => {
                    flush_option(&mut options, current.take());
                    self.skip(&line, SkipKind::UnrecognizedOption);
                }
                LineKind::Rule => flush_option(&mut options, current.take()),
                _ => {
                    // Continuation of the current option; text before the first option is ignored.
                    if let Some((_, parts)) = current.as_mut() {
                        parts.push(line.raw.to_string());
                    }
                }
            }
        }
        flush_option(&mut options, current);

        Some(Question {
            number: block.number,
            prompt,
            options,
        })
    }

    fn skip(&mut self, line: &LineClass<'_>, kind: SkipKind) {
        self.diagnostics
            .push(skipped(self.document, line.number, line.raw, kind));
    }
}

fn flush_option(options: &mut Vec<AnswerOption>, current: Option<(char, Vec<String>)>) {
    if let Some((letter, parts)) = current {
        options.push(AnswerOption::new(letter, parts.join("\n").trim()));
    }
}

/// Splits a leading non-question heading off the narrative lines.
fn split_title(lines: &[LineClass<'_>]) -> (Option<String>, String) {
    let first = lines.iter().position(|l| l.kind != LineKind::Blank);
    let (title, body) = match first {
        Some(idx) => match &lines[idx].kind {
            LineKind::OtherHeading(text) => (Some(text.clone()), &lines[idx + 1..]),
            _ => (None, lines),
        },
        None => (None, lines),
    };

    let narrative = body
        .iter()
        .map(|l| l.raw)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();
    (title, narrative)
}
