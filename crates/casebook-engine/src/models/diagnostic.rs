use std::fmt;

/// Why a fragment of markup contributed nothing to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipKind {
    /// Question heading not followed by a bold prompt.
    MissingPrompt,
    /// Bold prompt opened but never closed before the next option or heading.
    UnclosedPrompt,
    /// Dash-prefixed line that is not `- **X.** text` with an accepted letter.
    UnrecognizedOption,
    /// Answer-key block without an `**Answer: X**` line.
    MissingAnswer,
    /// `**Answer: X**` with a letter outside the accepted alphabet.
    UnrecognizedAnswer,
    /// Answer-key block without an `Explanation:` line.
    MissingExplanation,
}

impl fmt::Display for SkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipKind::MissingPrompt => "question has no bold prompt",
            SkipKind::UnclosedPrompt => "bold prompt is never closed",
            SkipKind::UnrecognizedOption => "line is not a recognized option",
            SkipKind::MissingAnswer => "answer block has no answer line",
            SkipKind::UnrecognizedAnswer => "answer letter is not an accepted option",
            SkipKind::MissingExplanation => "answer block has no explanation line",
        };
        f.write_str(text)
    }
}

/// A skipped markup fragment, reported instead of silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Label of the source document, usually its path.
    pub document: String,
    /// 1-based line number of the offending line.
    pub line: usize,
    pub kind: SkipKind,
    /// Shortened copy of the offending line.
    pub fragment: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} ({:?})",
            self.document, self.line, self.kind, self.fragment
        )
    }
}

/// The result of an extraction pass together with everything it skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Extraction<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
