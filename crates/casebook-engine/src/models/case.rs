/// A narrative scenario paired with the questions that refer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    /// 1-based position of the case within its batch.
    pub ordinal: usize,
    /// Leading non-question heading of the case document, if any.
    pub title: Option<String>,
    pub narrative: String,
    pub questions: Vec<Question>,
}

impl Case {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Number as written in the heading. Only unique within a logical group.
    pub number: u32,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

/// One lettered choice of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    /// Lower-cased letter, e.g. `a`.
    pub id: String,
    /// Letter as written, e.g. `A`.
    pub label: String,
    pub text: String,
}

impl AnswerOption {
    pub fn new(letter: char, text: impl Into<String>) -> Self {
        Self {
            id: letter.to_ascii_lowercase().to_string(),
            label: letter.to_string(),
            text: text.into(),
        }
    }
}
