use std::collections::BTreeMap;

/// The correct option and explanation for one question number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Lower-cased option id.
    pub correct: String,
    pub explanation: String,
}

/// Answers looked up by question number.
///
/// Inserting an existing number replaces the earlier answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey {
    answers: BTreeMap<u32, Answer>,
}

impl AnswerKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous answer for `number`, if one was replaced.
    pub fn insert(&mut self, number: u32, answer: Answer) -> Option<Answer> {
        self.answers.insert(number, answer)
    }

    pub fn get(&self, number: u32) -> Option<&Answer> {
        self.answers.get(&number)
    }

    /// Looks up `number`, falling back to `fallback` with an empty explanation.
    pub fn resolve(&self, number: u32, fallback: &str) -> Answer {
        self.get(number).cloned().unwrap_or_else(|| Answer {
            correct: fallback.to_string(),
            explanation: String::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(correct: &str, explanation: &str) -> Answer {
        Answer {
            correct: correct.to_string(),
            explanation: explanation.to_string(),
        }
    }

    #[test]
    fn resolve_known_number() {
        let mut key = AnswerKey::new();
        key.insert(3, answer("b", "Because X."));

        assert_eq!(key.resolve(3, "a"), answer("b", "Because X."));
    }

    #[test]
    fn resolve_missing_number_uses_fallback() {
        let key = AnswerKey::new();

        assert_eq!(key.resolve(7, "a"), answer("a", ""));
    }

    #[test]
    fn later_insert_wins() {
        let mut key = AnswerKey::new();
        key.insert(1, answer("a", "first"));
        let replaced = key.insert(1, answer("c", "second"));

        assert_eq!(replaced, Some(answer("a", "first")));
        assert_eq!(key.get(1), Some(&answer("c", "second")));
        assert_eq!(key.len(), 1);
    }
}
