use regex::Regex;
use std::sync::OnceLock;

/// What a single line looks like, judged without any surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// `### Question <n>`
    QuestionHeading(u32),
    /// Any other ATX heading, with its text.
    OtherHeading(String),
    /// Thematic break such as `---`.
    Rule,
    /// `**Answer: X**`
    AnswerMarker(char),
    /// `Explanation: text`
    Explanation(String),
    /// `- **X.** text`
    Option { letter: char, text: String },
    /// Dash-prefixed line that is not an option.
    Dash,
    /// Line starting and/or ending with `**`. `text` has the markers removed.
    Bold {
        opens: bool,
        closes: bool,
        text: String,
    },
    Text,
}

/// Classification of one source line.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// 1-based line number in the document.
    pub number: usize,
    /// The line as written, without its line ending.
    pub raw: &'a str,
    pub kind: LineKind,
}

struct Patterns {
    question: Regex,
    heading: Regex,
    rule: Regex,
    answer: Regex,
    explanation: Regex,
    option: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        question: Regex::new(r"^\s{0,3}###\s+Question\s+(\d{1,9})\s*$")
            .expect("Invalid question heading regex"),
        heading: Regex::new(r"^\s{0,3}#{1,6}\s+(.+?)\s*$").expect("Invalid heading regex"),
        rule: Regex::new(r"^\s{0,3}(?:(?:-\s*){3,}|(?:\*\s*){3,}|(?:_\s*){3,})$")
            .expect("Invalid rule regex"),
        answer: Regex::new(r"^\s*\*\*Answer:\s*([A-Za-z])\*\*\s*$").expect("Invalid answer regex"),
        explanation: Regex::new(r"^\s*Explanation:\s*(.*)$").expect("Invalid explanation regex"),
        option: Regex::new(r"^\s*-\s*\*\*([A-Za-z])\.\*\*\s*(.*)$").expect("Invalid option regex"),
    })
}

/// Classifies individual lines of study-material markup.
pub struct MarkupLineClassifier;

impl MarkupLineClassifier {
    pub fn classify<'a>(&self, number: usize, raw: &'a str) -> LineClass<'a> {
        LineClass {
            number,
            raw,
            kind: Self::kind_of(raw),
        }
    }

    fn kind_of(raw: &str) -> LineKind {
        let p = patterns();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return LineKind::Blank;
        }
        // At most nine digits, so the parse always fits.
        if let Some(caps) = p.question.captures(raw)
            && let Ok(n) = caps[1].parse()
        {
            return LineKind::QuestionHeading(n);
        }
        if p.rule.is_match(raw) {
            return LineKind::Rule;
        }
        if let Some(caps) = p.heading.captures(raw) {
            return LineKind::OtherHeading(caps[1].to_string());
        }
        if let Some(caps) = p.answer.captures(raw)
            && let Some(letter) = caps[1].chars().next()
        {
            return LineKind::AnswerMarker(letter);
        }
        if let Some(caps) = p.explanation.captures(raw) {
            return LineKind::Explanation(caps[1].to_string());
        }
        if let Some(caps) = p.option.captures(raw)
            && let Some(letter) = caps[1].chars().next()
        {
            return LineKind::Option {
                letter,
                text: caps[2].to_string(),
            };
        }
        if trimmed.starts_with('-') {
            return LineKind::Dash;
        }

        let opens = trimmed.starts_with("**");
        let closes = trimmed.ends_with("**") && (!opens || trimmed.len() >= 4);
        if opens || closes {
            let mut text = trimmed;
            if opens {
                text = &text[2..];
            }
            if closes {
                text = &text[..text.len() - 2];
            }
            return LineKind::Bold {
                opens,
                closes,
                text: text.trim().to_string(),
            };
        }

        LineKind::Text
    }
}

/// Splits `text` into lines and classifies each one.
pub fn classify_lines(text: &str) -> Vec<LineClass<'_>> {
    let classifier = MarkupLineClassifier;
    text.lines()
        .enumerate()
        .map(|(idx, raw)| classifier.classify(idx + 1, raw))
        .collect()
}
