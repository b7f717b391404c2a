//! Extraction tests over small hand-written documents.

use casebook_config::ConversionPolicy;
use pretty_assertions::assert_eq;

use crate::models::{AnswerOption, SkipKind};
use crate::parsing::{SourceDocument, parse_answer_key, parse_case, parse_session};

const TWO_QUESTIONS: &str = "\
Austin Clark, CFA, has been asked to analyze White Goods Corporation.

Sales are forecast with multiple regression.

### Question 45
**Using his multiple linear regression, Clark's sales forecast for 2019 is closest to:**
- **A.** -$191,914.
- **B.** $180,502.
- **C.** $192,090.

### Question 46
**Which concern about the model would be most appropriate?**
- **A.** Low explanatory power.
- **B.** Type II error.
- **C.** Type I error.
";

fn policy() -> ConversionPolicy {
    ConversionPolicy::default()
}

#[test]
fn one_case_with_two_questions_in_order() {
    let extraction = parse_case("case1.md", 1, TWO_QUESTIONS, &policy());
    let case = extraction.value;

    assert!(extraction.diagnostics.is_empty());
    assert_eq!(case.ordinal, 1);
    assert_eq!(case.title, None);
    assert_eq!(
        case.narrative,
        "Austin Clark, CFA, has been asked to analyze White Goods Corporation.\n\n\
         Sales are forecast with multiple regression."
    );
    assert_eq!(case.questions.len(), 2);
    assert_eq!(case.questions[0].number, 45);
    assert_eq!(case.questions[1].number, 46);
    assert_eq!(
        case.questions[1].prompt,
        "Which concern about the model would be most appropriate?"
    );
}

#[test]
fn three_options_keep_letter_order() {
    let case = parse_case("case1.md", 1, TWO_QUESTIONS, &policy()).value;
    let options = &case.questions[0].options;

    assert_eq!(
        options,
        &vec![
            AnswerOption::new('A', "-$191,914."),
            AnswerOption::new('B', "$180,502."),
            AnswerOption::new('C', "$192,090."),
        ]
    );
    let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn missing_prompt_skips_question_and_reports_it() {
    let md = "\
Narrative.

### Question 1
- **A.** One.
- **B.** Two.

### Question 2
**Kept?**
- **A.** Yes.
";
    let extraction = parse_case("case.md", 1, md, &policy());

    assert_eq!(extraction.value.questions.len(), 1);
    assert_eq!(extraction.value.questions[0].number, 2);
    assert_eq!(extraction.diagnostics.len(), 1);
    let diagnostic = &extraction.diagnostics[0];
    assert_eq!(diagnostic.kind, SkipKind::MissingPrompt);
    assert_eq!(diagnostic.line, 3);
    assert_eq!(diagnostic.document, "case.md");
    assert_eq!(diagnostic.fragment, "### Question 1");
}

#[test]
fn prompt_may_follow_blank_lines_and_span_lines() {
    let md = "\
### Question 7

**Regarding Carington's comments,
which is correct?**
- **A.** both comments are accurate.
";
    let case = parse_case("case.md", 1, md, &policy()).value;

    assert_eq!(
        case.questions[0].prompt,
        "Regarding Carington's comments,\nwhich is correct?"
    );
    assert_eq!(case.questions[0].options.len(), 1);
}

#[test]
fn unclosed_prompt_is_skipped() {
    let md = "\
### Question 1
**Never closed
- **A.** One.
";
    let extraction = parse_case("case.md", 1, md, &policy());

    assert!(extraction.value.questions.is_empty());
    assert_eq!(extraction.diagnostics[0].kind, SkipKind::UnclosedPrompt);
    assert_eq!(extraction.diagnostics[0].line, 3);
}

#[test]
fn option_text_continues_until_next_dash_line() {
    let md = "\
### Question 1
**Pick one**
- **A.** first line
  second line
- **B.** other

---
Trailing notes after a rule.
";
    let case = parse_case("case.md", 1, md, &policy()).value;
    let options = &case.questions[0].options;

    assert_eq!(options[0].text, "first line\n  second line");
    assert_eq!(options[1].text, "other");
    assert_eq!(options.len(), 2);
}

#[test]
fn letter_outside_alphabet_yields_no_option() {
    let md = "\
### Question 1
**Pick one**
- **A.** one
- **D.** four
- **B.** two
";
    let extraction = parse_case("case.md", 1, md, &policy());
    let options = &extraction.value.questions[0].options;

    assert_eq!(options.len(), 2);
    assert_eq!(options[0].text, "one");
    assert_eq!(options[1].id, "b");
    assert_eq!(extraction.diagnostics.len(), 1);
    assert_eq!(extraction.diagnostics[0].kind, SkipKind::UnrecognizedOption);
    assert_eq!(extraction.diagnostics[0].line, 4);
}

#[test]
fn section_heading_ends_the_last_question() {
    let md = "\
Narrative.

### Question 1
**Pick one**
- **A.** one
- **C.** three

## Exhibit 1
| a | b |

### Question 2
**Still parsed?**
- **A.** yes
";
    let extraction = parse_case("case.md", 1, md, &policy());
    let case = extraction.value;

    assert!(extraction.diagnostics.is_empty());
    assert_eq!(case.narrative, "Narrative.");
    assert_eq!(case.questions.len(), 2);
    assert_eq!(case.questions[0].options[1].text, "three");
    assert_eq!(case.questions[1].prompt, "Still parsed?");
}

#[test]
fn question_without_options_is_kept() {
    let md = "### Question 9\n**Describe the model.**\n";
    let extraction = parse_case("case.md", 1, md, &policy());

    assert!(extraction.is_clean());
    assert_eq!(extraction.value.questions[0].number, 9);
    assert!(extraction.value.questions[0].options.is_empty());
}

#[test]
fn leading_heading_becomes_title() {
    let md = "\
## White Goods Corporation Sales Forecast

Austin Clark, CFA, is analyzing the company.

### Question 1
**What?**
";
    let case = parse_case("case.md", 3, md, &policy()).value;

    assert_eq!(case.ordinal, 3);
    assert_eq!(
        case.title.as_deref(),
        Some("White Goods Corporation Sales Forecast")
    );
    assert_eq!(case.narrative, "Austin Clark, CFA, is analyzing the company.");
}

#[test]
fn document_without_questions_is_all_narrative() {
    let case = parse_case("case.md", 1, "  Just a story.  \n\n", &policy()).value;

    assert_eq!(case.narrative, "Just a story.");
    assert!(case.questions.is_empty());
}

#[test]
fn empty_document() {
    let extraction = parse_case("case.md", 1, "", &policy());

    assert!(extraction.is_clean());
    assert_eq!(extraction.value.narrative, "");
    assert!(extraction.value.questions.is_empty());
}

#[test]
fn answer_key_block() {
    let md = "### Question 3\n**Answer: B**\nExplanation: Because X.";
    let extraction = parse_answer_key("answers.md", md, &policy());
    let answer = extraction.value.get(3).unwrap();

    assert!(extraction.is_clean());
    assert_eq!(answer.correct, "b");
    assert_eq!(answer.explanation, "Because X.");
}

#[test]
fn explanation_runs_to_next_heading() {
    let md = "\
# Answers

### Question 1
**Answer: C**

Explanation: F = (RSS/k) / (SSE/(n-k-1)).

k=5, so F = 336.0.

### Question 2
**Answer: A**
Explanation: Both are correct.
";
    let key = parse_answer_key("answers.md", md, &policy()).value;

    assert_eq!(key.len(), 2);
    assert_eq!(
        key.get(1).unwrap().explanation,
        "F = (RSS/k) / (SSE/(n-k-1)).\n\nk=5, so F = 336.0."
    );
    assert_eq!(key.get(2).unwrap().correct, "a");
}

#[test]
fn explanation_stops_at_section_heading_or_rule() {
    let md = "\
### Question 1
**Answer: A**
Explanation: Because.

## Case 2

See exhibit.

### Question 2
**Answer: B**
Explanation: Second.
---
Footer notes.
";
    let key = parse_answer_key("answers.md", md, &policy()).value;

    assert_eq!(key.get(1).unwrap().explanation, "Because.");
    assert_eq!(key.get(2).unwrap().explanation, "Second.");
}

#[test]
fn long_explanation_is_cut_to_cap_without_marker() {
    let long = "x".repeat(750);
    let md = format!("### Question 1\n**Answer: A**\nExplanation: {long}\n");
    let key = parse_answer_key("answers.md", &md, &policy()).value;
    let explanation = &key.get(1).unwrap().explanation;

    assert_eq!(explanation.chars().count(), 500);
    assert!(explanation.chars().all(|c| c == 'x'));
}

#[test]
fn malformed_answer_blocks_are_reported() {
    let md = "\
### Question 1
Explanation: no answer line.

### Question 2
**Answer: B**

### Question 3
**Answer: E**
Explanation: E is not an option.

### Question 4
**Answer: c**
Explanation: Lower-case letters are accepted.
";
    let extraction = parse_answer_key("answers.md", md, &policy());
    let kinds: Vec<SkipKind> = extraction.diagnostics.iter().map(|d| d.kind).collect();

    assert_eq!(
        kinds,
        vec![
            SkipKind::MissingAnswer,
            SkipKind::MissingExplanation,
            SkipKind::UnrecognizedAnswer,
        ]
    );
    assert_eq!(extraction.value.len(), 1);
    assert_eq!(extraction.value.get(4).unwrap().correct, "c");
}

#[test]
fn duplicate_answer_numbers_keep_the_later_block() {
    let md = "\
### Question 1
**Answer: A**
Explanation: first.

### Question 1
**Answer: B**
Explanation: second.
";
    let key = parse_answer_key("answers.md", md, &policy()).value;

    assert_eq!(key.len(), 1);
    assert_eq!(key.get(1).unwrap().correct, "b");
    assert_eq!(key.get(1).unwrap().explanation, "second.");
}

#[test]
fn session_numbers_cases_in_input_order() {
    let cases = vec![
        SourceDocument::new("case1.md", "First.\n### Question 1\n**Q1**\n"),
        SourceDocument::new("case2.md", "Second.\n### Question 2\n- **A.** no prompt\n"),
    ];
    let answers = SourceDocument::new("answers.md", "### Question 1\n**Answer: A**\nExplanation: ok\n");

    let extraction = parse_session(&cases, &answers, &policy());
    let records = extraction.value;

    assert_eq!(records.cases.len(), 2);
    assert_eq!(records.cases[0].ordinal, 1);
    assert_eq!(records.cases[1].ordinal, 2);
    assert_eq!(records.cases[1].narrative, "Second.");
    assert_eq!(records.question_count(), 1);
    assert_eq!(records.answers.len(), 1);
    assert_eq!(extraction.diagnostics.len(), 1);
    assert_eq!(extraction.diagnostics[0].document, "case2.md");
}
