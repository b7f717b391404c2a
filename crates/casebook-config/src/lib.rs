use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid conversion policy: {0}")]
    InvalidPolicy(String),
}

/// How the generator numbers questions in emitted ids and `questionNumber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum QuestionNumbering {
    /// The question number as written in the source document.
    #[default]
    Source,
    /// Legacy renumbering: `n % period`, with zero mapped to `period`.
    ///
    /// Ids collide as soon as a case has more than `period` questions.
    Cyclic { period: u32 },
}

impl QuestionNumbering {
    /// The legacy converter cycled question numbers through 1..=4.
    pub const LEGACY: QuestionNumbering = QuestionNumbering::Cyclic { period: 4 };

    pub fn display_number(self, number: u32) -> u32 {
        match self {
            QuestionNumbering::Source => number,
            QuestionNumbering::Cyclic { period: 0 } => number,
            QuestionNumbering::Cyclic { period } => match number % period {
                0 => period,
                n => n,
            },
        }
    }
}

/// Tunable values that shape extraction and generation.
///
/// Caps count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionPolicy {
    pub case_text_cap: usize,
    pub question_text_cap: usize,
    pub option_text_cap: usize,
    /// Applied when the answer key is parsed.
    pub explanation_cap: usize,
    /// Applied again when the explanation is written into a question.
    pub generated_explanation_cap: usize,
    pub subject_tag: String,
    pub fallback_answer: String,
    pub option_letters: String,
    pub id_prefix: String,
    pub exam_id_prefix: String,
    /// Display name of the exam export, suffixed with " - Session <n>".
    pub exam_title: String,
    pub category: String,
    /// Exam level in the export, e.g. `"2"`. Empty leaves it out.
    pub level: String,
    pub difficulty: String,
    pub types_module: String,
    pub emit_exam: bool,
    pub passing_score: u32,
    /// Minutes allotted per question in the exam export.
    pub time_limit_per_question: u32,
    pub numbering: QuestionNumbering,
}

impl Default for ConversionPolicy {
    fn default() -> Self {
        Self {
            case_text_cap: 2000,
            question_text_cap: 200,
            option_text_cap: 100,
            explanation_cap: 500,
            generated_explanation_cap: 200,
            subject_tag: "Topic".to_string(),
            fallback_answer: "a".to_string(),
            option_letters: "ABC".to_string(),
            id_prefix: "cfa-l2".to_string(),
            exam_id_prefix: "cfa-level-2".to_string(),
            exam_title: "CFA Level II".to_string(),
            category: "cfa".to_string(),
            level: "2".to_string(),
            difficulty: "advanced".to_string(),
            types_module: "@/types/exam".to_string(),
            emit_exam: false,
            passing_score: 70,
            time_limit_per_question: 3,
            numbering: QuestionNumbering::Source,
        }
    }
}

impl ConversionPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.option_letters.is_empty()
            || !self.option_letters.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(ConfigError::InvalidPolicy(format!(
                "option_letters must be uppercase ASCII letters, got {:?}",
                self.option_letters
            )));
        }

        let mut fallback = self.fallback_answer.chars();
        let fallback_ok = matches!(
            (fallback.next(), fallback.next()),
            (Some(c), None) if c.is_ascii_lowercase()
        );
        if !fallback_ok {
            return Err(ConfigError::InvalidPolicy(format!(
                "fallback_answer must be a single lowercase letter, got {:?}",
                self.fallback_answer
            )));
        }

        if self.numbering == (QuestionNumbering::Cyclic { period: 0 }) {
            return Err(ConfigError::InvalidPolicy(
                "cyclic numbering needs a period greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether `letter` (uppercase) is an accepted option label.
    pub fn accepts_option_letter(&self, letter: char) -> bool {
        self.option_letters.contains(letter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Glob, relative to the session directory, matching case documents.
    pub case_pattern: String,
    /// Answer key file name inside the session directory.
    pub answer_file: String,
    pub output_dir: Option<PathBuf>,
    pub policy: ConversionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_pattern: "case*.md".to_string(),
            answer_file: "answers.md".to_string(),
            output_dir: None,
            policy: ConversionPolicy::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the output directory
        config.output_dir = config
            .output_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        config.policy.validate()?;

        Ok(Some(config))
    }

    /// Loads the config at `config_path`, falling back to defaults when absent.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_default())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/casebook");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
