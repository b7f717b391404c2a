use casebook_config::ConversionPolicy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::generate;
use crate::models::Diagnostic;
use crate::parsing::{SourceDocument, parse_session};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid case pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("No case documents match {0}")]
    NoCases(String),
}

/// Read a markup document into memory, labelled with its path
pub fn read_document(path: &Path) -> Result<SourceDocument, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SourceDocument::new(path.display().to_string(), text))
}

/// Write a generated module, creating parent directories as needed
pub fn write_module(path: &Path, content: &str) -> Result<(), IoError> {
    let io_err = |source| IoError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    fs::write(path, content).map_err(io_err)
}

/// Find case documents in `dir` matching `pattern`, sorted by path
pub fn discover_case_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, IoError> {
    if !dir.is_dir() {
        return Err(IoError::NotFound(dir.to_path_buf()));
    }

    let full_pattern = dir.join(pattern).to_string_lossy().into_owned();
    let paths = glob::glob(&full_pattern).map_err(|source| IoError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Skipping unreadable path: {e}");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Where the documents of one session come from.
#[derive(Debug, Clone)]
pub struct SessionInput {
    pub session: u32,
    pub case_files: Vec<PathBuf>,
    pub answer_file: PathBuf,
}

impl SessionInput {
    /// Builds the input from a session directory using a case glob.
    ///
    /// `answer_file` is the resolved answer key path and is never taken as a case.
    pub fn from_dir(
        session: u32,
        dir: &Path,
        case_pattern: &str,
        answer_file: PathBuf,
    ) -> Result<Self, IoError> {
        let case_files: Vec<PathBuf> = discover_case_files(dir, case_pattern)?
            .into_iter()
            .filter(|path| !same_file(path, &answer_file))
            .collect();
        if case_files.is_empty() {
            return Err(IoError::NoCases(dir.join(case_pattern).display().to_string()));
        }

        Ok(Self {
            session,
            case_files,
            answer_file,
        })
    }
}

/// Path equality that tolerates `./dir` vs `dir` spellings of existing files.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// A generated module and the fragments skipped while producing it.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub module: String,
    pub diagnostics: Vec<Diagnostic>,
    pub case_count: usize,
    pub question_count: usize,
}

/// Load, extract and generate one session
pub fn convert_session(
    input: &SessionInput,
    policy: &ConversionPolicy,
) -> Result<Conversion, IoError> {
    let cases = input
        .case_files
        .iter()
        .map(|path| read_document(path))
        .collect::<Result<Vec<_>, _>>()?;
    let answers = read_document(&input.answer_file)?;

    let extraction = parse_session(&cases, &answers, policy);
    let records = extraction.value;
    log::info!(
        "Session {}: {} cases, {} questions, {} answers",
        input.session,
        records.cases.len(),
        records.question_count(),
        records.answers.len()
    );

    Ok(Conversion {
        module: generate(&records, input.session, policy),
        diagnostics: extraction.diagnostics,
        case_count: records.cases.len(),
        question_count: records.question_count(),
    })
}
