//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "casebook",
    version,
    about = "Convert case-study markdown into TypeScript exam data",
    long_about = "Convert case-study markdown into TypeScript exam data.\n\n\
                  Reads case documents (narrative plus question blocks) and an\n\
                  answer key, then prints Case declarations for one session."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert one session's case documents and answer key.
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Session number used in generated ids.
    #[arg(long, value_name = "N")]
    pub session: u32,

    /// Directory holding the session's case documents and answer key.
    #[arg(long = "cases-dir", value_name = "DIR", conflicts_with = "cases")]
    pub cases_dir: Option<PathBuf>,

    /// Case document, in order. Repeat for several cases.
    #[arg(long = "case", value_name = "FILE", required_unless_present = "cases_dir")]
    pub cases: Vec<PathBuf>,

    /// Answer key document (default: the configured answer file in --cases-dir).
    #[arg(long, value_name = "FILE", required_unless_present = "cases_dir")]
    pub answers: Option<PathBuf>,

    /// Write the module here instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Config file (default: ~/.config/casebook/config.toml).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append an `Exam` export listing every case.
    #[arg(long = "emit-exam")]
    pub emit_exam: bool,

    /// How question numbers appear in ids.
    #[arg(long, value_enum)]
    pub numbering: Option<NumberingArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NumberingArg {
    /// Keep the number written in the source.
    Source,
    /// Legacy ids: numbers cycle through 1..=4.
    Cyclic,
}
