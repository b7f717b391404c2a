use anyhow::{Context, Result};
use casebook_config::{Config, QuestionNumbering};
use casebook_engine::{Conversion, SessionInput, convert_session, io};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

mod cli;

use cli::{Cli, Command, ConvertArgs, NumberingArg};

const DISCLAIMER: &str = "Use this as a reference - manual conversion recommended for accuracy";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match cli.command {
        None => {
            print_disclaimer(&mut std::io::stdout().lock())?;
            Ok(())
        }
        Some(Command::Convert(args)) => run_convert(&args),
    }
}

/// Output of a bare `casebook` run.
fn print_disclaimer(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{DISCLAIMER}")?;
    writeln!(out, "Run `casebook convert --help` to convert a session.")
}

fn run_convert(args: &ConvertArgs) -> Result<()> {
    let config = load_config(args)?;
    let input = session_input(args, &config)?;
    log::info!(
        "Converting session {} from {} case documents",
        input.session,
        input.case_files.len()
    );

    let conversion = convert_session(&input, &config.policy)
        .with_context(|| format!("Failed to convert session {}", input.session))?;
    report(&conversion);

    match output_path(args, &config) {
        Some(path) => {
            io::write_module(&path, &conversion.module)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => print!("{}", conversion.module),
    }

    eprintln!("{DISCLAIMER}");
    Ok(())
}

/// Reads the config file and applies command-line overrides.
fn load_config(args: &ConvertArgs) -> Result<Config> {
    let config_path = args.config.clone().unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());

    let mut config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?;

    if args.emit_exam {
        config.policy.emit_exam = true;
    }
    if let Some(numbering) = args.numbering {
        config.policy.numbering = match (numbering, config.policy.numbering) {
            (NumberingArg::Source, _) => QuestionNumbering::Source,
            // Keep a period chosen in the config file.
            (NumberingArg::Cyclic, cyclic @ QuestionNumbering::Cyclic { .. }) => cyclic,
            (NumberingArg::Cyclic, QuestionNumbering::Source) => QuestionNumbering::LEGACY,
        };
    }
    Ok(config)
}

fn session_input(args: &ConvertArgs, config: &Config) -> Result<SessionInput> {
    if let Some(dir) = &args.cases_dir {
        let answer_file = args
            .answers
            .clone()
            .unwrap_or_else(|| dir.join(&config.answer_file));
        return SessionInput::from_dir(args.session, dir, &config.case_pattern, answer_file)
            .with_context(|| format!("Failed to find case documents in {}", dir.display()));
    }

    let answer_file = args
        .answers
        .clone()
        .context("--answers is required when case files are listed")?;
    Ok(SessionInput {
        session: args.session,
        case_files: args.cases.clone(),
        answer_file,
    })
}

fn output_path(args: &ConvertArgs, config: &Config) -> Option<PathBuf> {
    args.out.clone().or_else(|| {
        config
            .output_dir
            .as_deref()
            .map(|dir| default_module_path(dir, args.session))
    })
}

fn default_module_path(dir: &Path, session: u32) -> PathBuf {
    dir.join(format!("session{session}.ts"))
}

fn report(conversion: &Conversion) {
    for diagnostic in &conversion.diagnostics {
        log::warn!("Skipped {diagnostic}");
    }
    eprintln!(
        "Converted {} cases with {} questions ({} fragments skipped)",
        conversion.case_count,
        conversion.question_count,
        conversion.diagnostics.len()
    );
}
