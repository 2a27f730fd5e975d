use chrono::Local;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use paralib::{
    clause::Clause, error::InferenceError, factoring::all_possible_factors,
    paramodulation::all_paramodulants_from_list, pretty_print::print_cnf, term_bank::TermBank,
    tptp_parser::parse_file, trivial::is_trivial,
};

/// Derive all factors and paramodulants of a given clause in a TPTP CNF problem
#[derive(Parser)]
struct Cli {
    /// Path to a tptp problem file
    file: PathBuf,
    /// Name of the given clause, the last clause of the problem by default. All other clauses
    /// are treated as processed.
    #[arg(long)]
    given: Option<String>,
    /// Also print derived clauses that are tautologies
    #[arg(long)]
    keep_trivial: bool,
}

/// All factors of `given` followed by all paramodulants between `given` and `processed`.
fn derive(given: &Clause, processed: &[Clause]) -> Result<Vec<Clause>, InferenceError> {
    let mut derived = all_possible_factors(given)?;
    derived.append(&mut all_paramodulants_from_list(processed, given)?);
    Ok(derived)
}

fn main() -> ExitCode {
    let args = Cli::parse();
    env_logger::builder()
        .format(|buf, record| {
            let level_style = buf.default_level_style(record.level()).bold();
            writeln!(
                buf,
                "{}|{level_style}{:7}{level_style:#}|{:10}| {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let mut term_bank = TermBank::new();
    let mut clauses = match parse_file(&args.file, &mut term_bank) {
        Ok(clauses) => clauses,
        Err(err) => {
            log::error!("Failed to read {:?}: {}", args.file, err);
            return ExitCode::FAILURE;
        }
    };

    let given_idx = match &args.given {
        Some(name) => clauses
            .iter()
            .position(|clause| clause.label().is_some_and(|label| label.as_str() == name)),
        None => clauses.len().checked_sub(1),
    };
    let Some(given_idx) = given_idx else {
        log::error!("No given clause found in {:?}", args.file);
        return ExitCode::FAILURE;
    };
    let given = clauses.remove(given_idx);
    log::info!("Given clause: {}", given);

    let derived = match derive(&given, &clauses) {
        Ok(derived) => derived,
        Err(err) => {
            log::error!("Inference failed: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    for (idx, clause) in derived
        .iter()
        .filter(|clause| args.keep_trivial || !is_trivial(clause))
        .enumerate()
    {
        if writeln!(stdout, "{}", print_cnf(clause, idx, &term_bank)).is_err() {
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
