use std::fmt;
use std::path::PathBuf;

use exam_core::model::{ExamId, ExamSession};
use exam_core::time::Clock;
use storage::load_bank;

#[derive(Debug, Clone)]
struct Args {
    bank: PathBuf,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut bank = std::env::var("EXAM_BANK_PATH")
            .map_or_else(|_| PathBuf::from("crates/app/assets/bank.json"), PathBuf::from);

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    bank = PathBuf::from(require_value(&mut args, "--bank")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { bank })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin check_bank -- [--bank <path>]");
    eprintln!();
    eprintln!("Reports how many questions of the bank make it into an exam");
    eprintln!("and lists the rows that were left out.");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  EXAM_BANK_PATH");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let bank = load_bank(&args.bank)?;
    let built = ExamSession::build(&bank, ExamId::full(), Clock::system().now());

    println!(
        "{}: {} chapters, {} rows, {} questions in the full exam",
        args.bank.display(),
        bank.chapters().len(),
        bank.total_records(),
        built.session.len()
    );
    for skipped in &built.skipped {
        println!(
            "  skipped #{} ({}): {}",
            skipped.number, skipped.chapter, skipped.reason
        );
    }
    for number in &built.duplicates {
        println!("  duplicate #{number}: later copy ignored");
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
