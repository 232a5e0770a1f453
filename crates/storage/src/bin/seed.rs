use std::fmt;

use quiz_core::model::{FlagId, FlagRecord};
use storage::repository::{FlagRepository, Storage};

/// Sample flag data for development databases. The shipped app bundles a
/// pre-populated database asset; this seeder builds an equivalent one.
const SAMPLE_FLAGS: &[(&str, &str)] = &[
    ("Turkey", "flag_tr"),
    ("Germany", "flag_de"),
    ("France", "flag_fr"),
    ("Italy", "flag_it"),
    ("Spain", "flag_es"),
    ("Portugal", "flag_pt"),
    ("Netherlands", "flag_nl"),
    ("Belgium", "flag_be"),
    ("Greece", "flag_gr"),
    ("Sweden", "flag_se"),
    ("Norway", "flag_no"),
    ("Finland", "flag_fi"),
    ("Poland", "flag_pl"),
    ("Japan", "flag_jp"),
    ("Brazil", "flag_br"),
    ("Argentina", "flag_ar"),
    ("Canada", "flag_ca"),
    ("Mexico", "flag_mx"),
    ("India", "flag_in"),
    ("Australia", "flag_au"),
];

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    count: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
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
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .unwrap_or_else(|_| "sqlite:flagquiz.sqlite3?mode=rwc".into());
        let mut count = u32::try_from(SAMPLE_FLAGS.len()).unwrap_or(u32::MAX);

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_url = require_value(&mut args, "--db")?,
                "--count" => {
                    let raw = require_value(&mut args, "--count")?;
                    count = raw.parse().map_err(|_| ArgsError::InvalidCount { raw })?;
                }
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => return Err(ArgsError::UnknownArg(other.to_string())),
            }
        }

        Ok(Self { db_url, count })
    }
}

fn print_usage() {
    eprintln!("Seed a flag quiz database with sample data.");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>   SQLite URL (default: sqlite:flagquiz.sqlite3?mode=rwc)");
    eprintln!("  --count <n>         Number of sample flags to upsert (default: all)");
    eprintln!("  -h, --help          Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  QUIZ_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;

    let take = (args.count as usize).min(SAMPLE_FLAGS.len());
    for (i, (name, image_ref)) in SAMPLE_FLAGS.iter().take(take).enumerate() {
        let flag = FlagRecord::new(FlagId::new(i as u64 + 1), *name, *image_ref)?;
        storage.flags.upsert_flag(&flag).await?;
    }

    let total = storage.flags.count().await?;
    println!("seeded {take} flags ({total} total) into {}", args.db_url);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("seed failed: {err}");
        std::process::exit(1);
    }
}
