use std::path::PathBuf;

use clap::Parser;
use haspwn::{Error, SearchMode, TermType, binsearch, holder_for, linear, open_database};
use indicatif::{ProgressBar, ProgressStyle};
use pwnhashes::database_path_from_env;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "haspwn")]
#[command(about = "Check a password or SHA-1 hash against a sorted Pwned Passwords text file")]
struct Args {
    /// Password or hex SHA-1 hash to look up
    term: String,

    /// Hash database file (defaults to $HASPWN_DB, then ./pwned-passwords-ordered-2.0.txt)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Lookup algorithm
    #[arg(short, long, value_enum, default_value_t = SearchMode::Binsearch)]
    mode: SearchMode,

    /// How to interpret TERM
    #[arg(short = 't', long, value_enum, default_value_t = TermType::Password)]
    term_type: TermType,

    /// Disable progress bar during linear scans
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let path = args.db.unwrap_or_else(database_path_from_env);
    let mut db = open_database(path)?;
    println!("File contains {} records", db.hash_count());

    let holder = holder_for(&db, args.term_type, &args.term)?;
    println!("Searching for {}", holder);

    let outcome = match args.mode {
        SearchMode::Binsearch => binsearch(&db, &holder)?,
        SearchMode::Linear => {
            let progress_bar = if !args.no_progress {
                let pb = ProgressBar::new(db.hash_count());
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                        .expect("Invalid progress bar template")
                        .progress_chars("#>-"),
                );
                Some(pb)
            } else {
                None
            };

            let outcome = linear(&mut db, &holder, progress_bar.as_ref())?;
            if let Some(pb) = progress_bar {
                pb.finish_and_clear();
            }
            outcome
        }
    };

    db.close();

    match outcome.entry {
        Some(entry) => println!("Found hash, {} occurrences", entry.count()?),
        None => println!("Not found"),
    }
    if let Some(scanned) = outcome.scanned {
        println!("{} hashes searched", scanned);
    }

    Ok(())
}
