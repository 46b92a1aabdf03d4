use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use moviebase::{
    data_dir::{DataDirectory, DEFAULT_FILE_PREFIX},
    moviebase::{LoadOptions, MovieBase, DEFAULT_DATABASE_PATH, DEFAULT_DATA_DIR},
    schema::DatabaseSchema,
};

/// Loads the IMDB movie CSV files into an SQLite database.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the `<prefix><table>.csv` files.
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// SQLite database file, created when absent.
    #[arg(long, default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// File name prefix in front of the table name.
    #[arg(long, default_value = DEFAULT_FILE_PREFIX)]
    prefix: String,

    /// Create tables without FOREIGN KEY clauses.
    #[arg(long)]
    no_foreign_keys: bool,

    /// Skip the per-table status report after loading.
    #[arg(long)]
    no_status: bool,

    /// Print the status report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let schema = DatabaseSchema::movies();
    let data_dir = DataDirectory::new(args.data_dir, args.prefix);
    let db = MovieBase::open(
        &args.database,
        LoadOptions {
            with_foreign_keys: !args.no_foreign_keys,
        },
    )?;

    let summaries = db
        .load_directory(&data_dir, &schema)
        .with_context(|| format!("Loading {} failed", data_dir.dir.display()))?;
    let total_rows: usize = summaries.iter().map(|summary| summary.rows).sum();
    info!(
        "Loaded {} files, {} rows into {}",
        summaries.len(),
        total_rows,
        args.database.display()
    );

    if !args.no_status {
        let report = db.status_report(&schema)?;
        if args.json {
            println!("{}", report.to_json().context("Failed serializing status")?);
        } else {
            print!("{report}");
        }
    }

    Ok(())
}
