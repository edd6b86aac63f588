use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shelfsync::split::{self, DEFAULT_CHUNK_SIZE, DEFAULT_STATUS_COLUMN, SplitOptions};
use shelfsync::{Result, ToolError, convert, dedupe};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let result = init_logging(cli.log_level.as_deref()).and_then(|()| run(cli));
    if let Err(error) = result {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(directives) => {
            EnvFilter::try_new(directives).map_err(|err| ToolError::Logging(err.to_string()))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Compare(args) => execute_compare(args),
        Command::Split(args) => execute_split(args),
        Command::Convert(args) => execute_convert(args),
    }
}

fn execute_compare(args: CompareArgs) -> Result<()> {
    if args.debug {
        dedupe::preview_inputs(&[args.new_file.as_path(), args.existing_file.as_path()])?;
    }

    let summary =
        dedupe::compare_catalogs(&args.new_file, &args.existing_file, &args.output_file)?;
    println!(
        "Comparison complete! Found {} books in '{}' that aren't in '{}'",
        summary.unique,
        args.new_file.display(),
        args.existing_file.display()
    );
    println!("Unique books saved to '{}'", args.output_file.display());
    Ok(())
}

fn execute_split(args: SplitArgs) -> Result<()> {
    let options = SplitOptions {
        chunk_size: args.chunk_size,
        status_column: args.status_column,
    };
    let report = split::split_catalog(
        &args.input_file,
        &args.output_prefix,
        args.by_status,
        &options,
    )?;

    println!(
        "Split {} rows from '{}' into {} files:",
        report.total_rows,
        args.input_file.display(),
        report.files.len()
    );
    for file in &report.files {
        println!("  {}: {} books", file.path.display(), file.rows);
    }
    Ok(())
}

fn execute_convert(args: ConvertArgs) -> Result<()> {
    let summary = convert::convert_csv(&args.storygraph_file, &args.goodreads_file)?;
    println!(
        "Conversion complete! Goodreads-compatible file saved to {}",
        args.goodreads_file.display()
    );
    println!("Summary of converted books by status:");
    for (status, count) in summary.buckets() {
        println!("  {status}: {count} books");
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reconcile, split, and convert book catalog CSV exports."
)]
struct Cli {
    /// Log filter directives (overrides RUST_LOG), e.g. `debug`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract books from a new catalog that are absent from an existing one.
    Compare(CompareArgs),
    /// Split a catalog into fixed-size chunks or by reading status.
    Split(SplitArgs),
    /// Convert a StoryGraph export into a Goodreads import file.
    Convert(ConvertArgs),
}

#[derive(clap::Args)]
struct CompareArgs {
    /// Catalog holding potential new entries.
    new_file: PathBuf,

    /// Catalog used to filter out duplicates.
    existing_file: PathBuf,

    /// Where to write the unique entries.
    output_file: PathBuf,

    /// Log the first lines of each input before comparing.
    #[arg(long)]
    debug: bool,
}

#[derive(clap::Args)]
struct SplitArgs {
    /// Catalog to split.
    input_file: PathBuf,

    /// Prefix for output files, resolved next to the input file.
    output_prefix: String,

    /// Number of data rows per output file.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Split by reading status instead of fixed-size chunks.
    #[arg(long)]
    by_status: bool,

    /// Column holding the reading status.
    #[arg(long, default_value = DEFAULT_STATUS_COLUMN)]
    status_column: String,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// StoryGraph CSV export.
    storygraph_file: PathBuf,

    /// Output path for the Goodreads-compatible CSV.
    goodreads_file: PathBuf,
}
