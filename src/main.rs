use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use simatrix::{compute, input, measures, output, ComputeOptions, Config, DelimTable, Matrix};

/// Compute a matrix of pairwise string similarity values.
#[derive(Parser, Debug)]
#[command(name = "simatrix", version, about)]
struct Args {
    /// Input file with one string per line; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Measure to compute.
    #[arg(short, long, default_value = "levenshtein")]
    measure: String,

    /// Delimiter characters (with %HH escapes); enables word tokenization.
    #[arg(short, long)]
    delim: Option<String>,

    /// Range of x indices as "a:b"; a negative end counts from the end.
    #[arg(short = 'x', long, value_name = "A:B")]
    x_range: Option<String>,

    /// Range of y indices as "a:b"; a negative end counts from the end.
    #[arg(short = 'y', long, value_name = "A:B")]
    y_range: Option<String>,

    /// Shard the y range into blocks, as "blocks:index".
    #[arg(short, long, value_name = "B:K")]
    split: Option<String>,

    /// Output destination ("-" for stdout).
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Output format: text or libsvm.
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Configuration file (flat JSON object of name/value options).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show a progress bar while computing.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };

    let mut strings = match &args.input {
        Some(path) => input::read_lines(path)
            .with_context(|| format!("reading strings from {}", path.display()))?,
        None => input::read_from(io::stdin().lock(), None).context("reading strings from stdin")?,
    };

    let delim = args.delim.as_deref().or_else(|| cfg.get("delim"));
    if let Some(spec) = delim {
        let table = DelimTable::parse(spec);
        for value in &mut strings {
            value.symbolize(&table);
        }
    }

    let mut matrix = Matrix::new(&strings);
    if let Some(spec) = &args.x_range {
        matrix.set_x_range(spec);
    }
    if let Some(spec) = &args.y_range {
        matrix.set_y_range(spec);
    }
    if let Some(spec) = &args.split {
        matrix.split(spec)?;
    }
    matrix.alloc();

    let measure = measures::resolve(&args.measure, &cfg);
    compute(
        &mut matrix,
        &strings,
        measure.as_ref(),
        ComputeOptions { progress_bar: args.verbose },
    )?;

    let mut writer = output::create(&args.format, &args.output)?;
    writer.write(&matrix)?;
    Ok(())
}
