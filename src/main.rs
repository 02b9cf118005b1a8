//! treecat
//!
//! Extract phylogenetic trees from the specified files and print them as a
//! treestream. Input may be a plain treestream or a NEXUS file.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use std::io::{self, BufWriter};

use treecat::{CatConfig, InputSource, cat_sources};

/// Extract phylogenetic trees from files and print them as a treestream.
#[derive(Parser, Debug)]
#[command(name = "treecat")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Percentage of trees from each file to discard as "burnin"
    #[arg(short, long, default_value_t = 0)]
    burnin: i64,

    /// Frequency at which to subsample trees, i.e. "-s 10" will include
    /// only every 10th tree in the treestream
    #[arg(short, long, default_value_t = 1)]
    subsample: i64,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Files to read treestreams from; "-" reads from stdin
    #[arg(default_value = InputSource::STDIN_ARG)]
    files: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .init();

    let config = CatConfig::new(cli.burnin, cli.subsample)?;
    let sources: Vec<InputSource> =
        cli.files.iter().map(InputSource::from_arg).collect();

    let mut writer = BufWriter::new(io::stdout().lock());
    match cat_sources(&sources, &mut writer, &config) {
        Ok(_) => Ok(()),
        Err(err) if err.is_broken_pipe() => Ok(()),
        Err(err) => Err(err).context("treecat failed"),
    }
}

