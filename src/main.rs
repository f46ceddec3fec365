use agc::cli::Cli;
use agc::{AgcError, Pipeline};
use clap::Parser;
use colored::*;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // AGC_LOG takes precedence over -v
    let default_level = if cli.verbose > 0 { "debug" } else { "info" };
    let log_level = std::env::var("AGC_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<AgcError>() {
            Some(AgcError::Configuration(_)) | Some(AgcError::MatrixParse(_)) => 2,
            Some(AgcError::Io(_))
            | Some(AgcError::InputNotFound(_))
            | Some(AgcError::InputIsDirectory(_)) => 3,
            Some(AgcError::Decode(_))
            | Some(AgcError::InvalidAlignment(_))
            | Some(AgcError::AlignmentFailure(_)) => 4,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    info!("agc {}", agc_core::VERSION);

    let config = cli.resolve_config()?;
    let pipeline = Pipeline::new(config)?;

    info!("Clustering {}", cli.amplicon_file.display());
    let result = pipeline.run(&cli.amplicon_file)?;

    agc_bio::write_otu_file(&cli.output_file, &result.otus)?;

    let stats = &result.stats;
    info!(
        "{} reads, {} abundant sequences, {} OTUs ({} discarded, {} alignments)",
        stats.reads,
        stats.records,
        result.otus.len(),
        stats.discarded,
        stats.alignments
    );
    info!("OTUs written to {}", cli.output_file.display());

    Ok(())
}
