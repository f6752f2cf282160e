//! pdfbind - Combine PDF files into one, in the order you choose.
//!
//! `pdfbind merge` does a one-shot merge; `pdfbind shell` runs an
//! interactive session for adding, reordering and previewing files.

mod cli;
mod settings;
mod shell;
#[cfg(test)]
mod test_support;

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, MergeArgs, ShellArgs};
use crate::shell::Shell;
use pdfbind::config::{Config, OverwriteMode};
use pdfbind::error::PdfBindError;
use pdfbind::io::{CandidateReader, PdfWriter};
use pdfbind::merge::suggested_filename;
use pdfbind::output::{
    OutputFormatter, display_append_report, display_merge_plan, display_merge_statistics,
    display_preview,
};
use pdfbind::preview::{LopdfPreview, build_preview};
use pdfbind::session::{EventOutcome, Session, SessionEvent};
use pdfbind::utils::collect_paths_for_patterns;
use pdfbind::validation::Validator;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Diagnostics go to stderr. `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default = if verbose { "pdfbind=debug" } else { "pdfbind=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfBindError> {
    match &cli.command {
        Command::Merge(args) => run_merge(&cli, args).await,
        Command::Shell(args) => run_shell(&cli, args).await,
    }
}

async fn run_merge(cli: &Cli, args: &MergeArgs) -> Result<(), PdfBindError> {
    let config = settings::merge_config(cli, args)?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfbind::NAME, pdfbind::VERSION));
        formatter.blank_line();
    }

    // Resolve inputs in the order given
    let paths = collect_paths_for_patterns(&args.inputs)?;
    if paths.is_empty() {
        return Err(PdfBindError::EmptyInput);
    }

    formatter.info(&format!("Reading {} file(s)...", paths.len()));
    let candidates = CandidateReader::new()
        .read_all(&paths)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = Session::with_config(config.clone());
    if let EventOutcome::Appended(report) = session.apply(SessionEvent::AddFiles(candidates))? {
        display_append_report(&formatter, &report, session.files().soft_limit());
    }
    if session.files().is_empty() {
        return Err(PdfBindError::EmptyInput);
    }

    let output = match &args.output {
        Some(path) => path.clone(),
        None => PathBuf::from(suggested_filename(&session.files().snapshot(), &config)),
    };
    let writer = PdfWriter::new();
    writer.check_not_input(&output, paths.as_slice()).await?;

    // Dry run mode - inspect every input and stop
    if args.dry_run {
        let summary = Validator::from_config(&config)
            .inspect_all(&session.files().snapshot())
            .await?;
        display_merge_plan(&formatter, &summary);

        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    writer.can_write(&output).await?;
    handle_output_overwrite(&config, &output, &formatter).await?;

    formatter.info("Merging documents...");
    let outcome = session.merge().await?;

    if formatter.should_print() {
        formatter.blank_line();
        display_merge_statistics(&formatter, &outcome.statistics);
    }

    formatter.info(&format!("Writing to: {}", output.display()));
    let write_stats = writer.save_with_stats(outcome.bytes.clone(), &output).await?;

    if formatter.should_print() {
        formatter.blank_line();
        formatter.success(&format!(
            "Successfully created {} ({})",
            output.display(),
            write_stats.format_file_size()
        ));

        let preview = build_preview(
            &LopdfPreview,
            &outcome.bytes,
            Some(write_stats.output_path.as_path()),
        );
        display_preview(&formatter, &preview);

        formatter.detail(
            "Write time",
            &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
        );
    }

    Ok(())
}

async fn run_shell(cli: &Cli, args: &ShellArgs) -> Result<(), PdfBindError> {
    let mut config = settings::base_config(cli)?;
    settings::apply_output_args(&mut config, &args.output_args)?;
    config.validate()?;

    let mut shell = Shell::new(config);
    shell.preload(&args.inputs).await?;
    shell.run().await
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    output: &Path,
    formatter: &OutputFormatter,
) -> Result<(), PdfBindError> {
    // Check if output exists
    if !tokio::fs::try_exists(output).await.unwrap_or(false) {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfBindError::output_exists(output.to_path_buf())),
        OverwriteMode::Prompt => {
            // In quiet mode, treat as no-clobber
            if formatter.is_quiet() {
                return Err(PdfBindError::output_exists(output.to_path_buf()));
            }

            formatter.warning(&format!("Output file already exists: {}", output.display()));

            // Simple yes/no prompt
            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfBindError::other(format!("Failed to read input: {err}")))?;

            if confirms(&response) {
                Ok(())
            } else {
                Err(PdfBindError::Cancelled)
            }
        }
    }
}

fn confirms(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}
