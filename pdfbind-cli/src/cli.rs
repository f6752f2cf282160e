//! CLI argument parsing for pdfbind.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also compiled by the build script to render the man page, so it
//! depends on nothing but `clap` and `std`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Combine PDF files into one, in the order you choose.
///
/// pdfbind merges PDF files locally. Use `merge` for a one-shot merge from
/// the command line, or `shell` to add, reorder and preview files
/// interactively before merging.
#[derive(Parser, Debug)]
#[command(name = "pdfbind")]
#[command(version)]
#[command(about = "Combine PDF files into one, in the order you choose", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Verbose output - show per-file details and diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Load settings from a JSON file
    ///
    /// Keys are camelCase, e.g. {"fileListLimit": 50, "compression": "maximum"}.
    /// Command-line flags override values from the file.
    #[arg(long, global = true, value_name = "FILE", env = "PDFBIND_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge files in the order given and write the result
    ///
    /// Examples:
    ///   pdfbind merge a.pdf b.pdf -o both.pdf
    ///   pdfbind merge "chapters/*.pdf" -o book.pdf
    Merge(MergeArgs),

    /// Start an interactive session to add, reorder and merge files
    ///
    /// Type `help` inside the shell for the list of commands.
    Shell(ShellArgs),
}

/// Options shared by commands that produce output.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Compression level for output PDF
    ///
    /// - none: Write streams as loaded
    /// - standard: Compress streams (default)
    /// - maximum: Compress streams and drop unreferenced objects
    #[arg(short, long, value_name = "LEVEL")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: Option<String>,

    /// Refuse encrypted inputs instead of loading them without a password
    #[arg(long)]
    pub strict_encryption: bool,
}

/// Arguments for `pdfbind merge`.
#[derive(Args, Debug, Clone, Default)]
pub struct MergeArgs {
    /// Input PDF files to merge (in order)
    ///
    /// Specify multiple files or use glob patterns.
    /// Files are merged in the order provided.
    #[arg(required = true, value_name = "FILE|GLOB")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// Defaults to merged.pdf when several files are merged, or to the
    /// input's own name when there is only one.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Dry run - show the merge plan without creating output
    ///
    /// Checks that every input is a readable PDF and lists its page count.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

/// Arguments for `pdfbind shell`.
#[derive(Args, Debug, Clone, Default)]
pub struct ShellArgs {
    /// Files to add before the prompt appears
    #[arg(value_name = "FILE|GLOB")]
    pub inputs: Vec<String>,

    #[command(flatten)]
    pub output_args: OutputArgs,
}
