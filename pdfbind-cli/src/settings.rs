//! Resolving a [`Config`] from the command line.
//!
//! Precedence, lowest first: built-in defaults, the `--config` JSON file,
//! then explicit flags.

use std::str::FromStr;

use pdfbind::config::{CompressionLevel, Config, OverwriteMode};
use pdfbind::error::Result;

use crate::cli::{Cli, MergeArgs, OutputArgs};

/// Build the configuration shared by every command.
pub fn base_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if cli.verbose {
        config.verbose = true;
        config.quiet = false;
    }
    if cli.quiet {
        config.quiet = true;
        config.verbose = false;
    }

    Ok(config)
}

/// Apply output options.
pub fn apply_output_args(config: &mut Config, args: &OutputArgs) -> Result<()> {
    if let Some(level) = &args.compression {
        config.compression = CompressionLevel::from_str(level)?;
    }
    if args.strict_encryption {
        config.ignore_encryption = false;
    }
    Ok(())
}

/// Configuration for `pdfbind merge`.
pub fn merge_config(cli: &Cli, args: &MergeArgs) -> Result<Config> {
    let mut config = base_config(cli)?;
    apply_output_args(&mut config, &args.output_args)?;

    if args.force {
        config.overwrite_mode = OverwriteMode::Force;
    } else if args.no_clobber {
        config.overwrite_mode = OverwriteMode::NoClobber;
    }

    config.validate()?;
    Ok(config)
}
