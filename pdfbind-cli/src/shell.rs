//! Interactive session shell.
//!
//! Each input line is parsed as a multicall command, so `help`, `add --help`
//! and typo suggestions come from clap. Lines are handled one at a time by
//! [`Shell::handle_line`]; [`Shell::run`] only feeds it stdin.

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use pdfbind::config::{Config, OverwriteMode};
use pdfbind::error::{PdfBindError, Result};
use pdfbind::io::{CandidateReader, PdfWriter};
use pdfbind::output::{
    OutputFormatter, display_append_report, display_merge_statistics, display_preview,
    display_session_view,
};
use pdfbind::preview::{LopdfPreview, build_preview, page_count_label};
use pdfbind::session::{EventOutcome, PRIVACY_NOTICE, Session, SessionEvent};
use pdfbind::utils::{collect_paths_for_patterns, human_file_size};

const PROMPT: &str = "pdfbind> ";

#[derive(Parser, Debug)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

/// Commands available at the prompt.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ShellCommand {
    /// Add files to the end of the list
    Add {
        /// Files or glob patterns
        #[arg(required = true, value_name = "FILE|GLOB")]
        inputs: Vec<String>,
    },
    /// Show the list
    #[command(alias = "ls")]
    List,
    /// Select a file by number; selecting it again deselects it
    Select {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
    },
    /// Clear the selection
    Deselect,
    /// Move the selected file up
    Up,
    /// Move the selected file down
    Down,
    /// Remove a file by number
    #[command(alias = "remove")]
    Rm {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
    },
    /// Remove every file
    Clear,
    /// Merge the list in order
    Merge,
    /// Preview the last merge
    Preview,
    /// Save the last merge
    Save {
        /// Output path (defaults to the suggested name)
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Empty the list and forget the last merge
    StartOver,
    /// Show how your files are handled
    #[command(alias = "about")]
    Privacy,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Whether the shell keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Quit,
}

/// A session driven by typed commands.
pub struct Shell {
    session: Session,
    formatter: OutputFormatter,
    reader: CandidateReader,
    writer: PdfWriter,
    saved_to: Option<PathBuf>,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Self {
            formatter: OutputFormatter::from_config(&config),
            session: Session::with_config(config),
            reader: CandidateReader::new(),
            writer: PdfWriter::new(),
            saved_to: None,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Add files before the prompt appears.
    pub async fn preload(&mut self, inputs: &[String]) -> Result<()> {
        if inputs.is_empty() {
            return Ok(());
        }
        self.add(inputs).await
    }

    /// Read commands from stdin until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        let interactive = std::io::stdin().is_terminal();
        if interactive {
            self.formatter.info(&format!(
                "{} v{}. Type `help` for commands.",
                pdfbind::NAME,
                pdfbind::VERSION
            ));
            display_session_view(&self.formatter, &self.session.view());
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            if interactive {
                print!("{PROMPT}");
                std::io::stdout().flush().ok();
            }

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match self.handle_line(&line).await {
                Ok(ShellFlow::Continue) => {}
                Ok(ShellFlow::Quit) => break,
                Err(err) => self.report(&err),
            }
        }

        Ok(())
    }

    /// Parse and execute one line.
    pub async fn handle_line(&mut self, line: &str) -> Result<ShellFlow> {
        let words = split_words(line);
        if words.is_empty() {
            return Ok(ShellFlow::Continue);
        }

        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                self.formatter.plain(err.render().to_string().trim_end());
                return Ok(ShellFlow::Continue);
            }
        };
        debug!(?command, "Shell command");

        match command {
            ShellCommand::Add { inputs } => self.add(&inputs).await?,
            ShellCommand::List => self.show_list(),
            ShellCommand::Select { number } => {
                self.session.apply(SessionEvent::Select(index_of(number)))?;
                self.show_list();
            }
            ShellCommand::Deselect => {
                self.session.apply(SessionEvent::Deselect)?;
                self.show_list();
            }
            ShellCommand::Up => self.move_selected(SessionEvent::MoveUp)?,
            ShellCommand::Down => self.move_selected(SessionEvent::MoveDown)?,
            ShellCommand::Rm { number } => {
                if let EventOutcome::Removed(file) =
                    self.session.apply(SessionEvent::Remove(index_of(number)))?
                {
                    self.formatter.success(&format!("Removed {}", file.name()));
                }
                self.show_list();
            }
            ShellCommand::Clear => {
                self.session.apply(SessionEvent::Clear)?;
                self.show_list();
            }
            ShellCommand::Merge => self.merge().await?,
            ShellCommand::Preview => self.preview()?,
            ShellCommand::Save { path, force } => self.save(path, force).await?,
            ShellCommand::StartOver => {
                self.session.apply(SessionEvent::StartOver)?;
                self.saved_to = None;
                self.show_list();
            }
            ShellCommand::Privacy => self.formatter.plain(PRIVACY_NOTICE),
            ShellCommand::Quit => return Ok(ShellFlow::Quit),
        }

        Ok(ShellFlow::Continue)
    }

    fn report(&self, err: &PdfBindError) {
        match err {
            PdfBindError::IndexOutOfRange { len: 0, .. } => self
                .formatter
                .error(&format!("Internal error: {err}. The list is empty")),
            PdfBindError::IndexOutOfRange { len, .. } => self
                .formatter
                .error(&format!("Internal error: {err}. Choose a number from 1 to {len}")),
            _ => self.formatter.error(&err.to_string()),
        }
    }

    fn show_list(&self) {
        display_session_view(&self.formatter, &self.session.view());
    }

    async fn add(&mut self, inputs: &[String]) -> Result<()> {
        let paths = collect_paths_for_patterns(inputs)?;
        if paths.is_empty() {
            self.formatter.warning("No files matched");
            return Ok(());
        }

        let mut candidates = Vec::with_capacity(paths.len());
        for result in self.reader.read_all(&paths).await {
            match result {
                Ok(candidate) => candidates.push(candidate),
                Err(err) => self.formatter.warning(&err.to_string()),
            }
        }

        if let EventOutcome::Appended(report) =
            self.session.apply(SessionEvent::AddFiles(candidates))?
        {
            display_append_report(&self.formatter, &report, self.session.files().soft_limit());
        }
        self.show_list();
        Ok(())
    }

    fn move_selected(&mut self, event: SessionEvent) -> Result<()> {
        let upward = matches!(event, SessionEvent::MoveUp);
        let has_selection = self.session.files().selected().is_some();

        if let EventOutcome::Moved(false) = self.session.apply(event)? {
            let message = match (has_selection, upward) {
                (false, _) => "Select a file first",
                (true, true) => "Already at the top",
                (true, false) => "Already at the bottom",
            };
            self.formatter.warning(message);
        }
        self.show_list();
        Ok(())
    }

    async fn merge(&mut self) -> Result<()> {
        let job = self.session.begin_merge()?;
        self.formatter.info(&format!("Merging {} file(s)...", job.len()));

        let result = job.run().await;
        let outcome = self.session.finish_merge(result)?;
        self.saved_to = None;

        display_merge_statistics(&self.formatter, &outcome.statistics);
        self.formatter.info(&format!(
            "Ready to save as {} ({}, {})",
            outcome.suggested_filename,
            page_count_label(outcome.page_count),
            human_file_size(outcome.bytes.len() as u64)
        ));
        Ok(())
    }

    fn preview(&self) -> Result<()> {
        let outcome = self.session.result()?;
        let preview = build_preview(&LopdfPreview, &outcome.bytes, self.saved_to.as_deref());
        display_preview(&self.formatter, &preview);
        Ok(())
    }

    async fn save(&mut self, path: Option<PathBuf>, force: bool) -> Result<()> {
        let outcome = self.session.result()?;
        let path = path.unwrap_or_else(|| PathBuf::from(&outcome.suggested_filename));

        let inputs: Vec<&Path> = self
            .session
            .files()
            .iter()
            .filter_map(|file| file.content().path())
            .collect();
        self.writer.check_not_input(&path, &inputs).await?;

        self.writer.can_write(&path).await?;
        if self.writer.exists(&path).await && !overwrite_allowed(self.session.config(), force) {
            return Err(PdfBindError::output_exists(path));
        }

        let stats = self
            .writer
            .save_with_stats(outcome.bytes.clone(), &path)
            .await?;
        self.formatter.success(&format!(
            "Saved {} ({})",
            stats.output_path.display(),
            stats.format_file_size()
        ));
        self.saved_to = Some(stats.output_path);
        Ok(())
    }
}

/// Stdin carries commands, so the shell never prompts for confirmation.
fn overwrite_allowed(config: &Config, force: bool) -> bool {
    force || config.overwrite_mode == OverwriteMode::Force
}

fn index_of(number: u64) -> usize {
    usize::try_from(number.saturating_sub(1)).unwrap_or(usize::MAX)
}

/// Split a line into words. Single or double quotes group words containing
/// spaces; a backslash escapes the next character.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }

    words
}
