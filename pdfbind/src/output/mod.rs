//! Output formatting and display for pdfbind.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Rendering of the session's file list and result
//! - Merge plans, previews and summary reports
//!
//! Rendering is split in two: `*_lines` functions build the text and are
//! pure, `display_*` functions print it through an [`OutputFormatter`].
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::output::OutputFormatter;
//! use pdfbind::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::collection::AppendReport;
use crate::merge::MergeStatistics;
use crate::preview::{Preview, page_count_label};
use crate::session::SessionView;
use crate::validation::InspectionSummary;

/// Lines for the file list as the user sees it.
pub fn session_view_lines(view: &SessionView) -> Vec<String> {
    let mut lines = vec![view.counter_label.clone()];

    match view.placeholder {
        Some(placeholder) => lines.push(format!("  {placeholder}")),
        None => {
            lines.push(format!("  {}", view.order_hint));
            lines.extend(view.items.iter().map(|item| {
                let marker = if item.selected { '>' } else { ' ' };
                format!("{marker} {}. {} ({})", item.number, item.name, item.size_label)
            }));
        }
    }

    if let Some(result) = &view.result {
        lines.push(format!(
            "Last result: {} ({}, {})",
            result.filename, result.page_label, result.size_label
        ));
    }

    lines
}

/// Print the session's file list.
pub fn display_session_view(formatter: &OutputFormatter, view: &SessionView) {
    for line in session_view_lines(view) {
        formatter.plain(&line);
    }
}

/// Report an append: one warning per rejected file, plus the soft limit.
pub fn display_append_report(formatter: &OutputFormatter, report: &AppendReport, soft_limit: usize) {
    for rejection in &report.rejected {
        formatter.warning(&rejection.to_string());
    }

    if report.over_limit {
        formatter.warning(&format!(
            "More than {soft_limit} files are pending; merging may be slow"
        ));
    }

    if report.accepted > 0 {
        let noun = if report.accepted == 1 { "file" } else { "files" };
        formatter.success(&format!("Added {} {noun}", report.accepted));
    }
}

/// Lines for a merge plan.
pub fn merge_plan_lines(summary: &InspectionSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .results
        .iter()
        .enumerate()
        .map(|(index, inspection)| {
            let noun = if inspection.page_count == 1 { "page" } else { "pages" };
            format!(
                "  {}. {} ({} {noun})",
                index + 1,
                inspection.name,
                inspection.page_count
            )
        })
        .collect();

    lines.push(format!(
        "Total: {}, {}",
        page_count_label(summary.total_pages),
        summary.format_total_size()
    ));
    lines
}

/// Print a merge plan (used by dry runs).
pub fn display_merge_plan(formatter: &OutputFormatter, summary: &InspectionSummary) {
    formatter.section("Merge plan:");
    for line in merge_plan_lines(summary) {
        formatter.plain(&line);
    }
}

/// Print a preview, or the fallback affordance.
pub fn display_preview(formatter: &OutputFormatter, preview: &Preview) {
    match preview {
        Preview::Rendered(report) => {
            formatter.info(&preview.to_string());
            if let Some((width, height)) = report.page_dimensions {
                formatter.detail("First page", &format!("{width} x {height} pt"));
            }
            formatter.detail("PDF version", &report.version);
        }
        Preview::Fallback { reason, .. } => {
            formatter.warning(&preview.to_string());
            formatter.debug(reason);
        }
    }
}

/// Print merge statistics.
pub fn display_merge_statistics(formatter: &OutputFormatter, stats: &MergeStatistics) {
    formatter.success(&format!(
        "Merged {} file(s) into {}",
        stats.files_merged,
        page_count_label(stats.total_pages)
    ));
    formatter.detail("Input size", &stats.format_input_size());
    formatter.detail("Output size", &stats.format_output_size());
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", stats.merge_time.as_secs_f64()),
    );
    formatter.detail("Compression", &stats.compression.to_string());
}
