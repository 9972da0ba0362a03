//! The file-level splice: read, locate, splice, write.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::file::{read_text, write_atomic};
use crate::span::{Markers, SpliceSpan, splice_text};

/// Options for [`replace_in_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SpliceOptions {
    /// Locate and report the span without writing the file.
    pub dry_run: bool,
}

/// Summary of one file splice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpliceReport {
    pub path: PathBuf,
    pub span: SpliceSpan,
    pub removed_bytes: usize,
    pub inserted_bytes: usize,
    /// `false` for a dry run.
    pub written: bool,
}

/// Replaces the first marker-bounded span in the file at `path`.
///
/// The file is read whole, spliced in memory, and overwritten in place. If
/// either marker is missing nothing is written and the file stays
/// byte-identical. Running this twice with the same markers fails the second
/// time, since the start marker no longer exists.
///
/// ## Errors
///
/// - [`SpliceError::FileNotFound`](crate::SpliceError::FileNotFound) if `path` does not exist
/// - [`SpliceError::Encoding`](crate::SpliceError::Encoding) if the file is not UTF-8
/// - [`SpliceError::MarkerNotFound`](crate::SpliceError::MarkerNotFound) if a marker is absent
/// - [`SpliceError::Io`](crate::SpliceError::Io) if the write fails
///
/// ## Examples
///
/// ```no_run
/// use std::path::Path;
/// use splice_lib::{replace_in_file, Markers, SpliceOptions};
///
/// let markers = Markers::new("<SalesTrendChart", "</SalesTrendChart>");
/// let report = replace_in_file(
///     Path::new("src/pages/DashboardPage.js"),
///     &markers,
///     "<ProfitabilityTrendChart />",
///     SpliceOptions::default(),
/// )?;
/// assert!(report.written);
/// # Ok::<(), splice_lib::SpliceError>(())
/// ```
#[instrument(skip(markers, replacement), fields(file = %path.display()))]
pub fn replace_in_file(
    path: &Path,
    markers: &Markers,
    replacement: &str,
    options: SpliceOptions,
) -> Result<SpliceReport> {
    let buffer = read_text(path)?;
    debug!(bytes = buffer.len(), "read file");

    let outcome = splice_text(&buffer, markers, replacement)?;

    let mut report = SpliceReport {
        path: path.to_path_buf(),
        span: outcome.span,
        removed_bytes: outcome.removed.len(),
        inserted_bytes: replacement.len(),
        written: false,
    };

    if options.dry_run {
        info!(start = report.span.start, end = report.span.end, "dry run, file left untouched");
        return Ok(report);
    }

    write_atomic(path, &outcome.content)?;
    report.written = true;

    info!(
        removed = report.removed_bytes,
        inserted = report.inserted_bytes,
        "splice written"
    );
    Ok(report)
}
