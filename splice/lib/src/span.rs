//! Locating and splicing the marker-bounded span inside a text buffer.
//!
//! Both markers are found by independent first-occurrence searches. There is
//! no nesting-aware pairing: with several blocks in one buffer the span runs
//! from the first start marker to the first end marker, wherever they are.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{MarkerKind, Result, SpliceError};

/// Character that closes the tag the end marker belongs to.
const TAG_CLOSE: char = '>';

/// The literal start/end marker pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Markers {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Rejects empty markers, which would match at offset zero.
    pub fn validate(&self) -> Result<()> {
        if self.start.is_empty() {
            return Err(SpliceError::EmptyMarker(MarkerKind::Start));
        }
        if self.end.is_empty() {
            return Err(SpliceError::EmptyMarker(MarkerKind::End));
        }
        Ok(())
    }
}

/// Byte range `[start, end)` of the text to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpliceSpan {
    pub start: usize,
    pub end: usize,
}

impl SpliceSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Result of splicing a buffer in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOutcome {
    /// The span that was removed, in offsets of the original buffer.
    pub span: SpliceSpan,
    /// The text that was removed.
    pub removed: String,
    /// The new buffer.
    pub content: String,
}

/// Finds the span delimited by `markers` in `buffer`.
///
/// The end boundary is extended from the end marker's first byte to just past
/// the next `>`. When no `>` follows, the boundary is the end of the end
/// marker itself.
///
/// ## Errors
///
/// - [`SpliceError::EmptyMarker`] if either marker is empty
/// - [`SpliceError::MarkerNotFound`] if either marker is absent
/// - [`SpliceError::MarkersOutOfOrder`] if the boundary is at or before the
///   start, which would leave nothing to remove
///
/// ## Examples
///
/// ```
/// use splice_lib::{locate_span, Markers, SpliceSpan};
///
/// let span = locate_span("<A>ignored<B></B>tail", &Markers::new("<A>", "</B>")).unwrap();
/// assert_eq!(span, SpliceSpan { start: 0, end: 17 });
/// ```
pub fn locate_span(buffer: &str, markers: &Markers) -> Result<SpliceSpan> {
    markers.validate()?;

    let start = buffer
        .find(&markers.start)
        .ok_or_else(|| SpliceError::MarkerNotFound {
            kind: MarkerKind::Start,
            marker: markers.start.clone(),
        })?;

    let end_at = buffer
        .find(&markers.end)
        .ok_or_else(|| SpliceError::MarkerNotFound {
            kind: MarkerKind::End,
            marker: markers.end.clone(),
        })?;

    let end = match buffer[end_at..].find(TAG_CLOSE) {
        Some(offset) => end_at + offset + TAG_CLOSE.len_utf8(),
        None => {
            warn!(end_at, "no closing `>` after end marker, stopping at marker end");
            end_at + markers.end.len()
        }
    };

    if end <= start {
        return Err(SpliceError::MarkersOutOfOrder {
            start: markers.start.clone(),
            start_at: start,
            end: markers.end.clone(),
            end_at,
        });
    }

    debug!(start, end_at, end, "located span");
    Ok(SpliceSpan { start, end })
}

/// Replaces the marker-bounded span of `buffer` with `replacement`.
///
/// The output is `buffer[..start] + replacement + buffer[end..]`.
///
/// ## Examples
///
/// ```
/// use splice_lib::{splice_text, Markers};
///
/// let outcome = splice_text("<A>ignored<B></B>tail", &Markers::new("<A>", "</B>"), "<X/>").unwrap();
/// assert_eq!(outcome.content, "<X/>tail");
/// ```
pub fn splice_text(buffer: &str, markers: &Markers, replacement: &str) -> Result<SpliceOutcome> {
    let span = locate_span(buffer, markers)?;

    let mut content = String::with_capacity(buffer.len() - span.len() + replacement.len());
    content.push_str(&buffer[..span.start]);
    content.push_str(replacement);
    content.push_str(&buffer[span.end..]);

    Ok(SpliceOutcome {
        span,
        removed: buffer[span.start..span.end].to_string(),
        content,
    })
}
