//! Single-quoted string literal detection.
//!
//! Compiled SQL may carry user data inside `'...'` literals, and that data can look
//! exactly like alias syntax (`'[b].[x]'`). Every rewrite in this crate first locates
//! the literal spans so it can leave them untouched.
//!
//! A doubled quote (`''`) inside a literal is an escaped quote, so quote runs are
//! judged by parity: an odd run opens or closes a literal, an even run never does.

use crate::error::{BatchError, BatchResult};

/// One single-quoted literal region.
///
/// `start` and `len` address the inner content in bytes; the delimiting quotes are
/// not part of the span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedSpan {
    pub start: usize,
    pub len: usize,
    pub content: String,
}

impl QuotedSpan {
    /// Byte offset one past the end of the content.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Scan `sql` for single-quoted literals.
///
/// Spans are returned in ascending order and never overlap. Fails with
/// [`BatchError::Format`] if the text ends inside an open literal.
///
/// ```ignore
/// let spans = sqlbatch::scan_quoted_spans("WHERE [Note] = 'it''s fine'")?;
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].content, "it''s fine");
/// ```
pub fn scan_quoted_spans(sql: &str) -> BatchResult<Vec<QuotedSpan>> {
    let bytes = sql.as_bytes();
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\'' {
            i += 1;
            continue;
        }

        let run_start = i;
        while i < bytes.len() && bytes[i] == b'\'' {
            i += 1;
        }
        if (i - run_start) % 2 == 0 {
            continue;
        }

        match open.take() {
            // The last quote of the run closes; the rest are escaped content.
            Some(start) => {
                let end = i - 1;
                spans.push(QuotedSpan {
                    start,
                    len: end - start,
                    content: sql[start..end].to_string(),
                });
            }
            // The first quote of the run opens; the rest are escaped content.
            None => open = Some(run_start + 1),
        }
    }

    if let Some(start) = open {
        return Err(BatchError::format(format!(
            "unterminated string literal starting at byte {}",
            start - 1
        )));
    }

    Ok(spans)
}
