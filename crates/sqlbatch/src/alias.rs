//! Table alias normalization.
//!
//! Query compilers pick whatever alias they like for the root table (`[a]`, `[b]`,
//! `[t0]`, ...). Before the `FROM` tail can be reshaped into a DELETE or UPDATE, the
//! alias in use is rewritten to one canonical token so the builders only ever have
//! to strip a known pattern.
//!
//! The alias is taken from the first introducer (` AS [<alias>]`) at or after the
//! `FROM` keyword, so column aliases in the select list are never mistaken for it.
//! Only that introducer is rewritten. Statements with several meaningful aliases
//! (correlated subqueries, joins) are not fully normalized.

use crate::error::{BatchError, BatchResult};
use crate::quoted::scan_quoted_spans;
use crate::text::{Segmented, find_keyword};

/// Alias every statement is normalized to unless configured otherwise.
pub const DEFAULT_CANONICAL_ALIAS: &str = "a";

const INTRODUCER_PREFIX: &str = " AS [";

/// Rewrites the table alias of a compiled statement to a canonical alias.
///
/// # Example
/// ```ignore
/// use sqlbatch::AliasNormalizer;
///
/// let n = AliasNormalizer::default();
/// let sql = n.normalize("FROM [Users] AS [u] WHERE [u].[Name] = '[u].[x]'")?;
/// assert_eq!(sql, "FROM [Users] AS [a] WHERE [a].[Name] = '[u].[x]'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasNormalizer {
    canonical: String,
}

impl Default for AliasNormalizer {
    fn default() -> Self {
        Self {
            canonical: DEFAULT_CANONICAL_ALIAS.to_string(),
        }
    }
}

impl AliasNormalizer {
    /// Create a normalizer targeting `canonical`.
    ///
    /// The alias must be non-empty and made of ASCII letters, digits and `_`.
    pub fn new(canonical: impl Into<String>) -> BatchResult<Self> {
        let canonical = canonical.into();
        if !is_alias_token(&canonical) {
            return Err(BatchError::validation(format!(
                "invalid canonical alias '{canonical}' (expected [A-Za-z0-9_]+)"
            )));
        }
        Ok(Self { canonical })
    }

    /// The canonical alias, without brackets.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// ` AS [<canonical>]`
    pub fn introducer(&self) -> String {
        introducer(&self.canonical)
    }

    /// `[<canonical>].`
    pub fn qualifier(&self) -> String {
        qualifier(&self.canonical)
    }

    /// Normalize the alias used in `sql`, leaving string literals untouched.
    ///
    /// Text without any alias introducer is returned unchanged. Without a `FROM`
    /// keyword the whole text is treated as the table reference.
    pub fn normalize(&self, sql: &str) -> BatchResult<String> {
        let spans = scan_quoted_spans(sql)?;
        let from = find_keyword(sql, &spans, "FROM").unwrap_or(0);

        // `from` sits outside any literal, so both halves scan cleanly.
        let (head, tail) = sql.split_at(from);
        let mut tail = Segmented::split(tail, &scan_quoted_spans(tail)?);
        let Some(alias) = self.normalize_segments(&mut tail) else {
            return Ok(sql.to_string());
        };

        let mut head = Segmented::split(head, &scan_quoted_spans(head)?);
        self.requalify(&mut head, &alias);
        Ok(head.join() + &tail.join())
    }

    /// Normalize text that starts at the table reference (`FROM [T] AS [b] ...` or
    /// `[T] AS [b] ...`) in place; returns the alias that was found, if any.
    pub(crate) fn normalize_segments(&self, segs: &mut Segmented) -> Option<String> {
        let alias = segs.code().find_map(detect_alias)?.to_string();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "sqlbatch.alias",
            alias = %alias,
            canonical = %self.canonical,
            "normalizing table alias"
        );

        if alias != self.canonical {
            segs.replace_first(&introducer(&alias), &self.introducer());
        }
        self.requalify(segs, &alias);
        Some(alias)
    }

    fn requalify(&self, segs: &mut Segmented, alias: &str) {
        if alias != self.canonical {
            segs.replace_all(&qualifier(alias), &self.qualifier());
        }
    }
}

fn introducer(alias: &str) -> String {
    format!("{INTRODUCER_PREFIX}{alias}]")
}

fn qualifier(alias: &str) -> String {
    format!("[{alias}].")
}

pub(crate) fn is_alias_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Find the first well-formed ` AS [<alias>]` introducer in `code` and return the alias.
fn detect_alias(code: &str) -> Option<&str> {
    let mut rest = code;
    while let Some(pos) = rest.find(INTRODUCER_PREFIX) {
        let after = &rest[pos + INTRODUCER_PREFIX.len()..];
        if let Some(close) = after.find(']') {
            let alias = &after[..close];
            if is_alias_token(alias) {
                return Some(alias);
            }
        }
        rest = after;
    }
    None
}
