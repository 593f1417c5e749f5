//! String slicing helpers shared by the normalizer and the statement builders.

use crate::quoted::QuotedSpan;

/// Replace the first occurrence of `search` in `text`.
///
/// Returns `text` unchanged if `search` does not occur.
pub fn replace_first(text: &str, search: &str, replace: &str) -> String {
    match text.find(search) {
        Some(pos) => {
            let mut out = String::with_capacity(text.len() - search.len() + replace.len());
            out.push_str(&text[..pos]);
            out.push_str(replace);
            out.push_str(&text[pos + search.len()..]);
            out
        }
        None => text.to_string(),
    }
}

/// Quote an identifier with square brackets, doubling any `]`.
///
/// Dotted names are quoted per part: `dbo.Users` becomes `[dbo].[Users]`.
pub fn quote_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for (i, part) in name.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push('[');
        out.push_str(&part.replace(']', "]]"));
        out.push(']');
    }
    out
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Find the byte offset of the first `keyword` that sits outside string literals
/// and bracketed identifiers and is delimited by whitespace (or the text edges).
///
/// Matching is case-sensitive; compiled queries emit upper-case keywords.
pub(crate) fn find_keyword(sql: &str, spans: &[QuotedSpan], keyword: &str) -> Option<usize> {
    let bytes = sql.as_bytes();
    let kw = keyword.as_bytes();
    let mut spans = spans.iter().peekable();
    let mut in_brackets = false;
    let mut i = 0;

    while i < bytes.len() {
        if let Some(span) = spans.peek() {
            if i == span.start {
                // Skip the content and its closing quote.
                i = span.end() + 1;
                spans.next();
                continue;
            }
        }

        match bytes[i] {
            b'[' if !in_brackets => in_brackets = true,
            b']' if in_brackets => {
                // `]]` inside brackets is an escaped bracket.
                if bytes.get(i + 1) == Some(&b']') {
                    i += 2;
                    continue;
                }
                in_brackets = false;
            }
            _ if !in_brackets && bytes[i..].starts_with(kw) => {
                let before_ok = i == 0 || bytes[i - 1].is_ascii_whitespace();
                let after_ok = bytes
                    .get(i + kw.len())
                    .is_none_or(|b| b.is_ascii_whitespace());
                if before_ok && after_ok {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// SQL text split around its string literals.
///
/// `code` always has exactly one more element than `quoted`: the text is
/// `code[0] + quoted[0] + code[1] + ... + code[n]`. Rewrites only ever touch `code`,
/// so literal contents come back byte-for-byte on [`Segmented::join`].
///
/// Patterns without a `'` cannot straddle a literal, because every code piece
/// next to a literal ends or starts with its delimiting quote.
#[derive(Debug, Clone)]
pub(crate) struct Segmented {
    code: Vec<String>,
    quoted: Vec<String>,
}

impl Segmented {
    pub(crate) fn split(sql: &str, spans: &[QuotedSpan]) -> Self {
        let mut code = Vec::with_capacity(spans.len() + 1);
        let mut quoted = Vec::with_capacity(spans.len());
        let mut pos = 0;
        for span in spans {
            code.push(sql[pos..span.start].to_string());
            quoted.push(span.content.clone());
            pos = span.end();
        }
        code.push(sql[pos..].to_string());
        Self { code, quoted }
    }

    pub(crate) fn code(&self) -> impl Iterator<Item = &str> {
        self.code.iter().map(String::as_str)
    }

    pub(crate) fn contains(&self, pattern: &str) -> bool {
        self.code.iter().any(|c| c.contains(pattern))
    }

    /// Replace the first occurrence across all code pieces. Returns whether a
    /// replacement happened.
    pub(crate) fn replace_first(&mut self, search: &str, replace: &str) -> bool {
        for piece in &mut self.code {
            if piece.contains(search) {
                *piece = replace_first(piece, search, replace);
                return true;
            }
        }
        false
    }

    pub(crate) fn replace_all(&mut self, search: &str, replace: &str) {
        for piece in &mut self.code {
            if piece.contains(search) {
                *piece = piece.replace(search, replace);
            }
        }
    }

    pub(crate) fn join(&self) -> String {
        let cap = self.code.iter().chain(&self.quoted).map(String::len).sum();
        let mut out = String::with_capacity(cap);
        for (i, piece) in self.code.iter().enumerate() {
            out.push_str(piece);
            if let Some(q) = self.quoted.get(i) {
                out.push_str(q);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quoted::scan_quoted_spans;

    #[test]
    fn replace_first_only_touches_first() {
        assert_eq!(replace_first("a-b-c", "-", "+"), "a+b-c");
    }

    #[test]
    fn replace_first_missing_is_noop() {
        assert_eq!(replace_first("abc", "x", "y"), "abc");
    }

    #[test]
    fn quote_ident_simple_and_dotted() {
        assert_eq!(quote_ident("Users"), "[Users]");
        assert_eq!(quote_ident("dbo.Users"), "[dbo].[Users]");
        assert_eq!(quote_ident("odd]name"), "[odd]]name]");
    }

    #[test]
    fn truncate_respects_char_boundary() {
        assert_eq!(truncate_sql_bytes("héllo", 2), "h");
        assert_eq!(truncate_sql_bytes("abc", 10), "abc");
    }

    #[test]
    fn find_keyword_basic() {
        let sql = "SELECT [a].[Id] FROM [T] AS [a]";
        assert_eq!(find_keyword(sql, &[], "FROM"), Some(16));
    }

    #[test]
    fn find_keyword_skips_literals_and_brackets() {
        let sql = "SELECT 'x FROM y', [FROM], [a].[FROM Date] FROM [T] AS [a]";
        let spans = scan_quoted_spans(sql).unwrap();
        let idx = find_keyword(sql, &spans, "FROM").unwrap();
        assert_eq!(&sql[idx..], "FROM [T] AS [a]");
    }

    #[test]
    fn find_keyword_requires_word_boundary() {
        let sql = "SELECT FROMAGE FROM\n[T]";
        assert_eq!(find_keyword(sql, &[], "FROM"), Some(15));
        assert_eq!(find_keyword("SELECT 1", &[], "FROM"), None);
    }

    #[test]
    fn find_keyword_escaped_bracket() {
        let sql = "SELECT [x]] FROM y] FROM [T]";
        let idx = find_keyword(sql, &[], "FROM").unwrap();
        assert_eq!(&sql[idx..], "FROM [T]");
    }

    #[test]
    fn segmented_round_trips() {
        let sql = "a = 'x' AND b = 'it''s' AND c = 1";
        let spans = scan_quoted_spans(sql).unwrap();
        let segs = Segmented::split(sql, &spans);
        assert_eq!(segs.join(), sql);
    }

    #[test]
    fn segmented_rewrites_only_code() {
        let sql = "[b].[x] = '[b].[x]' AND [b].[y] = 2";
        let spans = scan_quoted_spans(sql).unwrap();
        let mut segs = Segmented::split(sql, &spans);
        segs.replace_all("[b].", "");
        assert_eq!(segs.join(), "[x] = '[b].[x]' AND [y] = 2");
    }

    #[test]
    fn segmented_replace_first_spans_pieces() {
        let sql = "'AS' x AS y AS z";
        let spans = scan_quoted_spans(sql).unwrap();
        let mut segs = Segmented::split(sql, &spans);
        assert!(segs.replace_first(" AS ", " BE "));
        assert_eq!(segs.join(), "'AS' x BE y AS z");
        assert!(!segs.replace_first("nope", ""));
    }
}
