use proc_macro2::Span;
use syn::{Error, Result};

/// Bracket-quote a (possibly dotted) identifier, doubling `]`.
///
/// Parts that are already bracket-quoted are kept verbatim.
pub(crate) fn bracket_quote(name: &str, span: Span, what: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::new(span, format!("{what} must not be empty")));
    }
    if name.contains('\0') {
        return Err(Error::new(span, format!("{what} cannot contain NUL character")));
    }
    if name.starts_with('[') && name.ends_with(']') {
        return Ok(name.to_string());
    }

    let mut out = String::with_capacity(name.len() + 2);
    for (i, part) in name.split('.').enumerate() {
        if part.is_empty() {
            return Err(Error::new(
                span,
                format!("{what} '{name}' has an empty segment"),
            ));
        }
        if i > 0 {
            out.push('.');
        }
        out.push('[');
        out.push_str(&part.replace(']', "]]"));
        out.push(']');
    }
    Ok(out)
}
