//! Entity metadata consumed by the UPDATE builder.
//!
//! [`BatchModel`] is usually derived:
//!
//! ```ignore
//! use sqlbatch::BatchModel;
//!
//! #[derive(Default, BatchModel)]
//! #[orm(table = "Users")]
//! struct User {
//!     #[orm(column = "Name")]
//!     name: String,
//!     age: i32,
//!     #[orm(skip)]
//!     cached: Option<String>,
//! }
//! ```

use crate::param::Param;
use crate::text::quote_ident;
use tokio_postgres::types::ToSql;

/// Ordered mapping from logical field name to physical column name.
///
/// Field names are unique; iteration follows declaration (insertion) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(String, String)>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from `(field, column)` pairs.
    pub fn from_pairs<F, C>(pairs: impl IntoIterator<Item = (F, C)>) -> Self
    where
        F: Into<String>,
        C: Into<String>,
    {
        let mut mapping = Self::new();
        for (field, column) in pairs {
            mapping.insert(field, column);
        }
        mapping
    }

    /// Map `field` to `column`.
    ///
    /// Re-mapping an existing field replaces its column but keeps its position.
    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
        let field = field.into();
        let column = column.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = column,
            None => self.entries.push((field, column)),
        }
    }

    /// Chainable [`ColumnMapping::insert`].
    pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.insert(field, column);
        self
    }

    /// Map `field` to a column of the same name, bracket-quoted.
    pub fn with_field(self, field: impl Into<String>) -> Self {
        let field = field.into();
        let column = quote_ident(&field);
        self.with(field, column)
    }

    /// Physical column for `field`.
    pub fn column(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, c)| c.as_str())
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.column(field).is_some()
    }

    /// `(field, column)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, c)| (f.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A value that can appear in a SET clause.
///
/// `to_text` is the textual representation used both for the default comparison
/// and for the rendered literal; `None` means SQL NULL. `to_param` is the typed
/// value bound at execution time.
pub trait BatchValue {
    fn to_text(&self) -> Option<String>;

    fn to_param(&self) -> Param;
}

macro_rules! impl_batch_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BatchValue for $ty {
                fn to_text(&self) -> Option<String> {
                    Some(self.to_string())
                }

                fn to_param(&self) -> Param {
                    Param::new(self.clone())
                }
            }
        )*
    };
}

impl_batch_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u32,
    f32,
    f64,
    String,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    uuid::Uuid,
    serde_json::Value,
);

impl BatchValue for &'static str {
    fn to_text(&self) -> Option<String> {
        Some((*self).to_string())
    }

    fn to_param(&self) -> Param {
        Param::new(*self)
    }
}

impl<T> BatchValue for Option<T>
where
    T: BatchValue + ToSql + Clone + Send + Sync + 'static,
{
    fn to_text(&self) -> Option<String> {
        self.as_ref().and_then(BatchValue::to_text)
    }

    fn to_param(&self) -> Param {
        Param::new(self.clone())
    }
}

/// A snapshot of one field: its textual form plus its bindable value.
#[derive(Debug, Clone)]
pub struct FieldValue {
    text: Option<String>,
    param: Param,
}

impl FieldValue {
    pub fn new<T: BatchValue + ?Sized>(value: &T) -> Self {
        Self {
            text: value.to_text(),
            param: value.to_param(),
        }
    }

    /// Textual representation; `None` for NULL.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The text embedded between quotes in the rendered SET clause (NULL renders empty).
    pub fn literal(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn param(&self) -> &Param {
        &self.param
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Param) {
        (self.text, self.param)
    }
}

/// A type whose values can drive an UPDATE SET clause.
///
/// `Default` supplies the baseline each field is compared against.
pub trait BatchModel: Default {
    /// Bracket-quoted table name, e.g. `[Users]`.
    const TABLE: &'static str;

    /// Field to column mapping in declaration order.
    fn column_mapping() -> ColumnMapping;

    /// Snapshot of `field`, or `None` if the model has no such field.
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_keeps_declaration_order() {
        let m = ColumnMapping::new()
            .with("Name", "[Name]")
            .with("Age", "[Age]")
            .with("City", "[City]");
        let fields: Vec<_> = m.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, ["Name", "Age", "City"]);
    }

    #[test]
    fn mapping_remap_keeps_position() {
        let m = ColumnMapping::from_pairs([("a", "[a]"), ("b", "[b]"), ("a", "[A2]")]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.iter().next(), Some(("a", "[A2]")));
        assert_eq!(m.column("b"), Some("[b]"));
        assert!(!m.contains_field("c"));
    }

    #[test]
    fn with_field_quotes_the_field_name() {
        let m = ColumnMapping::new().with_field("Name").with_field("odd]col");
        assert_eq!(m.column("Name"), Some("[Name]"));
        assert_eq!(m.column("odd]col"), Some("[odd]]col]"));
    }

    #[test]
    fn option_text_is_none_for_null() {
        let v: Option<i32> = None;
        let fv = FieldValue::new(&v);
        assert_eq!(fv.text(), None);
        assert_eq!(fv.literal(), "");
    }

    #[test]
    fn null_differs_from_empty_string() {
        let null = FieldValue::new(&Option::<String>::None);
        let empty = FieldValue::new(&Some(String::new()));
        assert_ne!(null.text(), empty.text());
    }

    #[test]
    fn display_text() {
        assert_eq!(FieldValue::new(&30i32).text(), Some("30"));
        assert_eq!(FieldValue::new(&true).text(), Some("true"));
        assert_eq!(FieldValue::new(&"Bob").literal(), "Bob");
    }
}
