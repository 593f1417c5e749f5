//! SET clause synthesis by diffing a value object against its type default.

use crate::error::{BatchError, BatchResult};
use crate::model::BatchModel;
use crate::param::Param;

/// One `column = 'literal'` term of a SET clause.
#[derive(Debug, Clone)]
pub struct ColumnAssignment {
    /// Physical (bracket-quoted) column name.
    pub column: String,
    /// Raw textual value embedded in the rendered statement.
    pub literal: String,
    /// Typed value bound in the execution form.
    pub param: Param,
}

impl ColumnAssignment {
    /// `column = 'literal'`
    pub fn render(&self) -> String {
        format!("{} = '{}'", self.column, self.literal)
    }

    /// `column = <placeholder>`
    pub fn render_bound(&self, placeholder: &str) -> String {
        format!("{} = {}", self.column, placeholder)
    }
}

/// Compare every mapped field of `values` with `T::default()`.
///
/// A field becomes an assignment when its textual representation differs from the
/// default's, or when its name is listed in `overrides`. Assignments follow the
/// mapping's declaration order. Fails with [`BatchError::Validation`] if nothing
/// would be set.
pub fn build_assignments<T: BatchModel>(
    values: &T,
    overrides: &[&str],
) -> BatchResult<Vec<ColumnAssignment>> {
    let defaults = T::default();
    let mapping = T::column_mapping();
    let mut assignments = Vec::new();

    for (field, column) in mapping.iter() {
        let current = values.field_value(field).ok_or_else(|| {
            BatchError::validation(format!("mapped field '{field}' has no value accessor"))
        })?;
        let default = defaults.field_value(field).ok_or_else(|| {
            BatchError::validation(format!("mapped field '{field}' has no value accessor"))
        })?;

        let forced = overrides.contains(&field);
        if current.text() != default.text() || forced {
            let (text, param) = current.into_parts();
            assignments.push(ColumnAssignment {
                column: column.to_string(),
                literal: text.unwrap_or_default(),
                param,
            });
        }
    }

    #[cfg(feature = "tracing")]
    for name in overrides.iter().filter(|o| !mapping.contains_field(o)) {
        tracing::debug!(
            target: "sqlbatch.diff",
            field = %name,
            table = T::TABLE,
            "override column is not mapped; ignoring"
        );
    }

    if assignments.is_empty() {
        return Err(BatchError::validation(format!(
            "update of {} would set no columns: no field differs from its default \
             and no override columns were given",
            T::TABLE
        )));
    }

    Ok(assignments)
}

/// `SET col1 = 'v1', col2 = 'v2'`
pub fn render_set_clause(assignments: &[ColumnAssignment]) -> String {
    let parts: Vec<String> = assignments.iter().map(ColumnAssignment::render).collect();
    format!("SET {}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnMapping, FieldValue};

    #[derive(Default)]
    struct Person {
        name: String,
        age: i32,
        nickname: Option<String>,
    }

    impl BatchModel for Person {
        const TABLE: &'static str = "[Person]";

        fn column_mapping() -> ColumnMapping {
            ColumnMapping::new()
                .with("Name", "[Name]")
                .with("Age", "[Age]")
                .with("Nickname", "[Nickname]")
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "Name" => Some(FieldValue::new(&self.name)),
                "Age" => Some(FieldValue::new(&self.age)),
                "Nickname" => Some(FieldValue::new(&self.nickname)),
                _ => None,
            }
        }
    }

    #[test]
    fn includes_changed_fields_in_mapping_order() {
        let p = Person {
            age: 30,
            name: "Bob".into(),
            ..Default::default()
        };
        let a = build_assignments(&p, &[]).unwrap();
        let cols: Vec<_> = a.iter().map(|x| x.column.as_str()).collect();
        assert_eq!(cols, ["[Name]", "[Age]"]);
        assert_eq!(render_set_clause(&a), "SET [Name] = 'Bob', [Age] = '30'");
    }

    #[test]
    fn override_forces_default_field() {
        let p = Person {
            name: "Bob".into(),
            ..Default::default()
        };
        let a = build_assignments(&p, &["Age"]).unwrap();
        assert_eq!(render_set_clause(&a), "SET [Name] = 'Bob', [Age] = '0'");
    }

    #[test]
    fn override_alone_is_enough() {
        let a = build_assignments(&Person::default(), &["Nickname"]).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].render(), "[Nickname] = ''");
    }

    #[test]
    fn empty_string_differs_from_null() {
        let p = Person {
            nickname: Some(String::new()),
            ..Default::default()
        };
        let a = build_assignments(&p, &[]).unwrap();
        assert_eq!(a[0].column, "[Nickname]");
        assert_eq!(a[0].literal, "");
    }

    #[test]
    fn no_changes_is_validation_error() {
        let err = build_assignments(&Person::default(), &[]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn unknown_override_is_ignored() {
        let err = build_assignments(&Person::default(), &["Missing"]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn literal_is_not_escaped() {
        let p = Person {
            name: "O'Brien".into(),
            ..Default::default()
        };
        let a = build_assignments(&p, &[]).unwrap();
        assert_eq!(a[0].render(), "[Name] = 'O'Brien'");
        assert_eq!(a[0].render_bound("@p1"), "[Name] = @p1");
    }
}
