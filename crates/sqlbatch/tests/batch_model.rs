#![allow(dead_code)]

use sqlbatch::{BatchModel, delete_statement, update_statement};

#[derive(Default, BatchModel)]
#[orm(table = "Person")]
struct Person {
    #[orm(column = "Name")]
    name: String,
    #[orm(column = "Age")]
    age: i32,
    #[orm(column = "Nickname")]
    nickname: Option<String>,
    #[orm(skip)]
    scratch: Option<i64>,
}

#[derive(Default, BatchModel)]
#[orm(table = "dbo.Accounts")]
struct Account {
    r#type: String,
    active: bool,
    balance: f64,
}

const SELECT_PERSON: &str = "SELECT [c].[Id], [c].[Name] FROM [Person] AS [c] WHERE [c].[Id] = 5";

#[test]
fn derived_metadata() {
    assert_eq!(Person::TABLE, "[Person]");
    assert_eq!(Account::TABLE, "[dbo].[Accounts]");

    let mapping = Person::column_mapping();
    let pairs: Vec<_> = mapping.iter().collect();
    assert_eq!(
        pairs,
        [("name", "[Name]"), ("age", "[Age]"), ("nickname", "[Nickname]")]
    );

    let mapping = Account::column_mapping();
    assert_eq!(mapping.column("type"), Some("[type]"));
}

#[test]
fn skipped_field_has_no_accessor() {
    let p = Person::default();
    assert!(p.field_value("scratch").is_none());
    assert!(p.field_value("name").is_some());
}

#[test]
fn update_from_derived_model() {
    let values = Person {
        name: "Bob".into(),
        age: 30,
        ..Default::default()
    };
    let stmt = update_statement(SELECT_PERSON, &values, &[]).unwrap();
    assert_eq!(
        stmt.sql(),
        "UPDATE [Person] SET [Name] = 'Bob', [Age] = '30' WHERE [Id] = 5"
    );
    assert_eq!(
        stmt.exec_sql(),
        "UPDATE [Person] SET [Name] = @p1, [Age] = @p2 WHERE [Id] = 5"
    );
}

#[test]
fn skipped_field_never_diffs() {
    let values = Person {
        age: 1,
        scratch: Some(99),
        ..Default::default()
    };
    let stmt = update_statement(SELECT_PERSON, &values, &["scratch"]).unwrap();
    assert_eq!(stmt.sql(), "UPDATE [Person] SET [Age] = '1' WHERE [Id] = 5");
}

#[test]
fn override_forces_default_value() {
    let values = Account {
        active: false,
        ..Default::default()
    };
    let stmt = update_statement(
        "SELECT [a0].[Id] FROM [dbo].[Accounts] AS [a0] WHERE [a0].[balance] < 0",
        &values,
        &["active"],
    )
    .unwrap();
    assert_eq!(
        stmt.sql(),
        "UPDATE [dbo].[Accounts] SET [active] = 'false' WHERE [balance] < 0"
    );
}

#[test]
fn empty_diff_is_rejected() {
    let err = update_statement(SELECT_PERSON, &Person::default(), &[]).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn delete_round_trip_shape() {
    let stmt = delete_statement(SELECT_PERSON).unwrap();
    assert_eq!(stmt.sql(), "DELETE FROM [Person] WHERE [Id] = 5");
}

#[test]
fn quoted_filter_values_survive() {
    let select = "SELECT [c].[Id] FROM [Person] AS [c] WHERE [c].[Name] = 'O''Brien [c].[x]'";
    let values = Person {
        age: 40,
        ..Default::default()
    };
    let stmt = update_statement(select, &values, &[]).unwrap();
    assert_eq!(
        stmt.sql(),
        "UPDATE [Person] SET [Age] = '40' WHERE [Name] = 'O''Brien [c].[x]'"
    );
}
