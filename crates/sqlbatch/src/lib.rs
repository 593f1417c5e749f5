//! # sqlbatch
//!
//! Bulk DELETE/UPDATE statements derived from the SQL already compiled for an
//! equivalent SELECT, instead of loading rows and issuing per-row commands.
//!
//! ## Features
//!
//! - **Reuse the read query**: the `FROM`/`WHERE` tail of the compiled SELECT is kept as-is
//! - **Literal-safe rewriting**: alias rewriting never touches `'quoted'` content
//! - **Default diffing**: UPDATE sets only fields that differ from `T::default()`, plus overrides
//! - **Bound execution form**: SET values execute as typed parameters, never spliced text
//! - **Safe defaults**: an UPDATE with nothing to set is an error, not a no-op
//!
//! ## Example
//!
//! ```ignore
//! use sqlbatch::{BatchModel, delete_statement, update_statement};
//!
//! #[derive(Default, BatchModel)]
//! #[orm(table = "Users")]
//! struct User {
//!     #[orm(column = "Name")]
//!     name: String,
//!     #[orm(column = "Age")]
//!     age: i32,
//! }
//!
//! let select = "SELECT [c].[Id] FROM [Users] AS [c] WHERE [c].[Id] = 5";
//!
//! let delete = delete_statement(select)?;
//! assert_eq!(delete.sql(), "DELETE FROM [Users] WHERE [Id] = 5");
//!
//! let update = update_statement(select, &User { name: "Bob".into(), age: 30 }, &[])?;
//! assert_eq!(update.sql(), "UPDATE [Users] SET [Name] = 'Bob', [Age] = '30' WHERE [Id] = 5");
//! assert_eq!(update.exec_sql(), "UPDATE [Users] SET [Name] = @p1, [Age] = @p2 WHERE [Id] = 5");
//! ```

pub mod alias;
pub mod config;
pub mod diff;
pub mod error;
pub mod exec;
pub mod model;
pub mod param;
pub mod quoted;
pub mod statement;
pub mod text;

pub use alias::{AliasNormalizer, DEFAULT_CANONICAL_ALIAS};
pub use config::{BatchConfig, PlaceholderStyle};
pub use diff::{ColumnAssignment, build_assignments, render_set_clause};
pub use error::{BatchError, BatchResult};
pub use exec::{CompiledQuery, ExecutionContext, batch_delete, batch_update};
pub use model::{BatchModel, BatchValue, ColumnMapping, FieldValue};
pub use param::{Param, ParamList};
pub use quoted::{QuotedSpan, scan_quoted_spans};
pub use statement::{
    BatchBuilder, BatchStatement, StatementKind, delete_statement, update_statement,
};
pub use text::{quote_ident, replace_first};

#[cfg(feature = "derive")]
pub use sqlbatch_derive::BatchModel;
