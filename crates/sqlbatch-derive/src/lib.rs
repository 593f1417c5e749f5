//! Derive macros for sqlbatch
//!
//! Provides `#[derive(BatchModel)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod batch_model;
mod sql_ident;

/// Derive `BatchModel` metadata for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlbatch::BatchModel;
///
/// #[derive(Default, BatchModel)]
/// #[orm(table = "dbo.Users")]
/// struct User {
///     #[orm(column = "Name")]
///     name: String,
///     age: i32,
///     #[orm(skip)]
///     scratch: Option<String>,
/// }
/// ```
///
/// # Generated
///
/// - `TABLE` - Bracket-quoted table name (`[dbo].[Users]`)
/// - `column_mapping()` - Field to column mapping in declaration order
/// - `field_value()` - Per-field snapshot used for default diffing
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Specify table name (required)
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(skip)]` - Leave the field out of the mapping
#[proc_macro_derive(BatchModel, attributes(orm))]
pub fn derive_batch_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    batch_model::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
