//! BatchModel derive macro implementation

mod attrs;

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

use crate::sql_ident::bracket_quote;

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "BatchModel can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "BatchModel can only be derived for structs",
            ));
        }
    };

    let table_lit = attrs::get_table(&input)?;
    let table = bracket_quote(&table_lit.value(), table_lit.span(), "table")?;

    let mut mapping_pairs = Vec::new();
    let mut value_arms = Vec::new();
    let mut seen_columns = HashSet::<String>::new();

    for field in fields {
        let field_attrs = attrs::get_field_attrs(field)?;
        if field_attrs.skip {
            continue;
        }

        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = field_ident.unraw().to_string();

        let column = match &field_attrs.column {
            Some(lit) => bracket_quote(&lit.value(), lit.span(), "column")?,
            None => bracket_quote(&field_name, field_ident.span(), "column")?,
        };
        if !seen_columns.insert(column.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate column {column} in BatchModel"),
            ));
        }

        mapping_pairs.push(quote! { (#field_name, #column) });
        value_arms.push(quote! {
            #field_name => ::core::option::Option::Some(
                ::sqlbatch::FieldValue::new(&self.#field_ident)
            )
        });
    }

    if mapping_pairs.is_empty() {
        return Err(syn::Error::new_spanned(
            &input,
            "BatchModel requires at least one mapped field",
        ));
    }

    Ok(quote! {
        impl #impl_generics ::sqlbatch::BatchModel for #name #ty_generics #where_clause {
            const TABLE: &'static str = #table;

            fn column_mapping() -> ::sqlbatch::ColumnMapping {
                ::sqlbatch::ColumnMapping::from_pairs([#(#mapping_pairs),*])
            }

            fn field_value(&self, field: &str) -> ::core::option::Option<::sqlbatch::FieldValue> {
                match field {
                    #(#value_arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
