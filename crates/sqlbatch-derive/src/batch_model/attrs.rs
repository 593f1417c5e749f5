//! Attribute parsing for BatchModel derive macro.

use syn::Result;

pub(super) struct StructAttrList {
    pub(super) table: Option<syn::LitStr>,
}

impl syn::parse::Parse for StructAttrList {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut table: Option<syn::LitStr> = None;

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            let key = ident.to_string();

            let _: syn::Token![=] = input.parse()?;
            let value: syn::LitStr = input.parse()?;

            if key == "table" {
                table = Some(value);
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(Self { table })
    }
}

#[derive(Default)]
pub(super) struct FieldAttrs {
    pub(super) skip: bool,
    pub(super) column: Option<syn::LitStr>,
}

impl syn::parse::Parse for FieldAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = FieldAttrs::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            let key = ident.to_string();

            match key.as_str() {
                "skip" => attrs.skip = true,
                _ => {
                    let _: syn::Token![=] = input.parse()?;
                    let value: syn::LitStr = input.parse()?;
                    if key == "column" {
                        attrs.column = Some(value);
                    }
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

pub(super) fn get_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut merged = FieldAttrs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        if let syn::Meta::List(meta_list) = &attr.meta {
            let parsed = syn::parse2::<FieldAttrs>(meta_list.tokens.clone())?;
            merged.skip |= parsed.skip;
            if parsed.column.is_some() {
                merged.column = parsed.column;
            }
        }
    }

    if merged.skip && merged.column.is_some() {
        return Err(syn::Error::new_spanned(
            field,
            "skip and column are mutually exclusive",
        ));
    }

    Ok(merged)
}

pub(super) fn get_table(input: &syn::DeriveInput) -> Result<syn::LitStr> {
    let mut table: Option<syn::LitStr> = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        if let syn::Meta::List(meta_list) = &attr.meta {
            let parsed = syn::parse2::<StructAttrList>(meta_list.tokens.clone())?;
            if parsed.table.is_some() {
                table = parsed.table;
            }
        }
    }

    table.ok_or_else(|| {
        syn::Error::new_spanned(
            input,
            "BatchModel requires #[orm(table = \"table_name\")] attribute",
        )
    })
}
