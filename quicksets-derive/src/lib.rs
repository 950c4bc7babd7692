//! Derive macros for quicksets settings library
//!
//! This crate provides `#[derive(Config)]` (re-exported as
//! `quicksets::DeriveConfig`) for generating the attribute table of a
//! configuration class.
//!
//! # Usage
//!
//! ```text
//! use quicksets::DeriveConfig;
//!
//! #[derive(DeriveConfig, Default)]
//! #[config(property(name = "POSTGRESQL_CONNECTION_OPTIONS", getter = "connection_options"))]
//! #[config(constants(POOL_RECYCLE))]
//! struct DevelopConfig {
//!     postgresql_host: String,
//!
//!     #[config(rename = "PG_PORT")]
//!     postgresql_port: u16,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Ident, Lit, LitStr, Meta,
    parse_macro_input,
    punctuated::Punctuated,
};

/// Derive macro for generating `ConfigObject` and `Config` implementations.
///
/// Every named field becomes an attribute. Field types must implement
/// `serde::Serialize`; base fields must implement `ConfigObject`.
///
/// # Attributes
///
/// ## Container attributes (`#[config(...)]`)
/// - `class_name = "Name"` - Class name override (default: the struct name)
/// - `property(name = "NAME", getter = "method")` - Computed property, `method(&self)` is called on every lookup
/// - `constants(NAME, ...)` - Expose associated constants `Self::NAME`
///
/// ## Field attributes (`#[config(...)]`)
/// - `rename = "NAME"` - Attribute name (default: the field name upper-cased)
/// - `base` - Base configuration, searched after this struct's own attributes
/// - `skip` - Not an attribute
#[proc_macro_derive(Config, attributes(config))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let container = parse_container_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Config can only be derived for structs with named fields, e.g. `struct MyConfig { field: Type }`",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Config can only be derived for structs, not enums or unions",
            ));
        }
    };

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    let mut arms = Vec::new();
    let mut bases = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attrs(&field.attrs)?;

        if attrs.skip {
            continue;
        }

        if attrs.base {
            bases.push(field_name.clone());
            continue;
        }

        let attr_name = attrs
            .rename
            .unwrap_or_else(|| field_name.to_string().to_uppercase());
        check_unique(&mut seen, &attr_name, field_name)?;

        arms.push(quote! {
            #attr_name => return ::quicksets::attr_value(&self.#field_name),
        });
        names.push(attr_name);
    }

    for constant in &container.constants {
        let attr_name = constant.to_string();
        check_unique(&mut seen, &attr_name, constant)?;

        arms.push(quote! {
            #attr_name => return ::quicksets::attr_value(&Self::#constant),
        });
        names.push(attr_name);
    }

    for property in &container.properties {
        let attr_name = &property.name;
        check_unique(&mut seen, attr_name, &property.getter)?;

        let getter = &property.getter;
        arms.push(quote! {
            #attr_name => return ::quicksets::attr_value(&self.#getter()),
        });
        names.push(attr_name.clone());
    }

    let class_name = container
        .class_name
        .unwrap_or_else(|| name.to_string());

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Own names hiding a base attribute, reported when the class is loaded
    let shadowed = if bases.is_empty() {
        quote! {}
    } else {
        quote! {
            fn shadowed_attrs(&self) -> ::std::vec::Vec<&'static str> {
                let own: &[&'static str] = &[#(#names),*];
                let mut shadowed = ::std::vec::Vec::new();
                #(
                    for name in ::quicksets::ConfigObject::shadowed_attrs(&self.#bases)
                        .into_iter()
                        .chain(
                            ::quicksets::ConfigObject::attr_names(&self.#bases)
                                .into_iter()
                                .filter(|name| own.contains(name)),
                        )
                    {
                        if !shadowed.contains(&name) {
                            shadowed.push(name);
                        }
                    }
                )*
                shadowed
            }
        }
    };

    let expanded = quote! {
        impl #impl_generics ::quicksets::ConfigObject for #name #ty_generics #where_clause {
            fn class_name(&self) -> &'static str {
                #class_name
            }

            fn get_attr(&self, name: &str) -> ::core::option::Option<::quicksets::__private::Value> {
                match name {
                    #(#arms)*
                    _ => {}
                }
                #(
                    if let ::core::option::Option::Some(value) =
                        ::quicksets::ConfigObject::get_attr(&self.#bases, name)
                    {
                        return ::core::option::Option::Some(value);
                    }
                )*
                ::core::option::Option::None
            }

            fn attr_names(&self) -> ::std::vec::Vec<&'static str> {
                #[allow(unused_mut)]
                let mut names: ::std::vec::Vec<&'static str> = ::std::vec![#(#names),*];
                #(
                    for name in ::quicksets::ConfigObject::attr_names(&self.#bases) {
                        if !names.contains(&name) {
                            names.push(name);
                        }
                    }
                )*
                names
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #shadowed
        }

        impl #impl_generics ::quicksets::Config for #name #ty_generics #where_clause {
            const CLASS_NAME: &'static str = #class_name;
        }
    };

    Ok(expanded)
}

fn check_unique<T: quote::ToTokens>(
    seen: &mut HashSet<String>,
    attr_name: &str,
    span: &T,
) -> syn::Result<()> {
    if seen.insert(attr_name.to_string()) {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            span,
            format!("duplicate config attribute `{attr_name}`"),
        ))
    }
}

/// Container-level attributes from #[config(...)]
#[derive(Default)]
struct ContainerAttrs {
    class_name: Option<String>,
    constants: Vec<Ident>,
    properties: Vec<Property>,
}

/// `property(name = "...", getter = "...")`
struct Property {
    name: String,
    getter: Ident,
}

/// Field-level attributes from #[config(...)]
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    base: bool,
    skip: bool,
}

fn config_metas(attr: &Attribute) -> syn::Result<Punctuated<Meta, syn::Token![,]>> {
    attr.parse_args_with(Punctuated::<Meta, syn::Token![,]>::parse_terminated)
}

fn lit_str(expr: &Expr, what: &str) -> syn::Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        _ => Err(syn::Error::new_spanned(
            expr,
            format!("#[config({what})] must be a string literal, e.g. `{what} = \"NAME\"`"),
        )),
    }
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut result = ContainerAttrs::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("config")) {
        for meta in config_metas(attr)? {
            match meta {
                Meta::NameValue(nv) if nv.path.is_ident("class_name") => {
                    result.class_name = Some(lit_str(&nv.value, "class_name")?.value());
                }
                Meta::List(list) if list.path.is_ident("constants") => {
                    let idents = list.parse_args_with(
                        Punctuated::<Ident, syn::Token![,]>::parse_terminated,
                    )?;
                    result.constants.extend(idents);
                }
                Meta::List(list) if list.path.is_ident("property") => {
                    let nested = list.parse_args_with(
                        Punctuated::<Meta, syn::Token![,]>::parse_terminated,
                    )?;
                    let mut name = None;
                    let mut getter = None;
                    for item in nested {
                        match item {
                            Meta::NameValue(nv) if nv.path.is_ident("name") => {
                                name = Some(lit_str(&nv.value, "name")?.value());
                            }
                            Meta::NameValue(nv) if nv.path.is_ident("getter") => {
                                getter = Some(lit_str(&nv.value, "getter")?.parse::<Ident>()?);
                            }
                            other => {
                                return Err(syn::Error::new_spanned(
                                    other,
                                    "unknown property option, expected `name` or `getter`",
                                ));
                            }
                        }
                    }
                    match (name, getter) {
                        (Some(name), Some(getter)) => {
                            result.properties.push(Property { name, getter });
                        }
                        _ => {
                            return Err(syn::Error::new_spanned(
                                list,
                                "#[config(property)] needs both `name` and `getter`, e.g. `property(name = \"OPTIONS\", getter = \"options\")`",
                            ));
                        }
                    }
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unknown container option, expected `class_name`, `constants` or `property`",
                    ));
                }
            }
        }
    }

    Ok(result)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("config")) {
        for meta in config_metas(attr)? {
            match meta {
                Meta::Path(path) if path.is_ident("base") => result.base = true,
                Meta::Path(path) if path.is_ident("skip") => result.skip = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    result.rename = Some(lit_str(&nv.value, "rename")?.value());
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unknown field option, expected `rename`, `base` or `skip`",
                    ));
                }
            }
        }
    }

    Ok(result)
}
