//! Derive macros for observational duals.
//!
//! This crate provides `#[derive(CoGen)]`, which lets values of custom
//! types perturb generators, so they can be used as the argument type of
//! generated functions.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam, Ident};

/// Derive macro for implementing `cogen::CoGen`.
///
/// Structs fold their fields in declaration order, like a tuple of the same
/// fields. Enums fold the active variant's fields over `variant(index)`,
/// where `index` is the variant's position in the declaration, so two
/// variants with equal fields still differ.
///
/// # Example
///
/// ```rust,ignore
/// use cogen::*;
///
/// #[derive(CoGen)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let p = dual(&User { name: "ann".into(), age: 7 });
/// assert_eq!(p, dual(&("ann".to_string(), 7u32)));
/// ```
#[proc_macro_derive(CoGen)]
pub fn derive_cogen(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match cogen_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Generate the implementation for the CoGen trait.
fn cogen_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(::cogen::CoGen));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => struct_body(&data.fields),
        Data::Enum(data) => enum_body(data),
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "CoGen derive macro does not support unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::cogen::CoGen for #name #ty_generics #where_clause {
            fn cogen(&self) -> ::cogen::Perturbation {
                #body
            }
        }
    })
}

/// Bind each field to a local and list the locals in declaration order.
fn bind_fields(fields: &Fields) -> (TokenStream2, Vec<Ident>) {
    let vars: Vec<Ident> = (0..fields.len())
        .map(|i| Ident::new(&format!("field_{i}"), Span::call_site()))
        .collect();

    let pattern = match fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|field| &field.ident);
            quote! { { #(#names: #vars),* } }
        }
        Fields::Unnamed(_) => quote! { ( #(#vars),* ) },
        Fields::Unit => quote! {},
    };

    (pattern, vars)
}

/// Fold the bound fields onto the given tail discriminant, first field outermost.
fn fold_fields(vars: &[Ident], tail: usize) -> TokenStream2 {
    if vars.is_empty() {
        return quote! { ::cogen::Perturbation::variant(#tail) };
    }

    quote! {
        ::cogen::fold_onto(
            ::cogen::Perturbation::variant(#tail),
            [#(::cogen::CoGen::cogen(#vars)),*],
        )
    }
}

/// Generate the body for structs.
fn struct_body(fields: &Fields) -> TokenStream2 {
    let (pattern, vars) = bind_fields(fields);
    let fold = fold_fields(&vars, 0);

    if vars.is_empty() {
        return fold;
    }

    quote! {
        let Self #pattern = self;
        #fold
    }
}

/// Generate the body for enums.
fn enum_body(data: &syn::DataEnum) -> TokenStream2 {
    let arms = data.variants.iter().enumerate().map(|(index, variant)| {
        let variant_name = &variant.ident;
        let (pattern, vars) = bind_fields(&variant.fields);
        let fold = fold_fields(&vars, index);
        quote! {
            Self::#variant_name #pattern => { #fold }
        }
    });

    if data.variants.is_empty() {
        return quote! { match *self {} };
    }

    quote! {
        match self {
            #(#arms)*
        }
    }
}
