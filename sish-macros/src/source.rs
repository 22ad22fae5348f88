//! `#[derive(Source)]` expansion.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, Ident, LitInt, LitStr, Token,
    parse::{Parse, ParseStream},
};

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Source can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Source can only be derived for structs",
            ));
        }
    };

    let mut keys = Vec::new();
    let mut value_arms = Vec::new();
    for field in fields {
        let mut args = FieldArgs::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("source")) {
            args.merge(attr.parse_args::<FieldArgs>()?);
        }
        if args.skip {
            continue;
        }
        // Named fields always carry an ident.
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let key = args.rename.unwrap_or_else(|| ident.to_string());
        value_arms.push(quote! {
            #key => ::core::option::Option::Some(
                ::sish::Property::value(::core::clone::Clone::clone(&self.#ident))
            ),
        });
        keys.push(key);
    }

    let mut method_arms = Vec::new();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("method")) {
        let args = attr.parse_args::<MethodArgs>()?;
        let ident = &args.ident;
        let key = args.rename.unwrap_or_else(|| ident.to_string());
        if keys.contains(&key) {
            return Err(syn::Error::new(
                ident.span(),
                format!("duplicate source property: {}", key),
            ));
        }
        let property = match args.arity {
            Some(arity) => quote! { ::sish::Property::method_with_arity(#arity, Self::#ident) },
            None => quote! { ::sish::Property::method(Self::#ident) },
        };
        method_arms.push(quote! {
            #key => ::core::option::Option::Some(#property),
        });
        keys.push(key);
    }

    Ok(quote! {
        impl #impl_generics ::sish::Source for #name #ty_generics #where_clause {
            fn keys(&self) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![#(::std::string::String::from(#keys)),*]
            }

            fn property(
                &self,
                key: &str,
            ) -> ::core::option::Option<::sish::Property<Self>> {
                match key {
                    #(#value_arms)*
                    #(#method_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

#[derive(Default)]
struct FieldArgs {
    skip: bool,
    rename: Option<String>,
}

impl FieldArgs {
    fn merge(&mut self, other: FieldArgs) {
        self.skip |= other.skip;
        if other.rename.is_some() {
            self.rename = other.rename;
        }
    }
}

impl Parse for FieldArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = FieldArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            match ident.to_string().as_str() {
                "skip" => args.skip = true,
                "rename" => {
                    input.parse::<Token![=]>()?;
                    let lit: LitStr = input.parse()?;
                    args.rename = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown source attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

struct MethodArgs {
    ident: Ident,
    arity: Option<usize>,
    rename: Option<String>,
}

impl Parse for MethodArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let ident: Ident = input.parse()?;
        let mut arity = None;
        let mut rename = None;

        while input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match key.to_string().as_str() {
                "arity" => {
                    let lit: LitInt = input.parse()?;
                    arity = Some(lit.base10_parse()?);
                }
                "rename" => {
                    let lit: LitStr = input.parse()?;
                    rename = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("unknown method attribute: {}", other),
                    ));
                }
            }
        }

        if !input.is_empty() {
            return Err(input.error("expected `,`"));
        }

        Ok(MethodArgs {
            ident,
            arity,
            rename,
        })
    }
}
