use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod source;

/// Derive macro for implementing `Source`.
///
/// Named fields become plain value properties (their type must convert into
/// `sish::Value`). Methods are exported with container attributes and must
/// have the signature `fn(&self, Args) -> Result<Value, BoxError>`.
///
/// ```rust,ignore
/// #[derive(sish::Source)]
/// #[method(log)]
/// #[method(add, arity = 2)]
/// #[method(shout, rename = "yell")]
/// struct Console {
///     prefix: String,
///     #[source(rename = "lvl")]
///     level: i64,
///     #[source(skip)]
///     buffer: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Source, attributes(source, method))]
pub fn derive_source(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    source::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
