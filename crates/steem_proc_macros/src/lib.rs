use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod fields;
mod num_bytes;
mod read;
mod write;

/// Derive `steem_serialization::Read`, decoding fields in declaration order.
#[proc_macro_derive(Read)]
pub fn derive_read(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    read::expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Derive `steem_serialization::Write`, encoding fields in declaration order.
#[proc_macro_derive(Write)]
pub fn derive_write(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    write::expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

#[proc_macro_derive(NumBytes)]
pub fn derive_num_bytes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    num_bytes::expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
