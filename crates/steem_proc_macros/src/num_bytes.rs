use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::fields::WireStruct;

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let target = WireStruct::parse(input, "NumBytes")?;
    let name = &target.ident;
    let (impl_generics, ty_generics, where_clause) = target.generics.split_for_impl();
    let sizes = target.wire_fields().into_iter().map(|f| {
        let access = f.access;
        quote!(steem_serialization::NumBytes::num_bytes(&#access))
    });

    Ok(quote! {
        #[automatically_derived]
        #[allow(unused_qualifications)]
        impl #impl_generics steem_serialization::NumBytes for #name #ty_generics #where_clause {
            #[inline]
            fn num_bytes(&self) -> usize {
                0 #(+ #sizes)*
            }
        }
    })
}
