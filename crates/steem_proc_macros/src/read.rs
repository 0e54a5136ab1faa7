use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::fields::WireStruct;

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let target = WireStruct::parse(input, "Read")?;
    let name = &target.ident;
    let (impl_generics, ty_generics, where_clause) = target.generics.split_for_impl();
    let reads = target.wire_fields().into_iter().map(|f| {
        let binding = f.binding;
        let ty = f.ty;
        quote! {
            let #binding = <#ty as steem_serialization::Read>::read(bytes, pos)?;
        }
    });
    let construct = target.construct();

    Ok(quote! {
        #[automatically_derived]
        #[allow(unused_qualifications)]
        impl #impl_generics steem_serialization::Read for #name #ty_generics #where_clause {
            #[inline]
            fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, steem_serialization::ReadError> {
                let _ = (&bytes, &pos);
                #(#reads)*
                Ok(#construct)
            }
        }
    })
}
