use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::fields::WireStruct;

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let target = WireStruct::parse(input, "Write")?;
    let name = &target.ident;
    let (impl_generics, ty_generics, where_clause) = target.generics.split_for_impl();
    let writes = target.wire_fields().into_iter().map(|f| {
        let access = f.access;
        quote! {
            steem_serialization::Write::write(&#access, bytes, pos)?;
        }
    });

    Ok(quote! {
        #[automatically_derived]
        #[allow(unused_qualifications)]
        impl #impl_generics steem_serialization::Write for #name #ty_generics #where_clause {
            #[inline]
            fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), steem_serialization::WriteError> {
                let _ = (&bytes, &pos);
                #(#writes)*
                Ok(())
            }
        }
    })
}
