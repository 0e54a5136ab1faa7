use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{
    Data, DeriveInput, Fields, GenericParam, Generics, Ident, Index, Type, parse_quote,
    spanned::Spanned,
};

/// A struct whose fields are serialized back to back in declaration order.
pub struct WireStruct {
    pub ident: Ident,
    pub generics: Generics,
    pub fields: Fields,
}

/// One field as seen by the generated code.
pub struct WireField<'a> {
    /// `self.name` or `self.0`.
    pub access: TokenStream,
    /// Local binding used while reading.
    pub binding: Ident,
    pub ty: &'a Type,
}

impl WireStruct {
    /// Accepts structs only and bounds every type parameter by the derived trait.
    pub fn parse(input: DeriveInput, trait_name: &str) -> syn::Result<Self> {
        let DeriveInput {
            ident,
            mut generics,
            data,
            ..
        } = input;
        let fields = match data {
            Data::Struct(data) => data.fields,
            Data::Enum(_) | Data::Union(_) => {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("{trait_name} can only be derived for structs"),
                ));
            }
        };
        let bound = format_ident!("{}", trait_name);
        for param in &mut generics.params {
            if let GenericParam::Type(type_param) = param {
                type_param
                    .bounds
                    .push(parse_quote!(steem_serialization::#bound));
            }
        }
        Ok(Self {
            ident,
            generics,
            fields,
        })
    }

    pub fn wire_fields(&self) -> Vec<WireField<'_>> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let (access, binding) = match &f.ident {
                    Some(name) => (quote_spanned!(f.span() => self.#name), name.clone()),
                    None => {
                        let index = Index::from(i);
                        (quote_spanned!(f.span() => self.#index), format_ident!("field_{}", i))
                    }
                };
                WireField {
                    access,
                    binding,
                    ty: &f.ty,
                }
            })
            .collect()
    }

    /// Builds `Self { a, b }`, `Self(field_0, field_1)` or `Self` from the read bindings.
    pub fn construct(&self) -> TokenStream {
        let name = &self.ident;
        let bindings = self.wire_fields().into_iter().map(|f| f.binding);
        match &self.fields {
            Fields::Named(_) => quote!(#name { #(#bindings,)* }),
            Fields::Unnamed(_) => quote!(#name( #(#bindings,)* )),
            Fields::Unit => quote!(#name),
        }
    }
}
