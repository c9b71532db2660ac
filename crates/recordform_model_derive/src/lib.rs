use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_derive(RecordModel)]
pub fn derive_record_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            input.ident,
            "RecordModel derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let model_ident = input.ident;
    let fields_struct_ident = format_ident!("{model_ident}Fields");

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new(
                    Span::call_site(),
                    "RecordModel derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new(
                Span::call_site(),
                "RecordModel derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let recordform = recordform_path();
    let mut fields_methods = Vec::new();
    let mut draft_entries = Vec::new();
    let mut payload_entries = Vec::new();
    let mut decode_entries = Vec::new();

    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let wire_name = to_camel_case(&field_ident.to_string());

        fields_methods.push(quote! {
            pub const fn #field_ident(&self) -> #recordform::schema::FieldKey {
                #recordform::schema::FieldKey::new(#wire_name)
            }
        });

        draft_entries.push(quote! {
            draft.insert(
                #recordform::schema::FieldKey::new(#wire_name),
                #recordform::record::FieldCodec::encode_draft(&self.#field_ident),
            );
        });

        payload_entries.push(quote! {
            payload.insert(
                #recordform::schema::FieldKey::new(#wire_name),
                #recordform::record::FieldCodec::encode_value(&self.#field_ident),
            );
        });

        decode_entries.push(quote! {
            #field_ident: #recordform::record::FieldCodec::decode_value(
                payload.get(#recordform::schema::FieldKey::new(#wire_name))?,
            )?,
        });
    }

    quote! {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct #fields_struct_ident;

        impl #fields_struct_ident {
            #(#fields_methods)*
        }

        impl #recordform::record::RecordModel for #model_ident {
            type Fields = #fields_struct_ident;

            fn fields() -> Self::Fields {
                #fields_struct_ident
            }

            fn to_draft(&self) -> #recordform::schema::DraftRecord {
                let mut draft = #recordform::schema::DraftRecord::new();
                #(#draft_entries)*
                draft
            }

            fn to_payload(&self) -> #recordform::schema::RecordPayload {
                let mut payload = #recordform::schema::RecordPayload::new();
                #(#payload_entries)*
                payload
            }

            fn from_payload(
                payload: &#recordform::schema::RecordPayload,
            ) -> ::std::option::Option<Self> {
                ::std::option::Option::Some(Self {
                    #(#decode_entries)*
                })
            }
        }
    }
    .into()
}

fn recordform_path() -> TokenStream2 {
    match crate_name("recordform") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::recordform),
    }
}

fn to_camel_case(input: &str) -> String {
    let mut out = String::new();
    for segment in input.split('_') {
        if segment.is_empty() {
            continue;
        }
        if out.is_empty() {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
