use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields};

// derive_record
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = if let Data::Struct(data) = &input.data {
        if let Fields::Named(named) = &data.fields {
            &named.named
        } else {
            let err = Error::new_spanned(
                &data.fields,
                "Record can only be derived for structs with named fields",
            );
            return err.to_compile_error();
        }
    } else {
        let err = Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs with named fields",
        );
        return err.to_compile_error();
    };

    let mut readonly = Vec::with_capacity(fields.len());
    for field in fields {
        match field_is_readonly(field) {
            Ok(flag) => readonly.push(flag),
            Err(err) => return err.to_compile_error(),
        }
    }

    let specs = fields.iter().zip(&readonly).map(|(field, readonly)| {
        let field_ident = field.ident.as_ref().expect("named field");
        let field_name = field_ident.to_string();
        let field_ty = &field.ty;
        let settable = !*readonly;

        quote! {
            ::recast::traits::FieldSpec {
                name: #field_name,
                ty: ::recast::traits::type_tag::<#field_ty>,
                settable: #settable,
            },
        }
    });

    let get_arms = fields.iter().map(|field| {
        let field_ident = field.ident.as_ref().expect("named field");
        let field_name = field_ident.to_string();

        quote! {
            #field_name => Some(FieldValue::to_value(&self.#field_ident)),
        }
    });

    // read-only fields carry no arm and fall through to `_ => false`
    let set_arms = fields
        .iter()
        .zip(&readonly)
        .filter(|(_, readonly)| !**readonly)
        .map(|(field, _)| {
            let field_ident = field.ident.as_ref().expect("named field");
            let field_name = field_ident.to_string();

            quote! {
                #field_name => match FieldValue::from_value(value) {
                    Some(v) => {
                        self.#field_ident = v;
                        true
                    }
                    None => false,
                },
            }
        });

    quote! {
        impl #impl_generics ::recast::traits::Record for #ident #ty_generics #where_clause {
            const FIELDS: &'static [::recast::traits::FieldSpec] = &[
                #(#specs)*
            ];

            fn get_value(&self, field: &str) -> Option<::recast::value::Value> {
                use ::recast::traits::FieldValue;

                match field {
                    #(#get_arms)*
                    _ => None,
                }
            }

            fn set_value(&mut self, field: &str, value: &::recast::value::Value) -> bool {
                use ::recast::traits::FieldValue;

                match field {
                    #(#set_arms)*
                    _ => false,
                }
            }
        }
    }
}

fn field_is_readonly(field: &Field) -> Result<bool, Error> {
    let mut readonly = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("readonly") {
                readonly = true;
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute; expected `readonly`"))
            }
        })?;
    }

    Ok(readonly)
}
