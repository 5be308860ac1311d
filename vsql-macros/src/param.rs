use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, LitStr, parse_macro_input};

pub fn derive_param_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match input.data {
        syn::Data::Struct(data) => match data.fields {
            syn::Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "Param only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Param only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let mut to_inserts = Vec::new();
    let mut from_fields = Vec::new();
    for f in &fields {
        let Some(field_name) = f.ident.as_ref() else {
            continue;
        };
        let attrs = match parse_field_attrs(f) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error().into(),
        };
        let key = LitStr::new(&attrs.key, field_name.span());

        if attrs.ignore {
            from_fields.push(quote! { #field_name: ::core::default::Default::default(), });
            continue;
        }

        to_inserts.push(quote! {
            map.insert(
                #key.to_string(),
                ::vsql::udbc::value::ToValue::to_value(&self.#field_name),
            );
        });
        from_fields.push(quote! {
            #field_name: ::vsql::udbc::value::FromValue::from_value(
                map.remove(#key).unwrap_or(::vsql::udbc::value::Value::Null),
            )?,
        });
    }

    TokenStream::from(quote! {
        impl #impl_generics ::vsql::udbc::value::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::vsql::udbc::value::Value {
                let mut map = ::std::collections::HashMap::new();
                #(#to_inserts)*
                ::vsql::udbc::value::Value::Map(map)
            }
        }

        impl #impl_generics ::vsql::udbc::value::FromValue for #name #ty_generics #where_clause {
            fn from_value(
                v: ::vsql::udbc::value::Value,
            ) -> ::std::result::Result<Self, ::vsql::error::DbError> {
                match v {
                    #[allow(unused_mut, unused_variables)]
                    ::vsql::udbc::value::Value::Map(mut map) => Ok(Self { #(#from_fields)* }),
                    other => Err(::vsql::error::DbError::TypeMismatch(format!(
                        "Expected Map for {}, got {:?}",
                        stringify!(#name),
                        other
                    ))),
                }
            }
        }
    })
}

struct FieldAttrs {
    key: String,
    ignore: bool,
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs {
        key: field
            .ident
            .as_ref()
            .map(|i| i.to_string())
            .unwrap_or_default(),
        ignore: false,
    };

    for attr in &field.attrs {
        if !attr.path().is_ident("param") {
            continue;
        }

        // #[param("column")]
        if let Ok(s) = attr.parse_args::<LitStr>() {
            attrs.key = s.value();
            continue;
        }

        // #[param(ignore)], #[param(rename = "column")]
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ignore") {
                attrs.ignore = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let s: LitStr = meta.value()?.parse()?;
                attrs.key = s.value();
                Ok(())
            } else {
                Err(meta.error("expected `ignore` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(attrs)
}
