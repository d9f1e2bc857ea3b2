use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DataEnum, DeriveInput, Fields, LitStr, Variant};

/// Derives `carbon_core::EffectKind` plus `is_*`/`into_*` accessors.
///
/// Exactly one unit variant must be marked `#[effect(render)]`.
#[proc_macro_derive(Effect, attributes(effect))]
pub fn derive_effect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_effect(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `carbon_core::OutcomeKind` plus `is_*`/`into_*` accessors.
///
/// A variant answers the effect variant of the same name unless it carries
/// `#[outcome(answers = "OtherVariant")]`.
#[proc_macro_derive(Outcome, attributes(outcome))]
pub fn derive_outcome(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_outcome(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn enum_data<'a>(input: &'a DeriveInput, derive: &str) -> syn::Result<&'a DataEnum> {
    match &input.data {
        Data::Enum(data) => Ok(data),
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            format!("{derive} derive only supports enums"),
        )),
    }
}

fn expand_effect(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let data = enum_data(input, "Effect")?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut render = None;
    for variant in &data.variants {
        if is_render_variant(variant)? {
            if render.is_some() {
                return Err(syn::Error::new_spanned(
                    &variant.ident,
                    "only one variant may be marked #[effect(render)]",
                ));
            }
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    &variant.ident,
                    "the render variant must not carry a payload",
                ));
            }
            render = Some(&variant.ident);
        }
    }
    let Some(render) = render else {
        return Err(syn::Error::new_spanned(
            name,
            "an Effect enum needs one variant marked #[effect(render)]",
        ));
    };

    let kind_arms = data.variants.iter().map(|v| {
        let vident = &v.ident;
        let label = vident.to_string();
        quote! { #name::#vident { .. } => #label }
    });
    let accessors = accessors(data);

    Ok(quote! {
        impl #impl_generics ::carbon_core::EffectKind for #name #ty_generics #where_clause {
            fn kind(&self) -> &'static str {
                match self {
                    #(#kind_arms),*
                }
            }

            fn is_render(&self) -> bool {
                matches!(self, #name::#render)
            }

            fn render() -> Self {
                #name::#render
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            #(#accessors)*
        }
    })
}

fn expand_outcome(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let data = enum_data(input, "Outcome")?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut answer_arms = Vec::new();
    for variant in &data.variants {
        let vident = &variant.ident;
        let answers = answered_effect(variant)?.unwrap_or_else(|| vident.to_string());
        answer_arms.push(quote! { #name::#vident { .. } => #answers });
    }
    let accessors = accessors(data);

    Ok(quote! {
        impl #impl_generics ::carbon_core::OutcomeKind for #name #ty_generics #where_clause {
            fn answers(&self) -> &'static str {
                match self {
                    #(#answer_arms),*
                }
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            #(#accessors)*
        }
    })
}

fn is_render_variant(variant: &Variant) -> syn::Result<bool> {
    let mut render = false;
    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("effect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("render") {
                render = true;
                Ok(())
            } else {
                Err(meta.error("unsupported effect attribute, expected `render`"))
            }
        })?;
    }
    Ok(render)
}

fn answered_effect(variant: &Variant) -> syn::Result<Option<String>> {
    let mut answers = None;
    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("outcome")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("answers") {
                let value: LitStr = meta.value()?.parse()?;
                answers = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported outcome attribute, expected `answers = \"...\"`"))
            }
        })?;
    }
    Ok(answers)
}

/// `is_<variant>` for every variant, `into_<variant>` for single-field tuple variants.
fn accessors(data: &DataEnum) -> Vec<proc_macro2::TokenStream> {
    data.variants
        .iter()
        .map(|v| {
            let vident = &v.ident;
            let snake = snake_case(&vident.to_string());
            let is_fn = format_ident!("is_{}", snake);
            let is_doc = format!("True when this is `{vident}`.");
            let is_method = quote! {
                #[doc = #is_doc]
                pub fn #is_fn(&self) -> bool {
                    matches!(self, Self::#vident { .. })
                }
            };

            match &v.fields {
                Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                    let into_fn = format_ident!("into_{}", snake);
                    let ty = &fields.unnamed[0].ty;
                    let into_doc = format!("Payload of `{vident}`, if this is that variant.");
                    quote! {
                        #is_method

                        #[doc = #into_doc]
                        #[allow(unreachable_patterns)]
                        pub fn #into_fn(self) -> Option<#ty> {
                            match self {
                                Self::#vident(inner) => Some(inner),
                                _ => None,
                            }
                        }
                    }
                }
                _ => is_method,
            }
        })
        .collect()
}

fn snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
