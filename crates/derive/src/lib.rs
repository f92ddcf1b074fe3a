//! `#[derive(Record)]` for xlbind.
//!
//! Generates `Record::fields()` from the struct's fields and their
//! `#[column = "..."]` option strings, and `Record::construct()` taking each
//! field's value out of the coerced value map.
//!
//! The field kind is read off the declared type's name, so `i32`,
//! `std::string::String` and `chrono::NaiveDate` are all recognised. Any other
//! type becomes `FieldKind::Unsupported` and fails at coercion time.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Data, DeriveInput, Expr, ExprLit, Fields, GenericArgument, Lit, Meta,
    PathArguments, Type,
};

#[proc_macro_derive(Record, attributes(column))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/* ────────────────────────── per-field model ───────────────────────── */

struct ParsedField<'a> {
    ident: &'a syn::Ident,
    name: String,
    kind: Kind,
    tag: Option<String>,
    skip: bool,
}

enum Kind {
    /// Variant of `FieldKind` for a recognised type.
    Supported(syn::Ident),
    /// Declared type, as written.
    Unsupported(String),
}

fn parse_field(field: &syn::Field) -> syn::Result<ParsedField<'_>> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "Record requires named fields"))?;

    let mut tag = None;
    let mut skip = false;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("column")) {
        match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => tag = Some(s.value()),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected a string of column options",
                    ))
                }
            },
            Meta::List(_) => attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown column option, expected `skip`"))
                }
            })?,
            Meta::Path(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected #[column = \"...\"] or #[column(skip)]",
                ))
            }
        }
    }

    Ok(ParsedField {
        ident,
        name: ident.unraw().to_string(),
        kind: field_kind(&field.ty),
        tag,
        skip,
    })
}

fn field_kind(ty: &Type) -> Kind {
    match supported_variant(ty) {
        Some(variant) => Kind::Supported(format_ident!("{}", variant)),
        None => Kind::Unsupported(
            quote!(#ty)
                .to_string()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect(),
        ),
    }
}

fn supported_variant(ty: &Type) -> Option<&'static str> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;

    let variant = match segment.ident.to_string().as_str() {
        "bool" => "Bool",
        "i8" => "I8",
        "i16" => "I16",
        "i32" => "I32",
        "i64" => "I64",
        "isize" => "Isize",
        "u8" => "U8",
        "u16" => "U16",
        "u32" => "U32",
        "u64" => "U64",
        "usize" => "Usize",
        "f32" => "F32",
        "f64" => "F64",
        "String" => "Text",
        "NaiveDate" => "Date",
        "DateTime" => return is_fixed_offset(&segment.arguments).then_some("DateTime"),
        _ => return None,
    };

    segment.arguments.is_empty().then_some(variant)
}

/// `<FixedOffset>`, possibly path-qualified.
fn is_fixed_offset(arguments: &PathArguments) -> bool {
    let PathArguments::AngleBracketed(generic) = arguments else {
        return false;
    };
    if generic.args.len() != 1 {
        return false;
    }
    match generic.args.first() {
        Some(GenericArgument::Type(Type::Path(offset))) => offset
            .path
            .segments
            .last()
            .is_some_and(|s| s.ident == "FixedOffset"),
        _ => false,
    }
}

/* ────────────────────────── expansion ─────────────────────────────── */

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record requires named fields",
        ));
    };

    let parsed = named
        .named
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let ident = &input.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let defs = parsed.iter().map(|entry| {
        let name = &entry.name;
        let kind = match &entry.kind {
            Kind::Supported(variant) => quote!(::xlbind_core::FieldKind::#variant),
            Kind::Unsupported(ty) => quote!(::xlbind_core::FieldKind::Unsupported(#ty)),
        };
        let mut def = quote!(::xlbind_core::FieldDef::new(#name, #kind));
        if let Some(tag) = &entry.tag {
            def = quote!(#def.with_tag(#tag));
        }
        if entry.skip {
            def = quote!(#def.hidden());
        }
        def
    });

    let inits = parsed.iter().map(|entry| {
        let field = entry.ident;
        let name = &entry.name;
        if entry.skip {
            return quote!(#field: ::std::default::Default::default());
        }
        match &entry.kind {
            Kind::Supported(_) => quote! {
                #field: values.take(#name, <Self as ::xlbind_core::Record>::type_name())?
            },
            // no coerced value can ever fill this field
            Kind::Unsupported(ty) => quote! {
                #field: return ::std::result::Result::Err(
                    values.reject(#name, <Self as ::xlbind_core::Record>::type_name(), #ty)
                )
            },
        }
    });

    Ok(quote! {
        impl #impl_generics ::xlbind_core::Record for #ident #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn fields() -> ::std::vec::Vec<::xlbind_core::FieldDef> {
                ::std::vec![#(#defs),*]
            }

            #[allow(unreachable_code, unused_variables)]
            fn construct(
                values: &mut ::xlbind_core::FieldValues,
            ) -> ::xlbind_core::Result<Self> {
                ::std::result::Result::Ok(Self { #(#inits),* })
            }
        }
    })
}
