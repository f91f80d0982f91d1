use quote::quote;
use syn::{Path, Type, TypePath};

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch == '_' {
            out.push('-');
        } else if ch.is_ascii_uppercase() {
            if idx != 0 && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(TypePath { path, qself: None }) if path.is_ident("bool"))
}

/// Placeholder shown in usage text for a value of type `ty`, e.g. `<u64>`.
pub fn value_placeholder(ty: &Type) -> String {
    if let Type::Path(TypePath { path, .. }) = ty
        && let Some(seg) = path.segments.last()
    {
        let name = seg.ident.to_string();
        return match name.as_str() {
            "String" | "PathBuf" => "<path>".to_string(),
            _ => format!("<{}>", to_kebab_case(&name)),
        };
    }
    "<value>".to_string()
}

pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    match parse_with {
        Some(parse_with) => quote! { #parse_with(&raw)? },
        None => quote! {
            raw.parse::<#ty>().map_err(|e| {
                crate::Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})"))
            })?
        },
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{is_bool, to_kebab_case, value_placeholder};

    #[test]
    fn to_kebab_case_handles_pascal_and_snake_input() {
        assert_eq!(to_kebab_case("FrontierOrder"), "frontier-order");
        assert_eq!(to_kebab_case("max_weight"), "max-weight");
        assert_eq!(to_kebab_case("NearestNeighbor"), "nearest-neighbor");
        assert_eq!(to_kebab_case("x"), "x");
    }

    #[test]
    fn is_bool_only_matches_plain_bool() {
        let plain: syn::Type = parse_quote!(bool);
        let wrapped: syn::Type = parse_quote!(Option<bool>);
        assert!(is_bool(&plain));
        assert!(!is_bool(&wrapped));
    }

    #[test]
    fn value_placeholder_uses_last_segment() {
        let int_ty: syn::Type = parse_quote!(u64);
        let string_ty: syn::Type = parse_quote!(String);
        let enum_ty: syn::Type = parse_quote!(crate::options::FrontierOrder);
        let tuple_ty: syn::Type = parse_quote!((u8, u8));

        assert_eq!(value_placeholder(&int_ty), "<u64>");
        assert_eq!(value_placeholder(&string_ty), "<path>");
        assert_eq!(value_placeholder(&enum_ty), "<frontier-order>");
        assert_eq!(value_placeholder(&tuple_ty), "<value>");
    }
}
