use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::utils;

struct VariantSpec {
    ident: syn::Ident,
    canonical: String,
    aliases: Vec<String>,
}

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = input.ident.clone();

    let Data::Enum(data_enum) = input.data else {
        return syn::Error::new(input.span(), "CliValue can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let mut option_name = utils::to_kebab_case(&enum_ident.to_string());
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("cli_value")) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("option") {
                option_name = meta.value()?.parse::<LitStr>()?.value();
                return Ok(());
            }
            Err(meta.error("unsupported cli_value attribute; expected option = \"...\""))
        });
        if let Err(err) = parsed {
            return err.to_compile_error().into();
        }
    }

    let mut specs = Vec::new();
    for variant in data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(variant.span(), "CliValue variants must be unit variants")
                .to_compile_error()
                .into();
        }

        let mut spec = VariantSpec {
            canonical: utils::to_kebab_case(&variant.ident.to_string()),
            ident: variant.ident,
            aliases: Vec::new(),
        };
        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("cli")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    spec.canonical = meta.value()?.parse::<LitStr>()?.value();
                    return Ok(());
                }
                if meta.path.is_ident("alias") {
                    spec.aliases.push(meta.value()?.parse::<LitStr>()?.value());
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected name/alias"))
            });
            if let Err(err) = parsed {
                return err.to_compile_error().into();
            }
        }
        specs.push(spec);
    }

    let lit = |s: &str| LitStr::new(s, Span::call_site());

    let parse_arms = specs.iter().map(|spec| {
        let ident = &spec.ident;
        let accepted = std::iter::once(&spec.canonical)
            .chain(spec.aliases.iter())
            .map(|s| lit(s.as_str()));
        quote! { #(#accepted)|* => Ok(Self::#ident), }
    });
    let display_arms = specs.iter().map(|spec| {
        let ident = &spec.ident;
        let canonical = lit(&spec.canonical);
        quote! { Self::#ident => #canonical, }
    });
    let values = specs.iter().map(|spec| lit(&spec.canonical));
    let expected = lit(
        &specs
            .iter()
            .map(|spec| spec.canonical.as_str())
            .collect::<Vec<_>>()
            .join("|"),
    );
    let option_lit = lit(&option_name);

    let expanded = quote! {
        impl #enum_ident {
            /// Canonical spellings accepted on the command line.
            pub const VALUES: &'static [&'static str] = &[#(#values),*];

            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit, raw, #expected
                    ))),
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#display_arms)*
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };

    TokenStream::from(expanded)
}
