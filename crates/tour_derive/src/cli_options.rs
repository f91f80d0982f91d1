use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Data, DeriveInput, Expr, ExprLit, Fields, Lit, LitStr, Meta, Path, parse_macro_input,
    spanned::Spanned,
};

use crate::utils;

#[derive(Default)]
struct FieldSpec {
    long: Option<String>,
    parse_with: Option<Path>,
    value: Option<String>,
    flag: bool,
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut arms = Vec::new();
    let mut usage_lines = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let mut spec = FieldSpec::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("cli")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("long") {
                    spec.long = Some(meta.value()?.parse::<LitStr>()?.value());
                    return Ok(());
                }
                if meta.path.is_ident("parse_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    spec.parse_with = Some(syn::parse_str(&lit.value())?);
                    return Ok(());
                }
                if meta.path.is_ident("value") {
                    spec.value = Some(meta.value()?.parse::<LitStr>()?.value());
                    return Ok(());
                }
                if meta.path.is_ident("flag") {
                    spec.flag = true;
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected long/parse_with/value/flag"))
            });
            if let Err(err) = parsed {
                return err.to_compile_error().into();
            }
        }

        let Some(long) = spec.long else {
            continue;
        };
        if spec.flag && !utils::is_bool(&field.ty) {
            return syn::Error::new(field.span(), "#[cli(flag)] requires a `bool` field")
                .to_compile_error()
                .into();
        }

        let help = first_doc_line(&field.attrs);
        let long_lit = LitStr::new(&long, Span::call_site());

        if spec.flag {
            let negated_lit = LitStr::new(&format!("no-{long}"), Span::call_site());
            arms.push(quote! {
                #long_lit => {
                    self.#field_ident = match value.as_deref().map(str::to_ascii_lowercase) {
                        None => true,
                        Some(v) => match v.as_str() {
                            "1" | "true" | "yes" | "on" => true,
                            "0" | "false" | "no" | "off" => false,
                            _ => {
                                return Err(crate::Error::invalid_input(format!(
                                    "Invalid boolean for --{name}: {v} (expected true/false)"
                                )));
                            }
                        },
                    };
                    Ok(true)
                }
            });
            arms.push(quote! {
                #negated_lit => {
                    if value.is_some() {
                        return Err(crate::Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    self.#field_ident = false;
                    Ok(true)
                }
            });
            usage_lines.push(usage_line(format!("--{long}[=<bool>]"), &help));
            usage_lines.push(usage_line(format!("--no-{long}"), ""));
            continue;
        }

        let parse_expr = utils::build_cli_parse_expr(&field.ty, spec.parse_with.as_ref());
        arms.push(quote! {
            #long_lit => {
                let raw = value.ok_or_else(|| {
                    crate::Error::invalid_input(format!("Missing value for --{name}"))
                })?;
                self.#field_ident = #parse_expr;
                Ok(true)
            }
        });

        // Enum-valued options list their accepted spellings at runtime.
        let ty = &field.ty;
        let line = match (&spec.value, &spec.parse_with) {
            (Some(value), _) => usage_line(format!("--{long} {value}"), &help),
            (None, Some(_)) => {
                let prefix = LitStr::new(&format!("  --{long} <"), Span::call_site());
                let suffix = LitStr::new(&format!(">{}", help_suffix(&help)), Span::call_site());
                quote! {
                    out.push_str(#prefix);
                    out.push_str(&<#ty>::VALUES.join("|"));
                    out.push_str(#suffix);
                }
            }
            (None, None) => usage_line(
                format!("--{long} {}", utils::value_placeholder(ty)),
                &help,
            ),
        };
        usage_lines.push(line);
    }

    let expanded = quote! {
        impl #struct_ident {
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((k, v)) = raw_name.split_once('=') {
                    return (k.to_string(), Some(v.to_string()));
                }
                let value = args.next_if(|next| !next.starts_with("--"));
                (raw_name.to_string(), value)
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms,)*
                    _ => Ok(false),
                }
            }

            /// One line per recognised option, generated from the field attributes.
            pub fn options_usage() -> String {
                let mut out = String::new();
                #(#usage_lines)*
                out
            }
        }
    };

    TokenStream::from(expanded)
}

fn usage_line(left: String, help: &str) -> proc_macro2::TokenStream {
    let text = LitStr::new(
        &format!("  {left}{}", help_suffix(help)),
        Span::call_site(),
    );
    quote! { out.push_str(#text); }
}

fn help_suffix(help: &str) -> String {
    if help.is_empty() {
        "\n".to_string()
    } else {
        format!("\n      {help}\n")
    }
}

fn first_doc_line(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .find_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .unwrap_or_default()
}
