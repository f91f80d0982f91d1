//! Derive macros backing the option structs of `tour_core`.
//!
//! The generated code refers to `crate::Error` and `crate::Result`, so the
//! derives are only usable from inside a crate that exports both.

mod cli_options;
mod cli_value;
mod kv_display;
mod utils;

use proc_macro::TokenStream;

/// Generates `parse` and `Display` for a unit-only enum used as a CLI value.
#[proc_macro_derive(CliValue, attributes(cli_value, cli))]
pub fn derive_cli_value(item: TokenStream) -> TokenStream {
    cli_value::derive_cli_value_inner(item)
}

/// Generates `split_arg`, `apply_cli_option` and `options_usage` for a
/// struct whose fields carry `#[cli(...)]` attributes.
#[proc_macro_derive(CliOptions, attributes(cli))]
pub fn derive_cli_options(item: TokenStream) -> TokenStream {
    cli_options::derive_cli_options_inner(item)
}

/// Generates an aligned `key = value` multi-line `Display`.
#[proc_macro_derive(KvDisplay, attributes(kv))]
pub fn derive_kv_display(item: TokenStream) -> TokenStream {
    kv_display::derive_kv_display_inner(item)
}
