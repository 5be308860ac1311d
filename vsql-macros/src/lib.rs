mod param;

use proc_macro::TokenStream;

/// Implements `ToValue` and `FromValue` for a struct with named fields, so it
/// can feed `Named::from_params` and be read back from `Row::to_map`.
///
/// Field attributes:
/// - `#[param("column")]` or `#[param(rename = "column")]`: use another key
/// - `#[param(ignore)]`: skip the field; it is filled with `Default::default()`
#[proc_macro_derive(Param, attributes(param))]
pub fn derive_param(input: TokenStream) -> TokenStream {
    param::derive_param_impl(input)
}
