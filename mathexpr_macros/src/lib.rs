use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{parse_macro_input, FnArg, ItemFn, PatType, Type};

fn unsupported_arg_msg(arg_pos: usize, fn_name: &str) -> String {
    format!(
        "builtin argument {} of {} must be a plain identifier of type Decimal",
        arg_pos, fn_name
    )
}

fn is_decimal(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map_or(false, |segment| segment.ident == "Decimal"),
        _ => false,
    }
}

/// Turns `fn name(a: Decimal, b: Decimal) -> Result<Decimal, EvalError>` into a
/// function over `&[Decimal]` that checks the argument count before binding
/// each parameter, and emits a `NAME_ARITY` constant next to it.
///
/// `Decimal` and `EvalError` must be in scope where the macro is used.
#[proc_macro_attribute]
pub fn builtin_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let attrs = &input.attrs;
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;
    let name_str = fn_name.to_string();
    let arity_ident = format_ident!("{}_ARITY", name_str.to_uppercase());

    let mut arg_bindings = Vec::new();

    for (i, arg) in input.sig.inputs.iter().enumerate() {
        let binding = match arg {
            FnArg::Typed(PatType { pat, ty, .. }) if is_decimal(ty) => match **pat {
                syn::Pat::Ident(ref ident) => {
                    let arg_name = &ident.ident;
                    quote! { let #arg_name: Decimal = args[#i]; }
                }
                _ => {
                    return syn::Error::new(pat.span(), unsupported_arg_msg(i, &name_str))
                        .to_compile_error()
                        .into()
                }
            },
            _ => {
                return syn::Error::new(arg.span(), unsupported_arg_msg(i, &name_str))
                    .to_compile_error()
                    .into()
            }
        };
        arg_bindings.push(binding);
    }

    let args_len = arg_bindings.len();
    let expanded = quote! {
        #vis const #arity_ident: usize = #args_len;

        #(#attrs)*
        #vis fn #fn_name(args: &[Decimal]) #fn_output {
            if args.len() != #args_len {
                return Err(EvalError::ArityMismatch {
                    name: #name_str.to_string(),
                    expected: #args_len,
                    found: args.len(),
                });
            }

            #(#arg_bindings)*

            #fn_body
        }
    };

    TokenStream::from(expanded)
}
