use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, FnArg, ItemFn, PatType, ReturnType, Type};

fn is_f64(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "f64"),
        _ => false,
    }
}

fn formatted_arg_error_msg(arg_name: &str, arg_pos: usize, fn_name: &str) -> String {
    format!(
        "Expected argument {} ('{}') of {} to be f64",
        arg_pos, arg_name, fn_name
    )
}

/// Turns `fn name(a: f64, b: f64) -> f64 { .. }` into
/// `fn name() -> crate::functions::Function`, a table entry whose arity is the
/// number of parameters. `Function::call` checks the argument count before the
/// transform runs, so the generated body indexes `args` directly.
#[proc_macro_attribute]
pub fn mathline_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let fn_vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_args = &input.sig.inputs;
    let fn_body = &input.block;
    let fn_attrs = &input.attrs;

    match &input.sig.output {
        ReturnType::Type(_, ty) if is_f64(ty) => {}
        output => {
            let span = match output {
                ReturnType::Default => input.sig.span(),
                ReturnType::Type(_, ty) => ty.span(),
            };
            return syn::Error::new(span, format!("{} must return f64", fn_name))
                .to_compile_error()
                .into();
        }
    }

    let mut arg_extractions = Vec::new();

    for (i, arg) in fn_args.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return syn::Error::new(arg.span(), "methods are not supported")
                .to_compile_error()
                .into();
        };
        let arg_name = match **pat {
            syn::Pat::Ident(ref ident) => &ident.ident,
            _ => {
                return syn::Error::new(pat.span(), "unsupported argument pattern")
                    .to_compile_error()
                    .into()
            }
        };
        if !is_f64(ty) {
            let err_msg = formatted_arg_error_msg(&arg_name.to_string(), i, &fn_name.to_string());
            return syn::Error::new(ty.span(), err_msg).to_compile_error().into();
        }

        arg_extractions.push(quote! {
            let #arg_name: f64 = args[#i];
        });
    }

    let args_len = arg_extractions.len();
    let expanded = quote! {
        #(#fn_attrs)*
        #fn_vis fn #fn_name() -> crate::functions::Function {
            crate::functions::Function::new(#args_len, |args: &[f64]| -> f64 {
                #(#arg_extractions)*
                #fn_body
            })
        }
    };

    TokenStream::from(expanded)
}
