use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn, ReturnType, Type};

//-------------------------------------------------------------
// Entry point macro
/*
Macro usage:
#[entry]
fn main() -> ! {
    <main_body>
}

Expands to:
#[no_mangle]
pub extern "C" fn __rzt2m_entry() -> ! {
    <main_body>
}
*/

#[proc_macro_attribute]
pub fn entry(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input_fn = parse_macro_input!(item as ItemFn);

    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "`#[entry]` takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    if let Err(err) = check_signature(&input_fn) {
        return err.to_compile_error().into();
    }

    let attrs = &input_fn.attrs;
    let fn_body = &input_fn.block;

    let expanded = quote! {
        #(#attrs)*
        #[no_mangle]
        pub extern "C" fn __rzt2m_entry() -> ! {
            #fn_body
        }
    };

    expanded.into()
}

// The startup code jumps here and there is nothing to return to.
fn check_signature(input_fn: &ItemFn) -> syn::Result<()> {
    let sig = &input_fn.sig;
    let diverges = matches!(&sig.output, ReturnType::Type(_, ty) if matches!(**ty, Type::Never(_)));
    if !sig.inputs.is_empty()
        || !diverges
        || sig.asyncness.is_some()
        || !sig.generics.params.is_empty()
    {
        return Err(syn::Error::new_spanned(
            sig,
            "`#[entry]` function must have signature `fn() -> !`",
        ));
    }
    Ok(())
}
