use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, FnArg, Ident, ItemFn, Pat, Signature, Type};

/// Wrap a test so that it receives a fresh, in-memory [`crate::Platform`],
/// with logging initialised.
///
/// The only injectable dependency is `platform: Platform`. Passing `voter` as
/// the attribute argument registers the example voter and logs them in with an
/// ephemeral session before the test body runs.
#[proc_macro_attribute]
pub fn core_test(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_fn = parse_macro_input!(input as ItemFn);

    // Extract the injected arguments and reject invalid function signatures.
    let test_args = match check_sig(item_fn.sig.clone()) {
        Ok(args) => args,
        Err(err) => {
            return err.into_compile_error().into();
        }
    };

    // Rename the inner function so the test can have its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_inner", name);
    item_fn.sig.ident = new_name.clone();

    // Log in the example voter if needed.
    let maybe_login = parse_macro_input!(args as Option<Ident>)
        .and_then(|arg| {
            if arg == "voter" {
                Some(quote! {
                    platform
                        .register(crate::model::api::VoterProfile::example())
                        .unwrap();
                    platform
                        .login(
                            crate::model::api::VoterProfile::EXAMPLE_CEDULA,
                            crate::model::api::VoterProfile::EXAMPLE_PASSWORD,
                            false,
                        )
                        .unwrap();
                })
            } else {
                None
            }
        })
        .unwrap_or_default();

    // Rewrite the test function.
    quote! {
        #[test]
        fn #name() {
            /// Test setup.
            fn setup() -> crate::Platform {
                log4rs_test_utils::test_logging::init_logging_once_for(
                    ["voting_core"],
                    None,
                    None,
                );
                #[allow(unused_mut)]
                let mut platform = crate::Platform::in_memory(crate::Config::example());

                #maybe_login

                platform
            }

            /// The test itself.
            #item_fn

            #[allow(unused_variables)]
            let platform = setup();
            #new_name(#(#test_args),*);
        }
    }
    .into()
}

/// Ensure the wrapped test is synchronous and only asks for dependencies we can inject.
fn check_sig(sig: Signature) -> Result<Vec<TokenStream2>, syn::Error> {
    if sig.asyncness.is_some() {
        return Err(syn::Error::new(
            sig.span(),
            "Test must not be marked `async`",
        ));
    }

    let mut has_platform = false;
    let mut args = vec![];

    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let Pat::Ident(_) = &*pat_type.pat {
                if let Type::Path(type_path) = &*pat_type.ty {
                    if let Some(type_ident) = type_path.path.get_ident() {
                        if type_ident == "Platform" {
                            if has_platform {
                                return Err(syn::Error::new(
                                    input.span(),
                                    "Test cannot accept more than one `Platform`",
                                ));
                            }
                            has_platform = true;
                            args.push(quote! { platform });
                            continue;
                        }
                    }
                }
            }
        }

        return Err(syn::Error::new(
            input.span(),
            "Expected `platform_ident: Platform`",
        ));
    }

    Ok(args)
}
