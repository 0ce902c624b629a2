//! Derive macros for the Mediator request pipeline
//!
//! This crate provides procedural macros to reduce boilerplate when defining
//! requests.
//!
//! # Available Macros
//!
//! - `#[derive(Request)]` - Implements `Request` and generates typed dispatch
//!   methods on `Mediator`
//!
//! # Example
//!
//! ```ignore
//! use mediator_macros::Request;
//!
//! #[derive(Request, Debug)]
//! #[request(response = String)]
//! struct TestRequest2 {
//!     name: String,
//! }
//!
//! // Generated dispatch method:
//! let outcome = mediator.test_request2(TestRequest2 { name: "test".into() }).await?;
//! assert_eq!(outcome.into_value().as_deref(), Some("Hello test"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use heck::ToSnakeCase;
use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Type, parse_macro_input};

/// Derive macro for request structs
///
/// Implements `mediator_core::Request` and, unless disabled, a
/// `<Name>Dispatch` trait for `mediator_core::Mediator` with two methods:
/// - `<snake_name>(request)` - Send the request
/// - `<snake_name>_with_cancellation(request, token)` - Send it with a
///   cancellation token
///
/// # Attributes
///
/// - `#[request]` or no attribute - `Output = Outcome<()>`
/// - `#[request(response = T)]` - `Output = Outcome<T>`
/// - `#[request(http)]` - `Output = HttpOutcome<()>`
/// - `#[request(http, response = T)]` - `Output = HttpOutcome<T>`
/// - `#[request(dispatch = false)]` - Skip the dispatch trait
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to an enum or union
/// - Applied to a generic struct
/// - An attribute key is unknown or repeated
/// - The method name would be `crate`, `self` or `super`
///
/// Other keyword names are emitted as raw identifiers: `struct Move`
/// generates `r#move` and `move_with_cancellation`.
///
/// # Example
///
/// ```ignore
/// #[derive(Request)]
/// #[request(http, response = Vec<String>)]
/// struct ListItems;
///
/// // Generated:
/// // impl Request for ListItems { type Output = HttpOutcome<Vec<String>>; }
/// // pub trait ListItemsDispatch {
/// //     fn list_items(&self, request: ListItems) -> impl Future<...> + Send;
/// //     fn list_items_with_cancellation(
/// //         &self,
/// //         request: ListItems,
/// //         cancellation: CancellationToken,
/// //     ) -> ...;
/// // }
/// // impl ListItemsDispatch for Mediator { ... }
/// ```
#[proc_macro_derive(Request, attributes(request))]
pub fn derive_request(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_request(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Options collected from `#[request(...)]`
struct RequestArgs {
    http: bool,
    response: Option<Type>,
    dispatch: bool,
}

impl Default for RequestArgs {
    fn default() -> Self {
        Self {
            http: false,
            response: None,
            dispatch: true,
        }
    }
}

fn parse_request_args(attrs: &[Attribute]) -> syn::Result<RequestArgs> {
    let mut args = RequestArgs::default();
    let mut seen_dispatch = false;

    for attr in attrs {
        if !attr.path().is_ident("request") {
            continue;
        }
        // Bare `#[request]`
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("http") {
                if args.http {
                    return Err(meta.error("duplicate `http` option"));
                }
                args.http = true;
                return Ok(());
            }
            if meta.path.is_ident("response") {
                if args.response.is_some() {
                    return Err(meta.error("duplicate `response` option"));
                }
                args.response = Some(meta.value()?.parse()?);
                return Ok(());
            }
            if meta.path.is_ident("dispatch") {
                if seen_dispatch {
                    return Err(meta.error("duplicate `dispatch` option"));
                }
                let enabled: syn::LitBool = meta.value()?.parse()?;
                args.dispatch = enabled.value;
                seen_dispatch = true;
                return Ok(());
            }
            Err(meta.error("unsupported request option, expected `http`, `response` or `dispatch`"))
        })?;
    }

    Ok(args)
}

/// Method name for the dispatch trait, raw when the snake-case name is a keyword
fn dispatch_method(name: &Ident, snake: &str) -> syn::Result<Ident> {
    // Keywords that cannot be raw identifiers
    if matches!(snake, "crate" | "self" | "super") {
        return Err(syn::Error::new_spanned(
            name,
            format!(
                "#[derive(Request)] cannot generate a method named `{snake}`; \
                 rename the struct or use #[request(dispatch = false)]"
            ),
        ));
    }
    // `gen` is reserved from edition 2024 but still parses as an identifier
    if snake == "gen" || syn::parse_str::<Ident>(snake).is_err() {
        return Ok(Ident::new_raw(snake, name.span()));
    }
    Ok(Ident::new(snake, name.span()))
}

fn expand_request(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let vis = &input.vis;

    if !matches!(input.data, Data::Struct(_)) {
        return Err(syn::Error::new_spanned(
            name,
            "#[derive(Request)] can only be used on structs",
        ));
    }

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Request)] does not support generic structs",
        ));
    }

    let args = parse_request_args(&input.attrs)?;

    let response = args
        .response
        .as_ref()
        .map_or_else(|| quote! { () }, |ty| quote! { #ty });
    let output = if args.http {
        quote! { ::mediator_core::HttpOutcome<#response> }
    } else {
        quote! { ::mediator_core::Outcome<#response> }
    };

    let request_impl = quote! {
        impl ::mediator_core::Request for #name {
            type Output = #output;
        }
    };

    if !args.dispatch {
        return Ok(request_impl);
    }

    let snake = name.to_string().to_snake_case();
    let method = dispatch_method(name, &snake)?;
    let method_with_cancellation = format_ident!("{}_with_cancellation", snake);
    let dispatch_trait = format_ident!("{}Dispatch", name);
    let trait_doc = format!("Typed dispatch of [`{name}`] through the mediator");
    let method_doc = format!("Send a [`{name}`] to its registered handler");
    let method_with_cancellation_doc =
        format!("Send a [`{name}`] to its registered handler, observing `cancellation`");

    let future = quote! {
        impl ::core::future::Future<Output = ::mediator_core::HandlerResult<#name>>
            + ::core::marker::Send
    };

    Ok(quote! {
        #request_impl

        #[doc = #trait_doc]
        #vis trait #dispatch_trait {
            #[doc = #method_doc]
            fn #method(
                &self,
                request: #name,
            ) -> #future;

            #[doc = #method_with_cancellation_doc]
            fn #method_with_cancellation(
                &self,
                request: #name,
                cancellation: ::mediator_core::CancellationToken,
            ) -> #future;
        }

        impl #dispatch_trait for ::mediator_core::Mediator {
            fn #method(
                &self,
                request: #name,
            ) -> #future {
                self.send(request)
            }

            fn #method_with_cancellation(
                &self,
                request: #name,
                cancellation: ::mediator_core::CancellationToken,
            ) -> #future {
                self.send_with_cancellation(request, cancellation)
            }
        }
    })
}
