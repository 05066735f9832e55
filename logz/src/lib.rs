//! JSON structured logging with request context and sensitive-field masking.
//!
//! This crate separates:
//! - **Maskers**: pure string transformations (`mask_name`, `mask_email`, `mask`).
//! - **Registry**: a [`MaskRegistry`] mapping field names to maskers.
//! - **Redaction**: walking JSON payloads and header collections and applying
//!   the registry to every matching key.
//! - **Logger**: a `tracing` layer that writes one JSON object per event with
//!   service metadata and request-scoped attributes (`logger` feature).
//!
//! What this crate does not do:
//! - ship log records anywhere other than the configured writer
//! - decide which fields are sensitive (callers populate the registry)
//!
//! # Example
//!
//! ```rust
//! use logz::{MaskRegistry, mask_email, mask_name};
//! use serde_json::json;
//!
//! let registry = MaskRegistry::new()
//!     .with("name", mask_name)
//!     .with("email", mask_email);
//!
//! let payload = json!({"user": {"NAME": "John Doe", "email": "john@doe.com"}});
//! let redacted = registry.redact_value(&payload);
//! assert_eq!(redacted, json!({"user": {"NAME": "J**n D*e", "email": "j**n@doe.com"}}));
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub mod policy;
mod redaction;

#[cfg(feature = "logger")]
pub mod logger;
#[cfg(feature = "slog")]
pub mod slog;
#[cfg(feature = "tracing")]
pub mod tracing;

pub use policy::{FIXED_MASK, MASK_CHAR, MaskRegistry, Masker, mask, mask_email, mask_name};
pub use redaction::{Headers, RedactedJson, ToRedactedJson};

#[cfg(feature = "logger")]
pub use logger::{
    ContextGuard, InitError, JsonLayer, LogContext, LoggerConfig, LoggerSettings, Replacer,
    WithLogContext, init, parse_level, set_context_attrs, subscriber,
};
