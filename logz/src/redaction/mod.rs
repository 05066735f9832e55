//! Redaction traversal and output types.
//!
//! This module applies a [`MaskRegistry`](crate::MaskRegistry) to data:
//!
//! - **`payload`**: JSON-like payloads (`serde_json::Value` trees)
//! - **`headers`**: multi-valued header collections
//! - **`output`**: [`RedactedJson`], the logging-safe form of a payload
//!
//! Redaction never mutates its input and never fails: values whose shape
//! does not match what a masker expects are left as they are.

mod headers;
mod output;
mod payload;

pub use headers::Headers;
pub use output::{RedactedJson, ToRedactedJson};
