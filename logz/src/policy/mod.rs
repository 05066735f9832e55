//! Masking policies: string maskers and the registry that binds them to field names.
//!
//! This module provides:
//!
//! - **Maskers** (`mask`): pure string transformations for names, email
//!   addresses and secrets, plus the [`Masker`] handle that stores them.
//!
//! - **Registry** (`registry`): [`MaskRegistry`], the lookup table from a
//!   case-insensitive field name to the masker applied to its value.
//!
//! # Example
//!
//! ```rust
//! use logz::{MaskRegistry, mask, mask_email};
//!
//! let registry = MaskRegistry::new()
//!     .with("email", mask_email)
//!     .with("password", mask);
//!
//! let masker = registry.get("EMAIL").unwrap();
//! assert_eq!(masker.apply("test@gmail.com"), "t**t@gmail.com");
//! assert_eq!(registry.get("Password").unwrap().apply("hunter2"), "****");
//! ```

pub mod mask;
pub mod registry;

pub use mask::{FIXED_MASK, MASK_CHAR, Masker, mask, mask_email, mask_name};
pub use registry::MaskRegistry;
