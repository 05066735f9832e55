//! String maskers for personal data and secrets.
//!
//! Maskers are total: they never fail, and inputs that do not have the
//! expected shape (for example an email without `@`) are returned unchanged.
//! Lengths are counted in Unicode scalar values.

use std::{fmt, iter, sync::Arc};

/// Placeholder returned by [`mask`] regardless of the input.
pub const FIXED_MASK: &str = "****";

/// Character used to hide masked characters.
pub const MASK_CHAR: char = '*';

/// Tokens at or below this length are masked entirely.
const SHORT_TOKEN_LEN: usize = 2;

/// Replaces any value with [`FIXED_MASK`].
///
/// Unlike [`mask_name`] and [`mask_email`], the output does not leak the
/// length of the input.
pub fn mask(_value: &str) -> String {
    FIXED_MASK.to_string()
}

/// Masks every space-separated token of a name.
///
/// Tokens of up to two characters are masked completely; longer tokens keep
/// their first and last character.
///
/// ```rust
/// use logz::mask_name;
///
/// assert_eq!(mask_name("John Doe"), "J**n D*e");
/// assert_eq!(mask_name("Jo"), "**");
/// ```
pub fn mask_name(value: &str) -> String {
    value.split(' ').map(mask_token).collect::<Vec<_>>().join(" ")
}

/// Masks the local part of an email address and keeps the domain.
///
/// The split happens at the first `@`; the domain includes the `@`. Values
/// without `@` are returned unchanged.
///
/// ```rust
/// use logz::mask_email;
///
/// assert_eq!(mask_email("test@gmail.com"), "t**t@gmail.com");
/// assert_eq!(mask_email("tt@gmail.com"), "**@gmail.com");
/// assert_eq!(mask_email("email.com"), "email.com");
/// ```
pub fn mask_email(value: &str) -> String {
    match value.find('@') {
        Some(at_pos) => {
            let (local, domain) = value.split_at(at_pos);
            let mut masked = mask_token(local);
            masked.push_str(domain);
            masked
        }
        None => value.to_string(),
    }
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let total = chars.len();
    if total <= SHORT_TOKEN_LEN {
        return iter::repeat_n(MASK_CHAR, total).collect();
    }

    let mut masked = String::with_capacity(token.len());
    masked.push(chars[0]);
    masked.extend(iter::repeat_n(MASK_CHAR, total - 2));
    masked.push(chars[total - 1]);
    masked
}

/// A shareable masking function.
///
/// Any `Fn(&str) -> String + Send + Sync` converts into a `Masker`, so plain
/// functions such as [`mask_name`] and closures can both be registered.
#[derive(Clone)]
pub struct Masker(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Masker {
    /// Wraps a masking function.
    pub fn new<F>(masker: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(masker))
    }

    /// Applies the masker to `value`.
    #[must_use]
    pub fn apply(&self, value: &str) -> String {
        (self.0)(value)
    }
}

impl<F> From<F> for Masker
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    fn from(masker: F) -> Self {
        Self::new(masker)
    }
}

impl fmt::Debug for Masker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Masker(..)")
    }
}
