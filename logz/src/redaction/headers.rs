//! Redaction of multi-valued header collections.
//!
//! A header's values are joined with `,`, masked as one string and split on
//! `,` again. Maskers therefore see the same text a server would receive for
//! a folded header. A masker that ignores its input (like
//! [`mask`](crate::mask)) collapses several values into a single one.

use std::collections::BTreeMap;

use crate::policy::{MaskRegistry, Masker};

/// A header collection keyed by header name.
///
/// Any map of `String` to `Vec<String>` works with
/// [`MaskRegistry::redact_headers`]; this alias is the ordered default.
pub type Headers = BTreeMap<String, Vec<String>>;

const VALUE_SEPARATOR: &str = ",";

fn mask_joined(masker: &Masker, values: &[String]) -> Vec<String> {
    let joined = values.join(VALUE_SEPARATOR);
    masker
        .apply(&joined)
        .split(VALUE_SEPARATOR)
        .map(str::to_owned)
        .collect()
}

impl MaskRegistry {
    /// Returns a redacted copy of `headers`.
    ///
    /// Header names are matched ignoring case and are kept as given.
    /// Headers without a registered masker are copied unchanged.
    #[must_use]
    pub fn redact_headers<H>(&self, headers: &H) -> H
    where
        for<'a> &'a H: IntoIterator<Item = (&'a String, &'a Vec<String>)>,
        H: FromIterator<(String, Vec<String>)>,
    {
        headers
            .into_iter()
            .map(|(name, values)| {
                let values = match self.get(name) {
                    Some(masker) => mask_joined(masker, values),
                    None => values.clone(),
                };
                (name.clone(), values)
            })
            .collect()
    }

    /// Returns a redacted copy of an `http::HeaderMap`.
    ///
    /// Values that are not valid UTF-8 are decoded lossily before masking.
    /// A masked part that is not a valid header value is replaced by
    /// [`FIXED_MASK`](crate::FIXED_MASK).
    #[cfg(feature = "http")]
    #[must_use]
    pub fn redact_header_map(&self, headers: &http::HeaderMap) -> http::HeaderMap {
        use http::HeaderValue;

        let mut redacted = http::HeaderMap::with_capacity(headers.keys_len());
        for name in headers.keys() {
            let Some(masker) = self.get(name.as_str()) else {
                for value in headers.get_all(name) {
                    redacted.append(name.clone(), value.clone());
                }
                continue;
            };

            let values: Vec<String> = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect();
            for part in mask_joined(masker, &values) {
                let value = HeaderValue::from_str(&part)
                    .unwrap_or_else(|_| HeaderValue::from_static(crate::FIXED_MASK));
                redacted.append(name.clone(), value);
            }
        }
        redacted
    }
}
