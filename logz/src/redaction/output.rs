//! Output types for logging boundaries.
//!
//! - [`RedactedJson`]: a payload that has already been through a registry
//! - [`ToRedactedJson`]: types that can produce one

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::policy::MaskRegistry;

// =============================================================================
// RedactedJson - Redacted payload ready to be logged
// =============================================================================

/// A JSON value produced by redaction.
///
/// The only way to build one outside this crate is through
/// [`ToRedactedJson`], so holding a `RedactedJson` means the registry has
/// been applied. `Display` renders compact JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RedactedJson(Value);

impl RedactedJson {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the redacted value.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Consumes the wrapper and returns the redacted value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl fmt::Display for RedactedJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ToRedactedJson - Payloads that can be redacted through a registry
// =============================================================================

/// Produces a logging-safe JSON representation using a registry.
pub trait ToRedactedJson {
    #[must_use]
    fn to_redacted_json(&self, registry: &MaskRegistry) -> RedactedJson;
}

impl ToRedactedJson for Value {
    fn to_redacted_json(&self, registry: &MaskRegistry) -> RedactedJson {
        RedactedJson::new(registry.redact_value(self))
    }
}

impl ToRedactedJson for Map<String, Value> {
    fn to_redacted_json(&self, registry: &MaskRegistry) -> RedactedJson {
        RedactedJson::new(Value::Object(registry.redact_payload(self)))
    }
}

impl ToRedactedJson for [Map<String, Value>] {
    fn to_redacted_json(&self, registry: &MaskRegistry) -> RedactedJson {
        RedactedJson::new(Value::Array(
            registry
                .redact_records(self)
                .into_iter()
                .map(Value::Object)
                .collect(),
        ))
    }
}

impl ToRedactedJson for Vec<Map<String, Value>> {
    fn to_redacted_json(&self, registry: &MaskRegistry) -> RedactedJson {
        self.as_slice().to_redacted_json(registry)
    }
}

impl<T> ToRedactedJson for &T
where
    T: ToRedactedJson + ?Sized,
{
    fn to_redacted_json(&self, registry: &MaskRegistry) -> RedactedJson {
        (**self).to_redacted_json(registry)
    }
}
