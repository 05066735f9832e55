//! Structural redaction of JSON-like payloads.
//!
//! Payloads are `serde_json::Value` trees. The walk is depth-first:
//!
//! - a string under a registered key is replaced by the masker output;
//! - objects are always walked, whether or not their key is registered;
//! - arrays are walked element by element while the elements are objects.
//!   The first element that is not an object ends the walk of that array and
//!   the remaining elements are copied as they are;
//! - every other value (numbers, booleans, null, strings under unregistered
//!   keys) is copied unchanged.
//!
//! `serde_json::Value` owns its children, so payloads are always trees and
//! the walk terminates.

use serde_json::{Map, Value};

use crate::policy::MaskRegistry;

impl MaskRegistry {
    /// Returns a redacted copy of `payload`.
    ///
    /// Keys are matched against the registry ignoring case; key spelling is
    /// preserved in the output.
    #[must_use]
    pub fn redact_payload(&self, payload: &Map<String, Value>) -> Map<String, Value> {
        payload
            .iter()
            .map(|(key, value)| (key.clone(), self.redact_field(key, value)))
            .collect()
    }

    /// Returns a redacted copy of an arbitrary value.
    ///
    /// Objects are redacted with [`MaskRegistry::redact_payload`], arrays with
    /// the array rule described in the module docs, and scalars are returned
    /// unchanged since they have no key to match.
    #[must_use]
    pub fn redact_value(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.redact_payload(map)),
            Value::Array(items) => Value::Array(self.redact_sequence(items)),
            _ => value.clone(),
        }
    }

    /// Redacts a list of records, each one independently.
    #[must_use]
    pub fn redact_records(&self, records: &[Map<String, Value>]) -> Vec<Map<String, Value>> {
        records
            .iter()
            .map(|record| self.redact_payload(record))
            .collect()
    }

    /// Redacts the value stored under `key`.
    pub(crate) fn redact_field(&self, key: &str, value: &Value) -> Value {
        match value {
            Value::String(text) => match self.get(key) {
                Some(masker) => Value::String(masker.apply(text)),
                None => value.clone(),
            },
            Value::Object(map) => Value::Object(self.redact_payload(map)),
            Value::Array(items) => Value::Array(self.redact_sequence(items)),
            _ => value.clone(),
        }
    }

    fn redact_sequence(&self, items: &[Value]) -> Vec<Value> {
        let mut redacted = items.to_vec();
        for item in &mut redacted {
            // Arrays are assumed to hold objects only; stop at the first
            // element that is not one.
            let Value::Object(map) = item else {
                break;
            };
            *map = self.redact_payload(map);
        }
        redacted
    }
}
