//! Adapters for emitting redacted payloads through `slog`.
//!
//! [`RedactedJson`] implements `slog::Value` and is serialized as nested
//! serde data, so slog drains with nested-value support keep the payload
//! structure. Only the redacted value is ever handed to the serializer.

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    policy::MaskRegistry,
    redaction::{RedactedJson, ToRedactedJson},
};

impl SlogValue for RedactedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value().clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Extension trait for ergonomic slog logging of redacted payloads.
///
/// ```ignore
/// use logz::slog::SlogRedactedExt;
///
/// info!(logger, "event"; "payload" => payload.slog_redacted(&registry));
/// ```
pub trait SlogRedactedExt: ToRedactedJson {
    /// Redacts `self` through `registry` and returns a `slog::Value`.
    fn slog_redacted(&self, registry: &MaskRegistry) -> RedactedJson {
        self.to_redacted_json(registry)
    }
}

impl<T> SlogRedactedExt for T where T: ToRedactedJson + ?Sized {}
