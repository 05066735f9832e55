//! Adapters for emitting redacted payloads through `tracing`.
//!
//! `tracing` fields are flat, so payloads are logged as their compact JSON
//! text. The JSON logger in [`crate::logger`] can instead mask structured
//! fields itself through [`LoggerConfig::with_registry`](crate::LoggerConfig::with_registry).
//!
//! # Example
//!
//! ```rust
//! use logz::{MaskRegistry, mask, tracing::TracingRedactedExt};
//! use serde_json::json;
//!
//! let registry = MaskRegistry::new().with("token", mask);
//! let request = json!({"token": "abc", "path": "/"});
//! tracing::info!(request = request.tracing_redacted(&registry), "incoming");
//! ```

use tracing::field::{DisplayValue, display};

use crate::{
    policy::MaskRegistry,
    redaction::{RedactedJson, ToRedactedJson},
};

/// Extension trait for logging payloads as redacted display values.
pub trait TracingRedactedExt {
    /// Redacts the payload through `registry` and wraps it for a `tracing` field.
    fn tracing_redacted(&self, registry: &MaskRegistry) -> DisplayValue<RedactedJson>;
}

impl<T> TracingRedactedExt for T
where
    T: ToRedactedJson + ?Sized,
{
    fn tracing_redacted(&self, registry: &MaskRegistry) -> DisplayValue<RedactedJson> {
        display(self.to_redacted_json(registry))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::policy::{mask_email, mask_name};

    #[test]
    fn tracing_redacted_formats_masked_json() {
        let registry = MaskRegistry::new()
            .with("name", mask_name)
            .with("email", mask_email);
        let payload = json!({"name": "John Doe", "email": "john@doe.com"});

        let value = payload.tracing_redacted(&registry);
        let rendered = format!("{value:?}");
        assert!(rendered.contains("J**n D*e"));
        assert!(rendered.contains("j**n@doe.com"));
        assert!(!rendered.contains("John Doe"));
    }

    #[test]
    fn tracing_redacted_leaves_unregistered_payload_intact() {
        let registry = MaskRegistry::new();
        let value = json!({"id": 1}).tracing_redacted(&registry);
        assert_eq!(format!("{value:?}"), r#"{"id":1}"#);
    }
}
