//! Integration tests for the slog module.
//!
//! These tests verify that redacted payloads reach slog serializers as nested
//! serde values and that only the masked form is serialized.

#![cfg(feature = "slog")]

use std::{cell::RefCell, collections::HashMap, fmt::Arguments};

use logz::{
    MaskRegistry, mask, mask_email, mask_name,
    slog::SlogRedactedExt,
};
use serde_json::{Map, Value as JsonValue, json};

// A test serializer that captures serialized key-value pairs
struct CapturingSerializer {
    captured: RefCell<HashMap<String, CapturedValue>>,
}

#[derive(Debug, Clone, PartialEq)]
enum CapturedValue {
    Str(String),
    Serde(JsonValue),
}

impl CapturingSerializer {
    fn new() -> Self {
        Self {
            captured: RefCell::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<CapturedValue> {
        self.captured.borrow().get(key).cloned()
    }
}

impl slog::Serializer for CapturingSerializer {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments<'_>) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.to_string()));
        Ok(())
    }

    fn emit_serde(&mut self, key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
        let json = serde_json::to_value(val.as_serde()).unwrap_or(JsonValue::Null);
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Serde(json));
        Ok(())
    }
}

fn serialize_to_capture<V: slog::Value>(value: &V, key: &'static str) -> CapturingSerializer {
    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());
    let mut serializer = CapturingSerializer::new();
    value.serialize(&record, key, &mut serializer).unwrap();
    serializer
}

fn registry() -> MaskRegistry {
    MaskRegistry::new()
        .with("name", mask_name)
        .with("email", mask_email)
        .with("password", mask)
}

#[test]
fn emits_nested_redacted_payload() {
    let payload = json!({
        "user": {"name": "John Doe", "email": "john@doe.com", "password": "hunter2"},
        "action": "login"
    });

    let serializer = serialize_to_capture(&payload.slog_redacted(&registry()), "event");

    let Some(CapturedValue::Serde(json)) = serializer.get("event") else {
        panic!("expected a serde value for 'event'");
    };
    assert_eq!(
        json,
        json!({
            "user": {"name": "J**n D*e", "email": "j**n@doe.com", "password": "****"},
            "action": "login"
        })
    );
}

#[test]
fn emits_records_as_array() {
    let mut record = Map::new();
    record.insert("name".into(), JsonValue::String("Jane Roe".into()));
    let records = vec![record];

    let serializer = serialize_to_capture(&records.slog_redacted(&registry()), "users");

    assert_eq!(
        serializer.get("users"),
        Some(CapturedValue::Serde(json!([{"name": "J**e R*e"}])))
    );
}

#[test]
fn original_values_never_reach_serializer() {
    let payload = json!({"password": "hunter2"});
    let serializer = serialize_to_capture(&payload.slog_redacted(&registry()), "payload");

    let captured = format!("{:?}", serializer.get("payload"));
    assert!(!captured.contains("hunter2"));
}
