//! End-to-end coverage for maskers, payload redaction and header redaction.
//!
//! These tests go through the public API only and check the behavior a
//! caller sees: which values are masked, which are left alone, and that the
//! input is never modified.

use std::collections::BTreeMap;

use logz::{FIXED_MASK, Headers, MaskRegistry, Masker, ToRedactedJson, mask, mask_email, mask_name};
use serde_json::{Map, Value, json};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn personal_data() -> MaskRegistry {
    let mut registry = MaskRegistry::new();
    registry.register([
        ("name", Masker::from(mask_name)),
        ("email", Masker::from(mask_email)),
    ]);
    registry
}

mod maskers {
    use super::*;

    #[test]
    fn short_names_are_fully_masked() {
        for name in ["", "J", "Jo", "é", "éé"] {
            assert_eq!(mask_name(name), "*".repeat(name.chars().count()));
        }
    }

    #[test]
    fn long_names_keep_length_and_edges() {
        for name in ["Joe", "John", "Maximilian", "Ñandú"] {
            let masked = mask_name(name);
            let original: Vec<char> = name.chars().collect();
            let chars: Vec<char> = masked.chars().collect();

            assert_eq!(chars.len(), original.len());
            assert_eq!(chars[0], original[0]);
            assert_eq!(chars[chars.len() - 1], original[original.len() - 1]);
            assert!(chars[1..chars.len() - 1].iter().all(|ch| *ch == '*'));
        }
    }

    #[test]
    fn emails_keep_their_domain() {
        for email in ["a@x.io", "test@gmail.com", "first.last@sub.example.org"] {
            let at = email.find('@').unwrap();
            let masked = mask_email(email);
            let masked_at = masked.find('@').unwrap();
            assert_eq!(&masked[masked_at..], &email[at..]);
        }
    }

    #[test]
    fn values_without_at_are_not_emails() {
        for value in ["email.com", "", "plain text"] {
            assert_eq!(mask_email(value), value);
        }
    }

    #[test]
    fn fixed_mask_ignores_input() {
        assert_eq!(mask("short"), FIXED_MASK);
        assert_eq!(mask(&"x".repeat(256)), FIXED_MASK);
    }
}

mod payloads {
    use super::*;

    #[test]
    fn flat_payload_with_mixed_case_keys() {
        let input = object(json!({"NAME": "John Doe", "email": "john@doe.com"}));
        let redacted = personal_data().redact_payload(&input);
        assert_eq!(
            Value::Object(redacted),
            json!({"NAME": "J**n D*e", "email": "j**n@doe.com"})
        );
    }

    #[test]
    fn nested_user_object() {
        let input = object(json!({"user": {"name": "John Doe", "email": "john@doe.com"}}));
        let redacted = personal_data().redact_payload(&input);
        assert_eq!(
            Value::Object(redacted),
            json!({"user": {"name": "J**n D*e", "email": "j**n@doe.com"}})
        );
    }

    #[test]
    fn array_of_users() {
        let input = object(json!({"users": [{"name": "John Doe"}, {"name": "Jane Roe"}]}));
        let redacted = personal_data().redact_payload(&input);
        assert_eq!(
            Value::Object(redacted),
            json!({"users": [{"name": "J**n D*e"}, {"name": "J**e R*e"}]})
        );
    }

    #[test]
    fn deeply_nested_mixed_structure() {
        let input = object(json!({
            "order": {
                "id": 991,
                "customer": {"Name": "Ada Lovelace", "EMAIL": "ada@math.org"},
                "items": [
                    {"sku": "A1", "gift": {"name": "Bob"}},
                    {"sku": "B2"}
                ]
            }
        }));
        let redacted = personal_data().redact_payload(&input);
        assert_eq!(
            Value::Object(redacted),
            json!({
                "order": {
                    "id": 991,
                    "customer": {"Name": "A*a L******e", "EMAIL": "a*a@math.org"},
                    "items": [
                        {"sku": "A1", "gift": {"name": "B*b"}},
                        {"sku": "B2"}
                    ]
                }
            })
        );
    }

    #[test]
    fn titlecase_key_is_masked() {
        let registry = MaskRegistry::new().with("ǅ", mask);
        let input = object(json!({"ǅ": "secret", "other": "kept"}));
        assert_eq!(
            Value::Object(registry.redact_payload(&input)),
            json!({"ǅ": FIXED_MASK, "other": "kept"})
        );
    }

    #[test]
    fn no_registered_keys_is_identity() {
        let input = object(json!({"status": "ok", "count": 3, "items": [{"id": 1}]}));
        assert_eq!(personal_data().redact_payload(&input), input);
        assert_eq!(MaskRegistry::new().redact_payload(&input), input);
    }

    #[test]
    fn input_is_left_untouched() {
        let input = object(json!({"users": [{"name": "John Doe"}], "email": "john@doe.com"}));
        let snapshot = input.clone();
        let redacted = personal_data().redact_payload(&input);

        assert_eq!(input, snapshot);
        assert_ne!(redacted, snapshot);
    }

    #[test]
    fn redacted_json_wraps_the_result() {
        let input = json!({"email": "test@gmail.com"});
        let redacted = input.to_redacted_json(&personal_data());
        assert_eq!(redacted.to_string(), r#"{"email":"t**t@gmail.com"}"#);
    }
}

mod headers {
    use super::*;

    fn secret_registry() -> MaskRegistry {
        MaskRegistry::new().with("secret", mask)
    }

    #[test]
    fn upper_case_header_name_matches() {
        let mut input = Headers::new();
        input.insert("SECRET".into(), vec!["secret_value".into()]);

        let redacted = secret_registry().redact_headers(&input);
        assert_eq!(redacted["SECRET"], vec![FIXED_MASK]);
    }

    #[test]
    fn multiple_values_collapse() {
        let mut input = Headers::new();
        input.insert("secret".into(), vec!["a".into(), "b".into()]);

        let redacted = secret_registry().redact_headers(&input);
        assert_eq!(redacted["secret"], vec![FIXED_MASK]);
    }

    #[test]
    fn comma_preserving_masker_keeps_value_count() {
        let registry = MaskRegistry::new().with("x-tags", |value: &str| value.to_uppercase());
        let mut input: BTreeMap<String, Vec<String>> = BTreeMap::new();
        input.insert("X-Tags".into(), vec!["a".into(), "b".into(), "c".into()]);

        let redacted = registry.redact_headers(&input);
        assert_eq!(redacted["X-Tags"], vec!["A", "B", "C"]);
    }
}
