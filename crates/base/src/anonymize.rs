//! GDPR anonymization of field values.
//!
//! Text is replaced by a salted SHA-256 digest (a fresh salt per value, so
//! digests cannot be joined back across records). Other types are replaced
//! by a neutral constant.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use erpsuite_core::{DomainError, DomainResult};

use crate::messages;

/// Storage type of a field being anonymized.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    String,
    Long,
    Double,
    Integer,
    Decimal,
    Date,
    Time,
    Datetime,
    Binary,
    Json,
    #[serde(other)]
    Other,
}

/// Anonymize one value. `max_size == 0` means unbounded.
pub fn anonymize_value(value: &Value, field_type: FieldType, max_size: usize) -> DomainResult<Value> {
    let anonymized = match field_type {
        FieldType::Json => {
            return Err(DomainError::configuration(
                messages::JSON_FIELD_CANNOT_BE_ANONYMIZED,
            ));
        }
        FieldType::Text | FieldType::String => {
            let digest = hex::encode(hash_with_salt(&plain_text(value))?);
            if max_size != 0 && digest.len() > max_size {
                Value::String(digest[..max_size].to_string())
            } else {
                Value::String(digest)
            }
        }
        FieldType::Long | FieldType::Double | FieldType::Integer => Value::from(0),
        FieldType::Decimal => Value::String("0".to_string()),
        FieldType::Date => Value::String("1970-01-01".to_string()),
        FieldType::Time => Value::String("00:00:00".to_string()),
        FieldType::Datetime => Value::String("1970-01-01T00:00:00".to_string()),
        FieldType::Binary | FieldType::Other => Value::Null,
    };
    Ok(anonymized)
}

/// Anonymize the listed keys of a JSON object; other keys are copied as-is.
pub fn anonymize_json(
    object: &Map<String, Value>,
    fields: &[(String, FieldType, usize)],
) -> DomainResult<Map<String, Value>> {
    let mut out = Map::with_capacity(object.len());
    for (key, value) in object {
        let replacement = match fields.iter().find(|(name, _, _)| name == key) {
            Some((_, field_type, max_size)) => anonymize_value(value, *field_type, *max_size)?,
            None => value.clone(),
        };
        out.insert(key.clone(), replacement);
    }
    tracing::debug!(fields = fields.len(), "json object anonymized");
    Ok(out)
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn hash_with_salt(data: &str) -> DomainResult<Vec<u8>> {
    let mut salt = [0u8; 16];
    getrandom::fill(&mut salt)
        .map_err(|e| DomainError::configuration(format!("failed to generate salt: {e}")))?;

    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(data.as_bytes());
    Ok(hasher.finalize().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use erpsuite_core::ErrorCategory;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn text_becomes_a_salted_digest() {
        let a = anonymize_value(&json!("John Doe"), FieldType::String, 0).unwrap();
        let b = anonymize_value(&json!("John Doe"), FieldType::String, 0).unwrap();
        let a = a.as_str().unwrap();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b.as_str().unwrap());
    }

    #[test]
    fn digest_is_truncated_to_max_size() {
        let v = anonymize_value(&json!("john@example.com"), FieldType::Text, 10).unwrap();
        assert_eq!(v.as_str().unwrap().len(), 10);
    }

    #[test]
    fn max_size_applies_to_the_hex_digest() {
        // 32 digest bytes are 64 hex chars; a 40-char limit still truncates.
        let v = anonymize_value(&json!("john@example.com"), FieldType::Text, 40).unwrap();
        assert_eq!(v.as_str().unwrap().len(), 40);
        let v = anonymize_value(&json!("john@example.com"), FieldType::Text, 64).unwrap();
        assert_eq!(v.as_str().unwrap().len(), 64);
    }

    #[test]
    fn scalar_types_become_neutral_values() {
        assert_eq!(anonymize_value(&json!(42), FieldType::Integer, 0).unwrap(), json!(0));
        assert_eq!(
            anonymize_value(&json!("1985-04-12"), FieldType::Date, 0).unwrap(),
            json!("1970-01-01")
        );
        assert_eq!(
            anonymize_value(&json!("x"), FieldType::Binary, 0).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn json_fields_are_rejected() {
        let err = anonymize_value(&json!({}), FieldType::Json, 0).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ConfigurationError);
    }

    #[test]
    fn only_listed_keys_are_anonymized() {
        let object = json!({ "name": "Jane", "city": "Lyon" });
        let out = anonymize_json(
            object.as_object().unwrap(),
            &[("name".to_string(), FieldType::String, 0)],
        )
        .unwrap();
        assert_eq!(out["city"], json!("Lyon"));
        assert_ne!(out["name"], json!("Jane"));
    }

    proptest! {
        #[test]
        fn digest_length_never_exceeds_max_size(text in ".{0,80}", max_size in 0usize..100) {
            let v = anonymize_value(&json!(text), FieldType::Text, max_size).unwrap();
            let len = v.as_str().unwrap().len();
            let expected = if max_size == 0 { 64 } else { max_size.min(64) };
            prop_assert_eq!(len, expected);
        }
    }
}
