//! Version record carried by the release artifact
//!
//! The artifact file is decoded into a loose JSON value first and then
//! projected field by field, so a missing or mistyped field is reported by
//! name instead of as a generic deserialization failure.

use crate::error::{ErrorCode, ReleaseError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// The five version identifiers of a release. Values are opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub version: String,
    pub plain_version: String,
    pub extended_version: String,
    pub previous_version: String,
    pub reference: String,
}

/// Field names as they appear in the artifact file
pub const FIELD_VERSION: &str = "version";
pub const FIELD_PLAIN_VERSION: &str = "plainVersion";
pub const FIELD_EXTENDED_VERSION: &str = "extendedVersion";
pub const FIELD_PREVIOUS_VERSION: &str = "previousVersion";
pub const FIELD_REFERENCE: &str = "reference";

impl VersionRecord {
    /// Decode the artifact file contents. `path` is only used in messages.
    pub fn decode(bytes: &[u8], path: &Path) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            ReleaseError::payload(
                ErrorCode::PAYLOAD_MALFORMED,
                path,
                format!("Artifact file '{}' is not valid JSON: {e}", path.display()),
            )
            .with_source(e)
        })?;

        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ReleaseError::payload(
                    ErrorCode::PAYLOAD_NOT_OBJECT,
                    path,
                    format!(
                        "Artifact file '{}' must contain a JSON object, found {}",
                        path.display(),
                        type_name(&other)
                    ),
                ))
            }
        };

        Ok(Self {
            version: required_string(&object, FIELD_VERSION, path)?,
            plain_version: required_string(&object, FIELD_PLAIN_VERSION, path)?,
            extended_version: required_string(&object, FIELD_EXTENDED_VERSION, path)?,
            previous_version: required_string(&object, FIELD_PREVIOUS_VERSION, path)?,
            reference: required_string(&object, FIELD_REFERENCE, path)?,
        })
    }
}

fn required_string(object: &Map<String, Value>, field: &str, path: &Path) -> Result<String> {
    match object.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(ReleaseError::payload_field(
            ErrorCode::PAYLOAD_INVALID_FIELD,
            path,
            field,
            format!(
                "Field '{field}' in artifact file '{}' must be a string, found {}",
                path.display(),
                type_name(other)
            ),
        )),
        None => Err(ReleaseError::payload_field(
            ErrorCode::PAYLOAD_MISSING_FIELD,
            path,
            field,
            format!(
                "Artifact file '{}' is missing required field '{field}'",
                path.display()
            ),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"version":"1.2.3","plainVersion":"1.2.3","extendedVersion":"1.2.3-rc1+build42","previousVersion":"1.2.2","reference":"abc123"}"#;

    fn decode(text: &str) -> Result<VersionRecord> {
        VersionRecord::decode(text.as_bytes(), Path::new("build-42.json"))
    }

    fn payload_details(err: ReleaseError) -> (u16, Option<String>) {
        match err {
            ReleaseError::PayloadDecode { code, field, .. } => (code, field),
            other => panic!("expected payload error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_example_payload() {
        let record = decode(PAYLOAD).unwrap();
        assert_eq!(record.version, "1.2.3");
        assert_eq!(record.plain_version, "1.2.3");
        assert_eq!(record.extended_version, "1.2.3-rc1+build42");
        assert_eq!(record.previous_version, "1.2.2");
        assert_eq!(record.reference, "abc123");
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let record = decode(
            r#"{"version":" V1 ","plainVersion":"","extendedVersion":"ä\n","previousVersion":"x","reference":"REF"}"#,
        )
        .unwrap();
        assert_eq!(record.version, " V1 ");
        assert_eq!(record.plain_version, "");
        assert_eq!(record.extended_version, "ä\n");
        assert_eq!(record.reference, "REF");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let text = PAYLOAD.replacen('{', r#"{"buildNumber":42,"#, 1);
        assert_eq!(decode(&text).unwrap(), decode(PAYLOAD).unwrap());
    }

    #[test]
    fn test_malformed_json() {
        let err = decode("{\"version\": ").unwrap_err();
        assert!(err.user_message().contains("build-42.json"));
        assert_eq!(payload_details(err).0, ErrorCode::PAYLOAD_MALFORMED);
    }

    #[test]
    fn test_non_object_document() {
        let err = decode("[\"1.2.3\"]").unwrap_err();
        assert!(err.user_message().contains("found an array"));
        assert_eq!(payload_details(err).0, ErrorCode::PAYLOAD_NOT_OBJECT);
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        for field in [
            FIELD_VERSION,
            FIELD_PLAIN_VERSION,
            FIELD_EXTENDED_VERSION,
            FIELD_PREVIOUS_VERSION,
            FIELD_REFERENCE,
        ] {
            let mut object: Map<String, Value> = serde_json::from_str(PAYLOAD).unwrap();
            object.remove(field);
            let err = decode(&Value::Object(object).to_string()).unwrap_err();
            assert_eq!(
                payload_details(err),
                (ErrorCode::PAYLOAD_MISSING_FIELD, Some(field.to_string()))
            );
        }
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let text = PAYLOAD.replace("\"plainVersion\"", "\"PlainVersion\"");
        let (code, field) = payload_details(decode(&text).unwrap_err());
        assert_eq!(code, ErrorCode::PAYLOAD_MISSING_FIELD);
        assert_eq!(field.as_deref(), Some(FIELD_PLAIN_VERSION));
    }

    #[test]
    fn test_non_string_field() {
        let text = PAYLOAD.replace("\"abc123\"", "null");
        let err = decode(&text).unwrap_err();
        assert!(err.user_message().contains("'reference'"));
        assert_eq!(
            payload_details(err),
            (ErrorCode::PAYLOAD_INVALID_FIELD, Some(FIELD_REFERENCE.to_string()))
        );
    }

    #[test]
    fn test_serializes_with_artifact_field_names() {
        let record = decode(PAYLOAD).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, serde_json::from_str::<Value>(PAYLOAD).unwrap());
    }
}
