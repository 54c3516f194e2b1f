/// Error code registry for release-env
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Artifact retrieval errors
/// - 3000-3999: Payload errors
/// - 4000-4999: Cleanup warnings
/// - 9000-9999: Unrecognized errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_MISSING_REQUIRED: u16 = 1001;
    pub const CONFIG_INVALID_BOOLEAN: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1003;

    // Artifact retrieval errors (2000-2999)
    pub const ARTIFACT_RETRIEVAL_FAILED: u16 = 2001;
    pub const ARTIFACT_FILE_MISSING: u16 = 2002;

    // Payload errors (3000-3999)
    pub const PAYLOAD_UNREADABLE: u16 = 3001;
    pub const PAYLOAD_MALFORMED: u16 = 3002;
    pub const PAYLOAD_NOT_OBJECT: u16 = 3003;
    pub const PAYLOAD_MISSING_FIELD: u16 = 3004;
    pub const PAYLOAD_INVALID_FIELD: u16 = 3005;

    // Cleanup warnings (4000-4999)
    pub const CLEANUP_REMOVE_FAILED: u16 = 4001;

    // Unrecognized errors (9000-9999)
    pub const UNRECOGNIZED: u16 = 9000;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "Invalid step configuration",
        ErrorCode::CONFIG_MISSING_REQUIRED => "A required input was not provided",
        ErrorCode::CONFIG_INVALID_BOOLEAN => "An input is not a recognized boolean token",
        ErrorCode::CONFIG_INVALID_VALUE => "An input has an invalid value",
        ErrorCode::ARTIFACT_RETRIEVAL_FAILED => "The artifact could not be looked up or downloaded",
        ErrorCode::ARTIFACT_FILE_MISSING => "The downloaded artifact does not contain the expected file",
        ErrorCode::PAYLOAD_UNREADABLE => "The artifact file could not be read",
        ErrorCode::PAYLOAD_MALFORMED => "The artifact file is not valid JSON",
        ErrorCode::PAYLOAD_NOT_OBJECT => "The artifact file is not a JSON object",
        ErrorCode::PAYLOAD_MISSING_FIELD => "The artifact file lacks a required field",
        ErrorCode::PAYLOAD_INVALID_FIELD => "A required field in the artifact file is not a string",
        ErrorCode::CLEANUP_REMOVE_FAILED => "The artifact file could not be removed",
        ErrorCode::UNRECOGNIZED => "Unexpected failure",
        _ => "Unknown error code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_stay_in_their_category() {
        for code in [
            ErrorCode::CONFIG_GENERIC,
            ErrorCode::CONFIG_MISSING_REQUIRED,
            ErrorCode::CONFIG_INVALID_BOOLEAN,
            ErrorCode::CONFIG_INVALID_VALUE,
        ] {
            assert!((1000..2000).contains(&code));
        }
        for code in [
            ErrorCode::PAYLOAD_UNREADABLE,
            ErrorCode::PAYLOAD_MALFORMED,
            ErrorCode::PAYLOAD_NOT_OBJECT,
            ErrorCode::PAYLOAD_MISSING_FIELD,
            ErrorCode::PAYLOAD_INVALID_FIELD,
        ] {
            assert!((3000..4000).contains(&code));
        }
    }

    #[test]
    fn test_describe_unknown_code() {
        assert_eq!(describe_error_code(1234), "Unknown error code");
        assert_eq!(
            describe_error_code(ErrorCode::ARTIFACT_FILE_MISSING),
            "The downloaded artifact does not contain the expected file"
        );
    }
}
