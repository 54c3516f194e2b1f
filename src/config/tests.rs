use super::*;
use crate::error::{ErrorCode, ReleaseError};

fn raw(token: Option<&str>, name: Option<&str>, exports: Option<&str>) -> RawInputs {
    RawInputs {
        token: token.map(String::from),
        artifact_name: name.map(String::from),
        exports: exports.map(String::from),
    }
}

fn config_code(err: &ReleaseError) -> u16 {
    match err {
        ReleaseError::Configuration { code, .. } => *code,
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_resolve_full_inputs() {
    let config = RunConfig::resolve(raw(Some("ghs_abc"), Some("build-42"), Some("true"))).unwrap();
    assert_eq!(config.credential().expose(), "ghs_abc");
    assert_eq!(config.artifact_name(), "build-42");
    assert!(config.export());
    assert_eq!(config.artifact_file_name(), "build-42.json");
}

#[test]
fn test_missing_token_is_configuration_error() {
    let err = RunConfig::resolve(raw(None, Some("x"), None)).unwrap_err();
    assert_eq!(config_code(&err), ErrorCode::CONFIG_MISSING_REQUIRED);
    assert!(err.user_message().contains("token"));
}

#[test]
fn test_empty_token_is_configuration_error() {
    let err = RunConfig::resolve(raw(Some("  "), None, None)).unwrap_err();
    assert_eq!(config_code(&err), ErrorCode::CONFIG_MISSING_REQUIRED);
}

#[test]
fn test_empty_artifact_name_is_kept_verbatim() {
    let config = RunConfig::resolve(raw(Some("t"), None, None)).unwrap();
    assert_eq!(config.artifact_name(), "");
    assert_eq!(config.artifact_file_name(), ".json");
    assert!(!config.export());
}

#[test]
fn test_inputs_are_trimmed() {
    let config = RunConfig::resolve(raw(
        Some("ghs_abc\n"),
        Some("  build-42\t"),
        Some(" TRUE\n"),
    ))
    .unwrap();
    assert_eq!(config.credential().expose(), "ghs_abc");
    assert_eq!(config.credential().len(), 7);
    assert_eq!(config.artifact_name(), "build-42");
    assert_eq!(config.artifact_file_name(), "build-42.json");
    assert!(config.export());
}

#[test]
fn test_boolean_vocabulary() {
    for token in ["true", "True", "TRUE", "tRuE", " true "] {
        assert!(parse_boolean_input("exports", Some(token)).unwrap(), "{token}");
    }
    for token in ["false", "False", "FALSE", "", "   "] {
        assert!(!parse_boolean_input("exports", Some(token)).unwrap(), "{token}");
    }
    assert!(!parse_boolean_input("exports", None).unwrap());
}

#[test]
fn test_boolean_rejects_other_tokens() {
    for token in ["yes", "1", "on", "truthy"] {
        let err = parse_boolean_input("exports", Some(token)).unwrap_err();
        assert_eq!(config_code(&err), ErrorCode::CONFIG_INVALID_BOOLEAN);
        assert!(err.user_message().contains("exports"));
    }
}

#[test]
fn test_credential_is_redacted() {
    let config = RunConfig::resolve(raw(Some("super-secret"), None, None)).unwrap();
    let rendered = format!("{config:?} {}", config.credential());
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("***"));
}

#[test]
fn test_backend_defaults_api_url() {
    let backend = BackendConfig::resolve(RawBackend {
        api_url: None,
        repository: Some("octo/widgets".into()),
        run_id: Some("1234".into()),
    })
    .unwrap();
    assert_eq!(backend.api_url.as_str(), "https://api.github.com/");
    assert_eq!(backend.repository.to_string(), "octo/widgets");
    assert_eq!(backend.run_id, 1234);
}

#[test]
fn test_backend_requires_repository_and_run() {
    let err = BackendConfig::resolve(RawBackend {
        run_id: Some("1".into()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(err.user_message().contains("repository"));

    let err = BackendConfig::resolve(RawBackend {
        repository: Some("octo/widgets".into()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(err.user_message().contains("run_id"));
}

#[test]
fn test_backend_rejects_bad_values() {
    let cases = [
        (Some("not a url"), "octo/widgets", "1"),
        (None, "widgets", "1"),
        (None, "octo/widgets/extra", "1"),
        (None, "octo/widgets", "0"),
        (None, "octo/widgets", "abc"),
    ];
    for (api_url, repository, run_id) in cases {
        let err = BackendConfig::resolve(RawBackend {
            api_url: api_url.map(String::from),
            repository: Some(repository.into()),
            run_id: Some(run_id.into()),
        })
        .unwrap_err();
        assert_eq!(config_code(&err), ErrorCode::CONFIG_INVALID_VALUE, "{repository} {run_id}");
    }
}
