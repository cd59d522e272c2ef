//! Tests for error types

use trueno_hparams::callback::SessionState;
use trueno_hparams::hparams::{DType, Discrete, HParamValue, IntInterval, RealInterval};
use trueno_hparams::{Error, WriterConfig};

#[test]
fn test_int_interval_rejects_float_bound() {
    let error = IntInterval::from_values(HParamValue::Float(f64::NEG_INFINITY), HParamValue::Int(2))
        .unwrap_err();
    assert_eq!(format!("{error}"), "min_value must be an int: -inf");
}

#[test]
fn test_real_interval_rejects_string_bound() {
    let error = RealInterval::from_values(HParamValue::Float(1.0), HParamValue::from("wat"))
        .unwrap_err();
    assert_eq!(format!("{error}"), "max_value must be a float: 'wat'");
}

#[test]
fn test_real_interval_rejects_bool_bound() {
    let error =
        RealInterval::from_values(HParamValue::Bool(true), HParamValue::Float(2.0)).unwrap_err();
    assert!(matches!(
        error,
        Error::TypeMismatch {
            field: "min_value",
            ..
        }
    ));
}

#[test]
fn test_inverted_int_bounds() {
    let error = IntInterval::new(3, 1).unwrap_err();
    assert_eq!(format!("{error}"), "3 > 1");
}

#[test]
fn test_inverted_real_bounds() {
    let error = RealInterval::new(3.0, 1.0).unwrap_err();
    assert_eq!(format!("{error}"), "3.0 > 1.0");
}

#[test]
fn test_empty_domain_without_dtype() {
    let error = Discrete::new(Vec::<HParamValue>::new()).unwrap_err();
    assert_eq!(format!("{error}"), "Empty domain with no dtype specified");
}

#[test]
fn test_empty_domain_with_dtype_is_allowed() {
    let domain = Discrete::with_dtype(Vec::<HParamValue>::new(), DType::Str).unwrap();
    assert!(domain.is_empty());
    assert_eq!(domain.dtype(), DType::Str);
}

#[test]
fn test_mixed_discrete_values() {
    let values: Vec<HParamValue> = vec!["one".into(), 2.into()];
    let error = Discrete::new(values).unwrap_err();
    assert_eq!(format!("{error}"), "dtype mismatch: 2 is not of type str");
}

#[test]
fn test_duplicate_hparam_message() {
    let error = Error::DuplicateHParam("foo".to_string());
    assert_eq!(format!("{error}"), "multiple values specified for hparam 'foo'");
}

#[test]
fn test_eager_execution_message() {
    let error = Error::EagerExecutionRequired;
    assert!(format!("{error}").contains("only supported in eager execution mode"));
}

#[test]
fn test_invalid_session_state_message() {
    let error = Error::InvalidSessionState {
        expected: SessionState::Running,
        actual: SessionState::Ended,
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("running"));
    assert!(error_str.contains("ended"));
}

#[test]
fn test_crc_mismatch_message() {
    let error = Error::CrcMismatch {
        expected: 0xdead_beef,
        actual: 0x1234,
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("0xdeadbeef"));
    assert!(error_str.contains("0x1234"));
}

#[test]
fn test_invalid_config_from_json() {
    let error = WriterConfig::from_json_str(r#"{"logdir": ""}"#).unwrap_err();
    assert!(matches!(error, Error::InvalidConfig(_)));
}

#[test]
fn test_malformed_config_json() {
    let error = WriterConfig::from_json_str("{not json").unwrap_err();
    assert!(matches!(error, Error::Json(_)));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: Error = io_error.into();
    assert!(matches!(error, Error::Io(_)));
}
