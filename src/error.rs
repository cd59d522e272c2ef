//! Error types for trueno-hparams
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

use crate::callback::SessionState;
use crate::hparams::{DType, HParamValue};

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// trueno-hparams error types
#[derive(Error, Debug)]
pub enum Error {
    /// An interval bound was supplied with the wrong value type
    #[error("{field} must be {expected}: {value}")]
    TypeMismatch {
        /// Name of the offending parameter (`min_value` or `max_value`)
        field: &'static str,
        /// Expected type, with article ("an int", "a float")
        expected: &'static str,
        /// The rejected value
        value: HParamValue,
    },

    /// A discrete domain element does not match the domain's dtype
    #[error("dtype mismatch: {value} is not of type {dtype}")]
    DTypeMismatch {
        /// First offending element
        value: HParamValue,
        /// The dtype it violates
        dtype: DType,
    },

    /// Interval endpoints are backwards
    #[error("{min} > {max}")]
    InvertedBounds {
        /// Lower endpoint as given
        min: HParamValue,
        /// Upper endpoint as given
        max: HParamValue,
    },

    /// Discrete domain constructed from no values and no explicit dtype
    #[error("Empty domain with no dtype specified")]
    EmptyDomain,

    /// Domain cannot support the requested operation
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// The same hyperparameter name was supplied more than once
    #[error("multiple values specified for hparam '{0}'")]
    DuplicateHParam(String),

    /// Session hooks were invoked outside eager execution
    #[error("hparams callback is only supported in eager execution mode")]
    EagerExecutionRequired,

    /// Session hooks were invoked out of order
    #[error("Invalid session state: expected {expected}, found {actual}")]
    InvalidSessionState {
        /// State the hook requires
        expected: SessionState,
        /// State the callback was in
        actual: SessionState,
    },

    /// Plugin payload has the wrong version or kind
    #[error("Invalid hparams plugin data: {0}")]
    PluginData(String),

    /// Event record checksum mismatch
    #[error("CRC checksum mismatch: expected {expected:#x}, got {actual:#x}")]
    CrcMismatch {
        /// Checksum stored in the record
        expected: u32,
        /// Checksum computed from the bytes read
        actual: u32,
    },

    /// Event file ended in the middle of a record
    #[error("Truncated event record: {0}")]
    TruncatedRecord(String),

    /// Writer configuration rejected
    #[error("Invalid writer config: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Protobuf decode error
    #[error("Protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
