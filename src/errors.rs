use std::io;

use thiserror::Error;

use crate::types::RecordId;

/// Error type for configuration, tokenizer, and per-record pipeline failures.
#[derive(Debug, Error)]
pub enum DatagenError {
    #[error("tokenizer service is unavailable: {reason}")]
    TokenizerUnavailable { reason: String },
    #[error("tokenizer reported an error for request {req}: {message}")]
    TokenizerReported { req: u64, message: String },
    #[error("no values for parameter {0}")]
    NoParameterValues(String),
    #[error("placeholder '{token}' is not bound to any function/parameter/operator")]
    MalformedPlaceholder { token: String },
    #[error("placeholder '{token}' appears in the program but not in the sentence")]
    UnboundPlaceholder { token: String },
    #[error("record '{id}' is malformed: {details}")]
    MalformedRecord { id: RecordId, details: String },
    #[error("record '{id}' has inconsistent number of tokens")]
    TokenCountMismatch { id: RecordId },
    #[error("record '{id}' normalized form mismatch: wanted [[{wanted}]] got [[{got}]]")]
    NormalizedFormMismatch {
        id: RecordId,
        wanted: String,
        got: String,
    },
    #[error("placeholder value '{key}' missing from tokenizer output")]
    MissingEntityValue { key: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
}
