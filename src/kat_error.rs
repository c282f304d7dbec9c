// Error taxonomy for the KAT -> test vector conversion.
// Every variant is fatal for the whole run; there is no partial output.

use thiserror::Error;

use crate::dilithium_params::ParameterSet;

/// Which half of the keypair disagreed with the KAT record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    Secret,
    Public,
}

impl KeyKind {
    /// KAT field holding this key.
    pub fn field(self) -> &'static str {
        match self {
            KeyKind::Secret => "sk",
            KeyKind::Public => "pk",
        }
    }
}

#[derive(Debug, Error)]
pub enum KatError {
    #[error("invalid {field}: decoding hex data: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("invalid {field}: unexpected data length {actual} (expected {expected})")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("line {line}: encountered unexpected 'key = value' line {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("bad test case: no {0}")]
    MissingField(&'static str),

    #[error("invalid pk: {len} bytes did not conform to any known ML-DSA parameter set")]
    UnsupportedParameterSet { len: usize },

    #[error("invalid ctx: size too large: {len} (max 255)")]
    ContextTooLarge { len: usize },

    #[error("unexpected {}: KAT had {recorded}, seed derives {derived}", .key.field())]
    KeyMismatch {
        key: KeyKind,
        recorded: String,
        derived: String,
    },

    #[error("{params}: could not verify signature")]
    SignatureInvalid { params: ParameterSet },

    #[error("{params}: could not verify signature against computed mu")]
    DigestVerificationFailed { params: ParameterSet },

    #[error("record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<KatError>,
    },

    #[error("could not read {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read KAT input: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not convert to JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

impl KatError {
    /// Innermost error, looking through `Record` wrappers.
    pub fn root(&self) -> &KatError {
        match self {
            KatError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, KatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_wrapper_names_index_and_cause() {
        let err = KatError::Record {
            index: 3,
            source: Box::new(KatError::MissingField("ctx")),
        };
        assert_eq!(err.to_string(), "record 3: bad test case: no ctx");
        assert!(matches!(err.root(), KatError::MissingField("ctx")));
    }

    #[test]
    fn key_mismatch_names_the_field() {
        let err = KatError::KeyMismatch {
            key: KeyKind::Public,
            recorded: "aa".into(),
            derived: "bb".into(),
        };
        assert_eq!(err.to_string(), "unexpected pk: KAT had aa, seed derives bb");
    }
}
