use crate::CorrelationId;

/// Malformed bytes at the core boundary. Fatal to one call, never to the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("input ended before the value was complete")]
    Truncated,
    #[error("declared length exceeds the {limit} byte limit")]
    LengthOverflow { limit: u64 },
    #[error("malformed input: {0}")]
    Malformed(String),
    #[error("correlation ids are 16 bytes, got {len}")]
    InvalidCorrelationId { len: usize },
}

impl From<bincode::Error> for DecodeError {
    fn from(err: bincode::Error) -> Self {
        match *err {
            bincode::ErrorKind::Io(ref io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                DecodeError::Truncated
            }
            bincode::ErrorKind::SizeLimit => DecodeError::LengthOverflow {
                limit: crate::wire::MAX_MESSAGE_BYTES,
            },
            other => DecodeError::Malformed(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("failed to encode value: {reason}")]
pub struct EncodeError {
    pub reason: String,
}

impl From<bincode::Error> for EncodeError {
    fn from(err: bincode::Error) -> Self {
        EncodeError {
            reason: err.to_string(),
        }
    }
}

/// Errors reported by the engine and the byte-level bridge.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("no outstanding request with id {0}")]
    UnknownCorrelation(CorrelationId),
    #[error("request {id} expects a `{expected}` outcome, got one answering `{found}`")]
    OutcomeMismatch {
        id: CorrelationId,
        expected: &'static str,
        found: &'static str,
    },
}
