use chat_core::{Outcome, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Exactly one per dispatched request.
    Completed {
        request_id: RequestId,
        outcome: Outcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    Status(u16),
    #[error("response carried no result")]
    EmptyResult,
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<EndpointError> for Outcome {
    fn from(err: EndpointError) -> Self {
        match err {
            EndpointError::EmptyResult => Outcome::EmptyResult,
            EndpointError::Status(status) => Outcome::Rejected { status },
            other => Outcome::Transport {
                message: other.to_string(),
            },
        }
    }
}

/// Folds an endpoint call result into the outcome the state machine consumes.
pub fn into_outcome(result: Result<String, EndpointError>) -> Outcome {
    match result {
        Ok(text) if text.is_empty() => Outcome::EmptyResult,
        Ok(text) => Outcome::Reply(text),
        Err(err) => err.into(),
    }
}
