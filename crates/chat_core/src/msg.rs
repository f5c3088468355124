use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User pressed send with the raw contents of the input box.
    Submitted(String),
    /// The endpoint call for `request_id` resolved.
    ResponseReceived {
        request_id: crate::RequestId,
        outcome: Outcome,
    },
}

/// How one endpoint call resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Successful response carrying markdown result text.
    Reply(String),
    /// Successful response without a usable result field.
    EmptyResult,
    /// The endpoint answered with a non-success status.
    Rejected { status: u16 },
    /// The call could not complete or the response could not be read.
    Transport { message: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Reply(text) => write!(f, "reply ({} bytes)", text.len()),
            Outcome::EmptyResult => write!(f, "empty result"),
            Outcome::Rejected { status } => write!(f, "rejected with status {status}"),
            Outcome::Transport { message } => write!(f, "transport failure: {message}"),
        }
    }
}
