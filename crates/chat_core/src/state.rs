use crate::view_model::ChatViewModel;
use crate::{Affordance, Transcript, Turn};

pub type RequestId = u64;

/// Session state owned by one controller: the transcript plus the single-flight guard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatState {
    transcript: Transcript,
    in_flight: Option<RequestId>,
    last_request_id: RequestId,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ChatViewModel {
        let busy = self.is_busy();
        ChatViewModel {
            busy,
            in_flight: self.in_flight,
            input_enabled: !busy,
            affordance: if busy {
                Affordance::Loading
            } else {
                Affordance::Send
            },
            turn_count: self.transcript.len(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub(crate) fn begin_request(&mut self, text: String) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.transcript.append(Turn::user(text));
        self.in_flight = Some(request_id);
        request_id
    }

    pub(crate) fn record_reply(&mut self, text: String) {
        self.transcript.append(Turn::model(text));
    }

    pub(crate) fn finish_request(&mut self) {
        self.in_flight = None;
    }
}
