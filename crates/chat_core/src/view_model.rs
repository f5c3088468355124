use crate::{Affordance, RequestId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub busy: bool,
    pub in_flight: Option<RequestId>,
    pub input_enabled: bool,
    pub affordance: Affordance,
    pub turn_count: usize,
}
