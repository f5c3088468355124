//! Chat core: pure submission state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod transcript;
mod update;
mod view_model;

pub use effect::{Affordance, Content, Effect};
pub use msg::{Msg, Outcome};
pub use state::{ChatState, RequestId};
pub use transcript::{Role, Transcript, Turn};
pub use update::{update, FAILED_RESPONSE_TEXT, NO_RESPONSE_TEXT, THINKING_TEXT};
pub use view_model::ChatViewModel;
