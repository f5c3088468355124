use chat_core::{
    update, ChatState, ChatViewModel, Content, Effect, Msg, Outcome, RequestId, Role, Transcript,
    Turn,
};
use chat_logging::{chat_error, chat_warn};

use crate::{ContentKind, EngineEvent, MarkdownRenderer, PresentationSink};

/// Hands a conversation to whatever performs the endpoint call.
///
/// The completion must come back later through [`SubmissionController::handle_event`].
pub trait RequestDispatcher {
    fn dispatch(
        &self,
        request_id: RequestId,
        conversation: Vec<Turn>,
    ) -> Result<(), DispatchError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("engine is not running")]
    EngineStopped,
}

/// Owns the chat state for one session and executes its effects.
///
/// At most one request is in flight; submits arriving meanwhile are dropped by the state
/// machine. Every cycle ends with the placeholder finalized and input re-enabled, including
/// when the request could not even be dispatched.
pub struct SubmissionController<S, D, R>
where
    S: PresentationSink,
{
    state: ChatState,
    sink: S,
    dispatcher: D,
    renderer: R,
    placeholder: Option<S::Handle>,
}

impl<S, D, R> SubmissionController<S, D, R>
where
    S: PresentationSink,
    D: RequestDispatcher,
    R: MarkdownRenderer,
{
    pub fn new(sink: S, dispatcher: D, renderer: R) -> Self {
        Self {
            state: ChatState::new(),
            sink,
            dispatcher,
            renderer,
            placeholder: None,
        }
    }

    /// User pressed send with the raw input text.
    pub fn submit(&mut self, input: &str) {
        self.dispatch_msg(Msg::Submitted(input.to_string()));
    }

    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Completed {
                request_id,
                outcome,
            } => self.dispatch_msg(Msg::ResponseReceived {
                request_id,
                outcome,
            }),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn transcript(&self) -> &Transcript {
        self.state.transcript()
    }

    pub fn view(&self) -> ChatViewModel {
        self.state.view()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for effect in effects {
            self.apply(effect);
        }

        if !self.state.is_busy() {
            self.placeholder = None;
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::SetInputEnabled(enabled) => self.sink.set_input_enabled(enabled),
            Effect::SetAffordance(affordance) => self.sink.set_affordance(affordance),
            Effect::RenderTurn { role, content } => {
                let (text, kind) = self.present(content);
                self.sink.render_turn(role, &text, kind);
            }
            Effect::ClearInput => self.sink.clear_input(),
            Effect::RenderPlaceholder { content } => {
                let (text, kind) = self.present(content);
                self.placeholder = Some(self.sink.render_turn(Role::Model, &text, kind));
            }
            Effect::SendConversation {
                request_id,
                conversation,
            } => {
                if let Err(err) = self.dispatcher.dispatch(request_id, conversation) {
                    chat_error!("Request {} could not be dispatched: {}", request_id, err);
                    self.dispatch_msg(Msg::ResponseReceived {
                        request_id,
                        outcome: Outcome::Transport {
                            message: err.to_string(),
                        },
                    });
                }
            }
            Effect::FinalizePlaceholder { content } => {
                let (text, kind) = self.present(content);
                match &self.placeholder {
                    Some(handle) => self.sink.update_turn(handle, &text, kind),
                    None => chat_warn!("No placeholder to finalize"),
                }
            }
            Effect::MarkPlaceholderError => match &self.placeholder {
                Some(handle) => self.sink.mark_error(handle),
                None => chat_warn!("No placeholder to mark as failed"),
            },
            Effect::FocusInput => self.sink.focus_input(),
        }
    }

    fn present(&self, content: Content) -> (String, ContentKind) {
        match content {
            Content::Text(text) => (text, ContentKind::Text),
            Content::Markdown(markdown) => {
                (self.renderer.to_markup(&markdown), ContentKind::Markup)
            }
        }
    }
}
