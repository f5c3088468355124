use chat_logging::{chat_debug, chat_info, chat_warn};

use crate::{Affordance, ChatState, Content, Effect, Msg, Outcome, Role};

pub const THINKING_TEXT: &str = "Thinking...";
pub const NO_RESPONSE_TEXT: &str = "Sorry, no response received.";
pub const FAILED_RESPONSE_TEXT: &str = "Failed to get response from server.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChatState, msg: Msg) -> (ChatState, Vec<Effect>) {
    let effects = match msg {
        Msg::Submitted(raw) => {
            if let Some(request_id) = state.in_flight() {
                chat_debug!("Submit dropped while request {} is in flight", request_id);
                return (state, Vec::new());
            }
            let text = trim_input(&raw);
            if text.is_empty() {
                return (state, Vec::new());
            }

            let text = text.to_owned();
            let request_id = state.begin_request(text.clone());
            chat_info!(
                "Submit accepted request_id={} text_len={} turns={}",
                request_id,
                text.len(),
                state.transcript().len()
            );
            vec![
                Effect::SetInputEnabled(false),
                Effect::SetAffordance(Affordance::Loading),
                Effect::RenderTurn {
                    role: Role::User,
                    content: Content::Text(text),
                },
                Effect::ClearInput,
                Effect::RenderPlaceholder {
                    content: Content::Text(THINKING_TEXT.to_owned()),
                },
                Effect::SendConversation {
                    request_id,
                    conversation: state.transcript().snapshot(),
                },
            ]
        }
        Msg::ResponseReceived {
            request_id,
            outcome,
        } => {
            if state.in_flight() != Some(request_id) {
                chat_warn!(
                    "Ignoring response for request {} (in flight: {:?})",
                    request_id,
                    state.in_flight()
                );
                return (state, Vec::new());
            }

            let mut effects = Vec::with_capacity(5);
            match outcome {
                Outcome::Reply(text) if !text.is_empty() => {
                    chat_info!("Request {} resolved with {} bytes", request_id, text.len());
                    state.record_reply(text.clone());
                    effects.push(Effect::FinalizePlaceholder {
                        content: Content::Markdown(text),
                    });
                }
                Outcome::Reply(_) | Outcome::EmptyResult => {
                    chat_warn!("Request {} returned no result", request_id);
                    push_failure(&mut effects, NO_RESPONSE_TEXT);
                }
                failure @ (Outcome::Rejected { .. } | Outcome::Transport { .. }) => {
                    chat_warn!("Request {} failed: {}", request_id, failure);
                    push_failure(&mut effects, FAILED_RESPONSE_TEXT);
                }
            }

            state.finish_request();
            effects.push(Effect::SetInputEnabled(true));
            effects.push(Effect::SetAffordance(Affordance::Send));
            effects.push(Effect::FocusInput);
            effects
        }
    };

    (state, effects)
}

fn push_failure(effects: &mut Vec<Effect>, text: &str) {
    effects.push(Effect::FinalizePlaceholder {
        content: Content::Text(text.to_owned()),
    });
    effects.push(Effect::MarkPlaceholderError);
}

/// Strips whitespace and stray byte order marks (U+FEFF), which `str::trim` keeps.
fn trim_input(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}
