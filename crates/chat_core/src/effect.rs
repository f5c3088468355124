use crate::{RequestId, Role, Turn};

/// Content handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Shown verbatim.
    Text(String),
    /// Raw markdown; the executor renders it to markup before display.
    Markdown(String),
}

/// Visual state of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Affordance {
    #[default]
    Send,
    Loading,
}

impl Affordance {
    pub fn icon(self) -> &'static str {
        match self {
            Affordance::Send => "\u{27A4}",
            Affordance::Loading => "...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetInputEnabled(bool),
    SetAffordance(Affordance),
    RenderTurn { role: Role, content: Content },
    ClearInput,
    /// Provisional model entry shown while the request is outstanding.
    RenderPlaceholder { content: Content },
    SendConversation {
        request_id: RequestId,
        conversation: Vec<Turn>,
    },
    FinalizePlaceholder { content: Content },
    MarkPlaceholderError,
    FocusInput,
}
