use chat_core::{Affordance, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Plain text, displayed as-is.
    Text,
    /// Rendered markup (HTML).
    Markup,
}

/// Where the controller draws the conversation.
///
/// Only the three entry operations are required; input-box concerns default to no-ops
/// for sinks that have no input control of their own.
pub trait PresentationSink {
    type Handle;

    /// Appends a new visual entry and returns a handle for later mutation.
    fn render_turn(&mut self, role: Role, content: &str, kind: ContentKind) -> Self::Handle;

    /// Replaces the content of a previously rendered entry in place.
    fn update_turn(&mut self, handle: &Self::Handle, content: &str, kind: ContentKind);

    /// Applies the visual failure indicator to an entry.
    fn mark_error(&mut self, handle: &Self::Handle);

    fn set_input_enabled(&mut self, _enabled: bool) {}

    fn set_affordance(&mut self, _affordance: Affordance) {}

    fn clear_input(&mut self) {}

    fn focus_input(&mut self) {}
}
