use std::fmt;
use std::io::Write;

use chat_core::{Affordance, Role};
use chat_engine::{ContentKind, PresentationSink};
use chat_logging::chat_warn;
use chrono::Local;

use super::palette::{palette_for, Palette, RESET};
use crate::platform::preferences::Theme;

/// Entry number printed next to each turn; updates refer back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryId(usize);

/// Line-oriented presentation: every render or update prints a new line tagged with the
/// entry number, since a terminal cannot rewrite earlier output in place.
pub struct TerminalSink<W: Write> {
    out: W,
    palette: Palette,
    entries: usize,
    input_enabled: bool,
    affordance: Affordance,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            palette: palette_for(theme),
            entries: 0,
            input_enabled: true,
            affordance: Affordance::Send,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.palette = palette_for(theme);
        self.notice(format_args!("theme: {}", theme.as_str()));
    }

    pub fn notice(&mut self, args: fmt::Arguments<'_>) {
        let muted = self.palette.muted;
        self.emit(format_args!("{muted}{args}{RESET}\n"));
    }

    pub fn prompt(&mut self) {
        if self.input_enabled {
            let icon = self.affordance.icon();
            self.emit(format_args!("{icon} "));
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn role_style(&self, role: Role) -> (&'static str, &'static str) {
        match role {
            Role::User => (self.palette.user, "you"),
            Role::Model => (self.palette.model, "model"),
        }
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        let result = self.out.write_fmt(args).and_then(|()| self.out.flush());
        if let Err(err) = result {
            chat_warn!("Terminal write failed: {}", err);
        }
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    type Handle = EntryId;

    fn render_turn(&mut self, role: Role, content: &str, kind: ContentKind) -> EntryId {
        self.entries += 1;
        let id = EntryId(self.entries);
        let (style, label) = self.role_style(role);
        let time = Local::now().format("%H:%M");
        let separator = separator(kind);
        self.emit(format_args!(
            "{style}[{}] {time} {label}:{RESET}{separator}{content}\n",
            id.0
        ));
        id
    }

    fn update_turn(&mut self, handle: &EntryId, content: &str, kind: ContentKind) {
        let (style, label) = self.role_style(Role::Model);
        let separator = separator(kind);
        self.emit(format_args!(
            "{style}[{}] {label}:{RESET}{separator}{content}\n",
            handle.0
        ));
    }

    fn mark_error(&mut self, handle: &EntryId) {
        let error = self.palette.error;
        self.emit(format_args!("{error}[{}] error{RESET}\n", handle.0));
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_affordance(&mut self, affordance: Affordance) {
        self.affordance = affordance;
    }

    fn focus_input(&mut self) {
        self.prompt();
    }
}

fn separator(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Text => " ",
        ContentKind::Markup => "\n",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(sink: TerminalSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn renders_and_updates_by_entry_number() {
        let mut sink = TerminalSink::new(Vec::new(), Theme::Light);
        let user = sink.render_turn(Role::User, "Hello", ContentKind::Text);
        let model = sink.render_turn(Role::Model, "Thinking...", ContentKind::Text);
        sink.update_turn(&model, "<p><strong>Hi</strong></p>", ContentKind::Markup);

        assert_eq!(user, EntryId(1));
        assert_eq!(model, EntryId(2));
        let text = output(sink);
        assert!(text.contains("you:"));
        assert!(text.contains("Hello"));
        assert!(text.contains("[2] model:\x1b[0m\n<p><strong>Hi</strong></p>"));
    }

    #[test]
    fn error_marker_refers_to_entry() {
        let mut sink = TerminalSink::new(Vec::new(), Theme::Dark);
        sink.render_turn(Role::User, "Hello", ContentKind::Text);
        let model = sink.render_turn(Role::Model, "Thinking...", ContentKind::Text);
        sink.mark_error(&model);

        assert!(output(sink).contains("[2] error"));
    }

    #[test]
    fn prompt_hidden_while_input_disabled() {
        let mut sink = TerminalSink::new(Vec::new(), Theme::Light);
        sink.set_input_enabled(false);
        sink.set_affordance(Affordance::Loading);
        sink.focus_input();
        assert!(output(sink).is_empty());

        let mut sink = TerminalSink::new(Vec::new(), Theme::Light);
        sink.focus_input();
        assert_eq!(output(sink), format!("{} ", Affordance::Send.icon()));
    }
}
