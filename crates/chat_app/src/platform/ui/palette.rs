use crate::platform::preferences::Theme;

pub const RESET: &str = "\x1b[0m";

/// ANSI styles for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub user: &'static str,
    pub model: &'static str,
    pub error: &'static str,
    pub muted: &'static str,
}

pub fn palette_for(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            user: "\x1b[34m",
            model: "\x1b[32m",
            error: "\x1b[31m",
            muted: "\x1b[90m",
        },
        Theme::Dark => Palette {
            user: "\x1b[94m",
            model: "\x1b[92m",
            error: "\x1b[91m",
            muted: "\x1b[37m",
        },
    }
}
