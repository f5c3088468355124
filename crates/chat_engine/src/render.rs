/// Pure markdown-to-markup transform applied to successful replies.
pub trait MarkdownRenderer: Send + Sync {
    fn to_markup(&self, markdown: &str) -> String;
}

/// CommonMark to HTML. Raw HTML embedded in the markdown is escaped, not passed through.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMarkRenderer;

impl MarkdownRenderer for CommonMarkRenderer {
    fn to_markup(&self, markdown: &str) -> String {
        markdown::to_html(markdown)
    }
}
