use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Borders;

/// Scroll behavior when the cursor moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPolicy {
    KeepInView,
    CenterOnCursor,
}

/// Visual settings for the record tree widget.
///
/// Everything defaults to `Style::default()`; theming belongs to the host
/// application.
#[derive(Clone)]
pub struct RecordTreeStyle<'a> {
    pub title: Option<Line<'a>>,
    pub block_style: Style,
    pub border_style: Style,
    pub highlight_style: Style,
    pub selected_style: Style,
    pub branch_style: Style,
    pub line_style: Style,
    pub highlight_symbol: &'a str,
    pub borders: Borders,
    pub scroll_policy: ScrollPolicy,
}

impl Default for RecordTreeStyle<'_> {
    fn default() -> Self {
        Self {
            title: None,
            block_style: Style::default(),
            border_style: Style::default(),
            highlight_style: Style::default(),
            selected_style: Style::default(),
            branch_style: Style::default(),
            line_style: Style::default(),
            highlight_symbol: ">> ",
            borders: Borders::ALL,
            scroll_policy: ScrollPolicy::KeepInView,
        }
    }
}
