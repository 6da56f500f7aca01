use ratatui::style::Style;

#[derive(Clone, Copy)]
pub struct RowContext<'a> {
    pub depth: u16,
    pub is_tail_stack: &'a [bool],
    pub is_selected: bool,
    pub draw_lines: bool,
    pub line_style: Style,
}
