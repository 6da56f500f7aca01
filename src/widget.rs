use std::borrow::Cow;

use ratatui::layout::Rect;
use ratatui::prelude::Buffer;
use ratatui::widgets::{
    Block, Borders, Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
    Table,
};
use smallvec::SmallVec;

use crate::columns::{LabelOnly, RecordColumns};
use crate::context::RowContext;
use crate::glyphs::{GlyphSet, LeafLabelFn, branch_label_line, leaf_label_line};
use crate::identity::{Identify, RecordIdentity};
use crate::state::{RecordTreeState, RowKind};
use crate::style::RecordTreeStyle;
use crate::tree::RecordTree;

/// Stateful widget rendering a grouped record tree as a table.
///
/// Branch rows show the bucket key with its record count and an expander
/// glyph; leaf rows show a checkbox glyph, the caller-rendered label, and
/// any extra record columns.
pub struct RecordTreeView<'a, R, C = LabelOnly>
where
    C: RecordColumns<R>,
{
    tree: &'a RecordTree<R>,
    label: LeafLabelFn<R>,
    columns: &'a C,
    style: RecordTreeStyle<'a>,
    glyphs: GlyphSet<'a>,
}

impl<'a, R, C> RecordTreeView<'a, R, C>
where
    C: RecordColumns<R>,
{
    pub const fn new(
        tree: &'a RecordTree<R>,
        label: LeafLabelFn<R>,
        columns: &'a C,
        style: RecordTreeStyle<'a>,
    ) -> Self {
        Self {
            tree,
            label,
            columns,
            style,
            glyphs: GlyphSet::unicode(),
        }
    }

    pub const fn glyphs(mut self, glyphs: GlyphSet<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }
}

impl<'a, R, C> RecordTreeView<'a, R, C>
where
    R: Identify,
    C: RecordColumns<R>,
{
    fn build_rows(&self, state: &RecordTreeState) -> Vec<Row<'a>> {
        let mut rows = Vec::with_capacity(state.visible_len());
        for row in state.visible_rows() {
            let built = match row.kind() {
                RowKind::Branch { path, record_count } => {
                    let ctx = RowContext {
                        depth: row.depth(),
                        is_tail_stack: row.is_tail_stack.as_slice(),
                        is_selected: false,
                        draw_lines: state.draw_lines(),
                        line_style: self.style.line_style,
                    };
                    let label = branch_label_line(
                        &ctx,
                        Cow::Owned(path.leaf_key().to_owned()),
                        *record_count,
                        state.expansion().is_expanded(path),
                        &self.glyphs,
                    );
                    Row::new([Cell::from(label)]).style(self.style.branch_style)
                }
                RowKind::Leaf { record } => {
                    let Some(entry) = self.tree.record(*record) else {
                        continue;
                    };
                    let is_selected = state
                        .selection()
                        .is_selected(&RecordIdentity::of(entry, *record));
                    let ctx = RowContext {
                        depth: row.depth(),
                        is_tail_stack: row.is_tail_stack.as_slice(),
                        is_selected,
                        draw_lines: state.draw_lines(),
                        line_style: self.style.line_style,
                    };
                    let label = leaf_label_line(&ctx, (self.label)(entry), &self.glyphs);
                    let mut cells = SmallVec::<[Cell<'a>; 8]>::new();
                    cells.push(Cell::from(label));
                    cells.extend(self.columns.cells(entry));
                    let mut built = Row::new(cells);
                    if is_selected {
                        built = built.style(self.style.selected_style);
                    }
                    built
                }
            };
            rows.push(built);
        }
        rows
    }
}

impl<R, C> StatefulWidget for RecordTreeView<'_, R, C>
where
    R: Identify,
    C: RecordColumns<R>,
{
    type State = RecordTreeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.ensure_rows(self.tree);

        let header = self.columns.header();
        let header_height = u16::from(header.is_some());

        let mut block = Block::default().borders(self.style.borders);
        if let Some(title) = self.style.title.clone() {
            block = block.title(title);
        }
        block = block
            .style(self.style.block_style)
            .border_style(self.style.border_style);

        let inner_height = block.inner(area).height.saturating_sub(header_height) as usize;
        state.ensure_cursor_visible_with_policy(inner_height, self.style.scroll_policy);

        let total_rows = state.visible_len();
        let rows = self.build_rows(state);
        let scroll_rows = total_rows.saturating_sub(inner_height);

        let (table_area, table_block, constraints, scrollbar_area) = if scroll_rows > 0 {
            let table_area = Rect {
                width: area.width.saturating_sub(1),
                ..area
            };
            let scrollbar_area = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y,
                width: 1,
                height: area.height,
            };
            let mut table_borders = self.style.borders;
            table_borders.remove(Borders::RIGHT);
            let table_block = block.borders(table_borders);
            let constraints = self
                .columns
                .constraints_for_area(table_block.inner(table_area));
            (table_area, table_block, constraints, Some(scrollbar_area))
        } else {
            let constraints = self.columns.constraints_for_area(block.inner(area));
            (area, block, constraints, None)
        };

        let mut table = Table::new(rows, constraints.iter().copied())
            .style(self.style.block_style)
            .block(table_block)
            .row_highlight_style(self.style.highlight_style)
            .highlight_symbol(self.style.highlight_symbol);
        if let Some(header) = header {
            table = table.header(header);
        }

        table.render(table_area, buf, state.table_state_mut());

        if let Some(scrollbar_area) = scrollbar_area {
            let scroll_len = scroll_rows.saturating_add(1);
            let position = state
                .table_state()
                .offset()
                .min(scroll_len.saturating_sub(1));
            let mut scrollbar_state = ScrollbarState::new(scroll_len)
                .position(position)
                .viewport_content_length(inner_height);
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelDef;
    use crate::path::BranchPath;

    struct LogLine {
        level: &'static str,
        message: &'static str,
    }

    impl Identify for LogLine {
        fn message(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.message)
        }
    }

    fn by_level(record: &LogLine) -> Option<String> {
        Some(record.level.to_owned())
    }

    fn message_label(record: &LogLine) -> Cow<'_, str> {
        Cow::Borrowed(record.message)
    }

    fn sample_tree() -> RecordTree<LogLine> {
        let records = (0..16)
            .map(|i| LogLine {
                level: if i % 2 == 0 { "ERROR" } else { "INFO" },
                message: "event",
            })
            .collect();
        RecordTree::build(records, &[LevelDef::new(by_level)])
    }

    #[test]
    fn render_smoke_collapsed() {
        let tree = sample_tree();
        let columns = LabelOnly;
        let widget =
            RecordTreeView::new(&tree, message_label, &columns, RecordTreeStyle::default());

        let mut state = RecordTreeState::new();
        let area = Rect::new(0, 0, 30, 8);
        let mut buffer = Buffer::empty(area);
        widget.render(area, &mut buffer, &mut state);

        assert_eq!(state.visible_len(), 2);
    }

    #[test]
    fn render_smoke_with_scrollbar() {
        let tree = sample_tree();
        let columns = LabelOnly;
        let widget =
            RecordTreeView::new(&tree, message_label, &columns, RecordTreeStyle::default())
                .glyphs(GlyphSet::ascii());

        let mut state = RecordTreeState::new();
        state.expansion_mut().expand(&BranchPath::from("ERROR"));
        state.expansion_mut().expand(&BranchPath::from("INFO"));

        // 18 rows into a 6-row viewport forces the scrollbar path.
        let area = Rect::new(0, 0, 30, 6);
        let mut buffer = Buffer::empty(area);
        widget.render(area, &mut buffer, &mut state);

        assert_eq!(state.visible_len(), 18);
    }

    #[test]
    fn render_smoke_empty_tree() {
        let tree: RecordTree<LogLine> = RecordTree::build(Vec::new(), &[LevelDef::new(by_level)]);
        let columns = LabelOnly;
        let widget =
            RecordTreeView::new(&tree, message_label, &columns, RecordTreeStyle::default());

        let mut state = RecordTreeState::new();
        let area = Rect::new(0, 0, 20, 4);
        let mut buffer = Buffer::empty(area);
        widget.render(area, &mut buffer, &mut state);

        assert_eq!(state.visible_len(), 0);
    }
}
