use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Cell, Row};
use smallvec::SmallVec;

/// Column layout and cell rendering for leaf record rows.
///
/// Branch rows only fill the label column; the extra columns stay empty for
/// them.
pub trait RecordColumns<R> {
    /// Returns the constraint for the label (tree) column.
    fn label_constraint(&self) -> Constraint;
    /// Returns constraints for the additional columns.
    fn other_constraints(&self) -> &[Constraint];
    /// Returns an optional header row for the table.
    fn header(&self) -> Option<Row<'_>> {
        None
    }
    /// Returns cells for the additional columns of a leaf row.
    fn cells<'a>(&'a self, record: &'a R) -> SmallVec<[Cell<'a>; 8]>;
    /// Returns constraints for all columns based on the available area.
    fn constraints_for_area(&self, _area: Rect) -> SmallVec<[Constraint; 8]> {
        let mut constraints = SmallVec::<[Constraint; 8]>::new();
        constraints.push(self.label_constraint());
        constraints.extend_from_slice(self.other_constraints());
        constraints
    }
}

/// Function pointer type for rendering a single record cell.
pub type ColumnFn<R> = for<'a> fn(&'a R) -> Cell<'a>;

/// Column definition: header label, width constraint, and cell renderer.
#[derive(Clone, Copy)]
pub struct ColumnDef<R> {
    /// Header label for the column.
    pub header: &'static str,
    /// Width constraint for the column.
    pub constraint: Constraint,
    /// Renderer for the column cell.
    pub cell: ColumnFn<R>,
}

impl<R> ColumnDef<R> {
    /// Creates a new column definition.
    pub const fn new(header: &'static str, constraint: Constraint, cell: ColumnFn<R>) -> Self {
        Self {
            header,
            constraint,
            cell,
        }
    }
}

/// Label-only layout with no extra columns and no header.
#[derive(Clone, Copy, Debug, Default)]
pub struct LabelOnly;

impl<R> RecordColumns<R> for LabelOnly {
    fn label_constraint(&self) -> Constraint {
        Constraint::Percentage(100)
    }

    fn other_constraints(&self) -> &[Constraint] {
        &[]
    }

    fn cells<'a>(&'a self, _record: &'a R) -> SmallVec<[Cell<'a>; 8]> {
        SmallVec::new()
    }
}

/// Fixed-width column layout with optional header.
pub struct SimpleColumns<const N: usize, R> {
    label_constraint: Constraint,
    label_header: &'static str,
    columns: [ColumnDef<R>; N],
    constraints: [Constraint; N],
    header_style: Style,
    show_header: bool,
}

impl<const N: usize, R> SimpleColumns<N, R> {
    /// Creates a new fixed column layout.
    pub fn new(
        label_constraint: Constraint,
        label_header: &'static str,
        columns: [ColumnDef<R>; N],
    ) -> Self {
        let constraints = std::array::from_fn(|idx| columns[idx].constraint);
        Self {
            label_constraint,
            label_header,
            columns,
            constraints,
            header_style: Style::default(),
            show_header: true,
        }
    }

    /// Sets the header row style.
    pub const fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    /// Disables the header row.
    pub const fn without_header(mut self) -> Self {
        self.show_header = false;
        self
    }
}

impl<const N: usize, R> RecordColumns<R> for SimpleColumns<N, R> {
    fn label_constraint(&self) -> Constraint {
        self.label_constraint
    }

    fn other_constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn header(&self) -> Option<Row<'_>> {
        if !self.show_header {
            return None;
        }

        let mut cells = SmallVec::<[Cell; 8]>::new();
        cells.push(Cell::from(self.label_header));
        for column in &self.columns {
            cells.push(Cell::from(column.header));
        }

        Some(Row::new(cells).style(self.header_style))
    }

    fn cells<'a>(&'a self, record: &'a R) -> SmallVec<[Cell<'a>; 8]> {
        let mut cells = SmallVec::<[Cell<'a>; 8]>::new();
        for column in &self.columns {
            cells.push((column.cell)(record));
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        rows: &'static str,
    }

    fn rows_cell(record: &Entry) -> Cell<'_> {
        Cell::from(record.rows)
    }

    #[test]
    fn simple_columns_render_header_and_cells() {
        let columns = SimpleColumns::new(
            Constraint::Fill(1),
            "Name",
            [ColumnDef::new("Rows", Constraint::Length(8), rows_cell)],
        );

        assert!(columns.header().is_some());
        let cells = columns.cells(&Entry { rows: "120" });
        assert_eq!(cells.len(), 1);
    }

    #[test]
    fn without_header_suppresses_the_header_row() {
        let columns = SimpleColumns::new(
            Constraint::Fill(1),
            "Name",
            [ColumnDef::new("Rows", Constraint::Length(8), rows_cell)],
        )
        .without_header();
        assert!(columns.header().is_none());
    }

    #[test]
    fn constraints_cover_label_and_columns() {
        let columns = SimpleColumns::new(
            Constraint::Fill(1),
            "Name",
            [ColumnDef::new("Rows", Constraint::Length(8), rows_cell)],
        );
        let constraints = columns.constraints_for_area(Rect::new(0, 0, 40, 4));
        assert_eq!(constraints.len(), 2);
    }
}
