// Minimal example: a warehouse table catalog grouped by schema, rendered
// into an in-memory buffer (no terminal required).
use std::borrow::Cow;

use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::Buffer;
use ratatui::widgets::{Cell, StatefulWidget};

use tui_recordtree::{
    BranchPath, ColumnDef, Identify, LevelDef, RecordTree, RecordTreeState, RecordTreeStyle,
    RecordTreeView, SimpleColumns,
};

struct CatalogEntry {
    id: &'static str,
    schema: &'static str,
    table: &'static str,
    row_count: &'static str,
}

// Catalog entries carry a natural primary key, so no synthesized identity
// is ever needed.
impl Identify for CatalogEntry {
    fn id(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.id))
    }
}

fn by_schema(entry: &CatalogEntry) -> Option<String> {
    Some(entry.schema.to_owned())
}

fn table_label(entry: &CatalogEntry) -> Cow<'_, str> {
    Cow::Borrowed(entry.table)
}

fn row_count_cell(entry: &CatalogEntry) -> Cell<'_> {
    Cell::from(entry.row_count)
}

fn catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            id: "wh-001",
            schema: "sales",
            table: "orders",
            row_count: "1204411",
        },
        CatalogEntry {
            id: "wh-002",
            schema: "sales",
            table: "customers",
            row_count: "88210",
        },
        CatalogEntry {
            id: "wh-003",
            schema: "staging",
            table: "cdc_events",
            row_count: "5520137",
        },
        CatalogEntry {
            id: "wh-004",
            schema: "finance",
            table: "invoices",
            row_count: "40233",
        },
    ]
}

fn main() {
    // Group the flat catalog by schema; one level is enough here.
    let tree = RecordTree::build(catalog(), &[LevelDef::new(by_schema)]);

    let columns = SimpleColumns::new(
        Constraint::Fill(1),
        "Table",
        [ColumnDef::new("Rows", Constraint::Length(10), row_count_cell)],
    );

    // State holds expansion/selection and must live across frames.
    let mut state = RecordTreeState::new();
    state.expansion_mut().expand(&BranchPath::from("sales"));

    let widget = RecordTreeView::new(&tree, table_label, &columns, RecordTreeStyle::default());

    // Render into an in-memory buffer (no terminal required for the example).
    let area = Rect::new(0, 0, 48, 10);
    let mut buffer = Buffer::empty(area);
    widget.render(area, &mut buffer, &mut state);
}
