pub use crate::{
    BranchPath, BrowseAction, BrowseEvent, ColumnDef, ColumnFn, ExpansionSet, GlyphSet, Identify,
    KeyFn, LabelOnly, LeafLabelFn, LevelDef, RecordColumns, RecordIdentity, RecordNode,
    RecordTree, RecordTreeSnapshot, RecordTreeState, RecordTreeStyle, RecordTreeView, RowContext,
    RowKind, ScrollPolicy, SelectionSet, SiblingOrder, SimpleColumns, VisibleRow,
    branch_label_line, leaf_label_line,
};

#[cfg(feature = "keymap")]
pub use crate::{BindingProfile, BrowseKeyBindings};
