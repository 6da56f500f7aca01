//! Grouped record browser widget for ratatui.
//!
//! Takes the flat record list a dashboard screen fetched from its backend
//! (log lines, catalog entries, warehouse configurations), buckets it into a
//! multi-level tree with caller-supplied key extractors, and renders the
//! result as an interactive table with per-branch expansion and a
//! multi-select over leaf records.
//!
//! The three state pieces ([`RecordTree`], [`ExpansionSet`], and
//! [`SelectionSet`]) are independent and usable without the widget.
//!
//! Feature flags:
//! - `keymap`: crossterm-based key bindings and `RecordTreeState::handle_key*` helpers.
//! - `serde`: serde support for `RecordTreeSnapshot`.

mod action;
mod columns;
mod context;
mod expand;
mod glyphs;
mod identity;
#[cfg(feature = "keymap")]
mod keymap;
mod level;
mod path;
pub mod prelude;
mod select;
mod state;
mod style;
mod tree;
mod widget;

pub use action::{BrowseAction, BrowseEvent};
pub use columns::{ColumnDef, ColumnFn, LabelOnly, RecordColumns, SimpleColumns};
pub use context::RowContext;
pub use expand::ExpansionSet;
pub use glyphs::{GlyphSet, LeafLabelFn, branch_label_line, leaf_label_line};
pub use identity::{Identify, RecordIdentity};
#[cfg(feature = "keymap")]
pub use keymap::{BindingProfile, BrowseKeyBindings};
pub use level::{KeyFn, LevelDef, SiblingOrder};
pub use path::BranchPath;
pub use select::SelectionSet;
pub use state::{RecordTreeSnapshot, RecordTreeState, RowKind, VisibleRow};
pub use style::{RecordTreeStyle, ScrollPolicy};
pub use tree::{RecordNode, RecordTree};
pub use widget::RecordTreeView;
