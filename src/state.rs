use ratatui::widgets::TableState;
use smallvec::SmallVec;

use crate::action::{BrowseAction, BrowseEvent};
use crate::expand::ExpansionSet;
use crate::identity::{Identify, RecordIdentity};
use crate::path::BranchPath;
use crate::select::SelectionSet;
use crate::style::ScrollPolicy;
use crate::tree::{RecordNode, RecordTree};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "keymap")]
use crate::keymap::BrowseKeyBindings;
#[cfg(feature = "keymap")]
use crossterm::event::KeyEvent;

/// What a visible row points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// A branch of the grouped tree.
    Branch {
        path: BranchPath,
        record_count: usize,
    },
    /// One record inside an expanded bucket, addressed by its position in
    /// the tree's flat record list.
    Leaf { record: usize },
}

/// A visible row with metadata used for rendering and navigation.
#[derive(Clone)]
pub struct VisibleRow {
    pub(crate) kind: RowKind,
    pub(crate) depth: u16,
    pub(crate) is_tail_stack: SmallVec<[bool; 8]>,
}

impl VisibleRow {
    /// What the row points at.
    pub const fn kind(&self) -> &RowKind {
        &self.kind
    }

    /// Indentation depth (top-level branches are at 0).
    pub const fn depth(&self) -> u16 {
        self.depth
    }
}

/// Snapshot of browser state (expansion, selection, cursor).
///
/// With the `serde` feature enabled, this type derives
/// `Serialize`/`Deserialize`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct RecordTreeSnapshot {
    /// Expanded branch paths.
    pub expanded: Vec<BranchPath>,
    /// Selected record identities.
    pub selected: Vec<RecordIdentity>,
    /// Cursor index in the visible list.
    pub cursor: Option<usize>,
    /// Scroll offset within the visible list.
    pub offset: usize,
    /// Whether guide lines were enabled.
    pub draw_lines: bool,
}

/// Browser state: expansion, selection, cursor, and the visible-row cache.
///
/// One screen owns one `RecordTreeState` plus the `RecordTree` it browses.
/// The state never stores the tree; call [`RecordTreeState::invalidate`]
/// after swapping in a freshly built tree so the row cache rebuilds.
/// Expansion and selection deliberately survive the swap: paths and
/// identities that no longer resolve just stop matching.
pub struct RecordTreeState {
    table_state: TableState,
    expansion: ExpansionSet,
    selection: SelectionSet,
    // Cached visible rows to avoid recomputing DFS every render.
    visible: Vec<VisibleRow>,
    // Marks whether the visible rows must be rebuilt.
    dirty: bool,
    draw_lines: bool,
    #[cfg(feature = "keymap")]
    keymap: BrowseKeyBindings,
}

impl Default for RecordTreeState {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTreeState {
    /// Creates a fully collapsed state with an empty selection.
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
            expansion: ExpansionSet::new(),
            selection: SelectionSet::new(),
            visible: Vec::new(),
            dirty: true,
            draw_lines: true,
            #[cfg(feature = "keymap")]
            keymap: BrowseKeyBindings::new(),
        }
    }

    #[cfg(feature = "keymap")]
    /// Returns a mutable reference to the key binding set.
    pub const fn keymap_mut(&mut self) -> &mut BrowseKeyBindings {
        &mut self.keymap
    }

    /// The expansion tracker.
    pub const fn expansion(&self) -> &ExpansionSet {
        &self.expansion
    }

    /// Mutable access to the expansion tracker; marks the row cache dirty.
    pub const fn expansion_mut(&mut self) -> &mut ExpansionSet {
        self.dirty = true;
        &mut self.expansion
    }

    /// The selection tracker.
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Mutable access to the selection tracker. Selection does not affect
    /// the row set, so the cache stays valid.
    pub const fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    pub(crate) const fn table_state(&self) -> &TableState {
        &self.table_state
    }

    pub(crate) const fn table_state_mut(&mut self) -> &mut TableState {
        &mut self.table_state
    }

    /// Returns whether guide lines are drawn.
    #[inline]
    pub const fn draw_lines(&self) -> bool {
        self.draw_lines
    }

    /// Enables or disables drawing of guide lines.
    pub const fn set_draw_lines(&mut self, draw: bool) {
        self.draw_lines = draw;
    }

    /// Marks the visible-row cache as dirty (after a tree swap or a direct
    /// expansion mutation).
    pub const fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Captures a snapshot of the current state for persistence or restore.
    pub fn snapshot(&self) -> RecordTreeSnapshot {
        RecordTreeSnapshot {
            expanded: self.expansion.paths().cloned().collect(),
            selected: self.selection.identities().cloned().collect(),
            cursor: self.table_state.selected(),
            offset: self.table_state.offset(),
            draw_lines: self.draw_lines,
        }
    }

    /// Restores state from a previously captured snapshot.
    pub fn restore(&mut self, snapshot: RecordTreeSnapshot) {
        self.expansion = snapshot.expanded.into_iter().collect();
        self.selection = snapshot.selected.into_iter().collect();
        *self.table_state.offset_mut() = snapshot.offset;
        self.table_state.select(snapshot.cursor);
        self.draw_lines = snapshot.draw_lines;
        self.dirty = true;
    }

    /// The visible rows in render order. Valid after
    /// [`RecordTreeState::ensure_rows`].
    pub fn visible_rows(&self) -> &[VisibleRow] {
        &self.visible
    }

    /// Returns the number of visible rows in the current view.
    pub const fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// The cursor index in the visible list.
    pub fn cursor(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// The visible row under the cursor, if any.
    pub fn cursor_row(&self) -> Option<&VisibleRow> {
        self.table_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
    }

    /// The branch path under the cursor (`None` on leaf rows).
    pub fn cursor_path(&self) -> Option<&BranchPath> {
        match self.cursor_row()?.kind() {
            RowKind::Branch { path, .. } => Some(path),
            RowKind::Leaf { .. } => None,
        }
    }

    /// The record index under the cursor (`None` on branch rows).
    pub fn cursor_record(&self) -> Option<usize> {
        match self.cursor_row()?.kind() {
            RowKind::Leaf { record } => Some(*record),
            RowKind::Branch { .. } => None,
        }
    }

    /// Moves the cursor to the first visible row.
    pub fn cursor_first(&mut self) {
        if self.visible.is_empty() {
            self.table_state.select(None);
            return;
        }
        self.table_state.select(Some(0));
    }

    /// Moves the cursor to the last visible row.
    pub fn cursor_last(&mut self) {
        if self.visible.is_empty() {
            self.table_state.select(None);
            return;
        }
        self.table_state.select(Some(self.visible.len() - 1));
    }

    /// Moves the cursor to the previous visible row.
    pub fn cursor_prev(&mut self) {
        if self.visible.is_empty() {
            self.table_state.select(None);
            return;
        }
        let selected = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(selected.saturating_sub(1)));
    }

    /// Moves the cursor to the next visible row.
    pub fn cursor_next(&mut self) {
        if self.visible.is_empty() {
            self.table_state.select(None);
            return;
        }
        let selected = self.table_state.selected().unwrap_or(0);
        let next = (selected + 1).min(self.visible.len().saturating_sub(1));
        self.table_state.select(Some(next));
    }

    /// Adjusts scroll offset so the cursor is within the viewport.
    pub fn ensure_cursor_visible(&mut self, viewport_height: usize) {
        self.clamp_cursor();
        let Some(selected) = self.table_state.selected() else {
            return;
        };
        let viewport_height = viewport_height.max(1);
        let offset = self.table_state.offset();
        if selected < offset {
            *self.table_state.offset_mut() = selected;
        } else if selected >= offset + viewport_height {
            *self.table_state.offset_mut() = selected + 1 - viewport_height;
        }
    }

    /// Adjusts cursor visibility according to the provided scroll policy.
    pub fn ensure_cursor_visible_with_policy(
        &mut self,
        viewport_height: usize,
        policy: ScrollPolicy,
    ) {
        match policy {
            ScrollPolicy::KeepInView => self.ensure_cursor_visible(viewport_height),
            ScrollPolicy::CenterOnCursor => self.ensure_cursor_centered(viewport_height),
        }
    }

    fn ensure_cursor_centered(&mut self, viewport_height: usize) {
        self.clamp_cursor();
        let Some(selected) = self.table_state.selected() else {
            return;
        };
        let viewport_height = viewport_height.max(1);
        let total = self.visible.len();
        if total <= viewport_height {
            *self.table_state.offset_mut() = 0;
            return;
        }

        // Center the cursor, then clamp to the valid scroll range.
        let half = viewport_height / 2;
        let mut offset = selected.saturating_sub(half);
        let max_offset = total.saturating_sub(viewport_height);
        if offset > max_offset {
            offset = max_offset;
        }
        *self.table_state.offset_mut() = offset;
    }

    /// Ensures the visible-row cache is up to date (if marked dirty).
    pub fn ensure_rows<R>(&mut self, tree: &RecordTree<R>) {
        if !self.dirty {
            return;
        }
        self.rebuild_rows(tree);
        self.dirty = false;
        self.clamp_cursor();
    }

    /// Handles a browse action and returns the resulting event.
    pub fn handle_action<R: Identify, C>(
        &mut self,
        tree: &RecordTree<R>,
        action: BrowseAction<C>,
    ) -> BrowseEvent<C> {
        self.ensure_rows(tree);
        self.handle_action_inner(tree, action)
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event into an action and handles it.
    pub fn handle_key<R: Identify>(
        &mut self,
        tree: &RecordTree<R>,
        key: KeyEvent,
    ) -> BrowseEvent<()> {
        self.ensure_rows(tree);
        let Some(action) = self.keymap.resolve(key) else {
            return BrowseEvent::Unhandled;
        };
        self.handle_action_inner(tree, action)
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event with a custom mapping and handles it.
    pub fn handle_key_with<R, C, F>(
        &mut self,
        tree: &RecordTree<R>,
        key: KeyEvent,
        custom: F,
    ) -> BrowseEvent<C>
    where
        R: Identify,
        F: Fn(KeyEvent) -> Option<C>,
    {
        self.ensure_rows(tree);
        let Some(action) = self.keymap.resolve_with(key, custom) else {
            return BrowseEvent::Unhandled;
        };
        self.handle_action_inner(tree, action)
    }

    fn handle_action_inner<R: Identify, C>(
        &mut self,
        tree: &RecordTree<R>,
        action: BrowseAction<C>,
    ) -> BrowseEvent<C> {
        match action {
            BrowseAction::Custom(_) => BrowseEvent::Action(action),
            BrowseAction::ExpandAll => {
                self.expansion.expand_all(tree);
                self.dirty = true;
                BrowseEvent::Handled
            }
            BrowseAction::CollapseAll => {
                self.expansion.collapse_all();
                self.dirty = true;
                BrowseEvent::Handled
            }
            BrowseAction::SelectAllRecords => {
                self.selection.select_all(tree.records());
                BrowseEvent::Handled
            }
            BrowseAction::ClearSelection => {
                self.selection.clear();
                BrowseEvent::Handled
            }
            BrowseAction::ToggleGuides => {
                self.draw_lines = !self.draw_lines;
                BrowseEvent::Handled
            }
            _ if self.visible.is_empty() => BrowseEvent::Unhandled,
            BrowseAction::CursorPrev => {
                self.cursor_prev();
                BrowseEvent::Handled
            }
            BrowseAction::CursorNext => {
                self.cursor_next();
                BrowseEvent::Handled
            }
            BrowseAction::CursorParent => {
                self.cursor_to_parent();
                BrowseEvent::Handled
            }
            BrowseAction::CursorFirst => {
                self.cursor_first();
                BrowseEvent::Handled
            }
            BrowseAction::CursorLast => {
                self.cursor_last();
                BrowseEvent::Handled
            }
            BrowseAction::ToggleBranch => {
                if let Some(path) = self.cursor_path().cloned() {
                    self.expansion.toggle(&path);
                    self.dirty = true;
                    return BrowseEvent::Handled;
                }
                BrowseEvent::Unhandled
            }
            BrowseAction::ToggleSelect => {
                if let Some(index) = self.cursor_record()
                    && let Some(record) = tree.record(index)
                {
                    self.selection.toggle(RecordIdentity::of(record, index));
                    return BrowseEvent::Handled;
                }
                BrowseEvent::Unhandled
            }
        }
    }

    fn cursor_to_parent(&mut self) {
        let Some(selected) = self.table_state.selected() else {
            return;
        };
        let Some(current) = self.visible.get(selected) else {
            return;
        };
        let depth = current.depth;
        if depth == 0 {
            return;
        }
        // In DFS order the first shallower row above the cursor is the
        // parent branch.
        for idx in (0..selected).rev() {
            if self.visible[idx].depth < depth {
                self.table_state.select(Some(idx));
                return;
            }
        }
    }

    fn rebuild_rows<R>(&mut self, tree: &RecordTree<R>) {
        self.visible.clear();
        let mut tail: SmallVec<[bool; 8]> = SmallVec::new();
        for child in tree.root().children() {
            self.push_rows(child, 0, &mut tail);
        }
    }

    fn push_rows(&mut self, node: &RecordNode, depth: u16, tail: &mut SmallVec<[bool; 8]>) {
        self.visible.push(VisibleRow {
            kind: RowKind::Branch {
                path: node.path().clone(),
                record_count: node.record_count(),
            },
            depth,
            is_tail_stack: tail.clone(),
        });
        if !self.expansion.is_expanded(node.path()) {
            return;
        }

        let children = node.children();
        if children.is_empty() {
            let indices = node.record_indices();
            let last = indices.len().saturating_sub(1);
            for (i, &record) in indices.iter().enumerate() {
                tail.push(i == last);
                self.visible.push(VisibleRow {
                    kind: RowKind::Leaf { record },
                    depth: depth + 1,
                    is_tail_stack: tail.clone(),
                });
                tail.pop();
            }
            return;
        }

        let last = children.len().saturating_sub(1);
        for (i, child) in children.iter().enumerate() {
            tail.push(i == last);
            self.push_rows(child, depth + 1, tail);
            tail.pop();
        }
    }

    const fn clamp_cursor(&mut self) {
        if self.visible.is_empty() {
            self.table_state.select(None);
            return;
        }

        if let Some(selected) = self.table_state.selected()
            && selected >= self.visible.len()
        {
            self.table_state
                .select(Some(self.visible.len().saturating_sub(1)));
        }
    }
}
