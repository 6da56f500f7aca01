/// Actions a user or host application can run against the browser state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseAction<Custom = ()> {
    /// Move the cursor to the previous visible row.
    CursorPrev,
    /// Move the cursor to the next visible row.
    CursorNext,
    /// Move the cursor to the parent branch row.
    CursorParent,
    /// Move the cursor to the first visible row.
    CursorFirst,
    /// Move the cursor to the last visible row.
    CursorLast,
    /// Expand or collapse the branch under the cursor.
    ToggleBranch,
    /// Expand every branch.
    ExpandAll,
    /// Collapse every branch.
    CollapseAll,
    /// Flip the selection of the leaf record under the cursor.
    ToggleSelect,
    /// Select every record in the tree.
    SelectAllRecords,
    /// Clear the selection.
    ClearSelection,
    /// Toggle drawing of guide lines.
    ToggleGuides,
    /// Custom action forwarded to the caller without internal handling.
    Custom(Custom),
}

/// Result of handling an action or key event.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum BrowseEvent<Custom = ()> {
    /// The action was handled internally and state was updated.
    Handled,
    /// The action was ignored (e.g., the cursor is not on a suitable row).
    Unhandled,
    /// The action is forwarded to the caller for handling.
    Action(BrowseAction<Custom>),
}
