use rustc_hash::FxHashSet;

use crate::path::BranchPath;
use crate::tree::{RecordNode, RecordTree};

/// Set of expanded branch paths.
///
/// Starts fully collapsed. Expanding a branch never auto-expands its
/// descendants; collapsing one drops every descendant path so the subtree
/// does not resurface pre-expanded when the branch is reopened. Paths left
/// over from a previous tree simply never match anything and are harmless.
#[derive(Clone, Debug, Default)]
pub struct ExpansionSet {
    expanded: FxHashSet<BranchPath>,
}

impl ExpansionSet {
    /// Creates an empty (fully collapsed) set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test for one branch path.
    pub fn is_expanded(&self, path: &BranchPath) -> bool {
        self.expanded.contains(path)
    }

    /// Flips the branch: absent paths are inserted, present paths are
    /// removed together with every descendant path.
    pub fn toggle(&mut self, path: &BranchPath) {
        if self.expanded.remove(path) {
            self.drop_descendants(path);
        } else {
            self.expanded.insert(path.clone());
        }
    }

    /// Expands one branch without touching its descendants.
    pub fn expand(&mut self, path: &BranchPath) {
        self.expanded.insert(path.clone());
    }

    /// Collapses one branch and forgets its descendants' expansion state.
    pub fn collapse(&mut self, path: &BranchPath) {
        self.expanded.remove(path);
        self.drop_descendants(path);
    }

    /// Expands every branch of `tree`.
    pub fn expand_all<R>(&mut self, tree: &RecordTree<R>) {
        self.insert_subtree(tree.root());
    }

    /// Collapses everything.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Drops all paths, including ghosts from older trees.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    /// Number of expanded paths.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Returns `true` when nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Iterates the expanded paths in arbitrary order.
    pub fn paths(&self) -> impl Iterator<Item = &BranchPath> {
        self.expanded.iter()
    }

    fn drop_descendants(&mut self, path: &BranchPath) {
        self.expanded.retain(|candidate| !candidate.is_descendant_of(path));
    }

    fn insert_subtree(&mut self, node: &RecordNode) {
        if !node.path().is_root() {
            self.expanded.insert(node.path().clone());
        }
        for child in node.children() {
            self.insert_subtree(child);
        }
    }
}

impl FromIterator<BranchPath> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = BranchPath>>(iter: I) -> Self {
        Self {
            expanded: iter.into_iter().collect(),
        }
    }
}

impl Extend<BranchPath> for ExpansionSet {
    fn extend<I: IntoIterator<Item = BranchPath>>(&mut self, iter: I) {
        self.expanded.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelDef;

    #[test]
    fn toggle_expands_one_level_only() {
        let mut expansion = ExpansionSet::new();
        let error = BranchPath::from("ERROR");

        expansion.toggle(&error);
        assert!(expansion.is_expanded(&error));
        assert!(!expansion.is_expanded(&BranchPath::from("ERROR:DB")));
    }

    #[test]
    fn collapsing_a_branch_forgets_its_descendants() {
        let mut expansion = ExpansionSet::new();
        let error = BranchPath::from("ERROR");
        let db = BranchPath::from("ERROR:DB");

        expansion.toggle(&error);
        expansion.toggle(&db);
        assert!(expansion.is_expanded(&db));

        expansion.toggle(&error);
        assert!(!expansion.is_expanded(&error));
        assert!(!expansion.is_expanded(&db));

        // Reopening the parent must not resurrect the child.
        expansion.toggle(&error);
        assert!(expansion.is_expanded(&error));
        assert!(!expansion.is_expanded(&db));
    }

    #[test]
    fn collapse_leaves_unrelated_paths_alone() {
        let mut expansion = ExpansionSet::new();
        let error = BranchPath::from("ERROR");
        let errors = BranchPath::from("ERRORS:DB");
        let info = BranchPath::from("INFO");

        expansion.expand(&error);
        expansion.expand(&errors);
        expansion.expand(&info);

        expansion.collapse(&error);
        assert!(expansion.is_expanded(&errors));
        assert!(expansion.is_expanded(&info));
    }

    #[test]
    fn ghost_paths_survive_unrelated_toggles() {
        let mut expansion = ExpansionSet::new();
        let ghost = BranchPath::from("GONE:branch");
        expansion.expand(&ghost);

        expansion.toggle(&BranchPath::from("ERROR"));
        assert!(expansion.is_expanded(&ghost));
    }

    #[test]
    fn expand_all_covers_every_branch() {
        fn by_level(record: &(&str, &str)) -> Option<String> {
            Some(record.0.to_owned())
        }
        fn by_category(record: &(&str, &str)) -> Option<String> {
            Some(record.1.to_owned())
        }

        let tree = RecordTree::build(
            vec![("ERROR", "DB"), ("INFO", "Sys")],
            &[LevelDef::new(by_level), LevelDef::new(by_category)],
        );

        let mut expansion = ExpansionSet::new();
        expansion.expand_all(&tree);
        assert_eq!(expansion.len(), 4);
        assert!(expansion.is_expanded(&BranchPath::from("ERROR")));
        assert!(expansion.is_expanded(&BranchPath::from("ERROR:DB")));
        assert!(expansion.is_expanded(&BranchPath::from("INFO:Sys")));

        expansion.collapse_all();
        assert!(expansion.is_empty());
    }
}
