use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub(crate) const SEPARATOR: char = ':';

/// Address of a branch in the grouped tree: the chain of ancestor bucket
/// keys joined with `:` (`"ERROR"`, `"ERROR:DatabaseConnector"`).
///
/// Paths stay stable across rebuilds as long as the same key chain recurs.
/// Bucket keys are not escaped, so a key containing `:` can alias a nested
/// path; pick extractors accordingly.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchPath(String);

impl BranchPath {
    /// The empty path addressing the invisible root.
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns `true` for the root path.
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Extends the path with one more bucket key.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_owned())
        } else {
            Self(format!("{}{SEPARATOR}{key}", self.0))
        }
    }

    /// The last key segment (the branch's own bucket key).
    pub fn leaf_key(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or("")
    }

    /// The parent path (`None` for the root; top-level branches yield the
    /// root path).
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.rfind(SEPARATOR).map_or_else(Self::root, |position| {
            Self(self.0[..position].to_owned())
        }))
    }

    /// Number of key segments (0 for the root).
    pub fn depth(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.matches(SEPARATOR).count() + 1
        }
    }

    /// Segments of the path, shallowest first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|segment| !segment.is_empty())
    }

    /// Returns `true` if `self` lies strictly below `ancestor`.
    ///
    /// Segment-aware: `"ERROR:DB"` descends from `"ERROR"`, while
    /// `"ERRORS:DB"` does not.
    pub fn is_descendant_of(&self, ancestor: &Self) -> bool {
        if ancestor.0.is_empty() {
            return !self.0.is_empty();
        }
        self.0.len() > ancestor.0.len()
            && self.0.starts_with(ancestor.0.as_str())
            && self.0.as_bytes()[ancestor.0.len()] == b':'
    }

    /// The joined textual form of the path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BranchPath {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for BranchPath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_joins_segments() {
        let path = BranchPath::root().child("ERROR").child("DB");
        assert_eq!(path.as_str(), "ERROR:DB");
        assert_eq!(path.leaf_key(), "DB");
        assert_eq!(path.depth(), 2);
    }

    #[test]
    fn parent_walks_back_to_root() {
        let path = BranchPath::from("ERROR:DB");
        let parent = path.parent().unwrap();
        assert_eq!(parent.as_str(), "ERROR");
        assert_eq!(parent.parent().unwrap(), BranchPath::root());
        assert_eq!(BranchPath::root().parent(), None);
    }

    #[test]
    fn descendant_check_is_segment_aware() {
        let error = BranchPath::from("ERROR");
        assert!(BranchPath::from("ERROR:DB").is_descendant_of(&error));
        assert!(BranchPath::from("ERROR:DB:deep").is_descendant_of(&error));
        assert!(!BranchPath::from("ERRORS:DB").is_descendant_of(&error));
        assert!(!error.is_descendant_of(&error));
    }

    #[test]
    fn everything_descends_from_root() {
        let root = BranchPath::root();
        assert!(BranchPath::from("ERROR").is_descendant_of(&root));
        assert!(!root.is_descendant_of(&root));
    }

    #[test]
    fn segments_iterate_in_order() {
        let path = BranchPath::from("sales:orders");
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments, vec!["sales", "orders"]);
        assert_eq!(BranchPath::root().segments().count(), 0);
    }
}
