use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use crate::level::{LevelDef, SiblingOrder};
use crate::path::{BranchPath, SEPARATOR};

/// One branch of the grouped tree.
///
/// Interior branches hold child branches; branches at the deepest level are
/// buckets holding the positions of their records in the tree's flat record
/// list, in source order.
#[derive(Clone, Debug)]
pub struct RecordNode {
    key: String,
    path: BranchPath,
    depth: u16,
    children: Vec<RecordNode>,
    records: Vec<usize>,
    record_count: usize,
}

impl RecordNode {
    /// The bucket key of this branch.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The branch's address, usable with an `ExpansionSet`.
    pub const fn path(&self) -> &BranchPath {
        &self.path
    }

    /// Depth below the invisible root (top-level branches are at 1).
    pub const fn depth(&self) -> u16 {
        self.depth
    }

    /// Child branches, in sibling order.
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Source positions of the records bucketed directly in this branch.
    ///
    /// Empty for interior branches; buckets at the deepest level list their
    /// records here in input order.
    pub fn record_indices(&self) -> &[usize] {
        &self.records
    }

    /// Returns `true` for deepest-level branches that hold records directly.
    pub fn is_bucket(&self) -> bool {
        self.children.is_empty()
    }

    /// Total records in this branch's subtree.
    pub const fn record_count(&self) -> usize {
        self.record_count
    }

    /// Visits the source index of every record in this branch's subtree.
    pub fn for_each_record<F: FnMut(usize)>(&self, f: &mut F) {
        for &index in &self.records {
            f(index);
        }
        for child in &self.children {
            child.for_each_record(f);
        }
    }
}

/// An immutable grouping of a flat record list into a multi-level tree.
///
/// Built once per fetch; there is no incremental update. When the record
/// list or the grouping levels change, build a new tree and invalidate any
/// state that cached rows from the old one.
#[derive(Clone, Debug)]
pub struct RecordTree<R> {
    records: Vec<R>,
    root: RecordNode,
    levels: u16,
}

impl<R> RecordTree<R> {
    /// Groups `records` by the ordered `levels`.
    ///
    /// Deterministic for a given input: sibling order follows each level's
    /// [`SiblingOrder`] and every bucket keeps its records in input order.
    /// Records whose extractor yields `None` or `""` land in the level's
    /// fallback bucket; no record is ever dropped. An empty input produces a
    /// root with no children. With an empty `levels` slice the root itself
    /// becomes the only bucket.
    pub fn build(records: Vec<R>, levels: &[LevelDef<R>]) -> Self {
        let indices: Vec<usize> = (0..records.len()).collect();
        let root = split(&records, String::new(), BranchPath::root(), 0, indices, levels);
        Self {
            records,
            root,
            levels: u16::try_from(levels.len()).unwrap_or(u16::MAX),
        }
    }

    /// The invisible root node; its children are the top-level branches.
    pub const fn root(&self) -> &RecordNode {
        &self.root
    }

    /// The flat record list, in the order it was supplied.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Looks up one record by its source position.
    pub fn record(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    /// Total number of records.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no records were supplied.
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of grouping levels (bucket depth).
    pub const fn levels(&self) -> u16 {
        self.levels
    }

    /// Resolves a branch path against this tree, if the branch exists.
    pub fn node_at(&self, path: &BranchPath) -> Option<&RecordNode> {
        let mut node = &self.root;
        for segment in path.as_str().split(SEPARATOR) {
            if segment.is_empty() {
                continue;
            }
            node = node.children.iter().find(|child| child.key == segment)?;
        }
        Some(node)
    }
}

fn split<R>(
    records: &[R],
    key: String,
    path: BranchPath,
    depth: u16,
    indices: Vec<usize>,
    levels: &[LevelDef<R>],
) -> RecordNode {
    let record_count = indices.len();
    let Some((level, rest)) = levels.split_first() else {
        return RecordNode {
            key,
            path,
            depth,
            children: Vec::new(),
            records: indices,
            record_count,
        };
    };

    // Bucket in input order so leaf lists stay source-ordered.
    let mut buckets: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    for index in indices {
        let bucket = (level.key)(&records[index])
            .filter(|extracted| !extracted.is_empty())
            .unwrap_or_else(|| level.fallback.to_owned());
        buckets.entry(bucket).or_default().push(index);
    }

    let mut keys: Vec<String> = buckets.keys().cloned().collect();
    match level.order {
        SiblingOrder::Alphabetical => keys.sort_unstable(),
        SiblingOrder::Ranked(_) => keys.sort_unstable_by(|a, b| {
            match (level.order.rank_of(a), level.order.rank_of(b)) {
                (Some(left), Some(right)) => left.cmp(&right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.cmp(b),
            }
        }),
    }

    let children = keys
        .into_iter()
        .map(|bucket| {
            let child_indices = buckets.remove(&bucket).unwrap_or_default();
            let child_path = path.child(&bucket);
            split(records, bucket, child_path, depth + 1, child_indices, rest)
        })
        .collect();

    RecordNode {
        key,
        path,
        depth,
        children,
        records: Vec::new(),
        record_count,
    }
}
