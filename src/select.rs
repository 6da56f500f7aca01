use rustc_hash::FxHashSet;

use crate::identity::{Identify, RecordIdentity};
use crate::tree::{RecordNode, RecordTree};

/// Multi-select over leaf records, keyed by [`RecordIdentity`].
///
/// The set tolerates identities that no longer resolve against the current
/// record list (after a refresh, say): [`SelectionSet::materialize`] just
/// skips them, and nothing flags them as an error.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    selected: FxHashSet<RecordIdentity>,
}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test for one identity.
    pub fn is_selected(&self, identity: &RecordIdentity) -> bool {
        self.selected.contains(identity)
    }

    /// Flips one identity in or out of the set.
    pub fn toggle(&mut self, identity: RecordIdentity) {
        if self.selected.contains(&identity) {
            self.selected.remove(&identity);
        } else {
            self.selected.insert(identity);
        }
    }

    /// Adds every record of `records` to the selection.
    pub fn select_all<R: Identify>(&mut self, records: &[R]) {
        self.selected.reserve(records.len());
        for (index, record) in records.iter().enumerate() {
            self.selected.insert(RecordIdentity::of(record, index));
        }
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected identities, stale ones included.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Resolves the selection against `records`, preserving source order.
    ///
    /// Identities that no longer match anything are silently omitted.
    pub fn materialize<'a, R: Identify>(&self, records: &'a [R]) -> Vec<&'a R> {
        records
            .iter()
            .enumerate()
            .filter(|(index, record)| self.selected.contains(&RecordIdentity::of(*record, *index)))
            .map(|(_, record)| record)
            .collect()
    }

    /// Counts the selected records bucketed under `node` of `tree`.
    pub fn count_under<R: Identify>(&self, tree: &RecordTree<R>, node: &RecordNode) -> usize {
        let mut count = 0;
        node.for_each_record(&mut |index| {
            if let Some(record) = tree.record(index)
                && self.selected.contains(&RecordIdentity::of(record, index))
            {
                count += 1;
            }
        });
        count
    }

    /// Iterates the selected identities in arbitrary order.
    pub fn identities(&self) -> impl Iterator<Item = &RecordIdentity> {
        self.selected.iter()
    }
}

impl FromIterator<RecordIdentity> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = RecordIdentity>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

impl Extend<RecordIdentity> for SelectionSet {
    fn extend<I: IntoIterator<Item = RecordIdentity>>(&mut self, iter: I) {
        self.selected.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::level::LevelDef;

    #[derive(PartialEq, Debug)]
    struct LogLine {
        timestamp: &'static str,
        message: &'static str,
    }

    impl Identify for LogLine {
        fn timestamp(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.timestamp)
        }

        fn message(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.message)
        }
    }

    const fn lines() -> [LogLine; 3] {
        [
            LogLine {
                timestamp: "10:00",
                message: "a",
            },
            LogLine {
                timestamp: "10:01",
                message: "b",
            },
            LogLine {
                timestamp: "10:02",
                message: "c",
            },
        ]
    }

    #[test]
    fn toggle_twice_restores_the_previous_state() {
        let records = lines();
        let mut selection = SelectionSet::new();
        let identity = RecordIdentity::of(&records[1], 1);

        selection.toggle(identity.clone());
        assert!(selection.is_selected(&identity));
        selection.toggle(identity.clone());
        assert!(!selection.is_selected(&identity));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_then_materialize_round_trips_in_order() {
        let records = lines();
        let mut selection = SelectionSet::new();
        selection.select_all(&records);

        let materialized = selection.materialize(&records);
        let expected: Vec<&LogLine> = records.iter().collect();
        assert_eq!(materialized, expected);
    }

    #[test]
    fn duplicate_records_select_independently() {
        let records = [
            LogLine {
                timestamp: "10:00",
                message: "same",
            },
            LogLine {
                timestamp: "10:00",
                message: "same",
            },
        ];
        let mut selection = SelectionSet::new();
        selection.toggle(RecordIdentity::of(&records[0], 0));

        assert!(selection.is_selected(&RecordIdentity::of(&records[0], 0)));
        assert!(!selection.is_selected(&RecordIdentity::of(&records[1], 1)));
        assert_eq!(selection.materialize(&records).len(), 1);
    }

    #[test]
    fn stale_identities_are_skipped_not_flagged() {
        let before = lines();
        let mut selection = SelectionSet::new();
        selection.select_all(&before);

        // A refresh shrank the list; stale identities stay in the set but
        // disappear from materialize output.
        let after = [LogLine {
            timestamp: "10:00",
            message: "a",
        }];
        let materialized = selection.materialize(&after);
        assert_eq!(materialized, vec![&after[0]]);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn count_under_follows_the_tree() {
        fn by_message(record: &LogLine) -> Option<String> {
            Some(record.message.to_owned())
        }

        let tree = RecordTree::build(lines().into(), &[LevelDef::new(by_message)]);
        let mut selection = SelectionSet::new();
        selection.toggle(RecordIdentity::of(&tree.records()[0], 0));
        selection.toggle(RecordIdentity::of(&tree.records()[2], 2));

        assert_eq!(selection.count_under(&tree, tree.root()), 2);
        let bucket = tree.node_at(&"a".into()).unwrap();
        assert_eq!(selection.count_under(&tree, bucket), 1);
    }
}
