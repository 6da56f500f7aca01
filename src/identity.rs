use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Caller contract for telling records apart in the selection set.
///
/// Records with a natural primary key only need [`Identify::id`]. Records
/// without one (raw log lines, typically) get a synthesized identity built
/// from [`Identify::timestamp`], [`Identify::message`], and the record's
/// position in the source list, which stays unique even for byte-identical
/// duplicate lines.
pub trait Identify {
    /// Natural primary key, if the record carries one. Empty strings count
    /// as absent.
    fn id(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Timestamp field used for synthesized identities.
    fn timestamp(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    /// Message/body field used for synthesized identities.
    fn message(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
}

/// Selection identity of one record.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordIdentity {
    /// The record's own primary key.
    Natural(String),
    /// Fallback for records without a key: source fields plus the record's
    /// position in the flat input list.
    Synthesized {
        timestamp: String,
        message: String,
        index: usize,
    },
}

impl RecordIdentity {
    /// Derives the identity of `record` sitting at `index` in the source
    /// list.
    ///
    /// The index must come from the same list every time an identity is
    /// derived for a record. [`RecordTree`](crate::RecordTree) stores source
    /// positions in its buckets, so identities derived while rendering and
    /// while handling a toggle agree by construction.
    pub fn of<R: Identify>(record: &R, index: usize) -> Self {
        match record.id().filter(|id| !id.is_empty()) {
            Some(id) => Self::Natural(id.into_owned()),
            None => Self::Synthesized {
                timestamp: record.timestamp().into_owned(),
                message: record.message().into_owned(),
                index,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Keyed(&'static str);

    impl Identify for Keyed {
        fn id(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }
    }

    struct Raw {
        timestamp: &'static str,
        message: &'static str,
    }

    impl Identify for Raw {
        fn timestamp(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.timestamp)
        }

        fn message(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.message)
        }
    }

    #[test]
    fn natural_id_wins_over_position() {
        let identity = RecordIdentity::of(&Keyed("wh-42"), 7);
        assert_eq!(identity, RecordIdentity::Natural("wh-42".to_owned()));
        assert_eq!(identity, RecordIdentity::of(&Keyed("wh-42"), 9));
    }

    #[test]
    fn empty_id_falls_back_to_synthesis() {
        let identity = RecordIdentity::of(&Keyed(""), 3);
        assert!(matches!(identity, RecordIdentity::Synthesized { index: 3, .. }));
    }

    #[test]
    fn identical_duplicates_differ_by_position() {
        let a = Raw {
            timestamp: "12:00:00",
            message: "disk full",
        };
        let b = Raw {
            timestamp: "12:00:00",
            message: "disk full",
        };
        assert_ne!(RecordIdentity::of(&a, 0), RecordIdentity::of(&b, 1));
        assert_eq!(RecordIdentity::of(&a, 0), RecordIdentity::of(&b, 0));
    }
}
