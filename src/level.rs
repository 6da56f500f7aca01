/// Bucket key extractor for one grouping level.
///
/// Returning `None` (or an empty string) routes the record into the level's
/// fallback bucket instead of dropping it.
pub type KeyFn<R> = fn(&R) -> Option<String>;

/// Ordering of sibling branches within one grouping level.
#[derive(Clone, Copy, Debug)]
pub enum SiblingOrder {
    /// Plain alphabetical order on the bucket key.
    Alphabetical,
    /// Keys listed here come first, in list order; keys not listed are
    /// appended afterward in alphabetical order.
    Ranked(&'static [&'static str]),
}

impl SiblingOrder {
    pub(crate) fn rank_of(self, key: &str) -> Option<usize> {
        match self {
            Self::Alphabetical => None,
            Self::Ranked(ranking) => ranking.iter().position(|candidate| *candidate == key),
        }
    }
}

/// Grouping definition for one tree level: key extractor, fallback bucket
/// label, and sibling ordering.
#[derive(Clone, Copy)]
pub struct LevelDef<R> {
    /// Extractor producing the bucket key for this level.
    pub key: KeyFn<R>,
    /// Bucket label for records whose extractor yields nothing.
    pub fallback: &'static str,
    /// Ordering of the level's sibling branches.
    pub order: SiblingOrder,
}

impl<R> LevelDef<R> {
    /// Creates an alphabetical level with the `"Other"` fallback bucket.
    pub const fn new(key: KeyFn<R>) -> Self {
        Self {
            key,
            fallback: "Other",
            order: SiblingOrder::Alphabetical,
        }
    }

    /// Overrides the fallback bucket label.
    pub const fn fallback(mut self, label: &'static str) -> Self {
        self.fallback = label;
        self
    }

    /// Orders known keys by their position in `ranking`; unknown keys are
    /// appended alphabetically.
    pub const fn ranked(mut self, ranking: &'static [&'static str]) -> Self {
        self.order = SiblingOrder::Ranked(ranking);
        self
    }
}
