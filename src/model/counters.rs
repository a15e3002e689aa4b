use crate::utils::FastMap;

/// Global per-read-position tallies accumulated across every family as
/// [`crate::merge::duplex::DuplexMerger`] classifies positions (§3, §4.3).
/// `readpos` is the minimum distance to either end of the DSC span,
/// 1-based, so position counts fold symmetrically from both ends.
#[derive(Debug, Default)]
pub(crate) struct BasePositionCounters {
    pub(crate) nreads: FastMap<i64, u64>,
    pub(crate) variants: FastMap<i64, u64>,
    pub(crate) adducts: FastMap<i64, u64>,
}

impl BasePositionCounters {
    pub(crate) fn new() -> BasePositionCounters {
        BasePositionCounters::default()
    }

    pub(crate) fn record_read(&mut self, readpos: i64) {
        *self.nreads.entry(readpos).or_insert(0) += 1;
    }

    pub(crate) fn record_variant(&mut self, readpos: i64) {
        *self.variants.entry(readpos).or_insert(0) += 1;
    }

    pub(crate) fn record_adduct(&mut self, readpos: i64) {
        *self.adducts.entry(readpos).or_insert(0) += 1;
    }
}
