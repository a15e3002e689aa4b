use crate::model::base::Base;
use crate::utils::FastMap;

/// A mismatch retained by [`crate::merge::strand::StrandMerger`], tagged
/// with the read position it was observed at (§4.2).
#[derive(Debug, Clone, Copy)]
pub(crate) struct StrandVariant {
    /// 1-based distance from the 5' end of whichever mate (fwd or rev)
    /// contributed the overwriting value.
    pub(crate) readpos: i64,
    pub(crate) var: Base,
    pub(crate) refb: Base,
}

/// The forward/reverse merge of one strand of one family (§4.2).
#[derive(Debug, Clone)]
pub(crate) struct StrandConsensus {
    pub(crate) contig: String,
    pub(crate) start: i64,
    pub(crate) end: i64,
    /// One `Base` per reference position in `[start, end]`.
    pub(crate) cons: Vec<Base>,
    pub(crate) variants: FastMap<i64, StrandVariant>,
}

impl StrandConsensus {
    /// The consensus base at `refpos`, or `None` if `refpos` falls outside
    /// `[start, end]` (used when [`crate::merge::duplex::DuplexMerger`]
    /// trims both strands to their shared span).
    pub(crate) fn base_at(&self, refpos: i64) -> Option<Base> {
        if refpos < self.start || refpos > self.end {
            return None;
        }
        let idx = (refpos - self.start) as usize;
        self.cons.get(idx).copied()
    }
}
