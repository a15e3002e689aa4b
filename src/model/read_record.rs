use crate::model::base::Base;
use crate::utils::FastMap;

/// One aligned record reduced to what [`crate::merge::strand::StrandMerger`]
/// needs: its reference span and the sparse set of positions where the
/// query disagreed with the reference (§3).
#[derive(Debug, Clone)]
pub(crate) struct ReadRecord {
    pub(crate) contig: String,
    /// Leftmost 0-based reference position, inclusive.
    pub(crate) start: i64,
    /// Rightmost reference position; treated inclusively throughout this
    /// crate (§9 "off-by-one in end coordinates").
    pub(crate) end: i64,
    /// refpos → queried base, present only where query and reference are
    /// both `ATCG` and differ (§4.1).
    pub(crate) variants: FastMap<i64, Base>,
}

impl ReadRecord {
    pub(crate) fn new(contig: String, start: i64, end: i64) -> ReadRecord {
        ReadRecord {
            contig,
            start,
            end,
            variants: FastMap::default(),
        }
    }
}
