pub(crate) mod base;
pub(crate) mod counters;
pub(crate) mod duplex_consensus;
pub(crate) mod family;
pub(crate) mod read_record;
pub(crate) mod reference_cache;
pub(crate) mod strand_consensus;

pub(crate) use base::Base;
pub(crate) use counters::BasePositionCounters;
pub(crate) use duplex_consensus::{Adduct, DuplexConsensus, FilterOn, Variant};
pub(crate) use family::{FamilyId, Orientation, Strand};
pub(crate) use read_record::ReadRecord;
pub(crate) use reference_cache::ReferenceCache;
pub(crate) use strand_consensus::{StrandConsensus, StrandVariant};
