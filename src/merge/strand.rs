use crate::model::{FamilyId, Orientation, ReadRecord, ReferenceCache, Strand, StrandConsensus, StrandVariant};
use crate::utils::FastMap;
use std::collections::hash_map::Entry;

/// Combines the forward and reverse [`ReadRecord`]s of one strand of one
/// family into a [`StrandConsensus`] (§4.2).
///
/// Any of the three preconditions failing is logged at `INFO` (§7) and the
/// family-strand is dropped — callers must tolerate a missing strand rather
/// than treat it as fatal.
pub(crate) fn merge_fwd_rev_per_strand(
    family_id: &FamilyId, strand: Strand, reads: &FastMap<Orientation, ReadRecord>, cache: &ReferenceCache,
) -> Option<StrandConsensus> {
    let Some(fwd) = reads.get(&Orientation::Fwd) else {
        log::info!("family {family_id} strand {strand}: missing forward read, dropping strand");
        return None;
    };
    let Some(rev) = reads.get(&Orientation::Rev) else {
        log::info!("family {family_id} strand {strand}: missing reverse read, dropping strand");
        return None;
    };

    if fwd.contig != rev.contig {
        log::info!(
            "family {family_id} strand {strand}: forward/reverse reads on different contigs ({} vs {}), dropping strand",
            fwd.contig,
            rev.contig
        );
        return None;
    }

    if fwd.start >= rev.end {
        log::info!(
            "family {family_id} strand {strand}: reads not oriented inward (fwd.start={} rev.end={}), dropping strand",
            fwd.start,
            rev.end
        );
        return None;
    }

    let start = fwd.start;
    let end = rev.end;

    let mut variants: FastMap<i64, StrandVariant> = FastMap::default();

    // fwd first, then rev: rev overwrites fwd at a shared position (§4.2).
    for (refpos, &var) in &fwd.variants {
        let readpos = (refpos - fwd.start) + 1;
        let refb = cache.get(&fwd.contig, *refpos).expect("reference cache seeded during parsing");
        variants.insert(*refpos, StrandVariant { readpos, var, refb });
    }
    for (refpos, &var) in &rev.variants {
        let readpos = (rev.end - refpos) + 1;
        let refb = cache.get(&rev.contig, *refpos).expect("reference cache seeded during parsing");
        match variants.entry(*refpos) {
            Entry::Occupied(mut slot) => {
                slot.insert(StrandVariant { readpos, var, refb });
            }
            Entry::Vacant(slot) => {
                slot.insert(StrandVariant { readpos, var, refb });
            }
        }
    }

    let mut cons = Vec::with_capacity((end - start + 1) as usize);
    for refpos in start..=end {
        let covered = (refpos >= fwd.start && refpos <= fwd.end) || (refpos >= rev.start && refpos <= rev.end);
        let base = if !covered {
            crate::model::Base::N
        } else if let Some(variant) = variants.get(&refpos) {
            variant.var
        } else {
            cache.get(&fwd.contig, refpos).unwrap_or(crate::model::Base::N)
        };
        cons.push(base);
    }

    Some(StrandConsensus { contig: fwd.contig.clone(), start, end, cons, variants })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::Base;

    fn read(contig: &str, start: i64, end: i64) -> ReadRecord {
        ReadRecord::new(contig.to_owned(), start, end)
    }

    #[test]
    fn merges_fwd_and_rev_spans() {
        let mut cache = ReferenceCache::new();
        for pos in 100..=107 {
            cache.record("chr1", pos, Base::A);
        }
        let fwd = read("chr1", 100, 103);
        let rev = read("chr1", 104, 107);
        let mut reads = FastMap::default();
        reads.insert(Orientation::Fwd, fwd);
        reads.insert(Orientation::Rev, rev);

        let consensus =
            merge_fwd_rev_per_strand(&FamilyId::new("fam1"), Strand::Pos, &reads, &cache).expect("should merge");

        assert_eq!(consensus.start, 100);
        assert_eq!(consensus.end, 107);
        assert_eq!(consensus.cons.len(), 8);
        assert!(consensus.cons.iter().all(|&b| b == Base::A));
    }

    #[test]
    fn missing_mate_drops_strand() {
        let cache = ReferenceCache::new();
        let mut reads = FastMap::default();
        reads.insert(Orientation::Fwd, read("chr1", 100, 103));

        assert!(merge_fwd_rev_per_strand(&FamilyId::new("fam1"), Strand::Pos, &reads, &cache).is_none());
    }

    #[test]
    fn non_inward_orientation_drops_strand() {
        let cache = ReferenceCache::new();
        let mut reads = FastMap::default();
        reads.insert(Orientation::Fwd, read("chr1", 104, 110));
        reads.insert(Orientation::Rev, read("chr1", 100, 103));

        assert!(merge_fwd_rev_per_strand(&FamilyId::new("fam1"), Strand::Pos, &reads, &cache).is_none());
    }

    #[test]
    fn rev_variant_overwrites_fwd_at_shared_position() {
        let mut cache = ReferenceCache::new();
        for pos in 100..=103 {
            cache.record("chr1", pos, Base::A);
        }
        let mut fwd = read("chr1", 100, 102);
        fwd.variants.insert(101, Base::G);
        let mut rev = read("chr1", 101, 103);
        rev.variants.insert(101, Base::T);

        let mut reads = FastMap::default();
        reads.insert(Orientation::Fwd, fwd);
        reads.insert(Orientation::Rev, rev);

        let consensus = merge_fwd_rev_per_strand(&FamilyId::new("fam1"), Strand::Pos, &reads, &cache).unwrap();
        assert_eq!(consensus.variants.get(&101).unwrap().var, Base::T);
        assert_eq!(consensus.base_at(101), Some(Base::T));
    }
}
