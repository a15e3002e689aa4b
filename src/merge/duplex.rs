use crate::model::{Adduct, Base, BasePositionCounters, DuplexConsensus, ReferenceCache, Strand, StrandConsensus, Variant};
use crate::utils::FastMap;

/// Combines the positive- and negative-strand [`StrandConsensus`]es of one
/// family into a [`DuplexConsensus`], classifying every shared position per
/// the case table in §4.3.
///
/// Returns `None` if the strands don't overlap (`end < start`); the original
/// implementation has no such guard, but an empty span has nothing to merge
/// and the caller (family-level reduction) simply drops it like any other
/// failed merge.
pub(crate) fn merge_strands(
    pos: &StrandConsensus, neg: &StrandConsensus, cache: &ReferenceCache, counters: &mut BasePositionCounters,
) -> Option<DuplexConsensus> {
    let start = pos.start.max(neg.start);
    let end = pos.end.min(neg.end);
    if end < start {
        return None;
    }

    let mut cons = String::with_capacity((end - start + 1) as usize);
    let mut variants: FastMap<i64, Variant> = FastMap::default();
    let mut adducts: FastMap<i64, Adduct> = FastMap::default();
    let mut nbases = 0u32;
    let mut total_variants = 0u32;
    let mut total_variants_and_adducts = 0u32;

    for refpos in start..=end {
        let p = pos.base_at(refpos).unwrap_or(Base::N);
        let n = neg.base_at(refpos).unwrap_or(Base::N);

        if !p.is_atcg() || !n.is_atcg() {
            cons.push('N');
            continue;
        }

        cons.push(p.iupac(n));
        nbases += 1;

        let readpos = (refpos - start).min(end - refpos) + 1;
        counters.record_read(readpos);

        let Some(refb) = cache.get(&pos.contig, refpos) else {
            continue;
        };
        if !refb.is_atcg() {
            continue;
        }

        let pos_mismatch = p != refb;
        let neg_mismatch = n != refb;

        if pos_mismatch && neg_mismatch {
            variants.insert(refpos, Variant { var: p, refb });
            counters.record_variant(readpos);

            if p != n {
                adducts.insert(refpos, Adduct { strand: Strand::Neg, var: n.complement(), refb: refb.complement() });
                counters.record_adduct(readpos);
            }

            total_variants += 1;
            total_variants_and_adducts += 1;
        } else if pos_mismatch {
            adducts.insert(refpos, Adduct { strand: Strand::Pos, var: p, refb });
            counters.record_adduct(readpos);
            total_variants_and_adducts += 1;
        } else if neg_mismatch {
            adducts.insert(refpos, Adduct { strand: Strand::Neg, var: n.complement(), refb: refb.complement() });
            counters.record_adduct(readpos);
            total_variants_and_adducts += 1;
        }
    }

    Some(DuplexConsensus {
        contig: pos.contig.clone(),
        start,
        end,
        nbases,
        cons,
        variants,
        adducts,
        total_variants,
        total_variants_and_adducts,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn strand(contig: &str, start: i64, end: i64, bases: &str) -> StrandConsensus {
        StrandConsensus {
            contig: contig.to_owned(),
            start,
            end,
            cons: bases.bytes().map(Base::from_u8).collect(),
            variants: FastMap::default(),
        }
    }

    fn reference(seq: &str, start: i64) -> ReferenceCache {
        let mut cache = ReferenceCache::new();
        for (i, b) in seq.bytes().enumerate() {
            cache.record("chr1", start + i as i64, Base::from_u8(b));
        }
        cache
    }

    #[test]
    fn pure_match() {
        let cache = reference("ACGT", 100);
        let pos = strand("chr1", 100, 103, "ACGT");
        let neg = strand("chr1", 100, 103, "ACGT");
        let mut counters = BasePositionCounters::new();

        let dsc = merge_strands(&pos, &neg, &cache, &mut counters).unwrap();

        assert_eq!(dsc.cons, "ACGT");
        assert_eq!(dsc.nbases, 4);
        assert!(dsc.variants.is_empty());
        assert!(dsc.adducts.is_empty());
        assert_eq!(counters.nreads[&1], 2);
        assert_eq!(counters.nreads[&2], 2);
    }

    #[test]
    fn confirmed_variant() {
        let cache = reference("ACGT", 100);
        let pos = strand("chr1", 100, 103, "AGGT");
        let neg = strand("chr1", 100, 103, "AGGT");
        let mut counters = BasePositionCounters::new();

        let dsc = merge_strands(&pos, &neg, &cache, &mut counters).unwrap();

        assert_eq!(dsc.variants.len(), 1);
        let v = dsc.variants[&101];
        assert_eq!(v.var, Base::G);
        assert_eq!(v.refb, Base::C);
        assert!(dsc.adducts.is_empty());
        assert_eq!(dsc.total_variants, 1);
        assert_eq!(dsc.total_variants_and_adducts, 1);
    }

    #[test]
    fn pos_only_adduct() {
        let cache = reference("ACGT", 100);
        let pos = strand("chr1", 100, 103, "AGGT");
        let neg = strand("chr1", 100, 103, "ACGT");
        let mut counters = BasePositionCounters::new();

        let dsc = merge_strands(&pos, &neg, &cache, &mut counters).unwrap();

        assert!(dsc.variants.is_empty());
        let a = dsc.adducts[&101];
        assert_eq!(a.strand, Strand::Pos);
        assert_eq!(a.var, Base::G);
        assert_eq!(a.refb, Base::C);
        assert_eq!(dsc.total_variants, 0);
        assert_eq!(dsc.total_variants_and_adducts, 1);
    }

    #[test]
    fn neg_only_adduct_is_complemented() {
        let cache = reference("ACGT", 100);
        let pos = strand("chr1", 100, 103, "ACGT");
        let neg = strand("chr1", 100, 103, "ACCT");
        let mut counters = BasePositionCounters::new();

        let dsc = merge_strands(&pos, &neg, &cache, &mut counters).unwrap();

        let a = dsc.adducts[&102];
        assert_eq!(a.strand, Strand::Neg);
        assert_eq!(a.var, Base::G);
        assert_eq!(a.refb, Base::C);
    }

    #[test]
    fn dual_mismatch_different_bases_counts_once() {
        let cache = reference("ACGT", 100);
        let pos = strand("chr1", 100, 103, "ATGT");
        let neg = strand("chr1", 100, 103, "AGGT");
        let mut counters = BasePositionCounters::new();

        let dsc = merge_strands(&pos, &neg, &cache, &mut counters).unwrap();

        let v = dsc.variants[&101];
        assert_eq!(v.var, Base::T);
        assert_eq!(v.refb, Base::C);

        let a = dsc.adducts[&101];
        assert_eq!(a.strand, Strand::Neg);
        assert_eq!(a.var, Base::C);
        assert_eq!(a.refb, Base::G);

        assert_eq!(dsc.total_variants, 1);
        assert_eq!(dsc.total_variants_and_adducts, 1);
    }

    #[test]
    fn unknown_reference_base_excludes_from_classification_but_counts_base() {
        let mut cache = ReferenceCache::new();
        cache.record("chr1", 100, Base::N);
        let pos = strand("chr1", 100, 100, "A");
        let neg = strand("chr1", 100, 100, "G");
        let mut counters = BasePositionCounters::new();

        let dsc = merge_strands(&pos, &neg, &cache, &mut counters).unwrap();
        assert_eq!(dsc.nbases, 1);
        assert!(dsc.variants.is_empty());
        assert!(dsc.adducts.is_empty());
    }

    #[test]
    fn non_overlapping_strands_yield_none() {
        let cache = reference("ACGT", 100);
        let pos = strand("chr1", 100, 101, "AC");
        let neg = strand("chr1", 200, 201, "AC");
        let mut counters = BasePositionCounters::new();
        assert!(merge_strands(&pos, &neg, &cache, &mut counters).is_none());
    }
}
