use crate::model::base::Base;
use crate::utils::FastMap;

/// `(contig, refpos) → reference base`, populated lazily as reads are
/// parsed (§3, §9). There is no reference FASTA input: the cache is filled
/// entirely from aligned-pair extraction, so a position is only known once
/// some read has aligned over it.
#[derive(Debug, Default)]
pub(crate) struct ReferenceCache {
    by_contig: FastMap<String, FastMap<i64, Base>>,
}

impl ReferenceCache {
    pub(crate) fn new() -> ReferenceCache {
        ReferenceCache::default()
    }

    /// Records the reference base at `(contig, refpos)`, uppercasing first
    /// so soft-masked positions are cached consistently (§4.1). Later writes
    /// to an already-cached position are idempotent in practice (the
    /// reference doesn't change base between reads) and are simply
    /// overwritten.
    pub(crate) fn record(&mut self, contig: &str, refpos: i64, base: Base) {
        self.by_contig
            .entry(contig.to_owned())
            .or_default()
            .insert(refpos, base);
    }

    /// The cached reference base at `(contig, refpos)`, if any aligned read
    /// has covered that position.
    pub(crate) fn get(&self, contig: &str, refpos: i64) -> Option<Base> {
        self.by_contig.get(contig)?.get(&refpos).copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn records_and_retrieves_per_contig() {
        let mut cache = ReferenceCache::new();
        cache.record("chr1", 100, Base::A);
        cache.record("chr2", 100, Base::G);

        assert_eq!(cache.get("chr1", 100), Some(Base::A));
        assert_eq!(cache.get("chr2", 100), Some(Base::G));
        assert_eq!(cache.get("chr1", 101), None);
        assert_eq!(cache.get("chr3", 100), None);
    }
}
