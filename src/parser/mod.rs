use crate::bam::AlignedRecord;
use crate::model::{Base, FamilyId, Orientation, ReadRecord, ReferenceCache};

/// Translates one aligned record into a `(FamilyId, Orientation, ReadRecord)`
/// triple, seeding `cache` with every reference base the record actually
/// covers along the way (§4.1).
///
/// Indels and soft/hard clips contribute nothing here: `AlignedRecord` only
/// carries positions where both the query and reference are defined, so the
/// "either side absent" skip from §4.1 has already happened by the time a
/// record reaches this function.
pub(crate) fn parse_read(record: &AlignedRecord, cache: &mut ReferenceCache) -> (FamilyId, Orientation, ReadRecord) {
    let family_id = FamilyId::new(record.qname.clone());
    let orientation = if record.is_reverse { Orientation::Rev } else { Orientation::Fwd };

    let mut read = ReadRecord::new(record.contig.clone(), record.start, record.end);

    for position in &record.positions {
        cache.record(&record.contig, position.refpos, position.ref_base);

        if !position.ref_base.is_atcg() || !position.query_base.is_atcg() {
            continue;
        }
        if position.ref_base == position.query_base {
            continue;
        }

        read.variants.insert(position.refpos, position.query_base);
    }

    (family_id, orientation, read)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bam::record::AlignedPosition;

    fn rec(qname: &str, is_reverse: bool, start: i64, end: i64, positions: Vec<AlignedPosition>) -> AlignedRecord {
        AlignedRecord { qname: qname.to_owned(), contig: "chr1".to_owned(), is_reverse, start, end, positions }
    }

    #[test]
    fn records_mismatches_and_seeds_cache() {
        let mut cache = ReferenceCache::new();
        let record = rec(
            "fam1",
            false,
            100,
            102,
            vec![
                AlignedPosition { refpos: 100, ref_base: Base::A, query_base: Base::A },
                AlignedPosition { refpos: 101, ref_base: Base::C, query_base: Base::G },
                AlignedPosition { refpos: 102, ref_base: Base::T, query_base: Base::T },
            ],
        );

        let (family_id, orientation, read) = parse_read(&record, &mut cache);

        assert_eq!(family_id.as_str(), "fam1");
        assert_eq!(orientation, Orientation::Fwd);
        assert_eq!(read.variants.len(), 1);
        assert_eq!(read.variants.get(&101), Some(&Base::G));
        assert_eq!(cache.get("chr1", 100), Some(Base::A));
        assert_eq!(cache.get("chr1", 101), Some(Base::C));
    }

    #[test]
    fn masked_reference_excludes_from_classification() {
        let mut cache = ReferenceCache::new();
        let record = rec(
            "fam1",
            true,
            100,
            100,
            vec![AlignedPosition { refpos: 100, ref_base: Base::N, query_base: Base::A }],
        );

        let (_, orientation, read) = parse_read(&record, &mut cache);
        assert_eq!(orientation, Orientation::Rev);
        assert!(read.variants.is_empty());
        assert_eq!(cache.get("chr1", 100), Some(Base::N));
    }
}
