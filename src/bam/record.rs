use crate::bam::error::BamError;
use crate::bam::md::{MdBase, expand_md};
use crate::model::Base;
use rust_htslib::bam::{self, HeaderView, record::Aux};

/// One reference position an aligned record actually covers: both the
/// query and reference are defined there, so it's eligible to become a
/// variant and to seed the [`crate::model::ReferenceCache`] (§4.1).
#[derive(Debug, Clone, Copy)]
pub(crate) struct AlignedPosition {
    pub(crate) refpos: i64,
    pub(crate) ref_base: Base,
    pub(crate) query_base: Base,
}

/// The fields of a BAM record this crate actually needs, extracted once up
/// front so the rest of the pipeline never touches `rust_htslib` types
/// directly (§1: "BAM file I/O primitives treated as a library").
pub(crate) struct AlignedRecord {
    pub(crate) qname: String,
    pub(crate) contig: String,
    pub(crate) is_reverse: bool,
    /// Leftmost 0-based reference position, inclusive.
    pub(crate) start: i64,
    /// Rightmost reference position, inclusive (htslib's `reference_end`
    /// is one past the last aligned base; this crate's span convention is
    /// inclusive throughout, §3/§9).
    pub(crate) end: i64,
    pub(crate) positions: Vec<AlignedPosition>,
}

impl AlignedRecord {
    pub(crate) fn from_htslib(record: &bam::Record, header: &HeaderView) -> Result<AlignedRecord, BamError> {
        let qname = String::from_utf8(record.qname().to_vec())
            .map_err(|_| BamError::InvalidQueryName(String::from_utf8_lossy(record.qname()).into_owned()))?;

        let contig = String::from_utf8_lossy(header.tid2name(record.tid() as u32)).into_owned();

        let md = match record.aux(b"MD") {
            Ok(Aux::String(s)) => s.to_owned(),
            _ => return Err(BamError::MissingMdTag(qname)),
        };
        let md_bases = expand_md(&qname, &md)?;

        let seq_bytes = record.seq().as_bytes();
        let pairs = record.aligned_pairs_full();

        let mut positions = Vec::with_capacity(md_bases.len());
        let mut md_iter = md_bases.into_iter();

        for pair in pairs {
            let [qpos, rpos] = pair;
            let (Some(qpos), Some(rpos)) = (qpos, rpos) else {
                // indel or clip: either side absent, skip entirely (§4.1)
                continue;
            };

            let Some(md_base) = md_iter.next() else {
                return Err(BamError::MalformedMdTag { qname: qname.clone(), md: md.clone() });
            };

            let query_base = Base::from_u8(seq_bytes[qpos as usize]);
            let ref_base = match md_base {
                MdBase::Match => query_base,
                MdBase::Mismatch(b) => b,
            };

            positions.push(AlignedPosition { refpos: rpos, ref_base, query_base });
        }

        Ok(AlignedRecord {
            qname,
            contig,
            is_reverse: record.is_reverse(),
            start: record.reference_start(),
            end: record.reference_end() - 1,
            positions,
        })
    }
}
