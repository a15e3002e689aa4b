use crate::bam::StrandReader;
use crate::merge::{duplex, strand};
use crate::model::{BasePositionCounters, DuplexConsensus, FamilyId, Orientation, ReadRecord, ReferenceCache, Strand, StrandConsensus};
use crate::utils::FastMap;
use std::path::Path;

/// The complete in-memory accumulator for one specimen (§2, §3): every stage
/// from `ReadParser` through `DuplexMerger` writes into this struct, and
/// `ThresholdEmitter`/`SummaryFormatter` only ever read from it afterwards.
#[derive(Default)]
pub(crate) struct Pipeline {
    pub(crate) cache: ReferenceCache,
    /// family → strand → orientation → parsed read, the raw per-read state
    /// before any merging (§2 step 2).
    pub(crate) read_info: FastMap<FamilyId, FastMap<Strand, FastMap<Orientation, ReadRecord>>>,
    /// family → strand → merged single-strand consensus (§2 step 3).
    pub(crate) ssc_info: FastMap<FamilyId, FastMap<Strand, StrandConsensus>>,
    /// family → merged duplex consensus (§2 step 4); the complete `dsc_info`
    /// map §2 refers to.
    pub(crate) dsc_info: FastMap<FamilyId, DuplexConsensus>,
    pub(crate) base_positions: BasePositionCounters,
}

impl Pipeline {
    pub(crate) fn new() -> Pipeline {
        Pipeline::default()
    }

    /// One streaming pass over a strand's SSC BAM (§5): parses every mapped
    /// record into the `read_info` accumulator, seeding the reference cache
    /// along the way. Per-record parse failures (missing/malformed MD tag)
    /// are logged at INFO and the record is dropped; the BAM open itself is
    /// a configuration error and propagates.
    pub(crate) fn parse_bam<P: AsRef<Path>>(&mut self, path: P, strand: Strand) -> Result<(), crate::bam::BamError> {
        let path = path.as_ref();
        log::info!("reading from {}", path.display());
        let mut reader = StrandReader::open(path)?;

        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    log::info!("dropping unparseable record in {}: {e}", path.display());
                    continue;
                }
            };

            let (family_id, orientation, read) = crate::parser::parse_read(&record, &mut self.cache);

            self.read_info.entry(family_id).or_default().entry(strand).or_default().insert(orientation, read);
        }

        Ok(())
    }

    /// §2 step 3: merges the forward/reverse read of every (family, strand)
    /// pair into a `StrandConsensus`. Families missing a strand entirely are
    /// simply absent from `ssc_info` for that strand (§4.2 drops, not
    /// errors).
    pub(crate) fn merge_fwd_rev_per_strand(&mut self) {
        for (family_id, strands) in &self.read_info {
            for (&s, reads) in strands {
                if let Some(consensus) = strand::merge_fwd_rev_per_strand(family_id, s, reads, &self.cache) {
                    self.ssc_info.entry(family_id.clone()).or_default().insert(s, consensus);
                }
            }
        }
    }

    /// §2 step 4: merges the pos/neg `StrandConsensus` of every family with
    /// both strands present into the final `DuplexConsensus`.
    pub(crate) fn merge_pos_neg_strands(&mut self) {
        for (family_id, strands) in &self.ssc_info {
            let (Some(pos), Some(neg)) = (strands.get(&Strand::Pos), strands.get(&Strand::Neg)) else {
                log::info!("family {family_id}: missing pos or neg strand consensus, dropping family");
                continue;
            };

            if let Some(dsc) = duplex::merge_strands(pos, neg, &self.cache, &mut self.base_positions) {
                self.dsc_info.insert(family_id.clone(), dsc);
            } else {
                log::info!("family {family_id}: pos/neg strands do not overlap, dropping family");
            }
        }
    }

    /// Runs the full pipeline over the two strand BAMs (§2 control flow).
    pub(crate) fn run(&mut self, pos_bam: &Path, neg_bam: &Path) -> Result<(), crate::bam::BamError> {
        self.parse_bam(pos_bam, Strand::Pos)?;
        self.parse_bam(neg_bam, Strand::Neg)?;
        self.merge_fwd_rev_per_strand();
        self.merge_pos_neg_strands();
        Ok(())
    }
}
