use crate::bam::error::BamError;
use crate::bam::record::AlignedRecord;
use rust_htslib::bam::{self, Read as _};
use std::path::Path;

/// A single sequential pass over one strand's SSC BAM (§5: "two successive
/// streaming passes over each input BAM"). Records that fail to parse
/// (missing/malformed MD tag) are surfaced as `Err` so the caller can log
/// and drop them per the per-family anomaly policy (§7); the BAM-level
/// open itself is a configuration error and propagates immediately.
pub(crate) struct StrandReader {
    reader: bam::Reader,
    header: bam::HeaderView,
}

impl StrandReader {
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<StrandReader, BamError> {
        let reader = bam::Reader::from_path(path)?;
        let header = reader.header().clone();
        Ok(StrandReader { reader, header })
    }

    pub(crate) fn header(&self) -> &bam::HeaderView {
        &self.header
    }

    /// Iterates the BAM in on-disk order, yielding one parsed record (or
    /// error) per entry. Unmapped records carry no reference span and are
    /// filtered out here since they can never contribute to a `ReadRecord`.
    pub(crate) fn records(&mut self) -> impl Iterator<Item = Result<AlignedRecord, BamError>> + '_ {
        let header = self.header.clone();
        self.reader.records().filter_map(move |record| match record {
            Ok(record) if record.is_unmapped() => None,
            Ok(record) => Some(AlignedRecord::from_htslib(&record, &header)),
            Err(e) => Some(Err(BamError::Htslib(e))),
        })
    }
}
