use crate::bam::error::BamError;
use rust_htslib::bam::{self, Read as _, record::{Cigar, CigarString}};
use std::path::Path;
use std::process::Command;

/// BAM flag values the output bundles use verbatim (§4.4): DSC and
/// positive-strand SSC records are emitted as a proper, forward-oriented
/// first-in-pair mate; negative-strand SSC records as the corresponding
/// reverse-complemented second-in-pair mate.
pub(crate) const FLAG_DSC: u16 = 99;
pub(crate) const FLAG_SSC_POS: u16 = 99;
pub(crate) const FLAG_SSC_NEG: u16 = 83;

/// Opens a BAM writer whose header is copied from the positive-strand input
/// BAM (§4.4: "reference id is resolved via the positive-input BAM's
/// header").
pub(crate) fn open_writer<P: AsRef<Path>>(path: P, template: &bam::HeaderView) -> Result<bam::Writer, BamError> {
    let header = bam::Header::from_template(template);
    Ok(bam::Writer::from_path(path, &header, bam::Format::Bam)?)
}

/// Synthesizes and writes one consensus record: a single ungapped match
/// spanning the whole consensus, mapping quality 20, and uniform `?`
/// (ASCII 63) base qualities (§4.4).
pub(crate) fn write_consensus_record(
    writer: &mut bam::Writer,
    tid: i32,
    qname: &str,
    start: i64,
    consensus: &[u8],
    flag: u16,
) -> Result<(), BamError> {
    let mut record = bam::Record::new();
    let cigar = CigarString(vec![Cigar::Match(consensus.len() as u32)]);
    let quals = vec![b'?' - 33; consensus.len()];

    record.set(qname.as_bytes(), Some(&cigar), consensus, &quals);
    record.set_tid(tid);
    record.set_pos(start);
    record.set_mapq(20);
    record.set_flags(flag);

    writer.write(&record)?;
    Ok(())
}

/// Sorts and indexes a just-written BAM in place via `samtools` (§1: "BAM
/// sort and index delegated to a standard tool", §5).
pub(crate) fn sort_and_index<P: AsRef<Path>>(path: P) -> Result<(), BamError> {
    let path = path.as_ref();
    let sorted = path.with_extension("sorted.bam");

    let status = Command::new("samtools").args(["sort", "-o"]).arg(&sorted).arg(path).status()?;
    if !status.success() {
        return Err(BamError::ExternalTool { tool: "samtools sort", status });
    }
    std::fs::rename(&sorted, path)?;

    let status = Command::new("samtools").arg("index").arg(path).status()?;
    if !status.success() {
        return Err(BamError::ExternalTool { tool: "samtools index", status });
    }

    Ok(())
}
