use crate::bam::BamError;
use crate::model::{FamilyId, Orientation, ReadRecord, Strand};
use crate::pipeline::Pipeline;
use crate::utils::FastMap;
use std::path::Path;

/// Writes the two specimen-level SSC rollup CSVs the plotting collaborator's
/// input contract expects (§4.6, §10.2): siblings of the threshold folders,
/// written once per invocation rather than once per bundle.
pub(crate) fn write_ssc_rollups(out_dir: &Path, specimen: &str, pipeline: &Pipeline) -> Result<(), BamError> {
    write_ssc_csv(&out_dir.join(format!("{specimen}.SSC.csv.gz")), pipeline)?;
    write_unfiltered_details_csv(&out_dir.join(format!("{specimen}.unfiltered.SSC.details.csv.gz")), pipeline)?;
    Ok(())
}

fn strand_read_count(ssc_info: &FastMap<FamilyId, FastMap<Strand, crate::model::StrandConsensus>>, family_id: &FamilyId, strand: Strand) -> u32 {
    if ssc_info.get(family_id).is_some_and(|s| s.contains_key(&strand)) { 2 } else { 0 }
}

fn read_span_len(reads: Option<&FastMap<Orientation, ReadRecord>>, orientation: Orientation) -> Option<i64> {
    reads.and_then(|r| r.get(&orientation)).map(|r| r.end - r.start + 1)
}

/// One row per family kept in the unfiltered bundle (§4.6).
fn write_ssc_csv(path: &Path, pipeline: &Pipeline) -> Result<(), BamError> {
    log::info!("writing SSC rollup to {}", path.display());
    let w = crate::utils::io::create_writer(path)?;
    let mut writer = csv::Writer::from_writer(w);
    writer
        .write_record([
            "family_id", "ref_name", "start", "end", "rlen_fwd", "rlen_rev", "nreads_pos", "nreads_neg", "merged_len",
            "n_mutations", "n_adducts",
        ])
        .map_err(csv_err)?;

    let mut family_ids: Vec<&FamilyId> = pipeline.dsc_info.keys().collect();
    family_ids.sort();

    for family_id in family_ids {
        let dsc = &pipeline.dsc_info[family_id];
        let pos_reads = pipeline.read_info.get(family_id).and_then(|s| s.get(&Strand::Pos));
        let rlen_fwd = read_span_len(pos_reads, Orientation::Fwd).unwrap_or(0);
        let rlen_rev = read_span_len(pos_reads, Orientation::Rev).unwrap_or(0);
        let nreads_pos = strand_read_count(&pipeline.ssc_info, family_id, Strand::Pos);
        let nreads_neg = strand_read_count(&pipeline.ssc_info, family_id, Strand::Neg);

        writer
            .write_record([
                family_id.as_str(),
                dsc.contig.as_str(),
                &dsc.start.to_string(),
                &dsc.end.to_string(),
                &rlen_fwd.to_string(),
                &rlen_rev.to_string(),
                &nreads_pos.to_string(),
                &nreads_neg.to_string(),
                &dsc.cons.len().to_string(),
                &dsc.total_variants.to_string(),
                &dsc.adducts.len().to_string(),
            ])
            .map_err(csv_err)?;
    }

    writer.flush().map_err(BamError::Io)?;
    Ok(())
}

/// One row per family observed anywhere in the read-parsing stage, including
/// families that never reached the DSC map (§4.6).
fn write_unfiltered_details_csv(path: &Path, pipeline: &Pipeline) -> Result<(), BamError> {
    log::info!("writing unfiltered SSC details to {}", path.display());
    let w = crate::utils::io::create_writer(path)?;
    let mut writer = csv::Writer::from_writer(w);
    writer.write_record(["family_id", "nreads_pos", "nreads_neg"]).map_err(csv_err)?;

    let mut family_ids: Vec<&FamilyId> = pipeline.read_info.keys().collect();
    family_ids.sort();

    for family_id in family_ids {
        let nreads_pos = strand_read_count(&pipeline.ssc_info, family_id, Strand::Pos);
        let nreads_neg = strand_read_count(&pipeline.ssc_info, family_id, Strand::Neg);
        writer.write_record([family_id.as_str(), &nreads_pos.to_string(), &nreads_neg.to_string()]).map_err(csv_err)?;
    }

    writer.flush().map_err(BamError::Io)?;
    Ok(())
}

fn csv_err(e: csv::Error) -> BamError {
    BamError::Io(std::io::Error::other(e))
}
