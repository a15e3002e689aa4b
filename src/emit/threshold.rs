use crate::bam::writer::{self, FLAG_DSC, FLAG_SSC_NEG, FLAG_SSC_POS};
use crate::bam::BamError;
use crate::emit::{gtf, positions, summary};
use crate::model::{DuplexConsensus, FamilyId, FilterOn, Strand, StrandConsensus};
use crate::utils::FastMap;
use rust_htslib::bam::HeaderView;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for one invocation (§6): the specimen name stamped into GTF
/// `source` fields and the summary JSON, and the filter metric/cap that
/// determines which threshold folders get written.
pub(crate) struct EmitConfig {
    pub(crate) specimen: String,
    pub(crate) filter_on: FilterOn,
    pub(crate) filter_max: u32,
}

/// The distinct values of the chosen filter metric across every family in
/// the DSC map, restricted to `<= filter_max` (§4.4).
fn distinct_thresholds(dsc_info: &FastMap<FamilyId, DuplexConsensus>, filter_on: FilterOn, filter_max: u32) -> Vec<u32> {
    let mut seen: BTreeSet<u32> = BTreeSet::new();
    for dsc in dsc_info.values() {
        let metric = dsc.filter_metric(filter_on);
        if metric <= filter_max {
            seen.insert(metric);
        }
    }
    seen.into_iter().collect()
}

/// Produces every output bundle (§4.4): `all` plus one `max_variants_{k}`
/// folder per distinct threshold `<= filter_max`.
pub(crate) fn emit_all(
    out_dir: &Path, config: &EmitConfig, dsc_info: &FastMap<FamilyId, DuplexConsensus>,
    ssc_info: &FastMap<FamilyId, FastMap<Strand, StrandConsensus>>, counters: &crate::model::BasePositionCounters,
    pos_header: &HeaderView,
) -> Result<(), BamError> {
    emit_bundle(out_dir, "all", None, config, dsc_info, ssc_info, counters, pos_header)?;

    for threshold in distinct_thresholds(dsc_info, config.filter_on, config.filter_max) {
        let folder = format!("max_variants_{threshold}");
        emit_bundle(out_dir, &folder, Some(threshold), config, dsc_info, ssc_info, counters, pos_header)?;
    }

    Ok(())
}

fn keep_families<'a>(
    dsc_info: &'a FastMap<FamilyId, DuplexConsensus>, filter_on: FilterOn, threshold: Option<u32>,
) -> std::collections::HashSet<&'a FamilyId> {
    dsc_info
        .iter()
        .filter(|(_, dsc)| threshold.is_none_or(|t| dsc.filter_metric(filter_on) <= t))
        .map(|(fid, _)| fid)
        .collect()
}

fn emit_bundle(
    out_dir: &Path, folder: &str, threshold: Option<u32>, config: &EmitConfig,
    dsc_info: &FastMap<FamilyId, DuplexConsensus>, ssc_info: &FastMap<FamilyId, FastMap<Strand, StrandConsensus>>,
    counters: &crate::model::BasePositionCounters, pos_header: &HeaderView,
) -> Result<(), BamError> {
    let bundle_dir = out_dir.join(folder);
    log::info!("creating folder {}", bundle_dir.display());
    fs::create_dir_all(&bundle_dir)?;

    let keep = keep_families(dsc_info, config.filter_on, threshold);

    gtf::write_adduct_gtf(&bundle_dir.join(format!("{folder}.adduct.gtf")), &config.specimen, dsc_info, &keep)?;
    write_family_list(&bundle_dir.join(format!("{folder}.adduct.families.txt.gz")), &keep)?;
    write_dsc_json(&bundle_dir.join(format!("{folder}.json.gz")), dsc_info, &keep)?;

    let summary = summary::format_summary(&config.specimen, dsc_info, &keep);
    write_summary_json(&bundle_dir.join(format!("{folder}.summary.json")), &summary)?;

    let by_chr_path = bundle_dir.join(format!("{folder}.by_chr.csv"));
    summary::write_by_chr_csv(std::fs::File::create(&by_chr_path)?, &summary.by_chr).map_err(csv_to_io)?;

    summary
        .variant_base_changes
        .write_csv(std::fs::File::create(bundle_dir.join(format!("{folder}.variants_by_base.csv")))?)
        .map_err(csv_to_io)?;
    summary
        .adduct_base_changes
        .write_csv(std::fs::File::create(bundle_dir.join(format!("{folder}.adducts_by_base.csv")))?)
        .map_err(csv_to_io)?;

    // Read-position counters are global (accumulated once over the whole
    // DSC map, §4.3), not re-derived per bundle; every bundle reports the
    // same table, matching the original (`self.base_positions` is never
    // filtered by `keep_families`).
    write_positions_csv(&by_read_position_csv_path(&bundle_dir, folder), counters)?;

    write_bams(&bundle_dir, folder, dsc_info, ssc_info, &keep, pos_header)?;

    Ok(())
}

fn csv_to_io(e: csv::Error) -> BamError {
    BamError::Io(std::io::Error::other(e))
}

fn write_family_list(path: &Path, keep: &std::collections::HashSet<&FamilyId>) -> Result<(), BamError> {
    log::info!("writing {} families to {}", keep.len(), path.display());
    let mut w = crate::utils::io::create_writer(path)?;
    let names: Vec<&str> = keep.iter().map(|f| f.as_str()).collect();
    std::io::Write::write_all(&mut w, names.join("\n").as_bytes())?;
    Ok(())
}

fn write_dsc_json(
    path: &Path, dsc_info: &FastMap<FamilyId, DuplexConsensus>, keep: &std::collections::HashSet<&FamilyId>,
) -> Result<(), BamError> {
    log::info!("writing all output to {}", path.display());
    let mut ordered: std::collections::BTreeMap<&str, &DuplexConsensus> = std::collections::BTreeMap::new();
    for (fid, dsc) in dsc_info {
        if keep.contains(fid) {
            ordered.insert(fid.as_str(), dsc);
        }
    }
    let w = crate::utils::io::create_writer(path)?;
    serde_json::to_writer(w, &ordered).map_err(|e| BamError::Io(std::io::Error::other(e)))?;
    Ok(())
}

fn write_summary_json(path: &Path, summary: &summary::Summary) -> Result<(), BamError> {
    log::info!("writing summary information to {}", path.display());
    let w = std::fs::File::create(path)?;
    serde_json::to_writer(w, summary).map_err(|e| BamError::Io(std::io::Error::other(e)))?;
    Ok(())
}

fn write_bams(
    bundle_dir: &Path, folder: &str, dsc_info: &FastMap<FamilyId, DuplexConsensus>,
    ssc_info: &FastMap<FamilyId, FastMap<Strand, StrandConsensus>>, keep: &std::collections::HashSet<&FamilyId>,
    pos_header: &HeaderView,
) -> Result<(), BamError> {
    write_dsc_bam(&bundle_dir.join(format!("{folder}.DSC.bam")), dsc_info, keep, pos_header)?;
    write_ssc_bam(&bundle_dir.join(format!("{folder}.SSC.POS.bam")), ssc_info, keep, Strand::Pos, FLAG_SSC_POS, pos_header)?;
    write_ssc_bam(&bundle_dir.join(format!("{folder}.SSC.NEG.bam")), ssc_info, keep, Strand::Neg, FLAG_SSC_NEG, pos_header)?;
    Ok(())
}

fn write_dsc_bam(
    path: &Path, dsc_info: &FastMap<FamilyId, DuplexConsensus>, keep: &std::collections::HashSet<&FamilyId>,
    pos_header: &HeaderView,
) -> Result<(), BamError> {
    log::info!("writing out BAM to {}", path.display());
    let mut out = writer::open_writer(path, pos_header)?;

    let mut families: Vec<&FamilyId> = keep.iter().copied().collect();
    families.sort();

    for family_id in families {
        let dsc = &dsc_info[family_id];
        let Some(tid) = pos_header.tid(dsc.contig.as_bytes()) else { continue };
        writer::write_consensus_record(&mut out, tid as i32, family_id.as_str(), dsc.start, dsc.cons.as_bytes(), FLAG_DSC)?;
    }
    drop(out);
    writer::sort_and_index(path)
}

fn write_ssc_bam(
    path: &Path, ssc_info: &FastMap<FamilyId, FastMap<Strand, StrandConsensus>>, keep: &std::collections::HashSet<&FamilyId>,
    strand: Strand, flag: u16, pos_header: &HeaderView,
) -> Result<(), BamError> {
    log::info!("writing out BAM to {}", path.display());
    let mut out = writer::open_writer(path, pos_header)?;

    let mut families: Vec<&FamilyId> = keep.iter().copied().collect();
    families.sort();

    for family_id in families {
        let Some(strands) = ssc_info.get(family_id) else { continue };
        let Some(consensus) = strands.get(&strand) else { continue };
        let Some(tid) = pos_header.tid(consensus.contig.as_bytes()) else { continue };
        let seq: Vec<u8> = consensus.cons.iter().map(|b| b.as_char() as u8).collect();
        writer::write_consensus_record(&mut out, tid as i32, family_id.as_str(), consensus.start, &seq, flag)?;
    }
    drop(out);
    writer::sort_and_index(path)
}

pub(crate) fn by_read_position_csv_path(bundle_dir: &Path, folder: &str) -> PathBuf {
    bundle_dir.join(format!("{folder}.by_read_position.csv"))
}

pub(crate) fn write_positions_csv(path: &Path, counters: &crate::model::BasePositionCounters) -> Result<(), BamError> {
    positions::write_by_read_position_csv(std::fs::File::create(path)?, counters).map_err(csv_to_io)
}
