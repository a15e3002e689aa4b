use crate::model::{DuplexConsensus, FamilyId, Strand};
use crate::utils::FastMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One row of the adduct GTF (§4.4, §6): 1-based inclusive coordinates on a
/// single-base feature.
struct GtfRow {
    seqname: String,
    start: i64,
    end: i64,
    strand: char,
    refb: char,
    var: char,
}

/// Builds the adduct GTF rows for the kept families, sorted by
/// `(seqname, start)` and deduplicated (§4.4, §6).
fn adduct_rows(dsc_info: &FastMap<FamilyId, DuplexConsensus>, keep: &std::collections::HashSet<&FamilyId>) -> Vec<GtfRow> {
    let mut rows: Vec<GtfRow> = Vec::new();

    for (family_id, dsc) in dsc_info {
        if !keep.contains(family_id) {
            continue;
        }
        for (&refpos, adduct) in &dsc.adducts {
            rows.push(GtfRow {
                seqname: dsc.contig.clone(),
                // 0-based -> 1-based, inclusive on both ends for a single base (§9).
                start: refpos + 1,
                end: refpos + 1,
                strand: if adduct.strand == Strand::Pos { '+' } else { '-' },
                refb: adduct.refb.as_char(),
                var: adduct.var.as_char(),
            });
        }
    }

    rows.sort_by(|a, b| a.seqname.cmp(&b.seqname).then(a.start.cmp(&b.start)));
    rows.dedup_by(|a, b| a.seqname == b.seqname && a.start == b.start && a.end == b.end && a.strand == b.strand && a.refb == b.refb && a.var == b.var);
    rows
}

/// Writes the adduct GTF: 9 tab-separated columns, no quoting (§6). If there
/// are no adducts at all the file is skipped entirely, matching the
/// original's "No adducts found, skipping" behavior.
pub(crate) fn write_adduct_gtf(
    path: &Path, specimen: &str, dsc_info: &FastMap<FamilyId, DuplexConsensus>, keep: &std::collections::HashSet<&FamilyId>,
) -> std::io::Result<()> {
    let rows = adduct_rows(dsc_info, keep);
    if rows.is_empty() {
        log::info!("no adducts found, skipping {}", path.display());
        return Ok(());
    }

    log::info!("writing {} adducts in GTF format to {}", rows.len(), path.display());
    let mut w = BufWriter::new(File::create(path)?);
    for row in &rows {
        writeln!(
            w,
            "{}\t{}\tadduct\t{}\t{}\t.\t{}\t.\tadduct \"{}\"; read_as \"{}\";",
            row.seqname, specimen, row.start, row.end, row.strand, row.refb, row.var
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{Adduct, Base};

    fn dsc_with_adduct(contig: &str, refpos: i64, strand: Strand) -> DuplexConsensus {
        let mut adducts = FastMap::default();
        adducts.insert(refpos, Adduct { strand, var: Base::G, refb: Base::C });
        DuplexConsensus {
            contig: contig.to_owned(),
            start: refpos,
            end: refpos,
            nbases: 1,
            cons: "N".to_owned(),
            variants: FastMap::default(),
            adducts,
            total_variants: 0,
            total_variants_and_adducts: 1,
        }
    }

    #[test]
    fn builds_sorted_deduplicated_rows() {
        let mut dsc_info = FastMap::default();
        let f1 = FamilyId::new("f1");
        let f2 = FamilyId::new("f2");
        dsc_info.insert(f1.clone(), dsc_with_adduct("chr2", 50, Strand::Pos));
        dsc_info.insert(f2.clone(), dsc_with_adduct("chr1", 10, Strand::Neg));

        let keep: std::collections::HashSet<&FamilyId> = [&f1, &f2].into_iter().collect();
        let rows = adduct_rows(&dsc_info, &keep);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].seqname, "chr1");
        assert_eq!(rows[1].seqname, "chr2");
        assert_eq!(rows[0].strand, '-');
        assert_eq!(rows[1].strand, '+');
    }

    #[test]
    fn excludes_non_kept_families() {
        let mut dsc_info = FastMap::default();
        let f1 = FamilyId::new("f1");
        dsc_info.insert(f1.clone(), dsc_with_adduct("chr1", 10, Strand::Pos));
        let keep: std::collections::HashSet<&FamilyId> = std::collections::HashSet::new();

        assert!(adduct_rows(&dsc_info, &keep).is_empty());
    }
}
