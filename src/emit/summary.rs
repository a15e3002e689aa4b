use crate::model::{DuplexConsensus, FamilyId};
use crate::utils::FastMap;
use serde::Serialize;
use std::collections::BTreeMap;

const BASES: [char; 4] = ['A', 'T', 'C', 'G'];

/// A 4×4 (var × ref) base-change table (§4.5). Indexed by plain `char` keys
/// rather than `Base` so it serializes the way the downstream CSV/JSON
/// consumers expect (§6): row label, then the four reference columns.
#[derive(Debug, Default, Serialize)]
pub(crate) struct BaseChangeTable(BTreeMap<char, BTreeMap<char, u32>>);

impl BaseChangeTable {
    fn increment(&mut self, var: char, refb: char) {
        *self.0.entry(var).or_default().entry(refb).or_insert(0) += 1;
    }

    fn get(&self, var: char, refb: char) -> u32 {
        self.0.get(&var).and_then(|row| row.get(&refb)).copied().unwrap_or(0)
    }

    /// Writes the 4×4 CSV: header `base,A,T,C,G`, one row per `var` base,
    /// zero-filled for untouched cells (§6).
    pub(crate) fn write_csv<W: std::io::Write>(&self, w: W) -> csv::Result<()> {
        let mut writer = csv::Writer::from_writer(w);
        writer.write_record(["base", "A", "T", "C", "G"])?;
        for var in BASES {
            let mut record = vec![var.to_string()];
            for refb in BASES {
                record.push(self.get(var, refb).to_string());
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize)]
pub(crate) struct ChrCounts {
    pub(crate) families: u32,
    pub(crate) bases: u32,
    pub(crate) variants: u32,
    pub(crate) adducts: u32,
}

/// The complete summary object written as `F.summary.json` (§4.5, §6).
///
/// `adducts` (both here and per-contig) is double-counted by design: once
/// when a family's adduct count is first tallied, again while iterating that
/// family's per-position adducts map. This reproduces the original
/// implementation bit-for-bit (§9 "double-counting of adducts in summary")
/// because downstream reporting reads the field as-is.
#[derive(Debug, Serialize)]
pub(crate) struct Summary {
    pub(crate) ssc: u32,
    pub(crate) bases: u32,
    pub(crate) variants: u32,
    pub(crate) adducts: u32,
    pub(crate) specimen: String,
    pub(crate) by_chr: BTreeMap<String, ChrCounts>,
    pub(crate) variant_base_changes: BaseChangeTable,
    pub(crate) adduct_base_changes: BaseChangeTable,
}

/// Rolls the kept families' per-family counts into the overall, per-contig,
/// and per-base-change tables (§4.5).
pub(crate) fn format_summary(
    specimen: &str, dsc_info: &FastMap<FamilyId, DuplexConsensus>, keep: &std::collections::HashSet<&FamilyId>,
) -> Summary {
    let mut ssc = 0u32;
    let mut bases = 0u32;
    let mut variants = 0u32;
    let mut adducts = 0u32;
    let mut by_chr: BTreeMap<String, ChrCounts> = BTreeMap::new();
    let mut variant_base_changes = BaseChangeTable::default();
    let mut adduct_base_changes = BaseChangeTable::default();

    for (family_id, dsc) in dsc_info {
        if !keep.contains(family_id) {
            continue;
        }

        ssc += 1;
        let chr = by_chr.entry(dsc.contig.clone()).or_default();
        chr.families += 1;

        bases += dsc.nbases;
        chr.bases += dsc.nbases;

        // First half of the intentional double-count (§9).
        let n_adducts = dsc.adducts.len() as u32;
        adducts += n_adducts;
        chr.adducts += n_adducts;

        for variant in dsc.variants.values() {
            variants += 1;
            chr.variants += 1;
            variant_base_changes.increment(variant.var.as_char(), variant.refb.as_char());
        }

        for adduct in dsc.adducts.values() {
            // Second half of the intentional double-count (§9).
            adducts += 1;
            chr.adducts += 1;
            adduct_base_changes.increment(adduct.var.as_char(), adduct.refb.as_char());
        }
    }

    Summary { ssc, bases, variants, adducts, specimen: specimen.to_owned(), by_chr, variant_base_changes, adduct_base_changes }
}

/// Writes the `F.by_chr.csv` table: contigs as rows (§6 "transposed"), an
/// unlabeled index column followed by `families,bases,variants,adducts`.
pub(crate) fn write_by_chr_csv<W: std::io::Write>(w: W, by_chr: &BTreeMap<String, ChrCounts>) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    writer.write_record(["", "families", "bases", "variants", "adducts"])?;
    for (contig, counts) in by_chr {
        writer.write_record([
            contig.as_str(),
            &counts.families.to_string(),
            &counts.bases.to_string(),
            &counts.variants.to_string(),
            &counts.adducts.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{Adduct, Base, Variant};

    fn dsc(contig: &str, nbases: u32) -> DuplexConsensus {
        DuplexConsensus {
            contig: contig.to_owned(),
            start: 0,
            end: 0,
            nbases,
            cons: String::new(),
            variants: FastMap::default(),
            adducts: FastMap::default(),
            total_variants: 0,
            total_variants_and_adducts: 0,
        }
    }

    #[test]
    fn double_counts_adducts_by_design() {
        let mut d = dsc("chr1", 5);
        d.adducts.insert(10, Adduct { strand: crate::model::Strand::Pos, var: Base::G, refb: Base::C });

        let mut dsc_info = FastMap::default();
        let f1 = FamilyId::new("f1");
        dsc_info.insert(f1.clone(), d);
        let keep: std::collections::HashSet<&FamilyId> = [&f1].into_iter().collect();

        let summary = format_summary("specimen-1", &dsc_info, &keep);
        assert_eq!(summary.adducts, 2);
        assert_eq!(summary.by_chr["chr1"].adducts, 2);
        assert_eq!(summary.adduct_base_changes.get('G', 'C'), 1);
    }

    #[test]
    fn counts_variants_and_bases() {
        let mut d = dsc("chr1", 4);
        d.variants.insert(5, Variant { var: Base::T, refb: Base::A });

        let mut dsc_info = FastMap::default();
        let f1 = FamilyId::new("f1");
        dsc_info.insert(f1.clone(), d);
        let keep: std::collections::HashSet<&FamilyId> = [&f1].into_iter().collect();

        let summary = format_summary("specimen-1", &dsc_info, &keep);
        assert_eq!(summary.ssc, 1);
        assert_eq!(summary.bases, 4);
        assert_eq!(summary.variants, 1);
        assert_eq!(summary.variant_base_changes.get('T', 'A'), 1);
    }

    #[test]
    fn excludes_non_kept_families() {
        let mut dsc_info = FastMap::default();
        let f1 = FamilyId::new("f1");
        dsc_info.insert(f1.clone(), dsc("chr1", 4));
        let keep: std::collections::HashSet<&FamilyId> = std::collections::HashSet::new();

        let summary = format_summary("specimen-1", &dsc_info, &keep);
        assert_eq!(summary.ssc, 0);
        assert!(summary.by_chr.is_empty());
    }
}
