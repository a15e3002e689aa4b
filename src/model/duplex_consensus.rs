use crate::model::base::Base;
use crate::model::family::Strand;
use crate::utils::FastMap;
use serde::Serialize;

/// A mismatch confirmed on both strands: a true biological variant (§4.3
/// cases 4-5).
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Variant {
    pub(crate) var: Base,
    #[serde(rename = "ref")]
    pub(crate) refb: Base,
}

/// A mismatch visible on only one strand: interpreted as chemical damage
/// rather than a true mutation (§4.3 cases 5-7). Always reported in
/// positive-strand coordinates, so a negative-strand adduct's `var`/`ref`
/// have already been complemented.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Adduct {
    pub(crate) strand: Strand,
    pub(crate) var: Base,
    #[serde(rename = "ref")]
    pub(crate) refb: Base,
}

/// The reconciled positive/negative consensus for one family (§3), and the
/// unit the `F.json.gz` bundle (§6) is keyed by family id over.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DuplexConsensus {
    pub(crate) contig: String,
    pub(crate) start: i64,
    pub(crate) end: i64,
    /// Count of positions where both strands carry an `ATCG` call.
    pub(crate) nbases: u32,
    /// IUPAC-merged consensus over `[start, end]`.
    pub(crate) cons: String,
    /// refpos → variant, confirmed on both strands.
    pub(crate) variants: FastMap<i64, Variant>,
    /// refpos → adduct, visible on one strand only.
    pub(crate) adducts: FastMap<i64, Adduct>,
    pub(crate) total_variants: u32,
    pub(crate) total_variants_and_adducts: u32,
}

impl DuplexConsensus {
    pub(crate) fn filter_metric(&self, filter_on: FilterOn) -> u32 {
        match filter_on {
            FilterOn::TotalVariants => self.total_variants,
            FilterOn::TotalVariantsAndAdducts => self.total_variants_and_adducts,
        }
    }
}

/// Which DSC field [`crate::emit::threshold::ThresholdEmitter`] filters
/// families on (§4.4, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum FilterOn {
    #[value(name = "total_variants")]
    TotalVariants,
    #[value(name = "total_variants_and_adducts")]
    TotalVariantsAndAdducts,
}
