use crate::model::FilterOn;
use clap::Parser;

/// The three positional arguments this tool is invoked with (§6): a
/// specimen name, which DSC field to filter output bundles on, and the
/// highest value of that field to emit a folder for.
///
/// `filter_on` is a `clap::ValueEnum` rather than a hand-parsed string, so an
/// invalid value is rejected by `clap` itself with a non-zero exit and a
/// standard usage message (§7's "configuration error" fail-fast mode,
/// routed through the CLI layer instead of a bare `assert!`).
#[derive(Parser, Debug)]
#[command(author, version, about = "Reconciles POS/NEG SSC BAMs into a duplex consensus", long_about = None)]
pub(crate) struct Cli {
    /// Specimen name, stamped into GTF `source` fields and the summary JSON.
    pub(crate) specimen: String,

    /// Which DSC field to filter output bundles on.
    pub(crate) filter_on: FilterOn,

    /// Highest value of `filter_on` to emit a `max_variants_*` folder for.
    pub(crate) filter_max: u32,
}
