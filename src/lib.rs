mod args;
mod bam;
mod emit;
mod merge;
mod model;
mod parser;
mod pipeline;
mod utils;

use crate::args::Cli;
use crate::bam::StrandReader;
use crate::emit::threshold::EmitConfig;
use crate::pipeline::Pipeline;
use crate::utils::die::OrDie;
use clap::Parser as _;
use std::path::Path;

const POS_BAM: &str = "POS.SSC.bam";
const NEG_BAM: &str = "NEG.SSC.bam";

/// Entry point called by `main` (§6): parses the CLI, runs the full
/// `ParseSSC` pipeline (§2) over `POS.SSC.bam`/`NEG.SSC.bam` in the working
/// directory, and writes every threshold bundle plus the SSC rollups.
///
/// Missing input BAMs are a configuration error (§7) and exit non-zero
/// immediately, before any output folder is created.
pub fn run() {
    env_logger::Builder::new().filter_level(log::LevelFilter::Info).init();

    let cli = Cli::parse();
    log::info!("processing specimen: {}", cli.specimen);
    log::info!("filter_on = {:?}, filter_max = {}", cli.filter_on, cli.filter_max);

    for path in [POS_BAM, NEG_BAM] {
        if !Path::new(path).exists() {
            log::error!("required input BAM not found: {path}");
            std::process::exit(1);
        }
    }

    let mut pipeline = Pipeline::new();
    pipeline.run(Path::new(POS_BAM), Path::new(NEG_BAM)).unwrap_or_die("failed to read input BAMs");

    // Reopened rather than threaded through from `pipeline.run`, matching the
    // original's own re-open of the positive-strand BAM as a BAM-writer
    // template (§4.4 "reference id is resolved via the positive-input BAM's
    // header").
    let pos_header = StrandReader::open(POS_BAM).unwrap_or_die("failed to reopen positive-strand BAM header").header().clone();

    let config = EmitConfig { specimen: cli.specimen.clone(), filter_on: cli.filter_on, filter_max: cli.filter_max };
    let out_dir = Path::new(".");

    crate::emit::threshold::emit_all(out_dir, &config, &pipeline.dsc_info, &pipeline.ssc_info, &pipeline.base_positions, &pos_header)
        .unwrap_or_die("failed to emit output bundles");

    crate::emit::ssc_rollup::write_ssc_rollups(out_dir, &cli.specimen, &pipeline).unwrap_or_die("failed to write SSC rollups");
}
