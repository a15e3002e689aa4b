pub(crate) mod gtf;
pub(crate) mod positions;
pub(crate) mod ssc_rollup;
pub(crate) mod summary;
pub(crate) mod threshold;

pub(crate) use threshold::EmitConfig;
