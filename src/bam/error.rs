use thiserror::Error;

/// Everything that can go wrong while reading, parsing, or writing BAM
/// records. Configuration-grade failures (missing input files, a header
/// mismatch between the two strand BAMs) are fatal; per-record failures
/// (missing MD tag, malformed MD string) are logged and the read is
/// dropped by the caller, matching the per-family anomaly policy.
#[derive(Debug, Error)]
pub(crate) enum BamError {
    #[error("htslib error: {0}")]
    Htslib(#[from] rust_htslib::errors::Error),

    #[error("record {0:?} is missing its MD tag")]
    MissingMdTag(String),

    #[error("record {qname:?} has a malformed MD tag {md:?}")]
    MalformedMdTag { qname: String, md: String },

    #[error("record {0:?} has a non-UTF8 query name")]
    InvalidQueryName(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("`{tool}` exited with status {status}")]
    ExternalTool { tool: &'static str, status: std::process::ExitStatus },
}
