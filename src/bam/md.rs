use crate::bam::error::BamError;
use crate::model::Base;
use regex::Regex;
use std::sync::LazyLock;

/// Splits an MD tag into its three token kinds: run-length matches,
/// single-base mismatches (the reference base, since the query base always
/// differs by definition), and deletions (reference bases with no query
/// counterpart, introduced by a preceding `^`).
static MD_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)|(\^[A-Za-z]+)|([A-Za-z])").unwrap());

/// One position's reference base as implied by the MD tag, for the
/// `ATCG`-aligned (non-indel) stretch of the read it belongs to.
#[derive(Debug, Clone, Copy)]
pub(crate) enum MdBase {
    /// Reference equals whatever the query calls at this position.
    Match,
    /// Reference is this base; query differs.
    Mismatch(Base),
}

/// Expands an MD string into one [`MdBase`] per aligned (`M`/`=`/`X`)
/// position, in left-to-right order, dropping deletion runs entirely — they
/// correspond to reference-only positions that have no query base and are
/// therefore out of scope (indels are skipped by design, §1).
///
/// The resulting sequence's length equals the sum of the read's `M`-type
/// CIGAR operations, so it can be zipped directly against the `Some`/`Some`
/// entries of `aligned_pairs_full` in order.
pub(crate) fn expand_md(qname: &str, md: &str) -> Result<Vec<MdBase>, BamError> {
    let mut out = Vec::with_capacity(md.len());
    let mut consumed = 0usize;

    for capture in MD_TOKEN.captures_iter(md) {
        let whole = capture.get(0).unwrap();
        consumed += whole.len();

        if let Some(run) = capture.get(1) {
            let n: usize = run.as_str().parse().map_err(|_| BamError::MalformedMdTag {
                qname: qname.to_owned(),
                md: md.to_owned(),
            })?;
            out.extend(std::iter::repeat_n(MdBase::Match, n));
        } else if capture.get(2).is_some() {
            // deletion run; contributes no aligned (M-type) positions
        } else if let Some(mismatch) = capture.get(3) {
            let byte = mismatch.as_str().as_bytes()[0];
            out.push(MdBase::Mismatch(Base::from_u8(byte)));
        }
    }

    if consumed != md.len() {
        return Err(BamError::MalformedMdTag { qname: qname.to_owned(), md: md.to_owned() });
    }

    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pure_match_run() {
        let expanded = expand_md("r1", "10").unwrap();
        assert_eq!(expanded.len(), 10);
        assert!(expanded.iter().all(|b| matches!(b, MdBase::Match)));
    }

    #[test]
    fn mismatch_in_middle() {
        let expanded = expand_md("r1", "5C4").unwrap();
        assert_eq!(expanded.len(), 10);
        assert!(matches!(expanded[5], MdBase::Mismatch(Base::C)));
    }

    #[test]
    fn deletion_contributes_no_aligned_positions() {
        let expanded = expand_md("r1", "4^AC6").unwrap();
        assert_eq!(expanded.len(), 10);
    }

    #[test]
    fn malformed_md_is_rejected() {
        assert!(expand_md("r1", "5!!3").is_err());
    }
}
