use serde::{Serialize, Serializer};
use std::fmt;

/// The molecular family a read belongs to: reads sharing a UMI/molecular tag
/// and contig are PCR/optical duplicates of the same original duplex
/// molecule (§3). Cloning is cheap and families are the map key almost
/// everywhere, so this wraps an owned `String` rather than borrowing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct FamilyId(String);

impl FamilyId {
    pub(crate) fn new(raw: impl Into<String>) -> FamilyId {
        FamilyId(raw.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which single-strand consensus BAM a read was parsed from: the positive
/// (Watson) strand file or the negative (Crick) strand file (§2). This is a
/// property of the *input*, not of the read's `is_reverse` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Strand {
    Pos,
    Neg,
}

impl Strand {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Strand::Pos => "pos",
            Strand::Neg => "neg",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Strand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self.as_str())
    }
}

/// Which mate of a read pair produced this record within its strand's SSC
/// (§4.1-§4.2): forward and reverse reads of the same family are merged
/// before the two strands are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Orientation {
    Fwd,
    Rev,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Fwd => f.write_str("fwd"),
            Orientation::Rev => f.write_str("rev"),
        }
    }
}
