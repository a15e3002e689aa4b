use serde::{Serialize, Serializer};
use std::fmt;

/// A single nucleotide, normalized the way the reference/query comparison in
/// §3 and §4.1 requires: any character outside `ATCG` (ambiguity codes,
/// lowercase soft-masking, anything else) collapses to `N` and is excluded
/// from classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Base {
    A,
    T,
    C,
    G,
    N,
}

impl Base {
    /// Normalizes a raw sequence byte (as read from a BAM record or the MD
    /// tag) to a `Base`, uppercasing soft-masked lowercase bases first so
    /// they still participate in comparisons (§4.1).
    #[inline]
    pub(crate) fn from_u8(byte: u8) -> Base {
        match byte.to_ascii_uppercase() {
            b'A' => Base::A,
            b'T' => Base::T,
            b'C' => Base::C,
            b'G' => Base::G,
            _ => Base::N,
        }
    }

    #[inline]
    pub(crate) fn is_atcg(self) -> bool {
        !matches!(self, Base::N)
    }

    #[inline]
    pub(crate) fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::T => 'T',
            Base::C => 'C',
            Base::G => 'G',
            Base::N => 'N',
        }
    }

    /// Watson-Crick complement, used to translate a negative-strand call
    /// back onto the positive-strand reference orientation (§4.3).
    #[inline]
    pub(crate) fn complement(self) -> Base {
        match self {
            Base::A => Base::T,
            Base::T => Base::A,
            Base::C => Base::G,
            Base::G => Base::C,
            Base::N => Base::N,
        }
    }

    /// The IUPAC two-base ambiguity code for `self`/`other`, as a plain
    /// character: the consensus string (§9) is built from these alongside
    /// literal `A`/`T`/`C`/`G`/`N`, and ambiguity codes are never fed back
    /// into classification, so there's no need for `Base` itself to carry
    /// them as variants.
    #[inline]
    pub(crate) fn iupac(self, other: Base) -> char {
        use Base::*;
        match (self, other) {
            (x, y) if x == y => x.as_char(),
            (A, T) | (T, A) => 'W',
            (A, C) | (C, A) => 'M',
            (A, G) | (G, A) => 'R',
            (T, C) | (C, T) => 'Y',
            (T, G) | (G, T) => 'K',
            (C, G) | (G, C) => 'S',
            _ => 'N',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for Base {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalizes_case_and_unknown_bytes() {
        assert_eq!(Base::from_u8(b'a'), Base::A);
        assert_eq!(Base::from_u8(b'g'), Base::G);
        assert_eq!(Base::from_u8(b'-'), Base::N);
        assert!(!Base::from_u8(b'n').is_atcg());
    }

    #[test]
    fn complements_only_atcg() {
        assert_eq!(Base::A.complement(), Base::T);
        assert_eq!(Base::C.complement(), Base::G);
        assert_eq!(Base::N.complement(), Base::N);
    }

    #[test]
    fn iupac_matches_and_mismatches() {
        assert_eq!(Base::A.iupac(Base::A), 'A');
        assert_eq!(Base::A.iupac(Base::T), 'W');
        assert_eq!(Base::T.iupac(Base::A), 'W');
        assert_eq!(Base::C.iupac(Base::G), 'S');
        assert_eq!(Base::A.iupac(Base::N), 'N');
    }
}
