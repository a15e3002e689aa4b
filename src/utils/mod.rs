use foldhash::fast::RandomState;
use std::collections::HashMap;

pub(crate) mod die;
pub(crate) mod io;
pub(crate) mod whichever;

/// A `HashMap` using `foldhash`'s fast (non-DoS-resistant) hasher.
///
/// The per-family and per-position maps in this crate are small, short-lived,
/// and never exposed to untrusted keys, so the faster hasher is preferred over
/// the standard library's default.
pub(crate) type FastMap<K, V> = HashMap<K, V, RandomState>;
