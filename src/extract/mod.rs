//! Best-effort recovery of effect identity and parameter values from edited source text.

pub(crate) mod extractor;
pub(crate) mod matchers;
