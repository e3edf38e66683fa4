//! Effect definitions, parameter schemas and the read-only registry.

pub(crate) mod builtin;
pub(crate) mod model;
pub(crate) mod registry;
