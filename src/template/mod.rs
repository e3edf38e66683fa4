//! Placeholder substitution from parameter values into code templates.

pub(crate) mod render;
