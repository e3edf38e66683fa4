//! Session ownership and form/text synchronization.

pub(crate) mod controller;
pub(crate) mod preview;
pub(crate) mod session;
pub(crate) mod store;
