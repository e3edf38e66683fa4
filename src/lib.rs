//! textfx keeps two views of a parameterized text effect in sync: a flat set of
//! parameter values for form editors, and a generated source snippet for code editors.
//!
//! # Overview
//!
//! 1. **Catalog**: a read-only [`Registry`] of [`EffectDefinition`]s (schema, code template,
//!    preview binding).
//! 2. **Render**: `template + ParamValues -> source text` via [`render`], substituting
//!    `{param}` placeholders in a single pass.
//! 3. **Extract**: `source text -> Extraction` via [`extract`], reading the entry-point name
//!    and known code shapes back out of arbitrary edited text.
//! 4. **Synchronize**: the [`Controller`] owns the [`Session`], decides which view is
//!    authoritative, and persists through a [`SessionStore`].
//!
//! Rendering and extraction are total: they never fail, and malformed input only yields
//! less information.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod catalog;
mod extract;
mod foundation;
mod sync;
mod template;

pub use catalog::builtin::builtin_effects;
pub use catalog::model::{EffectDefinition, NumericRange, ParamKind, ParamSpec, PreviewBinding};
pub use catalog::registry::Registry;
pub use extract::extractor::{Extraction, extract};
pub use extract::matchers::{
    match_entry_point, match_layered_shadow, match_style_block, match_timing_block,
};
pub use foundation::error::{FxError, FxResult};
pub use foundation::value::{ParamValue, ParamValues};
pub use sync::controller::{Controller, EditMode, Reconciliation};
pub use sync::preview::{PreviewRequest, PreviewSink};
pub use sync::session::Session;
pub use sync::store::{JsonFileStore, MemoryStore, SESSION_RECORD_ID, SessionStore};
pub use template::render::{placeholders, render};
