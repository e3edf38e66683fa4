use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    catalog::builtin::builtin_effects,
    catalog::model::EffectDefinition,
    foundation::error::{FxError, FxResult},
};

#[derive(serde::Deserialize)]
struct CatalogFile {
    effects: Vec<EffectDefinition>,
}

/// Read-only, ordered catalog of effect definitions keyed by name.
#[derive(Clone, Debug)]
pub struct Registry {
    effects: Vec<EffectDefinition>,
}

impl Registry {
    /// Build a registry from definitions, validating every entry.
    ///
    /// The list must be non-empty and names must be unique. Schema parameters the
    /// template never references are accepted but logged.
    pub fn new(effects: Vec<EffectDefinition>) -> FxResult<Self> {
        if effects.is_empty() {
            return Err(FxError::validation("effect catalog must not be empty"));
        }
        for (i, def) in effects.iter().enumerate() {
            def.validate()?;
            if effects[..i].iter().any(|e| e.name == def.name) {
                return Err(FxError::validation(format!(
                    "duplicate effect name '{}'",
                    def.name
                )));
            }
            let unused = def.unused_params();
            if !unused.is_empty() {
                tracing::warn!(effect = %def.name, ?unused, "template does not reference every parameter");
            }
        }
        Ok(Self { effects })
    }

    /// Registry holding the built-in catalog, validated like any other.
    pub fn builtin() -> FxResult<Self> {
        Self::new(builtin_effects())
    }

    /// Parse a catalog of the form `{ "effects": [ ... ] }` from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FxResult<Self> {
        let file: CatalogFile = serde_json::from_reader(r)
            .map_err(|e| FxError::serde(format!("parse effect catalog JSON: {e}")))?;
        Self::new(file.effects)
    }

    /// Parse a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FxError::validation(format!("open effect catalog '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Look up an effect by name.
    pub fn lookup(&self, name: &str) -> FxResult<&EffectDefinition> {
        self.get(name).ok_or_else(|| FxError::unknown_effect(name))
    }

    /// Look up an effect by name, returning `None` on a miss.
    pub fn get(&self, name: &str) -> Option<&EffectDefinition> {
        self.effects.iter().find(|e| e.name == name)
    }

    /// All definitions in registration order.
    pub fn list(&self) -> &[EffectDefinition] {
        &self.effects
    }

    /// The first registered effect, used for fresh sessions.
    pub fn default_effect(&self) -> &EffectDefinition {
        &self.effects[0]
    }

    /// Map an entry-point identifier recovered from source text to an effect.
    ///
    /// Code names take precedence over display names.
    pub fn resolve_entry_point(&self, ident: &str) -> Option<&EffectDefinition> {
        self.effects
            .iter()
            .find(|e| e.code_name() == ident)
            .or_else(|| self.get(ident))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/registry.rs"]
mod tests;
