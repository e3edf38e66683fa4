use crate::{
    catalog::model::EffectDefinition,
    catalog::registry::Registry,
    extract::extractor::extract,
    foundation::error::{FxError, FxResult},
    foundation::value::{ParamValue, ParamValues},
    sync::preview::{PreviewRequest, PreviewSink},
    sync::session::Session,
    sync::store::SessionStore,
    template::render::render,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Which representation is currently the source of truth.
pub enum EditMode {
    /// Source text is derived from the parameter values.
    FormAuthoritative,
    /// Source text is stored verbatim and reconciled when the text view is left.
    TextAuthoritative,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Outcome of leaving the text view.
pub struct Reconciliation {
    /// Effect the values were committed to.
    pub effect: String,
    /// `true` when the recovered entry point selected a different effect.
    pub switched_effect: bool,
    /// Parameters whose value came from the text rather than the schema default.
    pub recovered: Vec<String>,
    /// Entry-point name found in the text that matches no registered effect.
    pub unresolved_entry_point: Option<String>,
}

/// Owns the session and keeps parameter values and source text consistent.
///
/// Every committed mutation is saved through the store. Save failures are logged and
/// never change in-memory state.
pub struct Controller<'r, S> {
    registry: &'r Registry,
    store: S,
    session: Session,
    mode: EditMode,
    display_hint: Option<String>,
}

impl<'r, S: SessionStore> Controller<'r, S> {
    /// Load the persisted session, or start a fresh one on the registry's default effect.
    pub fn open(registry: &'r Registry, mut store: S) -> Self {
        let loaded = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load session; starting fresh");
            None
        });
        let mut ctl = Self {
            registry,
            store,
            session: Session::fresh(registry.default_effect()),
            mode: EditMode::FormAuthoritative,
            display_hint: None,
        };
        if let Some(saved) = loaded {
            ctl.restore(saved);
        }
        ctl
    }

    fn restore(&mut self, saved: Session) {
        let registry = self.registry;
        let Some(effect) = registry.get(&saved.selected_effect) else {
            tracing::warn!(effect = %saved.selected_effect, "persisted effect is not in the catalog; using default");
            self.session.text = saved.text;
            return;
        };

        let params = effect.merge(&saved.params);
        let derived = render(&effect.template, &params);
        let edited = !saved.source_text.is_empty() && saved.source_text != derived;
        self.mode = if edited {
            EditMode::TextAuthoritative
        } else {
            EditMode::FormAuthoritative
        };
        self.session = Session {
            text: saved.text,
            selected_effect: effect.name.clone(),
            params,
            source_text: if edited { saved.source_text } else { derived },
        };
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current authoritative representation.
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Entry-point name from the last reconciliation that matched no effect.
    pub fn display_hint(&self) -> Option<&str> {
        self.display_hint.as_deref()
    }

    /// Definition of the selected effect.
    pub fn selected_effect(&self) -> &'r EffectDefinition {
        let registry = self.registry;
        registry
            .get(&self.session.selected_effect)
            .unwrap_or_else(|| registry.default_effect())
    }

    /// Session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Select an effect by name and reset its parameters to schema defaults.
    ///
    /// Pending text edits are discarded and the form becomes authoritative.
    pub fn select_effect(&mut self, name: &str) -> FxResult<()> {
        let registry = self.registry;
        let effect = registry.lookup(name)?;
        let params = effect.schema_defaults();
        self.session.source_text = render(&effect.template, &params);
        self.session.params = params;
        self.session.selected_effect = effect.name.clone();
        self.mode = EditMode::FormAuthoritative;
        self.display_hint = None;
        tracing::debug!(effect = %effect.name, "effect selected");
        self.persist();
        Ok(())
    }

    /// Set one parameter of the selected effect and re-render the source text.
    ///
    /// While the text view is active it is reconciled first, since that is its only exit.
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> FxResult<()> {
        self.ensure_form_authoritative();
        let effect = self.selected_effect();
        let spec = effect
            .param(name)
            .ok_or_else(|| FxError::unknown_param(&effect.name, name))?;
        spec.check(&value)?;

        self.session.params.insert(name.to_owned(), value);
        self.session.source_text = render(&effect.template, &self.session.params);
        self.persist();
        Ok(())
    }

    /// Like [`Controller::set_param`], parsing `raw` according to the parameter kind.
    pub fn set_param_str(&mut self, name: &str, raw: &str) -> FxResult<()> {
        self.ensure_form_authoritative();
        let effect = self.selected_effect();
        let spec = effect
            .param(name)
            .ok_or_else(|| FxError::unknown_param(&effect.name, name))?;
        let value = spec.parse_value(raw)?;
        self.set_param(name, value)
    }

    /// Replace the preview text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.session.text = text.into();
        self.persist();
    }

    /// Switch to the text view. No-op when already there.
    pub fn enter_text_view(&mut self) {
        if self.mode == EditMode::FormAuthoritative {
            self.mode = EditMode::TextAuthoritative;
            tracing::debug!("text view entered");
        }
    }

    /// Store user-edited source text verbatim, entering the text view if needed.
    pub fn edit_source(&mut self, source: impl Into<String>) {
        self.enter_text_view();
        self.session.source_text = source.into();
        self.persist();
    }

    /// Leave the text view, committing what can be read back out of the source text.
    ///
    /// Returns `None` when the form was already authoritative.
    #[tracing::instrument(skip(self))]
    pub fn leave_text_view(&mut self) -> Option<Reconciliation> {
        if self.mode != EditMode::TextAuthoritative {
            return None;
        }

        let registry = self.registry;
        let extraction = extract(&self.session.source_text);
        let previous = self.selected_effect();
        let (effect, unresolved) = match extraction.effect_name_guess {
            Some(guess) => match registry.resolve_entry_point(&guess) {
                Some(found) => (found, None),
                None => (previous, Some(guess)),
            },
            None => (previous, None),
        };

        let params = effect.merge(&extraction.recovered);
        let recovered = recovered_keys(&params, &extraction.recovered);
        let report = Reconciliation {
            effect: effect.name.clone(),
            switched_effect: effect.name != previous.name,
            recovered,
            unresolved_entry_point: unresolved.clone(),
        };

        self.session.source_text = render(&effect.template, &params);
        self.session.params = params;
        self.session.selected_effect = effect.name.clone();
        self.display_hint = unresolved;
        self.mode = EditMode::FormAuthoritative;
        tracing::debug!(effect = %report.effect, recovered = ?report.recovered, "text view reconciled");
        self.persist();
        Some(report)
    }

    /// Preview inputs for the current state.
    pub fn preview_request(&self) -> PreviewRequest<'_> {
        PreviewRequest {
            text: &self.session.text,
            params: &self.session.params,
            binding: &self.selected_effect().preview,
        }
    }

    /// Hand the current preview inputs to `sink`.
    pub fn present(&self, sink: &mut impl PreviewSink) {
        sink.present(&self.preview_request());
    }

    fn ensure_form_authoritative(&mut self) {
        if self.mode == EditMode::TextAuthoritative {
            self.leave_text_view();
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.session) {
            tracing::warn!(error = %e, "failed to persist session; keeping in-memory state");
        }
    }
}

fn recovered_keys(merged: &ParamValues, recovered: &ParamValues) -> Vec<String> {
    merged
        .iter()
        .filter(|(k, v)| recovered.get(*k) == Some(*v))
        .map(|(k, _)| k.clone())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/sync/controller.rs"]
mod tests;
