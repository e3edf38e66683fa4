use crate::{
    foundation::error::{FxError, FxResult},
    foundation::value::{ParamValue, ParamValues},
    template::render::placeholders,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Scalar kinds a parameter can take.
pub enum ParamKind {
    /// Floating point number.
    Number,
    /// Color string such as `#ff00ff`.
    Color,
}

impl ParamKind {
    /// Return `true` when `value` has the shape this kind expects.
    pub fn accepts(self, value: &ParamValue) -> bool {
        matches!(
            (self, value),
            (Self::Number, ParamValue::Number(_)) | (Self::Color, ParamValue::String(_))
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Editor hint for numeric parameters. Not enforced by the core.
pub struct NumericRange {
    /// Lowest value offered by the editor.
    pub min: f64,
    /// Highest value offered by the editor.
    pub max: f64,
    /// Slider step.
    pub step: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One tunable value of an effect.
pub struct ParamSpec {
    /// Name, unique within its effect; also the placeholder token in the template.
    pub name: String,
    /// Human-readable label for form editors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Scalar kind.
    pub kind: ParamKind,
    /// Value used when nothing else is known.
    pub default: ParamValue,
    /// Optional numeric range hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<NumericRange>,
}

impl ParamSpec {
    /// Numeric parameter with a default value.
    pub fn number(name: impl Into<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind: ParamKind::Number,
            default: ParamValue::Number(default),
            range: None,
        }
    }

    /// Color parameter with a default value.
    pub fn color(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind: ParamKind::Color,
            default: ParamValue::String(default.into()),
            range: None,
        }
    }

    /// Set the form label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the numeric editor range.
    pub fn with_range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.range = Some(NumericRange { min, max, step });
        self
    }

    /// Form label, falling back to the parameter name.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Check that `value` is acceptable for this parameter.
    ///
    /// Numbers must be finite. Colors must be non-empty, without surrounding whitespace, and
    /// free of quotes, backticks, braces and line breaks: they are emitted inside quoted
    /// literals and `{{ ... }}` blocks and must read back unchanged from the rendered source.
    pub fn check(&self, value: &ParamValue) -> FxResult<()> {
        if !self.kind.accepts(value) {
            return Err(FxError::validation(format!(
                "parameter '{}' expects a {:?} value, got {value:?}",
                self.name, self.kind
            )));
        }
        match value {
            ParamValue::Number(n) if !n.is_finite() => Err(FxError::validation(format!(
                "parameter '{}' must be finite",
                self.name
            ))),
            ParamValue::String(s) if !is_recoverable_color(s) => Err(FxError::validation(
                format!(
                    "parameter '{}' must be a trimmed, non-empty color without quotes, braces or line breaks",
                    self.name
                ),
            )),
            _ => Ok(()),
        }
    }

    /// Parse raw editor or command-line input into a value of this parameter's kind.
    pub fn parse_value(&self, raw: &str) -> FxResult<ParamValue> {
        let raw = raw.trim();
        let value = match self.kind {
            ParamKind::Number => {
                let n: f64 = raw.parse().map_err(|_| {
                    FxError::validation(format!(
                        "parameter '{}' expects a number, got '{raw}'",
                        self.name
                    ))
                })?;
                ParamValue::Number(n)
            }
            ParamKind::Color => ParamValue::String(raw.to_owned()),
        };
        self.check(&value)?;
        Ok(value)
    }

    fn validate(&self) -> FxResult<()> {
        if self.name.trim().is_empty() {
            return Err(FxError::validation("parameter name must be non-empty"));
        }
        self.check(&self.default)?;
        if let Some(r) = self.range {
            if !r.min.is_finite() || !r.max.is_finite() || r.min > r.max {
                return Err(FxError::validation(format!(
                    "parameter '{}' range must be finite with min <= max",
                    self.name
                )));
            }
            if !r.step.is_finite() || r.step <= 0.0 {
                return Err(FxError::validation(format!(
                    "parameter '{}' range step must be finite and > 0",
                    self.name
                )));
            }
            if self.kind != ParamKind::Number {
                return Err(FxError::validation(format!(
                    "parameter '{}' has a range but is not numeric",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Opaque key identifying the preview renderer for an effect.
pub struct PreviewBinding(pub String);

impl PreviewBinding {
    /// Binding key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A named, parameterized text effect with its canonical source template.
///
/// Definitions are loaded once into a [`crate::Registry`] and only handed out by shared
/// reference afterwards.
pub struct EffectDefinition {
    /// Unique display name; also the lookup key.
    pub name: String,
    /// Exported entry-point identifier used in the template. Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_name: Option<String>,
    /// Ordered parameter schema.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    /// Source text with `{param}` placeholders.
    pub template: String,
    /// Preview renderer reference.
    pub preview: PreviewBinding,
}

impl EffectDefinition {
    /// Create a definition with no parameters.
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
        preview: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code_name: None,
            params: Vec::new(),
            template: template.into(),
            preview: PreviewBinding(preview.into()),
        }
    }

    /// Set the exported entry-point identifier.
    pub fn with_code_name(mut self, code_name: impl Into<String>) -> Self {
        self.code_name = Some(code_name.into());
        self
    }

    /// Append a parameter to the schema.
    pub fn with_param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Entry-point identifier, falling back to the display name.
    pub fn code_name(&self) -> &str {
        self.code_name.as_deref().unwrap_or(&self.name)
    }

    /// Schema entry for `name`.
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Fresh parameter values made of every schema default.
    pub fn schema_defaults(&self) -> ParamValues {
        self.params
            .iter()
            .map(|p| (p.name.clone(), p.default.clone()))
            .collect()
    }

    /// Schema defaults overridden by `recovered`.
    ///
    /// The result holds exactly the schema's keys. Recovered entries that are not in the
    /// schema, or whose kind does not match, are ignored.
    pub fn merge(&self, recovered: &ParamValues) -> ParamValues {
        self.params
            .iter()
            .map(|p| {
                let value = recovered
                    .get(&p.name)
                    .filter(|v| p.check(v).is_ok())
                    .unwrap_or(&p.default);
                (p.name.clone(), value.clone())
            })
            .collect()
    }

    /// Schema parameters the template never references.
    pub fn unused_params(&self) -> Vec<&str> {
        let used = placeholders(&self.template);
        self.params
            .iter()
            .map(|p| p.name.as_str())
            .filter(|name| !used.contains(name))
            .collect()
    }

    /// Validate definition invariants.
    pub fn validate(&self) -> FxResult<()> {
        if self.name.trim().is_empty() {
            return Err(FxError::validation("effect name must be non-empty"));
        }
        let code_name = self.code_name();
        if !is_identifier(code_name) {
            return Err(FxError::validation(format!(
                "effect '{}' code name '{code_name}' is not an identifier",
                self.name
            )));
        }
        for (i, p) in self.params.iter().enumerate() {
            p.validate()
                .map_err(|e| FxError::validation(format!("effect '{}': {e}", self.name)))?;
            if self.params[..i].iter().any(|q| q.name == p.name) {
                return Err(FxError::validation(format!(
                    "effect '{}' declares parameter '{}' twice",
                    self.name, p.name
                )));
            }
        }
        Ok(())
    }
}

fn is_recoverable_color(s: &str) -> bool {
    !s.is_empty()
        && s.trim() == s
        && !s.contains(['\'', '"', '`', '{', '}', '\n', '\r'])
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
