use crate::{
    catalog::model::EffectDefinition, foundation::value::ParamValues, template::render::render,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// The full persisted editing state. There is one per installation.
pub struct Session {
    /// Text shown in the preview.
    #[serde(default)]
    pub text: String,
    /// Name of the selected effect.
    pub selected_effect: String,
    /// Current values for the selected effect's parameters.
    #[serde(default)]
    pub params: ParamValues,
    /// Source text shown in the code view.
    #[serde(default)]
    pub source_text: String,
}

impl Session {
    /// Session on `effect` with schema defaults and the matching rendered source.
    pub fn fresh(effect: &EffectDefinition) -> Self {
        let params = effect.schema_defaults();
        let source_text = render(&effect.template, &params);
        Self {
            text: String::new(),
            selected_effect: effect.name.clone(),
            params,
            source_text,
        }
    }
}
