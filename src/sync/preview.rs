use crate::{catalog::model::PreviewBinding, foundation::value::ParamValues};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Inputs handed to the preview collaborator.
pub struct PreviewRequest<'a> {
    /// Text to animate.
    pub text: &'a str,
    /// Current parameter values.
    pub params: &'a ParamValues,
    /// Renderer reference of the selected effect.
    pub binding: &'a PreviewBinding,
}

/// Renders a visual preview. The core never inspects the outcome.
pub trait PreviewSink {
    /// Present one preview.
    fn present(&mut self, request: &PreviewRequest<'_>);
}
