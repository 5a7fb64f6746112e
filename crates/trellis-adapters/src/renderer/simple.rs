//! Simple token substitution renderer.

use trellis_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{RelativePath, RenderContext},
    error::TrellisResult,
};
use tracing::trace;

/// Renderer using plain `__name__` and `{{VAR}}` substitution.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    fn render_path(&self, template: &str, context: &RenderContext) -> TrellisResult<RelativePath> {
        let rendered = context.render(template);

        // An unresolved token in a path would become a literal directory name.
        if rendered.contains("{{") && rendered.contains("}}") {
            return Err(ApplicationError::RenderingFailed {
                reason: format!("unresolved placeholder in path '{rendered}'"),
            }
            .into());
        }

        trace!(from = template, to = %rendered, "Rendered path");
        Ok(RelativePath::try_new(rendered)?)
    }

    fn render_content(&self, content: &str, context: &RenderContext) -> TrellisResult<String> {
        Ok(context.render(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::domain::NameValidator;

    fn ctx() -> RenderContext {
        RenderContext::new(&NameValidator::validate("FooApp").unwrap())
    }

    #[test]
    fn renders_sentinel_in_paths() {
        let path = SimpleRenderer::new()
            .render_path("src/__name__/__name__.ts", &ctx())
            .unwrap();
        assert_eq!(path.as_str(), "src/foo-app/foo-app.ts");
    }

    #[test]
    fn rejects_unresolved_path_tokens() {
        let err = SimpleRenderer::new()
            .render_path("src/{{NOPE}}.ts", &ctx())
            .unwrap_err();
        assert_eq!(err.code(), "rendering-failed");
    }

    #[test]
    fn rejects_paths_escaping_root() {
        let err = SimpleRenderer::new()
            .render_path("../__name__", &ctx())
            .unwrap_err();
        assert_eq!(err.code(), "path-escapes-root");
    }

    #[test]
    fn content_keeps_unknown_tokens() {
        let out = SimpleRenderer::new()
            .render_content("{{PROJECT_NAME}} {{OTHER}}", &ctx())
            .unwrap();
        assert_eq!(out, "FooApp {{OTHER}}");
    }
}
