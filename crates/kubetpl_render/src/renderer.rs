//! Template rendering.

use std::fs;
use std::path::Path;

use tera::Tera;
use tracing::debug;

use crate::context::RenderContext;
use crate::error::{RenderError, RenderResult};

/// Tera-based template renderer.
///
/// Every file is compiled on its own; templates cannot include each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render template source registered under `name`.
    pub fn render_str(
        &self,
        name: &str,
        source: &str,
        context: &RenderContext,
    ) -> Result<String, tera::Error> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(name, source)?;
        tera.render(name, &context.to_tera_context())
    }

    /// Read and render a template file.
    pub fn render_file(&self, path: &Path, context: &RenderContext) -> RenderResult<String> {
        let source = fs::read_to_string(path).map_err(|source| RenderError::Read {
            file: path.to_path_buf(),
            source,
        })?;

        let rendered = self
            .render_str(&path.to_string_lossy(), &source, context)
            .map_err(|e| RenderError::Template {
                file: path.to_path_buf(),
                message: describe(&e),
            })?;

        debug!("Rendered {:?} ({} bytes)", path, rendered.len());
        Ok(rendered)
    }
}

/// Flatten a tera error and its causes into one line.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubetpl_resources::Variables;
    use serde_json::json;
    use tempfile::tempdir;

    fn context() -> RenderContext {
        let mut globals = Variables::new();
        globals.insert("env".to_string(), json!("prod"));
        globals.insert("db".to_string(), json!({"host": "pg.internal"}));
        RenderContext::new(globals)
    }

    #[test]
    fn test_render_variables() {
        let renderer = TemplateRenderer::new();
        let rendered = renderer
            .render_str("t.yaml", "env: {{ env }}\nhost: {{ db.host }}\n", &context())
            .unwrap();
        assert_eq!(rendered, "env: prod\nhost: pg.internal\n");
    }

    #[test]
    fn test_literal_text_unchanged() {
        let literal = "apiVersion: v1\nkind: ConfigMap\ndata:\n  html: \"<b>&</b>\"\n";
        let renderer = TemplateRenderer::new();
        assert_eq!(renderer.render_str("cm.yaml", literal, &context()).unwrap(), literal);
        assert_eq!(
            renderer
                .render_str("cm.yaml", literal, &RenderContext::default())
                .unwrap(),
            literal
        );
    }

    #[test]
    fn test_control_flow() {
        let renderer = TemplateRenderer::new();
        let rendered = renderer
            .render_str(
                "t.yaml",
                "{% if env == \"prod\" %}replicas: 3{% else %}replicas: 1{% endif %}",
                &context(),
            )
            .unwrap();
        assert_eq!(rendered, "replicas: 3");
    }

    #[test]
    fn test_syntax_error_names_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("broken.yaml");
        fs::write(&path, "name: {{ env ").unwrap();

        let err = TemplateRenderer::new()
            .render_file(&path, &context())
            .unwrap_err();
        assert!(matches!(err, RenderError::Template { ref file, .. } if file == &path));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_undefined_variable_is_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("svc.yaml");
        fs::write(&path, "name: {{ missing }}").unwrap();

        let result = TemplateRenderer::new().render_file(&path, &context());
        assert!(matches!(result, Err(RenderError::Template { .. })));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = TemplateRenderer::new()
            .render_file(Path::new("/nonexistent/kubetpl.yaml"), &context());
        assert!(matches!(result, Err(RenderError::Read { .. })));
    }
}
