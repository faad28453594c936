//! Render dispatch.
//!
//! Renders resolved files in order and routes each document either to an
//! output stream (`template` verb) or to the command runner. The first
//! failure stops the run; files already applied stay applied.

use std::io::Write;

use tracing::{debug, info};

use kubetpl_resources::ResolvedFile;
use kubetpl_runner::{ApplyRequest, CommandRunner};

use crate::context::RenderContext;
use crate::error::{RenderError, RenderResult};
use crate::renderer::TemplateRenderer;

/// Verb that prints rendered documents instead of running kubectl.
pub const TEMPLATE_VERB: &str = "template";

/// Where rendered documents go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Write each document, with a file header, to the output stream.
    Print,
    /// Pass each document to `kubectl <verb> --context <context>`.
    Apply { verb: String, context: String },
}

impl OutputMode {
    /// Select the mode for a verb; any verb but `template` needs a context.
    pub fn for_verb(verb: &str, context: Option<&str>) -> RenderResult<Self> {
        if verb == TEMPLATE_VERB {
            return Ok(OutputMode::Print);
        }
        match context {
            Some(context) => Ok(OutputMode::Apply {
                verb: verb.to_string(),
                context: context.to_string(),
            }),
            None => Err(RenderError::MissingContext {
                verb: verb.to_string(),
            }),
        }
    }
}

/// Counts for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub rendered: usize,
    pub applied: usize,
}

/// Renders files and hands the results to their destination.
pub struct RenderDispatcher<R> {
    renderer: TemplateRenderer,
    runner: R,
    mode: OutputMode,
}

impl<R: CommandRunner> RenderDispatcher<R> {
    /// Create a dispatcher sending documents through `runner`.
    pub fn new(runner: R, mode: OutputMode) -> Self {
        Self {
            renderer: TemplateRenderer::new(),
            runner,
            mode,
        }
    }

    /// Render and dispatch every file in order, stopping at the first error.
    pub async fn dispatch<W: Write>(
        &self,
        files: &[ResolvedFile],
        context: &RenderContext,
        out: &mut W,
    ) -> RenderResult<DispatchSummary> {
        let mut summary = DispatchSummary::default();

        for file in files {
            debug!("Rendering {} (from {})", file, file.logical);
            let document = self.renderer.render_file(&file.path, context)?;
            summary.rendered += 1;

            match &self.mode {
                OutputMode::Print => write_document(out, file, &document)?,
                OutputMode::Apply { verb, context: cluster } => {
                    let request = ApplyRequest {
                        verb,
                        context: cluster,
                        document: &document,
                        source: &file.path,
                    };
                    let result = self.runner.apply(&request).await?;
                    if !result.success() {
                        return Err(RenderError::ExternalCommand {
                            file: file.path.clone(),
                            status: result,
                        });
                    }
                    summary.applied += 1;
                }
            }
        }

        info!(
            "Processed {} file(s), {} passed to kubectl",
            summary.rendered, summary.applied
        );
        Ok(summary)
    }
}

fn write_document<W: Write>(
    out: &mut W,
    file: &ResolvedFile,
    document: &str,
) -> RenderResult<()> {
    writeln!(out, "### File: {}", file.path.display()).map_err(RenderError::Output)?;
    out.write_all(document.as_bytes()).map_err(RenderError::Output)?;
    if !document.ends_with('\n') {
        out.write_all(b"\n").map_err(RenderError::Output)?;
    }
    out.flush().map_err(RenderError::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use kubetpl_resources::{LogicalPath, Variables};
    use kubetpl_runner::MockRunner;
    use serde_json::json;
    use tempfile::tempdir;

    fn resolved(dir: &Path, name: &str, content: &str) -> ResolvedFile {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        ResolvedFile {
            logical: LogicalPath::new(name),
            path,
        }
    }

    fn context() -> RenderContext {
        let mut globals = Variables::new();
        globals.insert("env".to_string(), json!("prod"));
        RenderContext::new(globals)
    }

    fn apply_mode() -> OutputMode {
        OutputMode::for_verb("apply", Some("c1")).unwrap()
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(OutputMode::for_verb("template", None).unwrap(), OutputMode::Print);
        assert_eq!(
            OutputMode::for_verb("delete", Some("c1")).unwrap(),
            OutputMode::Apply {
                verb: "delete".to_string(),
                context: "c1".to_string()
            }
        );
        assert!(matches!(
            OutputMode::for_verb("apply", None),
            Err(RenderError::MissingContext { .. })
        ));
    }

    #[tokio::test]
    async fn test_print_mode_writes_headers() {
        let temp = tempdir().unwrap();
        let files = vec![
            resolved(temp.path(), "a.yaml", "env: {{ env }}"),
            resolved(temp.path(), "b.yaml", "kind: Service\n"),
        ];
        let runner = MockRunner::new();
        let dispatcher = RenderDispatcher::new(runner.clone(), OutputMode::Print);

        let mut out = Vec::new();
        let summary = dispatcher.dispatch(&files, &context(), &mut out).await.unwrap();

        let expected = format!(
            "### File: {}\nenv: prod\n### File: {}\nkind: Service\n",
            files[0].path.display(),
            files[1].path.display()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(summary, DispatchSummary { rendered: 2, applied: 0 });
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_apply_mode_sends_each_document() {
        let temp = tempdir().unwrap();
        let files = vec![
            resolved(temp.path(), "a.yaml", "env: {{ env }}"),
            resolved(temp.path(), "b.yaml", "kind: Service"),
        ];
        let runner = MockRunner::new();
        let dispatcher = RenderDispatcher::new(runner.clone(), apply_mode());

        let mut out = Vec::new();
        let summary = dispatcher.dispatch(&files, &context(), &mut out).await.unwrap();

        assert!(out.is_empty());
        assert_eq!(summary.applied, 2);
        let calls = runner.get_calls();
        assert_eq!(calls[0].document, "env: prod");
        assert_eq!(calls[0].verb, "apply");
        assert_eq!(calls[0].context, "c1");
        assert_eq!(calls[1].source, files[1].path);
    }

    #[tokio::test]
    async fn test_failing_command_stops_the_run() {
        let temp = tempdir().unwrap();
        let files = vec![
            resolved(temp.path(), "1.yaml", "one"),
            resolved(temp.path(), "2.yaml", "two"),
            resolved(temp.path(), "3.yaml", "three"),
        ];
        let runner = MockRunner::new().add_exit_code(0).add_exit_code(2);
        let dispatcher = RenderDispatcher::new(runner.clone(), apply_mode());

        let err = dispatcher
            .dispatch(&files, &context(), &mut Vec::new())
            .await
            .unwrap_err();

        match err {
            RenderError::ExternalCommand { file, status } => {
                assert_eq!(file, files[1].path);
                assert_eq!(status.exit_code, Some(2));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(runner.call_count(), 2);
    }

    #[tokio::test]
    async fn test_signalled_command_stops_the_run() {
        let temp = tempdir().unwrap();
        let files = vec![
            resolved(temp.path(), "1.yaml", "one"),
            resolved(temp.path(), "2.yaml", "two"),
        ];
        let runner = MockRunner::new().add_signal();
        let dispatcher = RenderDispatcher::new(runner.clone(), apply_mode());

        let err = dispatcher
            .dispatch(&files, &context(), &mut Vec::new())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("terminated by signal"));
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_template_error_stops_before_later_files() {
        let temp = tempdir().unwrap();
        let files = vec![
            resolved(temp.path(), "bad.yaml", "{% if %}"),
            resolved(temp.path(), "good.yaml", "fine"),
        ];
        let runner = MockRunner::new();
        let dispatcher = RenderDispatcher::new(runner.clone(), apply_mode());

        let result = dispatcher.dispatch(&files, &context(), &mut Vec::new()).await;
        assert!(matches!(result, Err(RenderError::Template { .. })));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_runner_failure_propagates() {
        let temp = tempdir().unwrap();
        let files = vec![resolved(temp.path(), "a.yaml", "x")];
        let dispatcher =
            RenderDispatcher::new(MockRunner::new().simulate_failure("no kubectl"), apply_mode());

        let result = dispatcher.dispatch(&files, &context(), &mut Vec::new()).await;
        assert!(matches!(result, Err(RenderError::Runner(_))));
    }
}
