//! # kubetpl_render
//!
//! Template rendering and dispatch for kubetpl.
//!
//! Templates use Tera (Jinja2-style) syntax and are rendered with the
//! manifest's `global` variables plus any command-line overrides. Rendered
//! documents are either printed with a `### File:` header or passed to
//! kubectl one file at a time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use kubetpl_render::{OutputMode, RenderContext, RenderDispatcher};
//! use kubetpl_resources::{ResolvedFile, Variables};
//! use kubetpl_runner::{KubectlOptions, KubectlRunner};
//!
//! # async fn run(files: Vec<ResolvedFile>) -> Result<(), Box<dyn std::error::Error>> {
//! let context = RenderContext::new(Variables::new())
//!     .with_overrides(vec![("env".to_string(), "stage".to_string())]);
//! let mode = OutputMode::for_verb("apply", Some("stage-cluster"))?;
//! let dispatcher = RenderDispatcher::new(KubectlRunner::new("kubectl", KubectlOptions::default()), mode);
//! dispatcher.dispatch(&files, &context, &mut std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod dispatcher;
pub mod error;
pub mod renderer;

pub use context::RenderContext;
pub use dispatcher::{DispatchSummary, OutputMode, RenderDispatcher, TEMPLATE_VERB};
pub use error::{RenderError, RenderResult};
pub use renderer::TemplateRenderer;
