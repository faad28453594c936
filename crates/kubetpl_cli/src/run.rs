//! The resolve-render-dispatch pipeline.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use kubetpl_render::{DispatchSummary, OutputMode, RenderContext, RenderDispatcher};
use kubetpl_resources::{flatten, ManifestLoader, ResourceLocator};
use kubetpl_runner::KubectlRunner;

use crate::config::RunConfig;

/// Resolve, render and dispatch the resource set described by `config`.
pub async fn execute<W: Write>(config: &RunConfig, out: &mut W) -> Result<DispatchSummary> {
    info!("Processing resource set {:?} ({})", config.manifest, config.verb);

    let loader = ManifestLoader::new(&config.manifest);
    let resource_set = loader.load()?;

    let mode = OutputMode::for_verb(&config.verb, resource_set.context.as_deref())?;

    let flattened = flatten(&resource_set.include);
    let logical = if config.strict {
        flattened.into_strict()?
    } else {
        flattened.paths
    };
    let selected = config.selection.apply(&logical);
    debug!(
        "{} of {} resource(s) selected",
        selected.len(),
        logical.len()
    );

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let locator = ResourceLocator::new(cwd, loader.manifest_dir());
    let files = locator.resolve_all(&selected)?;

    let context = RenderContext::new(resource_set.global)
        .with_overrides(config.variables.iter().cloned());

    let runner = KubectlRunner::new(&config.kubectl, config.kubectl_options.clone());
    let dispatcher = RenderDispatcher::new(runner, mode);
    let summary = dispatcher.dispatch(&files, &context, out).await?;
    Ok(summary)
}

/// Run against the process's standard output.
pub async fn execute_to_stdout(config: &RunConfig) -> Result<DispatchSummary> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(config, &mut out).await
}
