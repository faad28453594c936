//! Run configuration.

use std::path::PathBuf;

use anyhow::Result;

use kubetpl_resources::Selection;
use kubetpl_runner::KubectlOptions;

use crate::cli::Cli;

/// Everything one invocation needs, built once from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// `template` or a kubectl sub-command
    pub verb: String,
    /// Resource set manifest
    pub manifest: PathBuf,
    pub selection: Selection,
    /// `--var` assignments in command-line order
    pub variables: Vec<(String, String)>,
    pub kubectl: PathBuf,
    pub kubectl_options: KubectlOptions,
    /// Treat malformed include nodes as fatal
    pub strict: bool,
}

impl TryFrom<Cli> for RunConfig {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        let selection = Selection::from_prefixes(cli.include, cli.exclude)?;
        let kubectl_options = if cli.dry_run {
            KubectlOptions::new().dry_run()
        } else {
            KubectlOptions::new()
        };

        Ok(Self {
            verb: cli.command,
            manifest: cli.file,
            selection,
            variables: cli.vars,
            kubectl: cli.kubectl,
            kubectl_options,
            strict: cli.strict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> RunConfig {
        let mut argv = vec!["kubetpl"];
        argv.extend_from_slice(args);
        RunConfig::try_from(Cli::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn test_selection_from_filters() {
        assert_eq!(config(&["apply", "s.yaml"]).selection, Selection::All);
        assert_eq!(
            config(&["apply", "s.yaml", "-e", "base"]).selection,
            Selection::Exclude(vec!["base".to_string()])
        );
        assert_eq!(
            config(&["apply", "s.yaml", "-i", "apps"]).selection,
            Selection::Include(vec!["apps".to_string()])
        );
    }

    #[test]
    fn test_flags_carried_over() {
        let config = config(&["delete", "s.yaml", "--dry-run", "--strict", "--var", "x=1"]);
        assert_eq!(config.verb, "delete");
        assert!(config.kubectl_options.dry_run);
        assert!(config.strict);
        assert_eq!(config.variables, vec![("x".to_string(), "1".to_string())]);
    }
}
