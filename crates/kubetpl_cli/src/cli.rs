//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use kubetpl_runner::DEFAULT_KUBECTL;

/// kubetpl - template Kubernetes resource sets and pass them to kubectl
#[derive(Parser, Debug)]
#[command(name = "kubetpl")]
#[command(version, about = "Template a resource set and pass it to kubectl")]
#[command(long_about = r#"
Resolves the include tree of a resource set, renders every template with the
set's global variables, then prints the result (`template`) or pipes each
document to `kubectl <command> --context <context> -f -`.

EXAMPLES:
  kubetpl template cluster/prod.yaml
  kubetpl apply cluster/prod.yaml --include apps --var tag=v1.4.2
  kubetpl delete cluster/prod.yaml --exclude base

VARIABLES:
  Templates see the set's `global` mapping, overridden by --var. Referencing
  a variable that is not defined is an error, not an empty string; guard
  optional values with `{% if name is defined %}` or `{{ name | default(value="") }}`.

EXIT CODES:
  0 - Success
  1 - Resource set, template or kubectl error
  2 - Invalid arguments
"#)]
pub struct Cli {
    /// Template resource set and pass to "kubectl <command>" ("template" prints instead)
    pub command: String,

    /// Resource set to template
    pub file: PathBuf,

    /// Resource sets to include explicitly (prefix match)
    #[arg(short, long = "include", value_name = "PREFIX", conflicts_with = "exclude")]
    pub include: Vec<String>,

    /// Resource sets to exclude explicitly (prefix match)
    #[arg(short, long = "exclude", value_name = "PREFIX")]
    pub exclude: Vec<String>,

    /// Provide variables to templates explicitly
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Path to the kubectl binary
    #[arg(long, env = "KUBETPL_KUBECTL", default_value = DEFAULT_KUBECTL)]
    pub kubectl: PathBuf,

    /// Fail on include nodes without 'name' or 'path' instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Print kubectl invocations instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Parse a `KEY=VALUE` assignment, splitting at the first `=`.
pub fn parse_var(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty variable name in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_var() {
        assert_eq!(
            parse_var("env=stage").unwrap(),
            ("env".to_string(), "stage".to_string())
        );
        assert_eq!(
            parse_var("args=--flag=1").unwrap(),
            ("args".to_string(), "--flag=1".to_string())
        );
        assert_eq!(parse_var("empty=").unwrap(), ("empty".to_string(), String::new()));
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=value").is_err());
    }

    #[test]
    fn test_positionals_and_defaults() {
        let cli = Cli::try_parse_from(["kubetpl", "apply", "set.yaml"]).unwrap();
        assert_eq!(cli.command, "apply");
        assert_eq!(cli.file, PathBuf::from("set.yaml"));
        assert!(cli.include.is_empty() && cli.exclude.is_empty());
        assert!(!cli.strict && !cli.dry_run);
    }

    #[test]
    fn test_repeatable_options() {
        let cli = Cli::try_parse_from([
            "kubetpl", "template", "set.yaml", "-i", "apps", "--include", "base", "--var",
            "a=1", "--var", "a=2", "--kubectl", "/opt/bin/kubectl",
        ])
        .unwrap();
        assert_eq!(cli.include, vec!["apps", "base"]);
        assert_eq!(
            cli.vars,
            vec![
                ("a".to_string(), "1".to_string()),
                ("a".to_string(), "2".to_string())
            ]
        );
        assert_eq!(cli.kubectl, PathBuf::from("/opt/bin/kubectl"));
    }

    #[test]
    fn test_include_conflicts_with_exclude() {
        let err = Cli::try_parse_from(["kubetpl", "apply", "set.yaml", "-i", "a", "-e", "b"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_malformed_var_rejected() {
        let err = Cli::try_parse_from(["kubetpl", "apply", "set.yaml", "--var", "oops"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
