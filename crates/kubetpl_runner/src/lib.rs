//! # kubetpl_runner
//!
//! kubectl execution wrapper for kubetpl.
//!
//! Rendered documents are handed to the cluster-management tool one at a
//! time, on its standard input:
//!
//! - **KubectlRunner**: spawns `<kubectl> <verb> --context <context> -f -`
//! - **Dry-Run Mode**: print the command line without executing it
//! - **Mock Runner**: records requests and replays scripted exit codes
//!
//! # Example
//!
//! ```rust,no_run
//! use kubetpl_runner::{ApplyRequest, CommandRunner, KubectlOptions, KubectlRunner};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = KubectlRunner::new("kubectl", KubectlOptions::default());
//!     let request = ApplyRequest {
//!         verb: "apply",
//!         context: "staging",
//!         document: "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: demo\n",
//!         source: Path::new("namespace.yaml"),
//!     };
//!     let result = runner.apply(&request).await?;
//!     println!("kubectl finished with {}", result);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod kubectl;
pub mod mock;
pub mod runner;

pub use error::{RunnerError, RunnerResult};
pub use kubectl::{KubectlOptions, KubectlRunner, DEFAULT_KUBECTL};
pub use mock::{CapturedCall, MockRunner};
pub use runner::{ApplyRequest, CommandRunner, ExecutionResult};
