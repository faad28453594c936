//! # kubetpl_resources
//!
//! Resource set parsing and resolution for kubetpl.
//!
//! Turns a resource set manifest into the ordered list of template files
//! to render:
//!
//! - Manifest loading (`global`, `context`, `include`)
//! - Include tree flattening into logical paths
//! - Include/exclude prefix selection
//! - Location resolution across the working and manifest directories
//!
//! ## Example
//!
//! ```rust,no_run
//! use kubetpl_resources::{flatten, ManifestLoader, ResourceLocator, Selection};
//!
//! let loader = ManifestLoader::new("sets/prod.yaml");
//! let resource_set = loader.load().unwrap();
//!
//! let logical = flatten(&resource_set.include).paths;
//! let selection = Selection::from_prefixes(vec!["apps".into()], vec![]).unwrap();
//! let selected = selection.apply(&logical);
//!
//! let locator = ResourceLocator::new(std::env::current_dir().unwrap(), loader.manifest_dir());
//! let files = locator.resolve_all(&selected).unwrap();
//! ```

pub mod error;
pub mod filter;
pub mod flatten;
pub mod loader;
pub mod manifest;
pub mod resolver;

pub use error::{ResourceError, ResourceResult};
pub use filter::Selection;
pub use flatten::{flatten, Flattened, LogicalPath, MalformedNode, NodePosition};
pub use loader::ManifestLoader;
pub use manifest::{IncludeNode, NodeLabel, ResourceSet, Variables};
pub use resolver::{is_template_file, ResolvedFile, ResourceLocator, TEMPLATE_EXTENSIONS};
