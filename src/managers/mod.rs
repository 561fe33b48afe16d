//! # Package Manager Adapters
//!
//! Every manager (scoop, winget, choco, or a user-declared one) is described
//! by a [`ManagerDefinition`]: a set of command templates keyed by operation
//! plus a parser-kind tag. No manager needs custom Rust code.
//!
//! ## Module Structure
//!
//! ### [`config`] - Manager Definitions
//!
//! `ManagerDefinition` and `ManagerOverride` (the user-declared, partially
//! specified variant that shallow-merges over a built-in).
//!
//! ### [`template`] - Command Templates
//!
//! Renders `{token}` placeholders, collapses whitespace runs. A manager with
//! no template for an operation does not support it.
//!
//! ### [`parsers`] - Output Parsers
//!
//! - **Token parser**: first whitespace token per line (scoop)
//! - **Column parser**: runs of 2+ spaces separate columns (winget)
//! - **Delimited parser**: `|`-separated fields (choco `--limit-output`)
//!
//! ### [`registry`] - Built-in Managers and Merging
//!
//! Built-in definitions merged with overrides from configuration:
//!
//! ```json
//! {
//!   "managers": [
//!     { "id": "winget", "install": "winget install --id \"{id}\" -e" },
//!     { "id": "npm", "label": "npm", "search": "npm search {query} --parseable", "parse": "delimited" }
//!   ]
//! }
//! ```
//!
//! Known ids merge field by field; unknown ids are appended.

pub mod config;
pub mod parsers;
pub mod registry;
pub mod template;

pub use config::{ExecEncoding, ManagerDefinition, ManagerOverride, Operation, ParserKind};
pub use registry::{BASE_MANAGER_ID, ManagerRegistry, builtin_managers};
pub use template::{TemplateValues, render, render_opt};
