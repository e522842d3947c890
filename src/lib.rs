//! # wtsrc - tsrc with project hooks
//!
//! `wtsrc` wraps the [tsrc](https://github.com/your-tools/tsrc) multi-repository
//! tool. Each command can be bracketed by shell commands declared in the
//! workspace's manifest repository, named actions can be run on demand, and
//! manifest URLs can be registered under short aliases.
//!
//! ## Project file
//!
//! `wtsrc.yml` lives in the manifest clone at `<workspace>/.tsrc/manifest`:
//!
//! ```yaml
//! commands:
//!   sync:
//!     pre: "echo before"
//!     post: "echo after"
//! actions:
//!   build:
//!     action: "make all"
//!     comment: "builds everything"
//! ```
//!
//! ```text
//! wtsrc sync            # echo before, tsrc sync, echo after
//! wtsrc action build    # make all
//! wtsrc add-alias core --url git@example.com:team/manifest.git
//! wtsrc init-alias core
//! wtsrc set-branch backend/api develop
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: project configuration, command and alias registries, workspace
//!   layout and the tsrc manifest and config files
//! - [`application`]: the loader, the action resolver and the command lifecycle
//! - [`infrastructure`]: file stores and the shell command runner
//! - [`presentation`]: the clap command table and command handlers
//! - [`common`]: errors, logging, settings and working-directory handling
//!
//! Hooks run one at a time in the manifest directory and receive
//! `WTSRC_COMMAND`, `WTSRC_HOOK` and `WTSRC_WORKSPACE_ROOT` in their
//! environment. A failing hook stops the command and its exit code becomes the
//! process exit code.

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use crate::common::error::WtsrcError;
pub use crate::common::result::WtsrcResult as Result;
