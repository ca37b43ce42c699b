//! Git operations.
//!
//! All repository access shells out to `git` through [`Repository`]. The same
//! type backs the scoped settings store (see [`crate::config`]).

mod error;
mod parse;
mod repository;
#[cfg(test)]
pub(crate) mod test_repo;

pub use error::GitError;
pub use parse::{branch_config_key, story_id_from_branch};
pub use repository::{PullMode, Repository, set_base_path};
