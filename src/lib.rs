//! Pivotal Tracker and GitHub workflow for git branches.
//!
//! `git-pivotal start` picks a story and creates a branch for it,
//! `git-pivotal finish` pushes the branch, opens a pull request and marks
//! the story finished, and `git-pivotal reminder` shows the story the current
//! branch is for. Settings live in git config, at global, repository, or
//! branch scope.
//!
//! The library API is not stable; it exists so the binary and its tests can
//! share code.

pub mod commands;
pub mod config;
pub mod git;
pub mod github;
pub mod prompt;
pub mod shell_exec;
pub mod styling;
pub mod tracker;
