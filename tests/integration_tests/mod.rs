// The CLI tests rely on `/dev/null` stdin and Unix paths
#![cfg(unix)]

pub mod cli_config;
pub mod cli_workflow;
pub mod help;
