//! Git config as the backing store for scoped settings.
//!
//! | Scope    | git config file | key                     |
//! |----------|-----------------|-------------------------|
//! | `global` | `--global`      | `<key>`                 |
//! | `local`  | `--local`       | `<key>`                 |
//! | `branch` | `--local`       | `branch.<current>.<key>` |

use super::Repository;
use crate::config::{ConfigBackend, Scope};
use crate::git::branch_config_key;

impl Repository {
    /// Resolve the config file flag and the full key for `key` at `scope`.
    fn scoped_key(&self, key: &str, scope: Scope) -> anyhow::Result<(&'static str, String)> {
        Ok(match scope {
            Scope::Global => ("--global", key.to_string()),
            Scope::Local => ("--local", key.to_string()),
            Scope::Branch => {
                let branch = self.require_current_branch("use branch settings")?;
                ("--local", branch_config_key(&branch, key))
            }
        })
    }
}

impl ConfigBackend for Repository {
    fn read(&self, key: &str, scope: Scope) -> anyhow::Result<Option<String>> {
        self.ensure_repository()?;
        let (file, full_key) = self.scoped_key(key, scope)?;
        self.config_value(&["config", file, "--get", &full_key])
    }

    fn write(&self, key: &str, value: &str, scope: Scope) -> anyhow::Result<()> {
        self.ensure_repository()?;
        let (file, full_key) = self.scoped_key(key, scope)?;
        // Values may be tokens; keep them out of logs and error messages.
        // git writes through a lock file, so a failed write leaves the old value.
        let shown = format!("git config {file} {full_key} <value>");
        self.run_command_labeled(&["config", file, &full_key, value], &shown)?;
        Ok(())
    }
}
