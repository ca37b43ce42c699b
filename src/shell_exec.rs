//! External command execution.
//!
//! Every `git` invocation goes through [`run`] so that command lines and
//! timings show up in `-vv` output:
//!
//! ```text
//! $ git config --local --get pivotal.main-remote [repo]
//! [gp-trace] context=repo cmd="git config ..." dur=3.1ms ok=true
//! ```

use std::process::{Command, Output};
use std::time::Instant;

/// Execute a command, logging `cmd_str` and the duration at debug level.
///
/// `context` is a short label for where the command runs (usually the
/// repository directory name). `cmd_str` is what gets logged in place of the
/// real command line, so arguments carrying secrets
/// (`git config github.oauth <token>`) can be masked.
pub fn run(cmd: &mut Command, context: Option<&str>, cmd_str: &str) -> std::io::Result<Output> {
    match context {
        Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
        None => log::debug!("$ {}", cmd_str),
    }

    let t0 = Instant::now();
    let result = cmd.output();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let ctx = context.map(|c| format!("context={c} ")).unwrap_or_default();
    match &result {
        Ok(output) => log::debug!(
            "[gp-trace] {}cmd=\"{}\" dur={:.1}ms ok={}",
            ctx,
            cmd_str,
            duration_ms,
            output.status.success()
        ),
        Err(e) => log::debug!(
            "[gp-trace] {}cmd=\"{}\" dur={:.1}ms err=\"{}\"",
            ctx,
            cmd_str,
            duration_ms,
            e
        ),
    }

    result
}
