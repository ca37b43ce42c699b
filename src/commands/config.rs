//! `git-pivotal config show|get|set`.

use std::fmt::Write as _;

use color_print::cformat;
use strum::IntoEnumIterator;

use super::{current_repository, tracker_client};
use crate::config::{Configuration, Scope, Setting};
use crate::git::GitError;
use crate::prompt::TerminalPrompt;
use crate::styling::{eprintln, format_heading, print, println, success_message};
use crate::tracker::Tracker;

pub fn handle_config_show() -> anyhow::Result<()> {
    let repo = current_repository()?;
    let prompt = TerminalPrompt;
    let config = Configuration::new(&repo, &prompt);
    print!("{}", config_show(&config)?);
    Ok(())
}

pub fn handle_config_get(setting: Setting) -> anyhow::Result<()> {
    let repo = current_repository()?;
    let prompt = TerminalPrompt;
    let config = Configuration::new(&repo, &prompt);
    let value = config_get(&config, setting, |config| {
        Ok(Box::new(tracker_client(config)?) as Box<dyn Tracker>)
    })?;
    println!("{value}");
    Ok(())
}

pub fn handle_config_set(setting: Setting, value: &str, global: bool) -> anyhow::Result<()> {
    let repo = current_repository()?;
    let prompt = TerminalPrompt;
    let config = Configuration::new(&repo, &prompt);
    let message = config_set(&config, setting, value, global)?;
    eprintln!("{message}");
    Ok(())
}

/// Every setting with its key, scopes, and the value currently visible.
///
/// Never prompts. Credentials are masked.
pub fn config_show(config: &Configuration) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", format_heading("SETTINGS", Some("stored in git config")))?;

    let name_width = Setting::iter().map(|s| s.to_string().len()).max().unwrap_or(0);
    let key_width = Setting::iter().map(|s| s.key().len()).max().unwrap_or(0);

    for setting in Setting::iter() {
        let info = setting.info();
        let value = match config.value(setting) {
            Ok(value) if value.is_empty() => cformat!("<dim>(not set)</>"),
            Ok(value) if info.secret => mask_secret(&value),
            Ok(value) => value,
            Err(e) if matches!(e.downcast_ref::<GitError>(), Some(GitError::DetachedHead { .. })) => {
                cformat!("<dim>(no branch)</>")
            }
            Err(e) => return Err(e),
        };
        let name = format!("{:name_width$}", setting.to_string());
        let key = format!("{:key_width$}", info.key);
        let scopes = format!("{:<9} -> {:<6}", info.read.to_string(), info.write.to_string());
        writeln!(out, "  {}", cformat!("<bold>{name}</>  {key}  <dim>{scopes}</>  {value}"))?;
    }
    Ok(out)
}

/// The value of one setting, asking for it when unset.
///
/// `connect` builds a tracker client, needed only to offer the project menu.
pub fn config_get(
    config: &Configuration,
    setting: Setting,
    connect: impl FnOnce(&Configuration) -> anyhow::Result<Box<dyn Tracker>>,
) -> anyhow::Result<String> {
    match setting {
        Setting::ProjectId => {
            let stored = config.value(setting)?;
            if !stored.is_empty() {
                return Ok(stored);
            }
            let tracker = connect(config)?;
            Ok(config.project_id(tracker.as_ref())?.to_string())
        }
        Setting::StoryId => Ok(config
            .story_id()?
            .map(|id| id.to_string())
            .unwrap_or_default()),
        _ => config.get(setting),
    }
}

/// Store a setting explicitly and describe what was written.
pub fn config_set(
    config: &Configuration,
    setting: Setting,
    value: &str,
    global: bool,
) -> anyhow::Result<String> {
    config.set(setting, value, global)?;
    let info = setting.info();
    let scope = if global { Scope::Global } else { info.write };
    let shown = if info.secret {
        mask_secret(value.trim())
    } else {
        value.trim().to_string()
    };
    Ok(success_message(cformat!(
        "Set <bold>{}</> to <bold>{shown}</> ({scope})",
        info.key
    ))
    .into_inner())
}

/// Keep the last four characters of a credential.
fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
