//! Terminal rendering of stories.

use chrono::{DateTime, Utc};
use color_print::cformat;

use super::{Comment, Story};
use crate::styling::wrap_text_at_width;

/// Width of the right-aligned label column.
const LABEL_WIDTH: usize = 12;

/// Menu label for a story: `"feature Add login"`.
pub fn story_label(story: &Story) -> String {
    format!("{} {}", story.story_type, story.name)
}

/// Render a story and its comments as labelled, wrapped lines.
///
/// `width` is the total line width; long values wrap under their label.
pub fn format_story(story: &Story, comments: &[Comment], width: usize) -> String {
    let mut lines = Vec::new();
    let value_width = width.saturating_sub(LABEL_WIDTH + 1).max(20);

    let mut field = |label: &str, value: &str| {
        let wrapped = wrap_text_at_width(value, value_width);
        let mut wrapped = wrapped.into_iter();
        let first = wrapped.next().unwrap_or_default();
        let label = format!("{label:>LABEL_WIDTH$}");
        lines.push(cformat!("<bold>{label}</> {first}"));
        for rest in wrapped {
            lines.push(format!("{:LABEL_WIDTH$} {rest}", ""));
        }
    };

    field("ID:", &story.id.to_string());
    field("Title:", &story.name);
    field("Type:", &story.story_type.to_string());
    field("State:", &story.current_state.to_string());
    if let Some(estimate) = story.estimate {
        field("Estimate:", &format_estimate(estimate));
    }
    if let Some(created) = story.created_at.as_deref().and_then(format_date) {
        field("Created:", &created);
    }
    field("URL:", &story.url);

    if let Some(description) = story.description.as_deref().filter(|d| !d.trim().is_empty()) {
        for (i, paragraph) in description.trim().lines().enumerate() {
            field(if i == 0 { "Description:" } else { "" }, paragraph);
        }
    }

    for comment in comments {
        let Some(text) = comment.text.as_deref().filter(|t| !t.trim().is_empty()) else {
            continue;
        };
        let author = comment
            .person
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("unknown");
        let date = comment
            .created_at
            .as_deref()
            .and_then(format_date)
            .map(|d| format!(", {d}"))
            .unwrap_or_default();
        field("Note:", &format!("{text} ({author}{date})"));
    }

    lines.join("\n")
}

fn format_estimate(estimate: f64) -> String {
    if estimate.fract() == 0.0 {
        format!("{estimate:.0}")
    } else {
        estimate.to_string()
    }
}

/// `2024-03-01T12:00:00Z` -> `2024-03-01`. Unparseable dates are dropped.
fn format_date(timestamp: &str) -> Option<String> {
    let parsed: DateTime<Utc> = DateTime::parse_from_rfc3339(timestamp).ok()?.into();
    Some(parsed.format("%Y-%m-%d").to_string())
}
