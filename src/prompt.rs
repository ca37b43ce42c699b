//! Collecting values from the operator.
//!
//! Prompts go to stderr so stdout stays clean for command output. Answers
//! are returned raw (trimmed, otherwise unvalidated); callers decide what a
//! value means.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use color_print::cformat;

use crate::git::GitError;
use crate::styling::{eprint, eprintln, prompt_message};

/// Source of operator input.
pub trait Prompt {
    /// Show `text` and return one trimmed line of input.
    fn ask(&self, text: &str) -> anyhow::Result<String>;

    /// Show a numbered menu of `labels` and return the chosen index.
    ///
    /// Keeps asking until the answer names an entry. Fails without asking
    /// when `labels` is empty.
    fn choose(&self, text: &str, labels: &[String]) -> anyhow::Result<usize>;
}

/// Present `choices` by label and return the value paired with the chosen one.
pub fn choose_value<T: Clone>(
    prompt: &dyn Prompt,
    text: &str,
    choices: &[(String, T)],
) -> anyhow::Result<T> {
    let labels: Vec<String> = choices.iter().map(|(label, _)| label.clone()).collect();
    let index = prompt.choose(text, &labels)?;
    Ok(choices[index].1.clone())
}

/// Interpret a menu answer: a 1-based number, or a label (case-insensitive).
pub fn parse_choice(answer: &str, labels: &[String]) -> Option<usize> {
    let answer = answer.trim();
    // A number outside the menu may still be a label ("2024")
    if let Ok(n) = answer.parse::<usize>()
        && (1..=labels.len()).contains(&n)
    {
        return Some(n - 1);
    }
    labels
        .iter()
        .position(|label| label.eq_ignore_ascii_case(answer))
}

/// Refuse to show a menu nothing can be chosen from.
fn ensure_choices(labels: &[String]) -> anyhow::Result<()> {
    if labels.is_empty() {
        return Err(GitError::Other {
            message: "Nothing to choose from".into(),
        }
        .into());
    }
    Ok(())
}

/// Render the menu lines shown before a choice.
fn menu_lines(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| cformat!("  <bold>{}</>. {label}", i + 1))
        .collect()
}

/// Reads answers from stdin, writes prompts to stderr.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    fn read_line(&self) -> anyhow::Result<String> {
        io::stderr().flush()?;
        let mut input = String::new();
        let bytes = io::stdin().lock().read_line(&mut input)?;
        if bytes == 0 {
            // End the prompt line so the error starts on its own line
            eprintln!();
            return Err(GitError::NotInteractive.into());
        }
        Ok(input.trim().to_string())
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&self, text: &str) -> anyhow::Result<String> {
        eprint!("{} ", prompt_message(text.trim_end()));
        self.read_line()
    }

    fn choose(&self, text: &str, labels: &[String]) -> anyhow::Result<usize> {
        ensure_choices(labels)?;
        for line in menu_lines(labels) {
            eprintln!("{line}");
        }
        loop {
            eprint!("{} ", prompt_message(text.trim_end()));
            let answer = self.read_line()?;
            match parse_choice(&answer, labels) {
                Some(index) => return Ok(index),
                None => eprintln!("You must choose one of [1-{}].", labels.len()),
            }
        }
    }
}

/// Answers from a fixed script; records every prompt it was shown.
///
/// Running out of answers behaves like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<String>>,
    shown: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            shown: RefCell::new(Vec::new()),
        }
    }

    /// Prompt texts shown so far, in order. Menus appear once per attempt.
    pub fn shown(&self) -> Vec<String> {
        self.shown.borrow().clone()
    }

    fn next_answer(&self, text: &str) -> anyhow::Result<String> {
        self.shown.borrow_mut().push(text.to_string());
        let answer = self
            .answers
            .borrow_mut()
            .pop_front()
            .ok_or(GitError::NotInteractive)?;
        Ok(answer.trim().to_string())
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, text: &str) -> anyhow::Result<String> {
        self.next_answer(text)
    }

    fn choose(&self, text: &str, labels: &[String]) -> anyhow::Result<usize> {
        ensure_choices(labels)?;
        loop {
            let answer = self.next_answer(text)?;
            if let Some(index) = parse_choice(&answer, labels) {
                return Ok(index);
            }
            log::debug!("Ignoring menu answer {answer:?}");
        }
    }
}
