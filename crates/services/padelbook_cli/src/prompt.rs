//! Terminal implementation of the interaction port.
//!
//! User-facing output uses writeln! (this is a CLI binary, not debug output).

use dialoguer::Confirm;
use padelbook_common::{ConfirmPrompt, InteractionPort, Notice, NoticeLevel};
use std::io::{self, IsTerminal, Write};
use tracing::warn;

/// Asks on the terminal and prints notices.
///
/// With `assume_yes` every question is answered with its confirm option.
/// Without a terminal to ask on, questions are declined.
pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl InteractionPort for TerminalPrompter {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        if self.assume_yes {
            return true;
        }
        if !io::stdin().is_terminal() {
            warn!(title = %prompt.title, "no terminal to confirm on, declining");
            return false;
        }
        let question = format!(
            "{}\n  {}\n  [y] {} / [n] {}",
            prompt.title, prompt.text, prompt.confirm_label, prompt.cancel_label
        );
        match Confirm::new().with_prompt(question).default(false).interact() {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = %err, "confirmation prompt failed, declining");
                false
            }
        }
    }

    fn notify(&self, notice: Notice) {
        let line = notice_line(&notice);
        let result = match notice.level {
            NoticeLevel::Error => writeln!(io::stderr(), "{line}"),
            NoticeLevel::Success | NoticeLevel::Info => writeln!(io::stdout(), "{line}"),
        };
        if let Err(err) = result {
            warn!(error = %err, "failed to print notice");
        }
    }
}

pub fn notice_line(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Success => "✔",
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Error => "✘",
    };
    format!("{marker} {}: {}", notice.title, notice.text)
}
