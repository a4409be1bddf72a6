//! Terminal implementation of the prompt port.

use std::io::{self, BufRead, Write};

use tasklog_core::ports::{NoticeKind, Prompt};

pub struct ConsolePrompt {
    assume_yes: bool,
}

impl ConsolePrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompt for ConsolePrompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = io::stderr();
        // A closed stdin or a failed write counts as "no".
        if write!(stderr, "{prompt} [y/N] ").and_then(|()| stderr.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&mut self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => println!("{message}"),
            NoticeKind::Warning | NoticeKind::Error => eprintln!("{kind}: {message}"),
        }
    }
}
