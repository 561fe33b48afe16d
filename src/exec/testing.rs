//! Scripted runner for unit tests.

use super::{CommandOutput, CommandRunner, RunOptions};
use crate::error::Result;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

struct Rule {
    pattern: String,
    output: CommandOutput,
    delay: Option<Duration>,
}

/// Records every command and answers from rules matched by substring.
/// Unmatched commands succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, pattern: &str, output: CommandOutput) -> Self {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            output,
            delay: None,
        });
        self
    }

    pub fn stdout(self, pattern: &str, stdout: &str) -> Self {
        self.respond(pattern, CommandOutput::ok(stdout))
    }

    pub fn fail(self, pattern: &str) -> Self {
        self.respond(pattern, CommandOutput::failed(1, format!("{} failed", pattern)))
    }

    pub fn slow(mut self, pattern: &str, delay: Duration) -> Self {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            output: CommandOutput::ok(""),
            delay: Some(delay),
        });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &str, _options: &RunOptions) -> Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command.to_string());

        let Some(rule) = self.rules.iter().find(|r| command.contains(&r.pattern)) else {
            return Ok(CommandOutput::ok(""));
        };
        if let Some(delay) = rule.delay {
            thread::sleep(delay);
        }
        Ok(rule.output.clone())
    }
}
