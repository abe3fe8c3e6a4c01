use std::collections::HashMap;

use tracing::debug;

use crate::commands;
use crate::state::{GameState, StatePatch};

/// What a handler hands back. `output` is always present, one terminal line
/// per element; it is the single channel the UI renders and the objective
/// validator inspects. `error` marks the result for pipeline short-circuits.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub output: Vec<String>,
    pub error: Option<String>,
    pub new_state: Option<StatePatch>,
}

impl CommandOutput {
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            output: lines.into_iter().map(Into::into).collect(),
            error: None,
            new_state: None,
        }
    }

    pub fn line(line: impl Into<String>) -> Self {
        Self::lines([line.into()])
    }

    pub fn error(lines: Vec<String>, error: impl Into<String>) -> Self {
        Self {
            output: lines,
            error: Some(error.into()),
            new_state: None,
        }
    }

    pub fn with_patch(mut self, patch: StatePatch) -> Self {
        self.new_state = Some(patch);
        self
    }
}

/// One simulated shell command. Handlers are total: they always return a
/// `CommandOutput`, never panic on player input.
pub trait Command {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput;
}

/// Tab-completion hook for a command's argument position.
pub type CompletionFn = fn(&str, &GameState) -> Vec<String>;

pub struct CommandEntry {
    pub handler: Box<dyn Command + Send + Sync>,
    pub completion: Option<CompletionFn>,
    pub description: &'static str,
}

/// Active command set for a mission. Keeps registration order so help and
/// the unknown-command listing stay stable.
pub struct CommandRegistry {
    entries: HashMap<String, CommandEntry>,
    order: Vec<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, name: &str, entry: CommandEntry) {
        if !self.entries.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.entries.insert(name.to_string(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn command_names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// The full definition table. Every handler exists regardless of
    /// `allowed_commands`; that list only shapes the generated help text.
    pub fn base(allowed_commands: &[String]) -> Self {
        commands::base_registry(allowed_commands)
    }

    /// Keeps entries named in `allowed` plus the two meta-commands that are
    /// always present.
    pub fn filtered(self, allowed: &[String]) -> Self {
        let mut filtered = CommandRegistry::new();
        let mut entries = self.entries;
        for name in self.order {
            let always = name == "hint" || name == "help";
            if !always && !allowed.iter().any(|a| *a == name) {
                continue;
            }
            if let Some(entry) = entries.remove(&name) {
                filtered.register(&name, entry);
            }
        }
        filtered
    }

    pub fn execute(&self, command: &str, args: &str, state: &GameState) -> CommandOutput {
        let Some(entry) = self.entries.get(command) else {
            return CommandOutput::error(
                vec![
                    format!("Command not found: {}", command),
                    format!("Available commands: {}", self.order.join(", ")),
                ],
                "Unknown command",
            );
        };
        debug!(command, args, "executing command");
        entry.handler.execute(args, state)
    }

    /// Splits on `|` and runs the chain. The first stage reads the real
    /// filesystem; later stages stream the previous stage's lines through
    /// the four transformation commands (`head`, `tail`, `wc`, `grep`).
    /// Anything else in a later stage falls through to normal dispatch.
    /// That asymmetry is a deliberate scope limit of the teaching tool.
    pub fn execute_piped(&self, full_command: &str, state: &GameState) -> CommandOutput {
        let segments: Vec<&str> = full_command.split('|').map(str::trim).collect();

        if segments.len() == 1 {
            let Some((command, args)) = split_command(segments[0]) else {
                return CommandOutput::error(
                    vec!["Error: empty command".to_string()],
                    "Empty command",
                );
            };
            return self.execute(command, args, state);
        }

        let mut current_output: Vec<String> = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            let Some((command, args)) = split_command(segment) else {
                return CommandOutput::error(
                    vec!["Error: empty command in pipe".to_string()],
                    "Empty command in pipe",
                );
            };

            let result = if i == 0 {
                self.execute(command, args, state)
            } else {
                debug!(command, stage = i, "piping into stage");
                self.execute_pipe_stage(command, args, state, &current_output)
            };

            if result.error.is_some() {
                return result;
            }
            current_output = result.output;
        }

        CommandOutput::lines(current_output)
    }

    /// Stage 2+ of a pipeline: operates on the previous stage's lines
    /// instead of the filesystem.
    fn execute_pipe_stage(
        &self,
        command: &str,
        args: &str,
        state: &GameState,
        input_lines: &[String],
    ) -> CommandOutput {
        match command {
            "head" => {
                let n = parse_pipe_count(args);
                CommandOutput::lines(input_lines.iter().take(n).cloned())
            }
            "tail" => {
                let n = parse_pipe_count(args);
                let skip = input_lines.len().saturating_sub(n);
                CommandOutput::lines(input_lines.iter().skip(skip).cloned())
            }
            "wc" => {
                let content = input_lines.join("\n");
                let words = content.split_whitespace().count();
                CommandOutput::line(format!(
                    "{} {} {}",
                    input_lines.len(),
                    words,
                    content.len()
                ))
            }
            "grep" => {
                let pattern = args.trim().to_lowercase();
                CommandOutput::lines(
                    input_lines
                        .iter()
                        .filter(|line| line.to_lowercase().contains(&pattern))
                        .cloned(),
                )
            }
            // not a stream command: normal dispatch, which will usually
            // complain about a missing file operand
            _ => self.execute(command, args, state),
        }
    }

    /// Single-token input completes against command names by prefix;
    /// otherwise the command's own completion hook decides.
    pub fn completions(&self, input: &str, state: &GameState) -> Vec<String> {
        let trimmed = input.trim();
        let mut parts = trimmed.split(' ');
        let Some(command) = parts.next().filter(|c| !c.is_empty()) else {
            return Vec::new();
        };

        if parts.next().is_none() {
            let prefix = command.to_lowercase();
            return self
                .order
                .iter()
                .filter(|name| name.starts_with(&prefix))
                .cloned()
                .collect();
        }

        match self.entries.get(command).and_then(|e| e.completion) {
            Some(complete) => complete(input, state),
            None => Vec::new(),
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// First whitespace-delimited token is the command, the rest is the raw
/// argument string.
fn split_command(segment: &str) -> Option<(&str, &str)> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(match trimmed.split_once(' ') {
        Some((command, args)) => (command, args.trim_start()),
        None => (trimmed, ""),
    })
}

/// Accepts `-n 4`, `-n4`, and `-4`; anything unparseable falls back to the
/// conventional 10.
fn parse_pipe_count(args: &str) -> usize {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return 10;
    }
    trimmed
        .replace("-n", "")
        .replace('-', "")
        .trim()
        .parse()
        .unwrap_or(10)
}
