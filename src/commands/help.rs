use crate::command::{Command, CommandOutput};
use crate::state::GameState;

/// help
/// Lists the mission's commands in registration order plus the fixed
/// game-meta footer. The list is captured at registry construction time.
pub struct HelpCommand {
    allowed_commands: Vec<String>,
}

impl HelpCommand {
    pub fn new(allowed_commands: &[String]) -> Self {
        Self {
            allowed_commands: allowed_commands.to_vec(),
        }
    }
}

pub(crate) fn command_description(command: &str) -> &'static str {
    match command {
        "ls" => "List directory contents",
        "cd" => "Change directory",
        "pwd" => "Print working directory",
        "cat" => "Display file contents",
        "grep" => "Search text patterns",
        "find" => "Search for files",
        "head" => "Show first lines of file",
        "tail" => "Show last lines of file",
        "sort" => "Sort lines in file",
        "uniq" => "Remove duplicate lines",
        "wc" => "Count lines, words, characters",
        "file" => "Determine file type",
        "hint" => "Show hint for current objective",
        "help" => "Show this help message",
        _ => "Command utility",
    }
}

impl Command for HelpCommand {
    fn execute(&self, _args: &str, _state: &GameState) -> CommandOutput {
        let mut lines = vec![
            "Help Menu".to_string(),
            String::new(),
            "Available Commands:".to_string(),
            String::new(),
        ];
        for command in &self.allowed_commands {
            lines.push(format!(
                "  {:<12} - {}",
                command,
                command_description(command)
            ));
        }
        lines.extend(
            [
                "",
                "Game Commands:",
                "  objectives   - Show current mission objectives",
                "  hint         - Show hint for current objective",
                "  help         - Show this help menu",
                "  exit         - Return to mission selection",
                "",
                "Tip: Use these commands to investigate and solve the mystery!",
            ]
            .map(String::from),
        );
        CommandOutput::lines(lines)
    }
}
