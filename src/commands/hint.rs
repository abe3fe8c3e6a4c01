use crate::command::{Command, CommandOutput};
use crate::state::GameState;

/// hint
/// Shows the first incomplete objective in array order, with its hint text
/// when the author supplied one.
pub struct HintCommand;

impl Command for HintCommand {
    fn execute(&self, _args: &str, state: &GameState) -> CommandOutput {
        let Some(objective) = state.objectives.iter().find(|o| !o.completed) else {
            return CommandOutput::line("All objectives completed! Great work, Detective.");
        };

        let hint = objective
            .hint
            .as_deref()
            .unwrap_or("No specific hint available for this objective.");
        CommandOutput::lines([
            "HINT:".to_string(),
            String::new(),
            format!("Objective: {}", objective.description),
            String::new(),
            hint.to_string(),
            String::new(),
        ])
    }
}
