use crate::command::{Command, CommandOutput};
use crate::state::GameState;

/// pwd
/// Arguments are ignored; prints the current directory, "/" for the root.
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, _args: &str, state: &GameState) -> CommandOutput {
        CommandOutput::line(state.current_directory.clone())
    }
}
