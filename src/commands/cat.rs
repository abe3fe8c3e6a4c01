use crate::command::{Command, CommandOutput};
use crate::state::GameState;
use crate::vfs::resolve_path;

/// cat FILE
/// Output carries one element per newline-delimited line of the file. A
/// file is never a single output line unless it has no newlines.
pub struct CatCommand;

impl Command for CatCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let target = args.trim();
        if target.is_empty() {
            return CommandOutput::line("cat: missing file operand");
        }

        let file_path = resolve_path(&state.current_directory, target);
        match state.filesystem.find_file(&file_path) {
            Some(file) => CommandOutput::lines(file.content.split('\n')),
            None => CommandOutput::line(format!("cat: {}: No such file or directory", args)),
        }
    }
}
