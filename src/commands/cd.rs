use crate::command::{Command, CommandOutput};
use crate::state::{GameState, StatePatch};
use crate::vfs::resolve_path;

/// cd [DIR]
/// No argument resets to the root. The patch is the only way the session's
/// current directory ever changes.
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let target = args.trim();
        if target.is_empty() {
            return CommandOutput::default().with_patch(StatePatch::change_directory("/"));
        }

        let target_path = resolve_path(&state.current_directory, target);
        if state.filesystem.directory_exists(&target_path) {
            CommandOutput::default().with_patch(StatePatch::change_directory(&target_path))
        } else {
            CommandOutput::error(
                vec![format!("cd: {}: No such file or directory", args)],
                "Directory not found",
            )
        }
    }
}
