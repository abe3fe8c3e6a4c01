use crate::command::{Command, CommandOutput};
use crate::state::GameState;
use crate::vfs::resolve_path;

/// wc FILE
/// Emits one line: "<lines> <words> <chars> <file>". Lines split on `\n`,
/// words on whitespace runs, chars are the raw content length.
pub struct WcCommand;

impl Command for WcCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let target = args.trim();
        if target.is_empty() {
            return CommandOutput::line("wc: missing file operand");
        }

        let file_path = resolve_path(&state.current_directory, target);
        let Some(file) = state.filesystem.find_file(&file_path) else {
            return CommandOutput::line(format!("wc: {}: No such file or directory", args));
        };

        let lines = file.content.split('\n').count();
        let words = file.content.split_whitespace().count();
        let chars = file.content.len();
        CommandOutput::line(format!("{} {} {} {}", lines, words, chars, target))
    }
}
