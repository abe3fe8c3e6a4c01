use crate::command::{Command, CommandOutput};
use crate::state::GameState;

/// ls [-a] [-l]
/// Flags are detected by letter within any dash-prefixed token, so `-la`
/// and `-al` both work. Mission content relies on this.
pub struct LsCommand;

fn has_flag(args: &str, letter: char) -> bool {
    args.split_whitespace()
        .any(|token| token.starts_with('-') && token.contains(letter))
}

impl Command for LsCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let flags = args.trim();
        let show_hidden = has_flag(flags, 'a');
        let detailed = has_flag(flags, 'l');

        let listing = if detailed {
            state
                .filesystem
                .list_directory_detailed(&state.current_directory, show_hidden)
        } else {
            state
                .filesystem
                .list_directory(&state.current_directory, show_hidden)
        };
        CommandOutput::lines(listing)
    }
}
