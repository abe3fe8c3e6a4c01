use crate::command::{Command, CommandOutput};
use crate::state::GameState;
use crate::vfs::resolve_path;

/// head [-n N | -nN | -N] FILE
pub struct HeadCommand;

impl Command for HeadCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let (count, file_name) = parse_line_args(args);
        let Some(file_name) = file_name else {
            return CommandOutput::line("head: missing file operand");
        };

        let file_path = resolve_path(&state.current_directory, file_name);
        match state.filesystem.find_file(&file_path) {
            Some(file) => CommandOutput::lines(file.content.split('\n').take(count)),
            None => CommandOutput::line(format!("head: {}: No such file or directory", file_name)),
        }
    }
}

/// Shared between head and tail: accepts `-n N`, `-nN`, and a bare `-N`;
/// the first non-flag token is the filename. Line count defaults to 10.
pub(crate) fn parse_line_args(args: &str) -> (usize, Option<&str>) {
    let mut count = 10;
    let mut file_name = None;

    let mut tokens = args.trim().split_whitespace().peekable();
    while let Some(token) = tokens.next() {
        if token == "-n" {
            if let Some(n) = tokens.peek().and_then(|t| t.parse().ok()) {
                count = n;
                tokens.next();
            }
        } else if let Some(rest) = token.strip_prefix("-n") {
            if let Ok(n) = rest.parse() {
                count = n;
            }
        } else if let Some(rest) = token.strip_prefix('-') {
            if let Ok(n) = rest.parse() {
                count = n;
            }
        } else if file_name.is_none() {
            file_name = Some(token);
        }
    }

    (count, file_name)
}
