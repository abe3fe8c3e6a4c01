use crate::command::{Command, CommandOutput};
use crate::commands::head::parse_line_args;
use crate::state::GameState;
use crate::vfs::resolve_path;

/// tail [-n N | -nN | -N] FILE
/// A count larger than the file yields the whole file.
pub struct TailCommand;

impl Command for TailCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let (count, file_name) = parse_line_args(args);
        let Some(file_name) = file_name else {
            return CommandOutput::line("tail: missing file operand");
        };

        let file_path = resolve_path(&state.current_directory, file_name);
        match state.filesystem.find_file(&file_path) {
            Some(file) => {
                let lines: Vec<&str> = file.content.split('\n').collect();
                let skip = lines.len().saturating_sub(count);
                CommandOutput::lines(lines[skip..].iter().copied())
            }
            None => CommandOutput::line(format!("tail: {}: No such file or directory", file_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Mission;
    use crate::vfs::{VirtualDirectory, VirtualFile};

    fn state() -> GameState {
        let content = (1..=12)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        GameState::for_mission(&Mission {
            id: "t".to_string(),
            title: "t".to_string(),
            filesystem: VirtualDirectory::new("/")
                .with_files(vec![VirtualFile::new("long.txt", &content)]),
            objectives: vec![],
            allowed_commands: vec![],
        })
    }

    #[test]
    fn defaults_to_last_ten_lines() {
        let result = TailCommand.execute("long.txt", &state());
        assert_eq!(result.output.len(), 10);
        assert_eq!(result.output.last().map(String::as_str), Some("line 12"));
    }

    #[test]
    fn explicit_count() {
        let result = TailCommand.execute("-n 2 long.txt", &state());
        assert_eq!(result.output, vec!["line 11", "line 12"]);
    }

    #[test]
    fn oversized_count_returns_whole_file() {
        let result = TailCommand.execute("-99 long.txt", &state());
        assert_eq!(result.output.len(), 12);
    }

    #[test]
    fn missing_operand_and_missing_file() {
        assert_eq!(
            TailCommand.execute("", &state()).output,
            vec!["tail: missing file operand"]
        );
        assert_eq!(
            TailCommand.execute("ghost.txt", &state()).output,
            vec!["tail: ghost.txt: No such file or directory"]
        );
    }
}
