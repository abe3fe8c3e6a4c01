use crate::command::{Command, CommandOutput};
use crate::state::GameState;
use crate::vfs::resolve_path;

/// uniq [-d] FILE
/// Lines are sorted first, so duplicates are always adjacent. Default mode
/// keeps one copy of every distinct line; `-d` reports only lines that had
/// at least one duplicate.
pub struct UniqCommand;

impl Command for UniqCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let tokens: Vec<&str> = args.trim().split_whitespace().collect();
        let duplicates_only = tokens.contains(&"-d");
        let Some(file_name) = tokens.iter().find(|t| !t.starts_with('-')).copied() else {
            return CommandOutput::line("uniq: missing file operand");
        };

        let file_path = resolve_path(&state.current_directory, file_name);
        let Some(file) = state.filesystem.find_file(&file_path) else {
            return CommandOutput::line(format!("uniq: {}: No such file or directory", file_name));
        };

        let mut lines: Vec<&str> = file.content.split('\n').collect();
        lines.sort_unstable();

        let mut output: Vec<String> = Vec::new();
        if duplicates_only {
            for pair in lines.windows(2) {
                if pair[0] == pair[1] && output.last().map(String::as_str) != Some(pair[0]) {
                    output.push(pair[0].to_string());
                }
            }
        } else {
            for line in lines {
                if output.last().map(String::as_str) != Some(line) {
                    output.push(line.to_string());
                }
            }
        }
        CommandOutput::lines(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Mission;
    use crate::vfs::{VirtualDirectory, VirtualFile};

    fn state_with(content: &str) -> GameState {
        GameState::for_mission(&Mission {
            id: "t".to_string(),
            title: "t".to_string(),
            filesystem: VirtualDirectory::new("/")
                .with_files(vec![VirtualFile::new("data.txt", content)]),
            objectives: vec![],
            allowed_commands: vec![],
        })
    }

    #[test]
    fn default_mode_deduplicates_sorted_lines() {
        let state = state_with("b\na\nb");
        let result = UniqCommand.execute("data.txt", &state);
        assert_eq!(result.output, vec!["a", "b"]);
    }

    #[test]
    fn duplicates_only_mode() {
        let state = state_with("b\na\nb");
        let result = UniqCommand.execute("-d data.txt", &state);
        assert_eq!(result.output, vec!["b"]);
    }

    #[test]
    fn duplicates_reported_once_each() {
        let state = state_with("x\nx\nx\ny\ny");
        let result = UniqCommand.execute("-d data.txt", &state);
        assert_eq!(result.output, vec!["x", "y"]);
    }

    #[test]
    fn missing_operand_and_missing_file() {
        let state = state_with("x");
        assert_eq!(
            UniqCommand.execute("-d", &state).output,
            vec!["uniq: missing file operand"]
        );
        assert_eq!(
            UniqCommand.execute("ghost.txt", &state).output,
            vec!["uniq: ghost.txt: No such file or directory"]
        );
    }
}
