use crate::command::{Command, CommandOutput};
use crate::state::GameState;
use crate::vfs::resolve_path;

/// sort FILE
/// Plain lexicographic byte-order comparison, no locale awareness.
pub struct SortCommand;

impl Command for SortCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let target = args.trim();
        if target.is_empty() {
            return CommandOutput::line("sort: missing file operand");
        }

        let file_path = resolve_path(&state.current_directory, target);
        let Some(file) = state.filesystem.find_file(&file_path) else {
            return CommandOutput::line(format!("sort: {}: No such file or directory", args));
        };

        let mut lines: Vec<&str> = file.content.split('\n').collect();
        lines.sort_unstable();
        CommandOutput::lines(lines.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Mission;
    use crate::vfs::{VirtualDirectory, VirtualFile};

    fn state() -> GameState {
        GameState::for_mission(&Mission {
            id: "t".to_string(),
            title: "t".to_string(),
            filesystem: VirtualDirectory::new("/")
                .with_files(vec![VirtualFile::new("names.txt", "charlie\nalice\nbob")]),
            objectives: vec![],
            allowed_commands: vec![],
        })
    }

    #[test]
    fn sorts_lexicographically() {
        let result = SortCommand.execute("names.txt", &state());
        assert_eq!(result.output, vec!["alice", "bob", "charlie"]);
    }

    #[test]
    fn missing_operand_and_missing_file() {
        assert_eq!(
            SortCommand.execute("", &state()).output,
            vec!["sort: missing file operand"]
        );
        assert_eq!(
            SortCommand.execute("ghost.txt", &state()).output,
            vec!["sort: ghost.txt: No such file or directory"]
        );
    }
}
