use crate::command::{Command, CommandOutput};
use crate::state::GameState;

/// find [PATH] [-name PATTERN] | find PATTERN
/// Two grammars: `-name <pattern>` with quote/wildcard characters stripped,
/// or a bare trailing token used directly. Either way the match is a
/// case-insensitive substring test on file names, walking the whole tree
/// from the root regardless of the current directory.
pub struct FindCommand;

impl Command for FindCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let trimmed = args.trim();
        if trimmed.is_empty() {
            return CommandOutput::line("find: missing search pattern");
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let raw_pattern = match tokens.iter().position(|t| *t == "-name") {
            Some(i) => match tokens.get(i + 1) {
                Some(pattern) => *pattern,
                None => return CommandOutput::line("find: missing search pattern"),
            },
            // simplified grammar: the trailing token is the pattern
            None => tokens[tokens.len() - 1],
        };
        let pattern: String = raw_pattern
            .chars()
            .filter(|c| !matches!(c, '*' | '"' | '\''))
            .collect::<String>()
            .to_lowercase();

        let mut matches = Vec::new();
        state.filesystem.walk_files("/", &mut |path, file| {
            if file.name.to_lowercase().contains(&pattern) {
                matches.push(path);
            }
        });

        if matches.is_empty() {
            CommandOutput::line(format!("find: no files matching '{}' found", raw_pattern))
        } else {
            CommandOutput::lines(matches)
        }
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
                .with_files(vec![
                    VirtualFile::new("secret_evidence.txt", "secret content"),
                    VirtualFile::new("report.txt", "report content"),
                ])
                .with_subdirectories(vec![VirtualDirectory::new("documents")
                    .with_files(vec![VirtualFile::new("evidence_log.txt", "evidence")])]),
            objectives: vec![],
            allowed_commands: vec![],
        })
    }

    #[test]
    fn name_flag_collects_matches_across_tree() {
        let result = FindCommand.execute(". -name evidence", &state());
        assert!(result
            .output
            .contains(&"/secret_evidence.txt".to_string()));
        assert!(result
            .output
            .contains(&"/documents/evidence_log.txt".to_string()));
    }

    #[test]
    fn bare_pattern_grammar() {
        let result = FindCommand.execute("evidence", &state());
        assert!(result.output.contains(&"/secret_evidence.txt".to_string()));
    }

    #[test]
    fn wildcard_and_quote_characters_are_stripped() {
        let result = FindCommand.execute(r#". -name "*evidence*""#, &state());
        assert!(result
            .output
            .contains(&"/documents/evidence_log.txt".to_string()));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let result = FindCommand.execute("EVIDENCE", &state());
        assert_eq!(result.output.len(), 2);
    }

    #[test]
    fn no_matches_yields_informational_line() {
        let result = FindCommand.execute("unicorn", &state());
        assert_eq!(
            result.output,
            vec!["find: no files matching 'unicorn' found"]
        );
    }

    #[test]
    fn missing_pattern_message() {
        let result = FindCommand.execute("", &state());
        assert_eq!(result.output, vec!["find: missing search pattern"]);
    }
}
