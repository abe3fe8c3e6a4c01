use crate::command::{Command, CommandOutput};
use crate::state::GameState;
use crate::vfs::resolve_path;

/// grep [-r] [-i] [-c] PATTERN [FILE]
/// Plain substring matching, no regex. `-r` without a filename walks the
/// whole tree from the root; `-c` swaps matching lines for per-file counts.
pub struct GrepCommand;

struct GrepFlags {
    recursive: bool,
    ignore_case: bool,
    count: bool,
}

impl Command for GrepCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let tokens: Vec<&str> = args.trim().split_whitespace().collect();

        let mut flags = GrepFlags {
            recursive: false,
            ignore_case: false,
            count: false,
        };
        let mut positional = Vec::new();
        for token in &tokens {
            if let Some(letters) = token.strip_prefix('-') {
                for ch in letters.chars() {
                    match ch {
                        'r' => flags.recursive = true,
                        'i' => flags.ignore_case = true,
                        'c' => flags.count = true,
                        // unknown letters are rejected by the syntax
                        // validator before we get here
                        _ => {}
                    }
                }
            } else {
                positional.push(*token);
            }
        }

        let Some(pattern) = positional.first().copied() else {
            return CommandOutput::line("grep: missing pattern");
        };
        let file_name = positional.get(1).copied();

        if flags.recursive && file_name.is_none() {
            return self.search_tree(pattern, &flags, state);
        }

        let Some(file_name) = file_name else {
            return CommandOutput::line("grep: missing file");
        };

        let file_path = resolve_path(&state.current_directory, file_name);
        let Some(file) = state.filesystem.find_file(&file_path) else {
            return CommandOutput::line(format!(
                "grep: {}: No such file or directory",
                file_name
            ));
        };

        let matches = matching_lines(&file.content, pattern, flags.ignore_case);
        let output = if flags.count {
            if matches.is_empty() {
                Vec::new()
            } else {
                vec![format!("{}:{}", file_name, matches.len())]
            }
        } else {
            matches
        };

        if output.is_empty() {
            CommandOutput::line(format!("grep: no matches found for '{}'", pattern))
        } else {
            CommandOutput::lines(output)
        }
    }
}

impl GrepCommand {
    /// Recursive mode: accumulate `path:line` (or `path:count`) across every
    /// file in the tree, regardless of the current directory.
    fn search_tree(&self, pattern: &str, flags: &GrepFlags, state: &GameState) -> CommandOutput {
        let mut output = Vec::new();
        state.filesystem.walk_files("/", &mut |path, file| {
            let matches = matching_lines(&file.content, pattern, flags.ignore_case);
            if matches.is_empty() {
                return;
            }
            if flags.count {
                output.push(format!("{}:{}", path, matches.len()));
            } else {
                for line in matches {
                    output.push(format!("{}:{}", path, line));
                }
            }
        });

        if output.is_empty() {
            CommandOutput::line(format!("grep: no matches found for '{}'", pattern))
        } else {
            CommandOutput::lines(output)
        }
    }
}

fn matching_lines(content: &str, pattern: &str, ignore_case: bool) -> Vec<String> {
    let needle = if ignore_case {
        pattern.to_lowercase()
    } else {
        pattern.to_string()
    };
    content
        .split('\n')
        .filter(|line| {
            if ignore_case {
                line.to_lowercase().contains(&needle)
            } else {
                line.contains(&needle)
            }
        })
        .map(str::to_string)
        .collect()
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
                .with_files(vec![VirtualFile::new("file1.txt", "CONFIDENTIAL data")])
                .with_subdirectories(vec![VirtualDirectory::new("documents").with_files(vec![
                    VirtualFile::new("secret.txt", "suspect was here\nsuspect left clues\nclean"),
                ])]),
            objectives: vec![],
            allowed_commands: vec![],
        })
    }

    #[test]
    fn single_file_substring_match() {
        let result = GrepCommand.execute("suspect documents/secret.txt", &state());
        assert_eq!(result.output, vec!["suspect was here", "suspect left clues"]);
    }

    #[test]
    fn recursive_case_insensitive_search() {
        let result = GrepCommand.execute("-ri confidential", &state());
        assert!(result
            .output
            .contains(&"/file1.txt:CONFIDENTIAL data".to_string()));
    }

    #[test]
    fn recursive_count_mode() {
        let result = GrepCommand.execute("-rc suspect", &state());
        assert_eq!(result.output, vec!["/documents/secret.txt:2"]);
    }

    #[test]
    fn without_ignore_case_matching_is_exact() {
        let result = GrepCommand.execute("-r confidential", &state());
        assert_eq!(
            result.output,
            vec!["grep: no matches found for 'confidential'"]
        );
    }

    #[test]
    fn missing_pattern_and_missing_file() {
        assert_eq!(
            GrepCommand.execute("", &state()).output,
            vec!["grep: missing pattern"]
        );
        assert_eq!(
            GrepCommand.execute("pattern", &state()).output,
            vec!["grep: missing file"]
        );
    }

    #[test]
    fn missing_file_is_reported_by_name() {
        let result = GrepCommand.execute("suspect ghost.txt", &state());
        assert_eq!(
            result.output,
            vec!["grep: ghost.txt: No such file or directory"]
        );
    }

    #[test]
    fn no_matches_yields_informational_line() {
        let result = GrepCommand.execute("unicorn file1.txt", &state());
        assert_eq!(result.output, vec!["grep: no matches found for 'unicorn'"]);
    }
}
