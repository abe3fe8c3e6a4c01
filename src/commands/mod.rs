pub mod cat;
pub mod cd;
pub mod file;
pub mod find;
pub mod grep;
pub mod head;
pub mod help;
pub mod hint;
pub mod ls;
pub mod pwd;
pub mod sort;
pub mod tail;
pub mod uniq;
pub mod wc;

use crate::command::{CommandEntry, CommandRegistry, CompletionFn};
use crate::state::GameState;
use crate::vfs::{directories_only, filter_by_prefix};

/// Completes a `cd` argument against subdirectories of the current
/// directory.
pub fn cd_completion(input: &str, state: &GameState) -> Vec<String> {
    let current_arg = last_token(input);
    let items = state
        .filesystem
        .list_directory(&state.current_directory, false);
    filter_by_prefix(&directories_only(&items), current_arg)
}

/// Completes a filename argument against everything in the current
/// directory.
pub fn file_completion(input: &str, state: &GameState) -> Vec<String> {
    let current_arg = last_token(input);
    let items = state
        .filesystem
        .list_directory(&state.current_directory, false);
    filter_by_prefix(&items, current_arg)
}

fn last_token(input: &str) -> &str {
    input.trim().split(' ').next_back().unwrap_or("")
}

/// Builds the full definition table. Every handler is registered no matter
/// what the mission allows; `allowed_commands` only shapes the help text.
pub fn base_registry(allowed_commands: &[String]) -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    let file_arg: Option<CompletionFn> = Some(file_completion);

    registry.register(
        "ls",
        CommandEntry {
            handler: Box::new(ls::LsCommand),
            completion: None,
            description: "List directory contents",
        },
    );
    registry.register(
        "pwd",
        CommandEntry {
            handler: Box::new(pwd::PwdCommand),
            completion: None,
            description: "Print working directory",
        },
    );
    registry.register(
        "cd",
        CommandEntry {
            handler: Box::new(cd::CdCommand),
            completion: Some(cd_completion),
            description: "Change directory",
        },
    );
    registry.register(
        "cat",
        CommandEntry {
            handler: Box::new(cat::CatCommand),
            completion: file_arg,
            description: "Display file contents",
        },
    );
    registry.register(
        "grep",
        CommandEntry {
            handler: Box::new(grep::GrepCommand),
            completion: file_arg,
            description: "Search text patterns",
        },
    );
    registry.register(
        "find",
        CommandEntry {
            handler: Box::new(find::FindCommand),
            completion: None,
            description: "Search for files",
        },
    );
    registry.register(
        "head",
        CommandEntry {
            handler: Box::new(head::HeadCommand),
            completion: file_arg,
            description: "Show first lines of file",
        },
    );
    registry.register(
        "tail",
        CommandEntry {
            handler: Box::new(tail::TailCommand),
            completion: file_arg,
            description: "Show last lines of file",
        },
    );
    registry.register(
        "sort",
        CommandEntry {
            handler: Box::new(sort::SortCommand),
            completion: file_arg,
            description: "Sort lines in file",
        },
    );
    registry.register(
        "uniq",
        CommandEntry {
            handler: Box::new(uniq::UniqCommand),
            completion: file_arg,
            description: "Remove duplicate lines",
        },
    );
    registry.register(
        "wc",
        CommandEntry {
            handler: Box::new(wc::WcCommand),
            completion: file_arg,
            description: "Count lines, words, characters",
        },
    );
    registry.register(
        "file",
        CommandEntry {
            handler: Box::new(file::FileCommand),
            completion: file_arg,
            description: "Determine file type",
        },
    );
    registry.register(
        "hint",
        CommandEntry {
            handler: Box::new(hint::HintCommand),
            completion: None,
            description: "Show hint for current objective",
        },
    );
    registry.register(
        "help",
        CommandEntry {
            handler: Box::new(help::HelpCommand::new(allowed_commands)),
            completion: None,
            description: "Show this help message",
        },
    );

    registry
}
