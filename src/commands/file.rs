use crate::command::{Command, CommandOutput};
use crate::state::GameState;
use crate::vfs::resolve_path;

/// file FILE
/// Classifies by a fixed heuristic precedence; exactly one classification
/// per target.
pub struct FileCommand;

impl Command for FileCommand {
    fn execute(&self, args: &str, state: &GameState) -> CommandOutput {
        let target = args.trim();
        if target.is_empty() {
            return CommandOutput::line("file: missing file operand");
        }

        let file_path = resolve_path(&state.current_directory, target);
        let Some(file) = state.filesystem.find_file(&file_path) else {
            return CommandOutput::line(format!("file: {}: No such file or directory", args));
        };

        let file_type = classify(&file.name, &file.content);
        CommandOutput::line(format!("{}: {}", target, file_type))
    }
}

fn classify(name: &str, content: &str) -> &'static str {
    if name.contains("suspicious_file") || content.starts_with("#!") {
        "executable"
    } else if name.ends_with(".txt") {
        "ASCII text"
    } else if name.ends_with(".log") {
        "log file"
    } else if content.contains('{') && content.contains('}') {
        "JSON data"
    } else if content.contains("#!/") {
        "executable script"
    } else {
        "text"
    }
}
