use tracing::debug;

use crate::command::CommandRegistry;
use crate::objectives::check_objectives;
use crate::state::{GameState, Mission};
use crate::syntax::{validate_command_syntax, validate_specific_command, SyntaxError, SyntaxOptions};

/// One mission being played: the filtered command set, the mutable game
/// state, and the per-input pipeline (syntax check -> mission gate ->
/// dispatch -> state patch -> objective sweep).
pub struct MissionSession {
    allowed_commands: Vec<String>,
    registry: CommandRegistry,
    state: GameState,
}

impl MissionSession {
    pub fn new(mission: &Mission) -> Self {
        let registry =
            CommandRegistry::base(&mission.allowed_commands).filtered(&mission.allowed_commands);
        Self {
            allowed_commands: mission.allowed_commands.clone(),
            registry,
            state: GameState::for_mission(mission),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mission_completed(&self) -> bool {
        self.state.mission_completed
    }

    pub fn completions(&self, input: &str) -> Vec<String> {
        self.registry.completions(input, &self.state)
    }

    /// Processes one line of player input and returns the terminal lines to
    /// display. Objectives are checked against the same (command, args,
    /// output) triple the dispatcher produced.
    pub fn handle_input(&mut self, input: &str) -> Vec<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        if let Err(err) = validate_command_syntax(trimmed, SyntaxOptions::default()) {
            if err == SyntaxError::Empty {
                return Vec::new();
            }
            let command = trimmed.split_whitespace().next().unwrap_or("syntax");
            return vec![format!("{}: {}", command, err)];
        }

        let segments: Vec<&str> = trimmed.split('|').map(str::trim).collect();
        let stage_commands: Vec<&str> = segments
            .iter()
            .filter_map(|seg| seg.split_whitespace().next())
            .collect();

        // command-specific flag rules, per pipeline stage
        for segment in &segments {
            let Some(command) = segment.split_whitespace().next() else {
                continue;
            };
            if let Err(err) = validate_specific_command(segment, command) {
                return vec![err.to_string()];
            }
        }

        // mission gating: every stage must use an allowed command; the meta
        // commands stay available everywhere
        let blocked: Vec<&str> = stage_commands
            .iter()
            .filter(|cmd| {
                **cmd != "hint"
                    && **cmd != "help"
                    && !self.allowed_commands.iter().any(|a| a == **cmd)
            })
            .copied()
            .collect();
        if !blocked.is_empty() {
            let listing = format!(
                "Available commands: {}, hint, exit",
                self.allowed_commands.join(", ")
            );
            return if segments.len() > 1 {
                vec![
                    format!(
                        "Command(s) '{}' not available in this mission.",
                        blocked.join(", ")
                    ),
                    listing,
                ]
            } else {
                vec![
                    format!("Command '{}' not available in this mission.", blocked[0]),
                    listing,
                ]
            };
        }

        let result = self.registry.execute_piped(trimmed, &self.state);
        if let Some(patch) = result.new_state.clone() {
            self.state.apply(patch);
        }

        let display: Vec<String> = result
            .output
            .iter()
            .flat_map(|line| line.split('\n').map(str::to_string))
            .collect();

        // a failed pipeline never advances objectives
        if segments.len() > 1 && result.error.is_some() {
            return display;
        }

        let command = stage_commands.first().copied().unwrap_or("");
        let args = if segments.len() > 1 {
            trimmed
        } else {
            trimmed
                .split_once(' ')
                .map(|(_, rest)| rest.trim_start())
                .unwrap_or("")
        };
        let output_string = result.output.join(" ");

        let newly_completed =
            check_objectives(&mut self.state.objectives, command, args, &output_string);
        if !newly_completed.is_empty() {
            debug!(?newly_completed, "objectives advanced");
            self.state.completed_objectives.extend(newly_completed);
        }
        self.state.mission_completed = !self.state.objectives.is_empty()
            && self.state.objectives.iter().all(|o| o.completed);

        display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Mission, MissionObjective, ObjectiveValidator};
    use crate::vfs::{VirtualDirectory, VirtualFile};

    fn mission() -> Mission {
        let filesystem = VirtualDirectory::new("/")
            .with_files(vec![VirtualFile::new(
                "briefing.txt",
                "CASE 2291\nthe analyst vanished\nlook in the logs",
            )])
            .with_subdirectories(vec![VirtualDirectory::new("logs").with_files(vec![
                VirtualFile::new(
                    "access.log",
                    "00:01 ok\n00:02 ok\n03:14 ACCESS DENIED\n04:00 ok",
                ),
            ])]);
        Mission {
            id: "demo".to_string(),
            title: "Demo".to_string(),
            filesystem,
            objectives: vec![
                MissionObjective::new("survey", "Look around").with_required_command("ls"),
                MissionObjective::new("briefing", "Read the briefing")
                    .with_required_command("cat")
                    .with_target_file("briefing.txt"),
                MissionObjective::new("denied", "Find the denied access")
                    .with_required_command("grep")
                    .with_validator(ObjectiveValidator::ArgsOutput(|args, output| {
                        args.contains("access.log") && output.contains("ACCESS DENIED")
                    })),
            ],
            allowed_commands: ["ls", "cd", "pwd", "cat", "grep", "head", "tail"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    #[test]
    fn full_playthrough_completes_mission() {
        let mut session = MissionSession::new(&mission());
        assert!(!session.mission_completed());

        session.handle_input("ls");
        assert!(session.state().objectives[0].completed);

        session.handle_input("cat briefing.txt");
        assert!(session.state().objectives[1].completed);
        assert!(!session.mission_completed());

        session.handle_input("grep DENIED logs/access.log");
        assert!(session.state().objectives[2].completed);
        assert!(session.mission_completed());
        assert_eq!(
            session.state().completed_objectives,
            vec!["survey", "briefing", "denied"]
        );
    }

    #[test]
    fn completed_objective_stays_completed() {
        let mut session = MissionSession::new(&mission());
        session.handle_input("ls");
        session.handle_input("ls");
        assert_eq!(session.state().completed_objectives, vec!["survey"]);
    }

    #[test]
    fn cd_patch_moves_session_directory() {
        let mut session = MissionSession::new(&mission());
        session.handle_input("cd logs");
        assert_eq!(session.state().current_directory, "/logs");
        assert_eq!(session.handle_input("pwd"), vec!["/logs"]);
    }

    #[test]
    fn syntax_errors_never_reach_dispatch() {
        let mut session = MissionSession::new(&mission());
        let output = session.handle_input("cat \"briefing.txt");
        assert_eq!(output, vec!["cat: Unmatched double quote"]);
        assert!(session.state().completed_objectives.is_empty());
    }

    #[test]
    fn specific_validation_runs_per_stage() {
        let mut session = MissionSession::new(&mission());
        let output = session.handle_input("grep -z pattern logs/access.log");
        assert_eq!(output, vec!["grep: invalid option '-z'"]);
    }

    #[test]
    fn disallowed_commands_are_gated() {
        let mut session = MissionSession::new(&mission());
        let output = session.handle_input("wc briefing.txt");
        assert_eq!(
            output[0],
            "Command 'wc' not available in this mission."
        );
        assert!(output[1].starts_with("Available commands: ls, cd, pwd"));
    }

    #[test]
    fn gating_checks_every_pipe_stage() {
        let mut session = MissionSession::new(&mission());
        let output = session.handle_input("cat briefing.txt | wc");
        assert_eq!(
            output[0],
            "Command(s) 'wc' not available in this mission."
        );
    }

    #[test]
    fn meta_commands_bypass_the_gate() {
        let mut session = MissionSession::new(&mission());
        let output = session.handle_input("hint");
        assert_eq!(output[0], "HINT:");
        assert!(session.handle_input("help")[0].starts_with("Help Menu"));
    }

    #[test]
    fn piped_objective_sweep_uses_first_command_and_full_line() {
        let mut session = MissionSession::new(&mission());
        // cat is the first stage, so the cat-gated briefing objective sees
        // the piped invocation too
        session.handle_input("cat briefing.txt | head -1");
        assert!(session.state().objectives[1].completed);
    }

    #[test]
    fn multiline_file_output_is_expanded_for_display() {
        let mut session = MissionSession::new(&mission());
        let output = session.handle_input("cat briefing.txt");
        assert_eq!(output.len(), 3);
        assert_eq!(output[0], "CASE 2291");
    }

    #[test]
    fn blank_input_is_a_no_op() {
        let mut session = MissionSession::new(&mission());
        assert!(session.handle_input("   ").is_empty());
    }
}
