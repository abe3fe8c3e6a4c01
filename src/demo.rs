//! A small built-in mission used by the REPL binary and the integration
//! tests. Full mission catalogs are authored externally; this one exists so
//! the engine is playable out of the box.

use crate::state::{Mission, MissionObjective, ObjectiveValidator};
use crate::vfs::{VirtualDirectory, VirtualFile};

const BRIEFING: &str = "CASE FILE 2291 - THE VANISHED ANALYST\n\
Security analyst R. Voss signed in last night and never signed out.\n\
Her workstation was wiped, but the evidence directory survived.\n\
Start with the access log and work backwards.";

const ACCESS_LOG: &str = "21:02 voss badge-in lobby\n\
21:15 voss login workstation-4\n\
21:40 voss opened /vault/index\n\
22:05 unknown badge-in lobby\n\
22:06 unknown login attempt workstation-4\n\
22:06 ACCESS DENIED workstation-4\n\
22:07 unknown login attempt workstation-4\n\
22:07 ACCESS DENIED workstation-4\n\
22:09 unknown login server-room\n\
22:31 voss logout workstation-4\n\
23:12 unknown badge-out lobby\n\
23:58 freight door opened manually";

const NOTES: &str = "interview notes, night shift\n\
- janitor saw a light in records after closing\n\
- voss kept her backups in cabinet 7\n\
- freight door alarm has been broken for weeks";

const VISITORS: &str = "voss\nmarsh\nunknown\nmarsh\nhale\nunknown\nvoss";

/// Mission content for "The Vanished Analyst". Exercises every objective
/// validation strategy the engine supports.
pub fn demo_mission() -> Mission {
    let filesystem = VirtualDirectory::new("/")
        .with_files(vec![
            VirtualFile::new("readme.txt", BRIEFING),
            VirtualFile::hidden(".case_index", "2291"),
        ])
        .with_subdirectories(vec![
            VirtualDirectory::new("evidence").with_files(vec![
                VirtualFile::new("access.log", ACCESS_LOG),
                VirtualFile::new("notes.txt", NOTES),
            ]),
            VirtualDirectory::new("records")
                .with_files(vec![VirtualFile::new("visitors.txt", VISITORS)]),
        ]);

    let objectives = vec![
        MissionObjective::new("survey", "Survey the crime scene")
            .with_hint("Use \"ls\" to see what files and folders are available")
            .with_required_command("ls"),
        MissionObjective::new("briefing", "Read the case briefing")
            .with_hint("\"cat readme.txt\" prints a file to the terminal")
            .with_required_command("cat")
            .with_target_file("readme.txt"),
        MissionObjective::new("denied", "Find the failed login attempts in the access log")
            .with_hint("grep searches inside files: grep PATTERN FILE")
            .with_required_command("grep")
            .with_validator(ObjectiveValidator::ArgsOutput(|args, output| {
                args.contains("access.log") && output.contains("ACCESS DENIED")
            })),
        MissionObjective::new("backups", "Learn where Voss kept her backups")
            .with_hint("The interview notes mention a cabinet")
            .with_required_command("cat")
            .with_target_file("notes.txt")
            .with_expected_output("cabinet 7"),
        MissionObjective::new("last-event", "Check how the night ended in the log")
            .with_hint("tail shows the last lines of a file")
            .with_allowed_commands(&["head", "tail"])
            .with_validator(ObjectiveValidator::Full(|command, _args, output| {
                command == "tail" && output.contains("freight door")
            })),
        MissionObjective::new("repeat-visitors", "Work out who visited more than once")
            .with_hint("uniq -d shows duplicated lines")
            .with_required_command("uniq")
            .with_expected_output("marsh"),
    ];

    Mission {
        id: "vanished-analyst".to_string(),
        title: "The Vanished Analyst".to_string(),
        filesystem,
        objectives,
        allowed_commands: [
            "ls", "cd", "pwd", "cat", "grep", "find", "head", "tail", "wc", "sort", "uniq",
            "file",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MissionSession;

    #[test]
    fn demo_mission_is_winnable() {
        let mut session = MissionSession::new(&demo_mission());

        session.handle_input("ls");
        session.handle_input("cat readme.txt");
        session.handle_input("cd evidence");
        session.handle_input("grep DENIED access.log");
        session.handle_input("cat notes.txt");
        session.handle_input("tail -3 access.log");
        session.handle_input("cd /records");
        session.handle_input("uniq -d visitors.txt");

        let state = session.state();
        let incomplete: Vec<&str> = state
            .objectives
            .iter()
            .filter(|o| !o.completed)
            .map(|o| o.id.as_str())
            .collect();
        assert!(incomplete.is_empty(), "incomplete: {:?}", incomplete);
        assert!(session.mission_completed());
    }

    #[test]
    fn objectives_only_complete_for_the_right_commands() {
        let mut session = MissionSession::new(&demo_mission());

        // head over the end of the log is not enough for last-event
        session.handle_input("head -3 evidence/access.log");
        assert!(!session.state().objectives[4].completed);

        // grep for something else does not satisfy the denied objective
        session.handle_input("grep voss evidence/access.log");
        assert!(!session.state().objectives[2].completed);
    }

    #[test]
    fn hint_walks_objectives_in_order() {
        let mut session = MissionSession::new(&demo_mission());
        let first = session.handle_input("hint");
        assert_eq!(first[2], "Objective: Survey the crime scene");

        session.handle_input("ls");
        let second = session.handle_input("hint");
        assert_eq!(second[2], "Objective: Read the case briefing");
    }
}
