use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vfs::VirtualDirectory;

/// Custom objective predicate. Tagged by the argument shape it wants so the
/// dispatch in `objectives::validate_objective` stays arity-correct at
/// compile time.
#[derive(Clone, Copy)]
pub enum ObjectiveValidator {
    /// Inspects the command output only.
    Output(fn(&str) -> bool),
    /// Inspects the argument string and the output.
    ArgsOutput(fn(&str, &str) -> bool),
    /// Full (command, args, output) triple.
    Full(fn(&str, &str, &str) -> bool),
}

impl fmt::Debug for ObjectiveValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveValidator::Output(_) => f.write_str("ObjectiveValidator::Output"),
            ObjectiveValidator::ArgsOutput(_) => f.write_str("ObjectiveValidator::ArgsOutput"),
            ObjectiveValidator::Full(_) => f.write_str("ObjectiveValidator::Full"),
        }
    }
}

/// One checkable goal within a mission. `completed` flips exactly once,
/// never back.
#[derive(Debug, Clone)]
pub struct MissionObjective {
    pub id: String,
    pub description: String,
    pub hint: Option<String>,
    pub completed: bool,
    pub required_command: Option<String>,
    pub allowed_commands: Option<Vec<String>>,
    pub target_file: Option<String>,
    pub expected_output: Option<String>,
    pub validator: Option<ObjectiveValidator>,
}

impl MissionObjective {
    pub fn new(id: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            hint: None,
            completed: false,
            required_command: None,
            allowed_commands: None,
            target_file: None,
            expected_output: None,
            validator: None,
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn with_required_command(mut self, command: &str) -> Self {
        self.required_command = Some(command.to_string());
        self
    }

    pub fn with_allowed_commands(mut self, commands: &[&str]) -> Self {
        self.allowed_commands = Some(commands.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_target_file(mut self, path: &str) -> Self {
        self.target_file = Some(path.to_string());
        self
    }

    pub fn with_expected_output(mut self, output: &str) -> Self {
        self.expected_output = Some(output.to_string());
        self
    }

    pub fn with_validator(mut self, validator: ObjectiveValidator) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// A self-contained level: filesystem, allowed command subset, objectives.
/// Mission content is externally authored and never mutated by the engine.
#[derive(Debug, Clone)]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub filesystem: VirtualDirectory,
    pub objectives: Vec<MissionObjective>,
    pub allowed_commands: Vec<String>,
}

/// Mutable session state for one mission run. The filesystem tree is cloned
/// from mission content and stays immutable; `current_directory` is the only
/// value command handlers can patch.
#[derive(Debug, Clone)]
pub struct GameState {
    pub current_directory: String,
    pub filesystem: VirtualDirectory,
    pub objectives: Vec<MissionObjective>,
    pub completed_objectives: Vec<String>,
    pub mission_completed: bool,
}

impl GameState {
    pub fn for_mission(mission: &Mission) -> Self {
        Self {
            current_directory: "/".to_string(),
            filesystem: mission.filesystem.clone(),
            objectives: mission.objectives.clone(),
            completed_objectives: Vec::new(),
            mission_completed: false,
        }
    }

    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(dir) = patch.current_directory {
            self.current_directory = dir;
        }
    }
}

/// Partial state update returned by a handler instead of mutating anything
/// in place. Only `cd` produces one today.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatePatch {
    pub current_directory: Option<String>,
}

impl StatePatch {
    pub fn change_directory(path: &str) -> Self {
        Self {
            current_directory: Some(path.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::VirtualDirectory;

    #[test]
    fn state_starts_at_root() {
        let mission = Mission {
            id: "m1".to_string(),
            title: "Test".to_string(),
            filesystem: VirtualDirectory::new("/"),
            objectives: vec![MissionObjective::new("obj1", "do a thing")],
            allowed_commands: vec!["ls".to_string()],
        };
        let state = GameState::for_mission(&mission);
        assert_eq!(state.current_directory, "/");
        assert!(!state.mission_completed);
        assert_eq!(state.objectives.len(), 1);
    }

    #[test]
    fn patch_updates_current_directory() {
        let mission = Mission {
            id: "m1".to_string(),
            title: "Test".to_string(),
            filesystem: VirtualDirectory::new("/"),
            objectives: vec![],
            allowed_commands: vec![],
        };
        let mut state = GameState::for_mission(&mission);
        state.apply(StatePatch::change_directory("/docs"));
        assert_eq!(state.current_directory, "/docs");

        // empty patch leaves the directory alone
        state.apply(StatePatch::default());
        assert_eq!(state.current_directory, "/docs");
    }
}
