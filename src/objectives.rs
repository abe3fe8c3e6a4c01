//! The mission-completion state machine. Each objective is `pending` until
//! a command execution satisfies it, then `completed` forever.

use tracing::debug;

use crate::state::{MissionObjective, ObjectiveValidator};

/// Decides whether `objective` is newly satisfied by the triple just
/// produced by the dispatcher. Branches are tried in priority order and the
/// first match wins; mission content relies on this exact ordering.
///
/// A custom validator that panics is deliberately not caught: authoring
/// bugs should surface under test, not be swallowed mid-mission.
pub fn validate_objective(
    objective: &MissionObjective,
    command: &str,
    args: &str,
    output: &str,
) -> bool {
    // completed objectives never re-trigger
    if objective.completed {
        return false;
    }

    // command gate: allowed_commands wins over required_command
    let command_ok = match (&objective.allowed_commands, &objective.required_command) {
        (Some(allowed), _) => allowed.iter().any(|c| c == command),
        (None, Some(required)) => required == command,
        (None, None) => false,
    };
    if !command_ok {
        return false;
    }

    if let Some(validator) = &objective.validator {
        return match validator {
            ObjectiveValidator::Output(f) => f(output),
            ObjectiveValidator::ArgsOutput(f) => f(args, output),
            ObjectiveValidator::Full(f) => f(command, args, output),
        };
    }

    if let Some(target_file) = &objective.target_file {
        let base_name = target_file.rsplit('/').next().unwrap_or(target_file);
        let file_accessed = args.contains(target_file.as_str()) || args == base_name;
        return match &objective.expected_output {
            Some(expected) => file_accessed && output.contains(expected.as_str()),
            None => file_accessed,
        };
    }

    if let Some(expected) = &objective.expected_output {
        return output.contains(expected.as_str());
    }

    // only the command gate applied
    true
}

/// Runs every objective against the triple and flips the newly satisfied
/// ones. Returns the ids that transitioned on this call.
pub fn check_objectives(
    objectives: &mut [MissionObjective],
    command: &str,
    args: &str,
    output: &str,
) -> Vec<String> {
    let mut newly_completed = Vec::new();
    for objective in objectives.iter_mut() {
        if validate_objective(objective, command, args, output) {
            objective.completed = true;
            debug!(objective = %objective.id, "objective completed");
            newly_completed.push(objective.id.clone());
        }
    }
    newly_completed
}
