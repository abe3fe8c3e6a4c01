// mission-shell: a shell-teaching game engine.
// A simulated POSIX-ish shell runs against an immutable virtual filesystem,
// and a declarative validator certifies mission progress from each executed
// command's (command, args, output) triple. Rendering, animation, and
// progress persistence live outside this crate.
pub mod command;
pub mod commands;
pub mod demo;
pub mod objectives;
pub mod session;
pub mod state;
pub mod syntax;
pub mod vfs;

pub use command::{Command, CommandOutput, CommandRegistry};
pub use objectives::validate_objective;
pub use session::MissionSession;
pub use state::{GameState, Mission, MissionObjective, ObjectiveValidator, StatePatch};
pub use syntax::{validate_command_syntax, validate_specific_command, SyntaxError, SyntaxOptions};
pub use vfs::{resolve_path, VirtualDirectory, VirtualFile};
