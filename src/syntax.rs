//! Structural validation of raw command lines, run before any handler.
//! Every check is independent and the pipeline short-circuits at the first
//! failure: empty -> quotes -> brackets -> parens -> escapes -> redirections
//! -> pipes -> control characters.

use thiserror::Error;

/// Characters a backslash may legally escape.
const ESCAPABLE: &str = "\\'\"nrtbf $`|&;<>(){}[]*?";

/// Redirection operators, longest first so `>>` is not misread as `>` with
/// a `>` target.
const REDIRECTIONS: [&str; 7] = ["2>>", "2>", "&>", ">>", ">", "<<", "<"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Empty command")]
    Empty,
    #[error("Unmatched double quote")]
    UnmatchedDoubleQuote { position: usize },
    #[error("Unmatched single quote")]
    UnmatchedSingleQuote { position: usize },
    #[error("Unmatched opening bracket '['")]
    UnmatchedOpeningBracket { position: usize },
    #[error("Unmatched closing bracket ']'")]
    UnmatchedClosingBracket { position: usize },
    #[error("Unmatched opening parenthesis '('")]
    UnmatchedOpeningParen { position: usize },
    #[error("Unmatched closing parenthesis ')'")]
    UnmatchedClosingParen { position: usize },
    #[error("Trailing backslash without escaped character")]
    TrailingBackslash { position: usize },
    #[error("Invalid escape sequence: \\{ch}")]
    InvalidEscape { ch: char, position: usize },
    #[error("Incomplete redirection: missing target after '{op}'")]
    IncompleteRedirection { op: &'static str, position: usize },
    #[error("Pipe cannot be at the beginning")]
    LeadingPipe { position: usize },
    #[error("Pipe cannot be at the end")]
    TrailingPipe { position: usize },
    #[error("Empty command between pipes")]
    EmptyPipeSegment { position: usize },
    #[error("Null byte not allowed in command")]
    NullByte { position: usize },
    #[error("Invalid control character (code: {code})")]
    ControlCharacter { code: u32, position: usize },
    /// Command-specific usage errors ("grep: invalid option -- 'x'", ...).
    #[error("{0}")]
    Usage(String),
}

impl SyntaxError {
    /// Byte offset into the trimmed command line, when one applies.
    pub fn position(&self) -> Option<usize> {
        match self {
            SyntaxError::Empty | SyntaxError::Usage(_) => None,
            SyntaxError::UnmatchedDoubleQuote { position }
            | SyntaxError::UnmatchedSingleQuote { position }
            | SyntaxError::UnmatchedOpeningBracket { position }
            | SyntaxError::UnmatchedClosingBracket { position }
            | SyntaxError::UnmatchedOpeningParen { position }
            | SyntaxError::UnmatchedClosingParen { position }
            | SyntaxError::TrailingBackslash { position }
            | SyntaxError::InvalidEscape { position, .. }
            | SyntaxError::IncompleteRedirection { position, .. }
            | SyntaxError::LeadingPipe { position }
            | SyntaxError::TrailingPipe { position }
            | SyntaxError::EmptyPipeSegment { position }
            | SyntaxError::NullByte { position }
            | SyntaxError::ControlCharacter { position, .. } => Some(*position),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SyntaxOptions {
    pub allow_pipes: bool,
    pub allow_redirection: bool,
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        Self {
            allow_pipes: true,
            allow_redirection: true,
        }
    }
}

pub fn validate_command_syntax(command: &str, options: SyntaxOptions) -> Result<(), SyntaxError> {
    if command.trim().is_empty() {
        return Err(SyntaxError::Empty);
    }
    let trimmed = command.trim();

    validate_quotes(trimmed)?;
    validate_pairs(trimmed, '[', ']')?;
    validate_pairs(trimmed, '(', ')')?;
    validate_escapes(trimmed)?;
    if options.allow_redirection {
        validate_redirections(trimmed)?;
    }
    if options.allow_pipes {
        validate_pipes(trimmed)?;
    }
    validate_characters(trimmed)?;
    Ok(())
}

/// Single-pass quote scan. A quote toggles its own state only while the
/// other quote type is closed, so `"it's"` and `'say "hi"'` both pass.
fn validate_quotes(command: &str) -> Result<(), SyntaxError> {
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;

    for ch in command.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' if !in_single => in_double = !in_double,
            '\'' if !in_double => in_single = !in_single,
            _ => {}
        }
    }

    if in_double {
        return Err(SyntaxError::UnmatchedDoubleQuote {
            position: command.rfind('"').unwrap_or(0),
        });
    }
    if in_single {
        return Err(SyntaxError::UnmatchedSingleQuote {
            position: command.rfind('\'').unwrap_or(0),
        });
    }
    Ok(())
}

/// Stack-based matching for brackets and parentheses. Quoted regions are not
/// syntax and are skipped entirely.
fn validate_pairs(command: &str, open: char, close: char) -> Result<(), SyntaxError> {
    let mut stack: Vec<usize> = Vec::new();
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;

    for (pos, ch) in command.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' if !in_single => in_double = !in_double,
            '\'' if !in_double => in_single = !in_single,
            _ if in_single || in_double => {}
            c if c == open => stack.push(pos),
            c if c == close => {
                if stack.pop().is_none() {
                    return Err(unmatched_close(open, pos));
                }
            }
            _ => {}
        }
    }

    match stack.last() {
        Some(&pos) => Err(unmatched_open(open, pos)),
        None => Ok(()),
    }
}

fn unmatched_open(open: char, position: usize) -> SyntaxError {
    if open == '[' {
        SyntaxError::UnmatchedOpeningBracket { position }
    } else {
        SyntaxError::UnmatchedOpeningParen { position }
    }
}

fn unmatched_close(open: char, position: usize) -> SyntaxError {
    if open == '[' {
        SyntaxError::UnmatchedClosingBracket { position }
    } else {
        SyntaxError::UnmatchedClosingParen { position }
    }
}

fn validate_escapes(command: &str) -> Result<(), SyntaxError> {
    let bytes = command.as_bytes();
    for i in 0..bytes.len().saturating_sub(1) {
        if bytes[i] == b'\\' {
            let next = command[i + 1..].chars().next().unwrap_or('\0');
            if !ESCAPABLE.contains(next) {
                return Err(SyntaxError::InvalidEscape {
                    ch: next,
                    position: i,
                });
            }
        }
    }
    if command.ends_with('\\') {
        return Err(SyntaxError::TrailingBackslash {
            position: command.len() - 1,
        });
    }
    Ok(())
}

/// Every redirection operator needs a target: the trimmed remainder must be
/// non-empty and must not immediately start another redirection or a pipe.
fn validate_redirections(command: &str) -> Result<(), SyntaxError> {
    let mut skip_until = 0;
    for (i, _) in command.char_indices() {
        if i < skip_until {
            continue;
        }
        let Some(op) = REDIRECTIONS
            .into_iter()
            .find(|op| command[i..].starts_with(op))
        else {
            continue;
        };
        let after = command[i + op.len()..].trim();
        if after.is_empty()
            || after.starts_with('|')
            || after.starts_with('>')
            || after.starts_with('<')
        {
            return Err(SyntaxError::IncompleteRedirection { op, position: i });
        }
        skip_until = i + op.len();
    }
    Ok(())
}

fn validate_pipes(command: &str) -> Result<(), SyntaxError> {
    let parts: Vec<&str> = command.split('|').collect();
    if parts.len() == 1 {
        return Ok(());
    }

    let pipe_positions: Vec<usize> = command
        .char_indices()
        .filter(|(_, c)| *c == '|')
        .map(|(i, _)| i)
        .collect();

    for (i, part) in parts.iter().enumerate() {
        if !part.trim().is_empty() {
            continue;
        }
        return Err(if i == 0 {
            SyntaxError::LeadingPipe {
                position: pipe_positions[0],
            }
        } else if i == parts.len() - 1 {
            SyntaxError::TrailingPipe {
                position: pipe_positions[i - 1],
            }
        } else {
            SyntaxError::EmptyPipeSegment {
                position: pipe_positions[i],
            }
        });
    }
    Ok(())
}

fn validate_characters(command: &str) -> Result<(), SyntaxError> {
    if let Some(position) = command.find('\0') {
        return Err(SyntaxError::NullByte { position });
    }
    for (position, ch) in command.char_indices() {
        let code = ch as u32;
        if code < 32 && code != 9 && code != 10 && code != 13 {
            return Err(SyntaxError::ControlCharacter { code, position });
        }
    }
    Ok(())
}

/// Second-stage validation keyed off the first token. Unknown command names
/// pass through untouched.
pub fn validate_specific_command(command: &str, command_type: &str) -> Result<(), SyntaxError> {
    let parts: Vec<&str> = command.trim().split_whitespace().collect();
    if parts.first().copied() != Some(command_type) {
        return Ok(());
    }

    match command_type {
        "find" => validate_find(&parts),
        "grep" => validate_flag_set(&parts, "grep", "ricnvl", "grep: missing pattern"),
        "ls" => validate_flag_set(&parts, "ls", "lahtr", ""),
        _ => Ok(()),
    }
}

fn validate_find(parts: &[&str]) -> Result<(), SyntaxError> {
    if parts.len() < 2 {
        return Err(SyntaxError::Usage("find: missing path operand".to_string()));
    }

    if let Some(name_index) = parts.iter().position(|p| *p == "-name") {
        let Some(pattern) = parts.get(name_index + 1).copied() else {
            return Err(SyntaxError::Usage(
                "find: option '-name' requires an argument".to_string(),
            ));
        };
        if let Err(err) = validate_quotes(pattern) {
            return Err(SyntaxError::Usage(format!("find: {} in pattern", err)));
        }
    }

    let supported = ["-name", "-type"];
    for part in parts {
        if part.starts_with('-') && !supported.contains(part) {
            return Err(SyntaxError::Usage(format!(
                "find: unsupported option '{}'",
                part
            )));
        }
    }
    Ok(())
}

/// Shared flag validation for grep and ls. Combined short flags like `-ri`
/// are expanded letter by letter against the allow-list.
fn validate_flag_set(
    parts: &[&str],
    cmd: &str,
    letters: &str,
    missing_operand: &str,
) -> Result<(), SyntaxError> {
    if !missing_operand.is_empty() && parts.len() < 2 {
        return Err(SyntaxError::Usage(missing_operand.to_string()));
    }

    for flag in parts.iter().filter(|p| p.starts_with('-')) {
        if flag.len() > 2 && !flag.starts_with("--") {
            for ch in flag[1..].chars() {
                if !letters.contains(ch) {
                    return Err(SyntaxError::Usage(format!(
                        "{}: invalid option -- '{}'",
                        cmd, ch
                    )));
                }
            }
        } else if flag.len() == 2 && !letters.contains(flag.chars().nth(1).unwrap_or(' ')) {
            return Err(SyntaxError::Usage(format!(
                "{}: invalid option '{}'",
                cmd, flag
            )));
        } else if flag.starts_with("--") || flag.len() == 1 {
            // "--long" options and a bare "-" are both unsupported
            return Err(SyntaxError::Usage(format!(
                "{}: invalid option '{}'",
                cmd, flag
            )));
        }
    }
    Ok(())
}
