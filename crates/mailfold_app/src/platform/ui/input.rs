//! Terminal input: commands start with `:`, anything else is a drop.
//!
//! Dropping files onto a terminal window pastes their paths, quoted or with
//! backslash-escaped spaces depending on the terminal. Both forms are accepted.
//! A backslash escapes only whitespace or a quote, so bare Windows paths such
//! as `C:\Mail\a.eml` and `\\server\share` pass through unchanged.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Drop(Vec<PathBuf>),
    Pick(PathBuf),
    Project(String),
    Select(usize),
    Others(bool),
    Refresh,
    Dismiss,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub const HELP: &str = "\
Drop .eml files onto this window (or paste their paths) to upload them.
  :project <name>   set the project name (empty clears it)
  :select <n>       use project number n from the list
  :pick <path>      upload a single file
  :others on|off    include projects outside the default scope
  :refresh          reload the lists
  :dismiss          hide the current message
  :help             show this help
  :quit             exit";

pub fn parse_line(line: &str) -> InputCommand {
    let line = line.trim();
    if line.is_empty() {
        return InputCommand::Empty;
    }
    let Some(command) = line.strip_prefix(':') else {
        let paths = split_paths(line);
        return if paths.is_empty() {
            InputCommand::Empty
        } else {
            InputCommand::Drop(paths)
        };
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name {
        "project" | "p" => InputCommand::Project(rest.to_string()),
        "select" | "s" => match rest.parse::<usize>() {
            Ok(index) if index > 0 => InputCommand::Select(index),
            _ => InputCommand::Invalid(format!("expected a project number, got {rest:?}")),
        },
        "pick" => match split_paths(rest).as_slice() {
            [path] => InputCommand::Pick(path.clone()),
            _ => InputCommand::Invalid("expected exactly one path".to_string()),
        },
        "others" => match rest {
            "on" | "true" | "yes" => InputCommand::Others(true),
            "off" | "false" | "no" => InputCommand::Others(false),
            _ => InputCommand::Invalid(format!("expected on or off, got {rest:?}")),
        },
        "refresh" | "r" => InputCommand::Refresh,
        "dismiss" | "d" => InputCommand::Dismiss,
        "help" | "h" | "?" => InputCommand::Help,
        "quit" | "q" | "exit" => InputCommand::Quit,
        other => InputCommand::Invalid(format!("unknown command :{other}")),
    }
}

/// Splits pasted text into paths, honouring quotes and backslash escapes.
fn split_paths(text: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, '\\') => match chars.peek() {
                Some(&next) if next.is_whitespace() || matches!(next, '\'' | '"') => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push('\\'),
            },
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            (None, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(PathBuf::from(current));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pasted_paths_are_a_drop() {
        assert_eq!(
            parse_line(r"'/tmp/My Mail.eml' /tmp/other\ file.eml /tmp/plain.eml"),
            InputCommand::Drop(vec![
                PathBuf::from("/tmp/My Mail.eml"),
                PathBuf::from("/tmp/other file.eml"),
                PathBuf::from("/tmp/plain.eml"),
            ])
        );
        assert_eq!(
            parse_line(r#""C:\Mail\a.eml""#),
            InputCommand::Drop(vec![PathBuf::from(r"C:\Mail\a.eml")])
        );
    }

    #[test]
    fn bare_windows_paths_keep_their_backslashes() {
        assert_eq!(
            parse_line(r"C:\Users\me\Mail\a.eml"),
            InputCommand::Drop(vec![PathBuf::from(r"C:\Users\me\Mail\a.eml")])
        );
        assert_eq!(
            parse_line(r"\\server\share\b.eml D:\c.eml"),
            InputCommand::Drop(vec![
                PathBuf::from(r"\\server\share\b.eml"),
                PathBuf::from(r"D:\c.eml"),
            ])
        );
    }

    #[test]
    fn commands_are_recognised() {
        assert_eq!(
            parse_line(":project  Acme Corp "),
            InputCommand::Project("Acme Corp".into())
        );
        assert_eq!(parse_line(":project"), InputCommand::Project(String::new()));
        assert_eq!(parse_line(":select 2"), InputCommand::Select(2));
        assert_eq!(parse_line(":others on"), InputCommand::Others(true));
        assert_eq!(parse_line(":q"), InputCommand::Quit);
        assert_eq!(
            parse_line(":pick '/tmp/a b.eml'"),
            InputCommand::Pick(PathBuf::from("/tmp/a b.eml"))
        );
        assert_eq!(parse_line("   "), InputCommand::Empty);
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(matches!(parse_line(":select 0"), InputCommand::Invalid(_)));
        assert!(matches!(parse_line(":select two"), InputCommand::Invalid(_)));
        assert!(matches!(parse_line(":pick a.eml b.eml"), InputCommand::Invalid(_)));
        assert!(matches!(parse_line(":frobnicate"), InputCommand::Invalid(_)));
    }
}
