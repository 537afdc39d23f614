//! Structured command line parsing.
//!
//! Converts the submitted command buffer into a `ParsedCommand`. Parsing is
//! pure classification; side effects live in `command.rs`. A leading ':' is
//! tolerated but not required (the command line stores text without it).

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// `q`
    Quit,
    /// `q!`
    ForceQuit,
    /// `w`
    Write,
    /// `wq` / `x`
    WriteQuit,
    /// `e!`
    Reload,
    /// A positive 1-based line number.
    GoToLine(usize),
    Unknown(String),
}

impl ParsedCommand {
    /// Stable label for logs (never includes the typed text).
    pub fn label(&self) -> &'static str {
        match self {
            ParsedCommand::Quit => "quit",
            ParsedCommand::ForceQuit => "force_quit",
            ParsedCommand::Write => "write",
            ParsedCommand::WriteQuit => "write_quit",
            ParsedCommand::Reload => "reload",
            ParsedCommand::GoToLine(_) => "goto_line",
            ParsedCommand::Unknown(_) => "unknown",
        }
    }
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        let s = raw.trim();
        let body = s.strip_prefix(':').unwrap_or(s).trim();
        match body {
            "q" => ParsedCommand::Quit,
            "q!" => ParsedCommand::ForceQuit,
            "w" => ParsedCommand::Write,
            "wq" | "x" => ParsedCommand::WriteQuit,
            "e!" => ParsedCommand::Reload,
            _ => match body.parse::<usize>() {
                Ok(n) if n > 0 => ParsedCommand::GoToLine(n),
                _ => ParsedCommand::Unknown(body.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_variants() {
        assert_eq!(CommandParser::parse("q"), ParsedCommand::Quit);
        assert_eq!(CommandParser::parse("q!"), ParsedCommand::ForceQuit);
        assert_eq!(CommandParser::parse(":q"), ParsedCommand::Quit);
    }

    #[test]
    fn parse_write_variants() {
        assert_eq!(CommandParser::parse("w"), ParsedCommand::Write);
        assert_eq!(CommandParser::parse("wq"), ParsedCommand::WriteQuit);
        assert_eq!(CommandParser::parse(" x "), ParsedCommand::WriteQuit);
    }

    #[test]
    fn parse_reload() {
        assert_eq!(CommandParser::parse("e!"), ParsedCommand::Reload);
    }

    #[test]
    fn parse_line_numbers() {
        assert_eq!(CommandParser::parse("5"), ParsedCommand::GoToLine(5));
        assert_eq!(
            CommandParser::parse("0"),
            ParsedCommand::Unknown("0".into())
        );
        assert_eq!(
            CommandParser::parse("-3"),
            ParsedCommand::Unknown("-3".into())
        );
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            CommandParser::parse("doesnotexist"),
            ParsedCommand::Unknown("doesnotexist".into())
        );
        assert_eq!(CommandParser::parse(""), ParsedCommand::Unknown(String::new()));
    }
}
