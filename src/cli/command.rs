/// One line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Exit,
    Clear,
    Empty,
    Input(&'a str),
}

impl<'a> Command<'a> {
    /// `exit`/`quit` end the loop and `clear` resets the chat history, all
    /// case-insensitive. Anything else is passed through trimmed.
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "exit" | "quit" => Self::Exit,
            "clear" => Self::Clear,
            _ => Self::Input(trimmed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("  QUIT \n"), Command::Exit);
        assert_eq!(Command::parse("Clear"), Command::Clear);
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(
            Command::parse(" what is on page 2? "),
            Command::Input("what is on page 2?")
        );
        assert_eq!(Command::parse("exit now"), Command::Input("exit now"));
    }
}
