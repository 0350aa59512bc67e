use crate::PlatformError;

pub const HELP: &str = "\
commands:
  click <n>       press the n-th button (1-based)
  press <label>   press the button with this label
  tap <x> <y>     press whatever button is at (x, y)
  frame           redraw the current frame
  help            show this text
  quit            exit";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Click(usize),
    Press(String),
    Tap(f32, f32),
    Frame,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, PlatformError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let cmd = match word {
            "click" => Command::Click(parse_arg::<usize>(rest).filter(|n| *n > 0).ok_or_else(
                || PlatformError::InvalidArgument(rest.to_string()),
            )?),
            "press" if !rest.is_empty() => Command::Press(rest.to_string()),
            "press" => return Err(PlatformError::InvalidArgument(rest.to_string())),
            "tap" => {
                let mut it = rest.split_whitespace().map(parse_arg::<f32>);
                match (it.next().flatten(), it.next().flatten(), it.next()) {
                    (Some(x), Some(y), None) => Command::Tap(x, y),
                    _ => return Err(PlatformError::InvalidArgument(rest.to_string())),
                }
            }
            "frame" => Command::Frame,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(PlatformError::UnknownCommand(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

fn parse_arg<T: std::str::FromStr>(s: &str) -> Option<T> {
    s.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("click 2").unwrap(), Some(Command::Click(2)));
        assert_eq!(
            Command::parse("  press on/off ").unwrap(),
            Some(Command::Press("on/off".into()))
        );
        assert_eq!(
            Command::parse("tap 10 99.5").unwrap(),
            Some(Command::Tap(10.0, 99.5))
        );
        assert_eq!(Command::parse("q").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("# comment").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse("jump"),
            Err(PlatformError::UnknownCommand(w)) if w == "jump"
        ));
        assert!(matches!(
            Command::parse("click 0"),
            Err(PlatformError::InvalidArgument(_))
        ));
        assert!(matches!(
            Command::parse("tap 1"),
            Err(PlatformError::InvalidArgument(_))
        ));
        assert!(matches!(
            Command::parse("press"),
            Err(PlatformError::InvalidArgument(_))
        ));
    }
}
