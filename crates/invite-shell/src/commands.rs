//! Line commands understood by the headless host.
//!
//! Each stdin line maps to one input event: a pointer gesture, an icon
//! tap, a key press, or a button inside an app.

use thiserror::Error;

use crate::apps::{AppKind, MailView, MapProvider};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // Lock screen slider
    DragStart,
    DragMove(f64),
    DragEnd,

    // Home screen and windows
    Open(AppKind),
    Close,
    Escape,

    // Maps
    Directions(MapProvider),

    // Photos
    Swipe { from: f64, to: f64 },
    Photo(usize),
    Next,
    Prev,

    // Mail
    Mail(MailView),
    Sign { name: String, message: String },

    // Messages
    Chat(String),
    Profile(String),
    Back,

    // Wallet
    Copy(usize),

    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("not a number: {0}")]
    InvalidNumber(String),

    #[error("no app named {0}")]
    UnknownApp(String),

    #[error("no map app named {0}")]
    UnknownMap(String),
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
drag-start | drag-move X | drag-end
open APP | close | escape
directions naver|kakao|tmap
swipe FROM TO | photo N | next | prev
mail home|write|list | sign NAME | MESSAGE
chat ID | profile ID | back
copy N | status | help | quit";

fn number<T: std::str::FromStr>(arg: Option<&str>, name: &'static str) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(name))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

fn word(arg: Option<&str>, name: &'static str) -> Result<String, CommandError> {
    arg.map(str::to_string)
        .ok_or(CommandError::MissingArgument(name))
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let command = match head.to_ascii_lowercase().as_str() {
        "" => return Err(CommandError::Empty),
        "drag-start" => Command::DragStart,
        "drag-move" => Command::DragMove(number(args.next(), "drag-move")?),
        "drag-end" => Command::DragEnd,
        "open" => {
            let label = word(args.next(), "open")?;
            match AppKind::from_label(&label) {
                Some(kind) => Command::Open(kind),
                None => return Err(CommandError::UnknownApp(label)),
            }
        }
        "close" => Command::Close,
        "directions" => {
            let label = word(args.next(), "directions")?;
            match MapProvider::from_label(&label) {
                Some(provider) => Command::Directions(provider),
                None => return Err(CommandError::UnknownMap(label)),
            }
        }
        "escape" | "esc" => Command::Escape,
        "swipe" => Command::Swipe {
            from: number(args.next(), "swipe")?,
            to: number(args.next(), "swipe")?,
        },
        "photo" => Command::Photo(number(args.next(), "photo")?),
        "next" => Command::Next,
        "prev" => Command::Prev,
        "mail" => match args.next() {
            Some("home") => Command::Mail(MailView::Home),
            Some("write") => Command::Mail(MailView::Write),
            Some("list") => Command::Mail(MailView::List),
            Some(other) => return Err(CommandError::Unknown(format!("mail {other}"))),
            None => return Err(CommandError::MissingArgument("mail")),
        },
        "sign" => {
            let (name, message) = rest.split_once('|').unwrap_or((rest, ""));
            Command::Sign {
                name: name.trim().to_string(),
                message: message.trim().to_string(),
            }
        }
        "chat" => Command::Chat(word(args.next(), "chat")?),
        "profile" => Command::Profile(word(args.next(), "profile")?),
        "back" => Command::Back,
        "copy" => Command::Copy(number(args.next(), "copy")?),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gestures() {
        assert_eq!(parse_command("drag-start"), Ok(Command::DragStart));
        assert_eq!(parse_command("  drag-move 212.5 "), Ok(Command::DragMove(212.5)));
        assert_eq!(
            parse_command("swipe 300 220"),
            Ok(Command::Swipe {
                from: 300.0,
                to: 220.0
            })
        );
    }

    #[test]
    fn test_parse_open() {
        assert_eq!(parse_command("open Photos"), Ok(Command::Open(AppKind::Photos)));
        assert_eq!(
            parse_command("open camera"),
            Err(CommandError::UnknownApp("camera".to_string()))
        );
        assert_eq!(
            parse_command("open"),
            Err(CommandError::MissingArgument("open"))
        );
    }

    #[test]
    fn test_parse_directions() {
        assert_eq!(
            parse_command("directions TMap"),
            Ok(Command::Directions(MapProvider::TMap))
        );
        assert_eq!(
            parse_command("directions google"),
            Err(CommandError::UnknownMap("google".to_string()))
        );
        assert_eq!(
            parse_command("directions"),
            Err(CommandError::MissingArgument("directions"))
        );
    }

    #[test]
    fn test_parse_sign() {
        assert_eq!(
            parse_command("sign Mina Kim | Congratulations, both of you!"),
            Ok(Command::Sign {
                name: "Mina Kim".to_string(),
                message: "Congratulations, both of you!".to_string(),
            })
        );
        // Missing message still parses; the form rejects it
        assert_eq!(
            parse_command("sign Mina"),
            Ok(Command::Sign {
                name: "Mina".to_string(),
                message: String::new(),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("photo two"),
            Err(CommandError::InvalidNumber("two".to_string()))
        );
        assert_eq!(
            parse_command("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert_eq!(
            parse_command("mail outbox"),
            Err(CommandError::Unknown("mail outbox".to_string()))
        );
    }
}
