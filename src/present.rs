// ABOUTME: Line-driven terminal presenter for a deck session
// ABOUTME: Reads navigation commands from a reader and writes the current slide status to a writer

use crate::errors::{DeckError, Result};
use crate::input::{Control, InputEvent, Key, NavCommand};
use crate::session::DeckSession;
use crate::store::KeyValueStore;
use crate::view::DeckView;
use log::info;
use std::io::{BufRead, Write};

const HELP: &str = "commands: next, prev, home, end, goto N, swipe START END, theme, esc, quit";

/// A parsed presenter line
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCommand {
    Input(InputEvent),
    Jump(usize),
    Help,
    Quit,
}

/// Parse one line of presenter input.
///
/// Accepts short words (`next`, `p`), browser key names (`ArrowRight`, `End`),
/// `goto N` with a 1-based slide number and `swipe START END` in pixels.
pub fn parse_command(line: &str) -> Option<PresenterCommand> {
    let mut words = line.split_whitespace();
    let head = words.next()?;

    let command = match head.to_ascii_lowercase().as_str() {
        "n" | "next" => PresenterCommand::Input(InputEvent::Control(Control::Next)),
        "p" | "prev" | "previous" => {
            PresenterCommand::Input(InputEvent::Control(Control::Previous))
        }
        "home" | "first" => PresenterCommand::Input(InputEvent::Key(Key::Home)),
        "end" | "last" => PresenterCommand::Input(InputEvent::Key(Key::End)),
        "esc" | "escape" | "present" => PresenterCommand::Input(InputEvent::Key(Key::Escape)),
        "t" | "theme" => PresenterCommand::Input(InputEvent::Control(Control::ThemeToggle)),
        "q" | "quit" | "exit" => PresenterCommand::Quit,
        "h" | "help" | "?" => PresenterCommand::Help,
        "g" | "goto" => {
            let number: usize = words.next()?.parse().ok()?;
            PresenterCommand::Jump(number.checked_sub(1)?)
        }
        "swipe" => {
            let start_x: f64 = words.next()?.parse().ok()?;
            let end_x: f64 = words.next()?.parse().ok()?;
            PresenterCommand::Input(InputEvent::Swipe { start_x, end_x })
        }
        _ => match Key::from_name(head) {
            Key::Other(_) => return None,
            key => PresenterCommand::Input(InputEvent::Key(key)),
        },
    };

    Some(command)
}

/// One status line for the session's current slide
pub fn status_line<S: KeyValueStore>(session: &DeckSession<DeckView, S>, titles: &[String]) -> String {
    let view = session.navigator().view();
    let current = session.current();
    let position = view.counter().unwrap_or(current + 1);
    let total = view.total().unwrap_or(session.navigator().slide_count());
    let title = titles.get(current).map(String::as_str).unwrap_or("");

    let mut line = format!("[{}/{}] {}", position, total, title);
    if session.is_presenting() {
        line.push_str(" (presenting)");
    }
    line.push_str(&format!(" [{}]", session.theme()));
    line
}

/// Run a presenter loop until `quit` or end of input, then save the position.
///
/// Returns the index the session ended on.
pub fn present<S, R, W>(
    mut session: DeckSession<DeckView, S>,
    titles: &[String],
    input: R,
    mut output: W,
) -> Result<usize>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let write_err = |e: std::io::Error| DeckError::FileReadError(e);

    writeln!(output, "{}", status_line(&session, titles)).map_err(write_err)?;

    for line in input.lines() {
        let line = line.map_err(write_err)?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Some(PresenterCommand::Quit) => break,
            Some(PresenterCommand::Help) => {
                writeln!(output, "{}", HELP).map_err(write_err)?;
                continue;
            }
            Some(PresenterCommand::Input(event)) => {
                session.handle(&event);
            }
            Some(PresenterCommand::Jump(index)) => {
                session.apply(NavCommand::GoTo(index));
            }
            None => {
                writeln!(output, "unknown command {:?}; {}", line.trim(), HELP)
                    .map_err(write_err)?;
                continue;
            }
        }

        writeln!(output, "{}", status_line(&session, titles)).map_err(write_err)?;
    }

    let last = session.current();
    session.close();
    info!("Presenter closed on slide {}", last + 1);
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("next"),
            Some(PresenterCommand::Input(InputEvent::Control(Control::Next)))
        );
        assert_eq!(
            parse_command("  ArrowLeft "),
            Some(PresenterCommand::Input(InputEvent::Key(Key::ArrowLeft)))
        );
        assert_eq!(parse_command("goto 3"), Some(PresenterCommand::Jump(2)));
        assert_eq!(parse_command("goto 0"), None);
        assert_eq!(parse_command("goto x"), None);
        assert_eq!(
            parse_command("swipe 200 40"),
            Some(PresenterCommand::Input(InputEvent::Swipe {
                start_x: 200.0,
                end_x: 40.0
            }))
        );
        assert_eq!(parse_command("swipe 200"), None);
        assert_eq!(parse_command("Q"), Some(PresenterCommand::Quit));
        assert_eq!(parse_command("dance"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_parsed_keys_map_to_steps() {
        let Some(PresenterCommand::Input(event)) = parse_command("ArrowDown") else {
            panic!("expected an input event");
        };
        assert_eq!(
            crate::input::map_event(&event),
            Some(NavCommand::Step(Direction::Next))
        );
    }
}
