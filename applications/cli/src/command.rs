/// Line commands read from stdin
use crate::error::{CliError, Result};
use cadence_playback::Intent;

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forward to the screen
    Intent(Intent),
    /// Print the latest view without touching the screen
    Tick,
    /// Dismiss the screen and exit
    Quit,
}

/// Parse one input line
///
/// Blank lines and lines starting with `#` yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let mut args = line.split_whitespace();
    let Some(word) = args.next() else {
        return Ok(None);
    };
    if word.starts_with('#') {
        return Ok(None);
    }

    let command = match word.to_ascii_lowercase().as_str() {
        "toggle" | "t" => Command::Intent(Intent::Toggle),
        "next" | "n" => Command::Intent(Intent::SkipForward),
        "prev" | "p" => Command::Intent(Intent::SkipBackward),
        "begin" => Command::Intent(Intent::DragBegin {
            offset_x: number(&mut args, word, "offset")?,
        }),
        "end" => Command::Intent(Intent::DragEnd {
            offset_x: number(&mut args, word, "offset")?,
            velocity_x: number(&mut args, word, "velocity")?,
        }),
        "settle" => Command::Intent(Intent::DragSettle {
            offset_x: number(&mut args, word, "offset")?,
        }),
        "resize" => Command::Intent(Intent::Resize {
            viewport_width: number(&mut args, word, "width")?,
        }),
        "seek" => Command::Intent(Intent::Seek {
            seconds: number(&mut args, word, "position")?,
        }),
        "tick" => Command::Tick,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CliError::UnknownCommand(word.to_string())),
    };

    if let Some(extra) = args.next() {
        return Err(CliError::UnexpectedArgument {
            command: word.to_string(),
            value: extra.to_string(),
        });
    }
    Ok(Some(command))
}

fn number<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    command: &str,
    name: &'static str,
) -> Result<f64> {
    let value = args.next().ok_or_else(|| CliError::MissingArgument {
        command: command.to_string(),
        name,
    })?;
    value.parse().map_err(|_| CliError::InvalidNumber {
        command: command.to_string(),
        value: value.to_string(),
    })
}
