/// View state rendering for the terminal
use cadence_playback::{ScrollCommand, ViewState};
use std::fmt::Write as _;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }

    pub fn render(self, view: &ViewState) -> serde_json::Result<String> {
        match self {
            Self::Text => Ok(render_text(view)),
            Self::Json => serde_json::to_string(view),
        }
    }
}

/// One human readable line per view state
pub fn render_text(view: &ViewState) -> String {
    let state = if view.is_playing { "playing" } else { "paused" };
    let mut line = format!(
        "[{}] {} - {} | {} | {} / {}",
        view.current_index, view.title, view.artist, state, view.position_label, view.duration_label
    );

    match &view.scroll {
        Some(ScrollCommand::CenterOn { index }) => {
            let _ = write!(line, " | scroll to {index}");
        }
        Some(ScrollCommand::Spring {
            index, offset_x, ..
        }) => {
            let _ = write!(line, " | spring to {index} at {offset_x}");
        }
        None => {}
    }
    if let Some(error) = &view.error {
        let _ = write!(line, " | error: {error}");
    }
    line
}
