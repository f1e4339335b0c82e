/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command '{0}' (try: toggle, next, prev, begin, end, settle, resize, seek, tick, quit)")]
    UnknownCommand(String),

    #[error("'{command}' needs a {name}")]
    MissingArgument { command: String, name: &'static str },

    #[error("'{command}': '{value}' is not a number")]
    InvalidNumber { command: String, value: String },

    #[error("'{command}': unexpected argument '{value}'")]
    UnexpectedArgument { command: String, value: String },
}
