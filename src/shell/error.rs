use std::path::PathBuf;

use thiserror::Error;

/// A line that cannot be turned into a command tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    EmptyCommand,

    #[error("missing command for '{0}'")]
    MissingCommand(char),

    #[error("missing file name after '{0}'")]
    MissingTarget(char),

    #[error("'{0}' not found in input")]
    DelimiterNotFound(char),

    #[error("too many arguments ({count}, limit is {limit})")]
    TooManyArguments { count: usize, limit: usize },

    #[error("too many commands ({count}, limit is {limit})")]
    TooManyCommands { count: usize, limit: usize },
}

/// A failed `cd`. Never aborts the rest of the line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuiltinError {
    #[error("cd: missing directory operand")]
    MissingOperand,

    #[error("cannot cd into {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot cd into {}: not a directory", .0.display())]
    NotADirectory(PathBuf),
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to exec: {program}")]
    Exec {
        program: String,
        #[source]
        source: nix::Error,
    },

    #[error("cannot open {file}: {source}")]
    Redirect {
        file: String,
        #[source]
        source: nix::Error,
    },

    #[error("pipe setup failed: {0}")]
    Pipe(#[source] nix::Error),

    #[error("failed to spawn process: {0}")]
    Spawn(#[source] nix::Error),

    #[error("failed to wait for process {pid}: {source}")]
    Wait {
        pid: i32,
        #[source]
        source: nix::Error,
    },

    #[error("cannot enter {}: {source}", .path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },
}
