use thiserror::Error;

pub type Result<T> = std::result::Result<T, PunchError>;

#[derive(Error, Debug)]
pub enum PunchError {
    #[error("git is not available: {0}")]
    GitUnavailable(#[source] std::io::Error),
    #[error("git log failed ({status}): {stderr}")]
    GitFailed { status: String, stderr: String },
    #[error("no commits found")]
    NoCommits,
    #[error("malformed log line {line_no}: {line:?} ({reason})")]
    MalformedLine {
        line_no: usize,
        line: String,
        reason: String,
    },
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
