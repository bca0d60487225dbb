use super::progress::Notice;
use super::signatures::FailureKind;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{kind}: {line}")]
    Failure { kind: FailureKind, line: String },

    #[error("Engine exited with {}{}", describe_code(.code), describe_tail(.tail))]
    ExitedNonZero {
        code: Option<i32>,
        tail: Vec<String>,
    },

    #[error("Failed to launch engine '{program}': {source}", program = .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while supervising the engine: {0}")]
    Io(#[from] io::Error),

    #[error("Engine did not finish within {limit:?}")]
    TimedOut { limit: Duration },

    #[error("Engine run was cancelled")]
    Cancelled,
}

impl EngineError {
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            EngineError::Failure { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The caller-facing notice for this error.
    pub fn notice(&self) -> Notice {
        match self {
            EngineError::Failure { kind, .. } => Notice::error(kind.title(), kind.body()),
            EngineError::Cancelled => Notice::error("Run Cancelled", self.to_string()),
            EngineError::TimedOut { .. } => Notice::error("Run Timed Out", self.to_string()),
            _ => Notice::error("Engine Failed", self.to_string()),
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn describe_tail(tail: &[String]) -> String {
    if tail.is_empty() {
        String::new()
    } else {
        format!("; last output:\n{}", tail.join("\n"))
    }
}
