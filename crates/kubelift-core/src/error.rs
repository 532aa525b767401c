//! Error types for Kubelift
//!
//! Every operation returns a typed error; nothing is swallowed. Submission
//! outcomes (created, already exists, rejected, transport failure) are not
//! errors - see [`crate::submission::SubmissionResult`].

use thiserror::Error;

/// Result type used throughout Kubelift
pub type LiftResult<T> = Result<T, LiftError>;

/// Core error taxonomy
#[derive(Error, Debug)]
pub enum LiftError {
    /// Missing schema kind or missing stored manifest
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed manifest or discovery document
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// Builder or submission precondition violated
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network or cluster-unreachable failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local filesystem failure in the manifest store
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool invocation error (bad arguments, unknown tool)
    #[error("Tool error: {0}")]
    Tool(String),
}

impl LiftError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        LiftError::NotFound(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        LiftError::Parse {
            message: msg.into(),
            line: None,
            column: None,
        }
    }

    /// Parse error carrying a source location when the parser exposes one
    pub fn parse_at(msg: impl Into<String>, line: Option<usize>, column: Option<usize>) -> Self {
        LiftError::Parse {
            message: msg.into(),
            line,
            column,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        LiftError::Validation(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        LiftError::Transport(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        LiftError::Io(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        LiftError::Config(msg.into())
    }

    pub fn tool(msg: impl Into<String>) -> Self {
        LiftError::Tool(msg.into())
    }
}
