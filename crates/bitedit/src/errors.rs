//! Error types for range resolution, program scanning and execution.

use thiserror::Error;

/// Errors produced when resolving the caller's `start`/`end` bit window against the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// `start` lies beyond the last bit of the input.
    #[error("start bit ({start}) is out of bounds for {len} input bits")]
    StartOutOfBounds { start: usize, len: usize },
    /// `start` lies after the (normalized) `end`.
    #[error("start bit ({start}) cannot be greater than end bit ({end})")]
    StartAfterEnd { start: usize, end: usize },
}

/// A pattern argument that is empty or contains something other than `0`/`1`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid binary pattern {0:?}: expected one or more '0'/'1' characters")]
pub struct InvalidPattern(pub String);

/// Errors produced while scanning program text into [crate::command::Command]s.
///
/// `position` is the byte offset in the program text of the command that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// A count or literal argument is malformed.
    #[error("invalid argument {argument:?} for '{command}' at offset {position}: {reason}")]
    InvalidArgument {
        position: usize,
        command: char,
        argument: String,
        reason: &'static str,
    },
    /// The pattern of a logical command is malformed.
    #[error("{source} at offset {position}")]
    InvalidPattern {
        position: usize,
        source: InvalidPattern,
    },
    /// A `[` has no closing `]`.
    #[error("mismatched brackets: '[' at offset {position} is never closed")]
    MismatchedBrackets { position: usize },
    /// A `]` is not followed by the block's bit count.
    #[error("block operation at offset {position} must be followed by a number")]
    MissingBlockCount { position: usize },
    /// A stream-advancing command appears inside a block chain.
    #[error("command '{command}' at offset {position} is not allowed in a block")]
    DisallowedInBlock { position: usize, command: char },
    /// The character does not start any known command.
    #[error("unknown command '{command}' at offset {position}")]
    UnknownCommand { position: usize, command: char },
}

/// Top-level error returned by [crate::transform] and [crate::program::Program::apply].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Program(#[from] ProgramError),
    /// A full pass over the program consumed no input, so replaying it would never finish.
    #[error("program consumed no input during pass {pass} at bit {position}")]
    Stalled { pass: usize, position: usize },
}
