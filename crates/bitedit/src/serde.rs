//! Serializable description of a compiled program.
//!
//! These types mirror [crate::command::Command] in a JSON-friendly shape, for
//! tools that want to show what a program text actually decodes to (the CLI's
//! `--explain`, the wasm `describe()`).

use serde::Serialize;

use crate::{
    bits,
    block::ChunkOp,
    command::{Command, LogicalOp},
    program::Program,
};

/// Bitwise operator of a logical command.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOpDef {
    Xor,
    And,
    Or,
}

impl From<LogicalOp> for LogicalOpDef {
    fn from(value: LogicalOp) -> Self {
        match value {
            LogicalOp::Xor => LogicalOpDef::Xor,
            LogicalOp::And => LogicalOpDef::And,
            LogicalOp::Or => LogicalOpDef::Or,
        }
    }
}

/// One step of a block chain.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ChunkOpDef {
    Invert,
    ReverseBits,
    ByteSwap,
    Logical {
        op: LogicalOpDef,
        /// Repeating mask as a `0`/`1` string.
        pattern: String,
    },
}

impl From<&ChunkOp> for ChunkOpDef {
    fn from(value: &ChunkOp) -> Self {
        match value {
            ChunkOp::Invert => ChunkOpDef::Invert,
            ChunkOp::ReverseBits => ChunkOpDef::ReverseBits,
            ChunkOp::ByteSwap => ChunkOpDef::ByteSwap,
            ChunkOp::Logical { op, pattern } => ChunkOpDef::Logical {
                op: (*op).into(),
                pattern: pattern.to_string(),
            },
        }
    }
}

/// One top-level command. Counts are requested bit counts, before clamping.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum CommandDef {
    Take { count: usize },
    Skip { count: usize },
    Insert { bits: String },
    Invert { count: usize },
    ReverseBits { count: usize },
    ByteSwap { count: usize },
    Logical {
        op: LogicalOpDef,
        count: usize,
        pattern: String,
    },
    Block { count: usize, chain: Vec<ChunkOpDef> },
}

impl From<&Command> for CommandDef {
    fn from(value: &Command) -> Self {
        match value {
            Command::Take(count) => CommandDef::Take { count: *count },
            Command::Skip(count) => CommandDef::Skip { count: *count },
            Command::Insert(literal) => CommandDef::Insert {
                bits: bits::format_binary(literal),
            },
            Command::Invert(count) => CommandDef::Invert { count: *count },
            Command::ReverseBits(count) => CommandDef::ReverseBits { count: *count },
            Command::ByteSwap(count) => CommandDef::ByteSwap { count: *count },
            Command::Logical { op, count, pattern } => CommandDef::Logical {
                op: (*op).into(),
                count: *count,
                pattern: pattern.to_string(),
            },
            Command::Block { chain, count } => CommandDef::Block {
                count: *count,
                chain: chain.iter().map(Into::into).collect(),
            },
        }
    }
}

/// A whole program: its canonical text and decoded commands.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ProgramDef {
    /// Canonical program text, e.g. `s16t8`.
    pub text: String,
    pub commands: Vec<CommandDef>,
}

impl From<&Program> for ProgramDef {
    fn from(value: &Program) -> Self {
        ProgramDef {
            text: value.to_string(),
            commands: value.commands().iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_def() {
        let program = Program::compile("s16[x:10]8").unwrap();
        let def = ProgramDef::from(&program);

        assert_eq!(def.text, "s16[x:10]8");
        assert_eq!(
            def.commands,
            vec![
                CommandDef::Skip { count: 16 },
                CommandDef::Block {
                    count: 8,
                    chain: vec![ChunkOpDef::Logical {
                        op: LogicalOpDef::Xor,
                        pattern: "10".to_string(),
                    }],
                },
            ]
        );
    }
}
