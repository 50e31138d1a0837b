//! Diagnostic side channel of the engine.
//!
//! The engine reports what it does to a [Trace] sink. Sinks only observe: they
//! cannot change the cursor, the output or the control flow.

use tracing::info;

use crate::{block::ChunkOp, command::Command, range::BitRange};

/// Receives engine events. All hooks default to doing nothing.
///
/// `pass` is the zero-based index of the current replay of the program.
pub trait Trace {
    fn begin(&mut self, _input_bits: usize, _range: BitRange) {}

    /// Called before `command` runs with the cursor at `position`.
    fn command(&mut self, _pass: usize, _position: usize, _command: &Command) {}

    /// Called before each step of a block chain is applied.
    fn chain_step(&mut self, _pass: usize, _op: &ChunkOp) {}

    /// Called after `command` appended `bits` bits to the output.
    fn wrote(&mut self, _pass: usize, _command: &Command, _bits: usize) {}
}

/// Discards every event.
pub struct NoTrace;

impl Trace for NoTrace {}

/// Which passes produce diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Quiet,
    /// Only the first pass over the program.
    FirstPass,
    EveryPass,
}

impl Verbosity {
    /// Maps the `--verbose` / `--verbose-once` pair. `verbose_once` wins when both are set.
    pub fn from_flags(verbose: bool, verbose_once: bool) -> Self {
        if verbose_once {
            Verbosity::FirstPass
        } else if verbose {
            Verbosity::EveryPass
        } else {
            Verbosity::Quiet
        }
    }

    pub fn logs(self, pass: usize) -> bool {
        match self {
            Verbosity::Quiet => false,
            Verbosity::FirstPass => pass == 0,
            Verbosity::EveryPass => true,
        }
    }
}

/// Emits `tracing` events for the passes selected by its [Verbosity].
pub struct LogTrace {
    verbosity: Verbosity,
}

impl LogTrace {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl Trace for LogTrace {
    fn begin(&mut self, input_bits: usize, range: BitRange) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }

        if range.is_empty() {
            info!(input_bits, start = range.start, "empty range, nothing to edit");
        } else {
            info!(
                input_bits,
                start = range.start,
                end = range.end,
                "starting edit process"
            );
        }
    }

    fn command(&mut self, pass: usize, position: usize, command: &Command) {
        if self.verbosity.logs(pass) {
            info!(
                pass,
                position,
                command = %command,
                name = command.name(),
                count = command.count(),
                "processing command"
            );
        }
    }

    fn chain_step(&mut self, pass: usize, op: &ChunkOp) {
        if self.verbosity.logs(pass) {
            info!(pass, step = %op, name = op.name(), "applying block command");
        }
    }

    fn wrote(&mut self, pass: usize, command: &Command, bits: usize) {
        if self.verbosity.logs(pass) && !matches!(command, Command::Skip(_)) {
            info!(pass, bits, "wrote bits to output");
        }
    }
}
