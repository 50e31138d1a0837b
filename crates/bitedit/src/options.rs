//! Run configuration: the bit window to edit and how much to log.

use crate::trace::Verbosity;

/// Options for one run of a program.
///
/// Use the builder-style setters to configure, then pass to
/// [crate::program::Program::apply] or [crate::apply].
///
/// # Example
///
/// ```
/// use bitedit::{EditOptions, Verbosity};
///
/// let mut options = EditOptions::new();
/// options.set_start(8).set_end(32).set_verbosity(Verbosity::FirstPass);
/// assert_eq!(options.start, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditOptions {
    /// First bit to edit (inclusive).
    pub start: usize,
    /// Bit to stop at (exclusive). 0 means the end of the input.
    pub end: usize,
    /// Which passes emit diagnostics.
    pub verbosity: Verbosity,
}

impl EditOptions {
    /// Whole input, no diagnostics.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start(&mut self, start: usize) -> &mut Self {
        self.start = start;
        self
    }

    pub fn set_end(&mut self, end: usize) -> &mut Self {
        self.end = end;
        self
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) -> &mut Self {
        self.verbosity = verbosity;
        self
    }
}
