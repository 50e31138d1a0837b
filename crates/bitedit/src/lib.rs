//! # bitedit
//!
//! A bit-level stream editor. A short program such as `s16t8` (skip 16 bits,
//! take 8) or `[vn]8` (reverse then invert each byte) is replayed over the
//! input, pass after pass, until a `[start, end)` bit window is used up.
//!
//! Bits are addressed MSB-first: bit 0 is the high bit of the first byte.
//! Output that does not end on a byte boundary is zero-padded.
//!
//! See [scanner] for the command language.
//!
//! ## Example
//!
//! ```
//! // Keep every third byte.
//! let out = bitedit::transform(b"ABCABCABC", "s16t8", 0, 0, false, false).unwrap();
//! assert_eq!(out, b"CCC");
//!
//! // Swap the byte order of 32-bit words.
//! let program = bitedit::Program::compile("b32").unwrap();
//! let out = program.apply(&[1, 2, 3, 4], &bitedit::EditOptions::new()).unwrap();
//! assert_eq!(out, vec![4, 3, 2, 1]);
//! ```

pub mod bits;
pub mod block;
pub mod command;
pub mod engine;
pub mod errors;
pub mod options;
pub mod pattern;
pub mod program;
pub mod range;
pub mod scanner;
#[cfg(feature = "serde")]
pub mod serde;
pub mod trace;

pub use errors::{EditError, ProgramError, RangeError};
pub use options::EditOptions;
pub use program::Program;
pub use trace::Verbosity;

/// Compiles `program_text` and runs it over `input` within `[start, end)`.
///
/// An `end` of 0 means the end of the input. The range is checked before the
/// program is scanned.
pub fn apply(
    input: &[u8],
    program_text: &str,
    options: &EditOptions,
) -> Result<Vec<u8>, EditError> {
    range::BitRange::resolve(options.start, options.end, input.len() * 8)?;
    Program::compile(program_text)?.apply(input, options)
}

/// Flag-style entry point: `verbose` logs every pass, `verbose_once` only the first.
pub fn transform(
    input: &[u8],
    program_text: &str,
    start: usize,
    end: usize,
    verbose: bool,
    verbose_once: bool,
) -> Result<Vec<u8>, EditError> {
    let mut options = EditOptions::new();
    options
        .set_start(start)
        .set_end(end)
        .set_verbosity(Verbosity::from_flags(verbose, verbose_once));

    apply(input, program_text, &options)
}
