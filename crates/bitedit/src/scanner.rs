//! Tokenizer for the edit language.
//!
//! A program is a run of commands with no separators:
//!
//! | text          | command                                   |
//! |---------------|-------------------------------------------|
//! | `t<n>`        | take `n` bits                             |
//! | `s<n>`        | skip `n` bits                             |
//! | `i<bits>`     | insert the literal `bits`                 |
//! | `n<n>`        | invert `n` bits                           |
//! | `v<n>`        | reverse the bit order of `n` bits         |
//! | `b<n>`        | reverse the byte order of `n` bits        |
//! | `x<n>:<pat>`  | XOR `n` bits with the repeating `pat`     |
//! | `a<n>:<pat>`  | AND `n` bits with the repeating `pat`     |
//! | `o<n>:<pat>`  | OR `n` bits with the repeating `pat`      |
//! | `[<chain>]<n>`| apply `chain` to the next `n` bits        |
//!
//! Arguments are not delimited: an argument runs until the next character that
//! can start a command (`t s n v b x a o i [`) or the end of the text. Literal
//! and pattern text therefore can never contain one of those characters.

use crate::{
    bits,
    block::ChunkOp,
    command::{Command, LogicalOp},
    errors::ProgramError,
    pattern::Pattern,
};

const COMMAND_START: &[u8] = b"tsnivxaob[";

fn is_command_start(c: u8) -> bool {
    COMMAND_START.contains(&c)
}

/// Index of the first command-start character at or after `from`, or `text.len()`.
fn argument_end(text: &str, from: usize) -> usize {
    text.as_bytes()[from..]
        .iter()
        .position(|&c| is_command_start(c))
        .map_or(text.len(), |offset| from + offset)
}

/// The character starting at byte `position`, for error reporting.
fn char_at(text: &str, position: usize) -> char {
    text[position..]
        .chars()
        .next()
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn parse_count(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }

    text.parse().ok()
}

fn invalid_argument(
    position: usize,
    command: u8,
    argument: &str,
    reason: &'static str,
) -> ProgramError {
    ProgramError::InvalidArgument {
        position,
        command: command as char,
        argument: argument.to_string(),
        reason,
    }
}

fn parse_pattern(position: usize, text: &str) -> Result<Pattern, ProgramError> {
    text.parse()
        .map_err(|source| ProgramError::InvalidPattern { position, source })
}

/// Yields one decoded [Command] per step, left to right.
///
/// Stops after the first error.
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            failed: false,
        }
    }

    /// Byte offset of the next command to be scanned.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn argument(&mut self) -> &'a str {
        let end = argument_end(self.text, self.pos);
        let arg = &self.text[self.pos..end];
        self.pos = end;
        arg
    }

    fn next_command(&mut self) -> Result<Command, ProgramError> {
        let start = self.pos;
        let c = self.text.as_bytes()[start];
        self.pos += 1;

        match c {
            b'[' => self.block(start),
            b't' | b's' | b'n' | b'v' | b'b' => {
                let arg = self.argument();
                let n = parse_count(arg).ok_or_else(|| {
                    invalid_argument(start, c, arg, "expected a decimal bit count")
                })?;

                Ok(match c {
                    b't' => Command::Take(n),
                    b's' => Command::Skip(n),
                    b'n' => Command::Invert(n),
                    b'v' => Command::ReverseBits(n),
                    _ => {
                        if n % 8 != 0 {
                            return Err(invalid_argument(
                                start,
                                c,
                                arg,
                                "count must be a multiple of 8",
                            ));
                        }
                        Command::ByteSwap(n)
                    }
                })
            }
            b'i' => {
                let arg = self.argument();
                bits::parse_binary(arg)
                    .map(Command::Insert)
                    .ok_or_else(|| invalid_argument(start, c, arg, "expected binary digits"))
            }
            _ => match LogicalOp::from_symbol(c) {
                Some(op) => self.logical(start, op),
                None => Err(ProgramError::UnknownCommand {
                    position: start,
                    command: char_at(self.text, start),
                }),
            },
        }
    }

    /// Scans `<count>:<pattern>` after a logical command at `start`.
    fn logical(&mut self, start: usize, op: LogicalOp) -> Result<Command, ProgramError> {
        let c = op.symbol() as u8;
        let arg = self.argument();
        let (count, pattern) = arg
            .split_once(':')
            .ok_or_else(|| invalid_argument(start, c, arg, "expected <count>:<pattern>"))?;
        let count = parse_count(count)
            .ok_or_else(|| invalid_argument(start, c, arg, "expected a decimal bit count"))?;
        let pattern = parse_pattern(start, pattern)?;

        Ok(Command::Logical {
            op,
            count,
            pattern,
        })
    }

    /// Scans `[<chain>]<count>`; `open` is the offset of the `[`.
    fn block(&mut self, open: usize) -> Result<Command, ProgramError> {
        let body_start = self.pos;
        let close = self.text[body_start..]
            .find(']')
            .map(|offset| body_start + offset)
            .ok_or(ProgramError::MismatchedBrackets { position: open })?;

        let digits = self.text.as_bytes()[close + 1..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        let count_text = &self.text[close + 1..close + 1 + digits];
        self.pos = close + 1 + digits;

        let count =
            parse_count(count_text).ok_or(ProgramError::MissingBlockCount { position: open })?;
        let chain = parse_chain(&self.text[body_start..close], body_start)?;

        Ok(Command::Block { chain, count })
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Command, ProgramError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.text.len() {
            return None;
        }

        let result = self.next_command();
        self.failed = result.is_err();
        Some(result)
    }
}

/// Decodes the body of a block. `offset` is where `body` starts in the full
/// program text and is only used for error positions.
///
/// `n`, `v` and `b` take no argument; `x`, `a` and `o` take `:<pattern>`.
/// Every chain step covers the whole block, so a count before the `:` is
/// accepted and ignored.
pub fn parse_chain(body: &str, offset: usize) -> Result<Vec<ChunkOp>, ProgramError> {
    let bytes = body.as_bytes();
    let mut chain = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let position = offset + i;
        let c = bytes[i];
        i += 1;

        let op = match c {
            b'n' => ChunkOp::Invert,
            b'v' => ChunkOp::ReverseBits,
            b'b' => ChunkOp::ByteSwap,
            b't' | b's' | b'i' | b'[' => {
                return Err(ProgramError::DisallowedInBlock {
                    position,
                    command: c as char,
                });
            }
            _ => {
                let Some(op) = LogicalOp::from_symbol(c) else {
                    return Err(ProgramError::UnknownCommand {
                        position,
                        command: char_at(body, i - 1),
                    });
                };

                let end = argument_end(body, i);
                let arg = &body[i..end];
                i = end;

                let pattern = match arg.split_once(':') {
                    Some((count, pattern)) if count.bytes().all(|b| b.is_ascii_digit()) => {
                        parse_pattern(position, pattern)?
                    }
                    Some(_) => {
                        return Err(invalid_argument(position, c, arg, "count must be a number"));
                    }
                    None => {
                        return Err(invalid_argument(position, c, arg, "expected :<pattern>"));
                    }
                };

                ChunkOp::Logical { op, pattern }
            }
        };

        chain.push(op);
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InvalidPattern;

    fn scan(text: &str) -> Result<Vec<Command>, ProgramError> {
        Scanner::new(text).collect()
    }

    #[test]
    fn test_scan_stream_commands() {
        assert_eq!(
            scan("s16t8").unwrap(),
            vec![Command::Skip(16), Command::Take(8)]
        );
        assert_eq!(
            scan("n4v12b32").unwrap(),
            vec![
                Command::Invert(4),
                Command::ReverseBits(12),
                Command::ByteSwap(32)
            ]
        );
    }

    #[test]
    fn test_scan_insert() {
        assert_eq!(
            scan("i1010t8").unwrap(),
            vec![
                Command::Insert(vec![true, false, true, false]),
                Command::Take(8)
            ]
        );
        assert_eq!(scan("it1").unwrap(), vec![Command::Insert(vec![]), Command::Take(1)]);
    }

    #[test]
    fn test_scan_insert_invalid() {
        assert_eq!(
            scan("i102").unwrap_err(),
            ProgramError::InvalidArgument {
                position: 0,
                command: 'i',
                argument: "102".to_string(),
                reason: "expected binary digits",
            }
        );
    }

    #[test]
    fn test_scan_logical() {
        assert_eq!(
            scan("x8:10110101o4:1").unwrap(),
            vec![
                Command::Logical {
                    op: LogicalOp::Xor,
                    count: 8,
                    pattern: "10110101".parse().unwrap(),
                },
                Command::Logical {
                    op: LogicalOp::Or,
                    count: 4,
                    pattern: "1".parse().unwrap(),
                },
            ]
        );
    }

    #[test]
    fn test_scan_logical_missing_separator() {
        assert!(matches!(
            scan("a8").unwrap_err(),
            ProgramError::InvalidArgument { command: 'a', .. }
        ));
    }

    #[test]
    fn test_scan_logical_bad_count() {
        assert!(matches!(
            scan("x:101").unwrap_err(),
            ProgramError::InvalidArgument { command: 'x', .. }
        ));
    }

    #[test]
    fn test_scan_logical_bad_pattern() {
        assert_eq!(
            scan("t8x8:1:0").unwrap_err(),
            ProgramError::InvalidPattern {
                position: 2,
                source: InvalidPattern("1:0".to_string()),
            }
        );
        assert!(matches!(
            scan("x8:").unwrap_err(),
            ProgramError::InvalidPattern { .. }
        ));
    }

    #[test]
    fn test_pattern_stops_at_command_start() {
        // The 'a' ends the pattern run, leaving "1" behind as a bad argument for 'a'.
        assert!(matches!(
            scan("x8:1a1").unwrap_err(),
            ProgramError::InvalidArgument { command: 'a', position: 4, .. }
        ));
    }

    #[test]
    fn test_scan_missing_count() {
        assert_eq!(
            scan("t").unwrap_err(),
            ProgramError::InvalidArgument {
                position: 0,
                command: 't',
                argument: String::new(),
                reason: "expected a decimal bit count",
            }
        );
    }

    #[test]
    fn test_scan_count_with_trailing_junk() {
        assert!(matches!(
            scan("t8]").unwrap_err(),
            ProgramError::InvalidArgument { command: 't', .. }
        ));
        assert!(matches!(
            scan("t-8").unwrap_err(),
            ProgramError::InvalidArgument { command: 't', .. }
        ));
    }

    #[test]
    fn test_scan_byte_swap_unaligned() {
        assert_eq!(
            scan("b7").unwrap_err(),
            ProgramError::InvalidArgument {
                position: 0,
                command: 'b',
                argument: "7".to_string(),
                reason: "count must be a multiple of 8",
            }
        );
    }

    #[test]
    fn test_scan_unknown_command() {
        assert_eq!(
            scan("z5").unwrap_err(),
            ProgramError::UnknownCommand {
                position: 0,
                command: 'z',
            }
        );
        assert_eq!(
            scan("t8[n]8é").unwrap_err(),
            ProgramError::UnknownCommand {
                position: 6,
                command: 'é',
            }
        );
    }

    #[test]
    fn test_scan_block() {
        assert_eq!(
            scan("[vn]8t8").unwrap(),
            vec![
                Command::Block {
                    chain: vec![ChunkOp::ReverseBits, ChunkOp::Invert],
                    count: 8,
                },
                Command::Take(8),
            ]
        );
    }

    #[test]
    fn test_scan_block_with_pattern() {
        assert_eq!(
            scan("[a:11110000]16[b]16").unwrap(),
            vec![
                Command::Block {
                    chain: vec![ChunkOp::Logical {
                        op: LogicalOp::And,
                        pattern: "11110000".parse().unwrap(),
                    }],
                    count: 16,
                },
                Command::Block {
                    chain: vec![ChunkOp::ByteSwap],
                    count: 16,
                },
            ]
        );
    }

    #[test]
    fn test_scan_empty_block() {
        assert_eq!(
            scan("[]8").unwrap(),
            vec![Command::Block {
                chain: vec![],
                count: 8
            }]
        );
    }

    #[test]
    fn test_scan_mismatched_brackets() {
        assert_eq!(
            scan("t8[n8").unwrap_err(),
            ProgramError::MismatchedBrackets { position: 2 }
        );
    }

    #[test]
    fn test_scan_missing_block_count() {
        assert_eq!(
            scan("[n]").unwrap_err(),
            ProgramError::MissingBlockCount { position: 0 }
        );
        assert_eq!(
            scan("[n]t8").unwrap_err(),
            ProgramError::MissingBlockCount { position: 0 }
        );
    }

    #[test]
    fn test_scan_disallowed_in_block() {
        assert_eq!(
            scan("[nt]8").unwrap_err(),
            ProgramError::DisallowedInBlock {
                position: 2,
                command: 't',
            }
        );
        assert!(matches!(
            scan("[[n]8]8").unwrap_err(),
            ProgramError::DisallowedInBlock { command: '[', .. }
        ));
    }

    #[test]
    fn test_scan_block_chain_count_rejected() {
        assert!(matches!(
            scan("[n8]8").unwrap_err(),
            ProgramError::UnknownCommand { command: '8', position: 2 }
        ));
    }

    #[test]
    fn test_scan_block_logical_count_ignored() {
        assert_eq!(scan("[x8:101]8").unwrap(), scan("[x:101]8").unwrap());
        assert_eq!(scan("[a123:1]8").unwrap(), scan("[a:1]8").unwrap());
        assert!(matches!(
            scan("[x8q:101]8").unwrap_err(),
            ProgramError::InvalidArgument { command: 'x', position: 1, .. }
        ));
    }

    #[test]
    fn test_scanner_stops_after_error() {
        let mut scanner = Scanner::new("z5t8");
        assert!(scanner.next().unwrap().is_err());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_scanner_position() {
        let mut scanner = Scanner::new("t8s16");
        scanner.next();
        assert_eq!(scanner.position(), 2);
    }

    #[test]
    fn test_display_reparses_to_same_commands() {
        let commands = scan("s16t8i01[vx:10]8o3:1b16").unwrap();
        let text: String = commands.iter().map(|c| c.to_string()).collect();
        assert_eq!(text, "s16t8i01[vx:10]8o3:1b16");
        assert_eq!(scan(&text).unwrap(), commands);
    }
}
