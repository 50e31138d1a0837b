//! bitedit - bit-level stream editor
//! Command-line front end: reads input, runs an edit program, writes the result.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use bitedit::{EditOptions, Program, Verbosity, serde::ProgramDef};
use clap::Parser;
use colored::*;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const COMMANDS_HELP: &str = "\
COMMANDS:
  --- Stream Operations ---
  t<number>    Take <number> bits from the input stream.
  s<number>    Skip <number> bits from the input stream.
  i<binary>    Insert a literal <binary> string into the output.
  n<number>    Invert the next <number> bits from the input stream.

  --- Re-ordering Operations ---
  v<number>    Reverse the order of BITS within the next <number>-bit word.
  b<number>    Reverse the order of BYTES within the next <number>-bit word (endian swap).

  --- Logical Operations ---
  x<N>:<P>     XOR the next <N> bits with the repeating pattern <P>.
  a<N>:<P>     AND the next <N> bits with the repeating pattern <P>.
  o<N>:<P>     OR the next <N> bits with the repeating pattern <P>.

  --- Block Operations ---
  [<chain>]<N> Process the next <N> bits as one block, applying <chain> to it.
               - Allowed in a chain: n, v, b, x, a, o.
               - Chain commands apply to the whole block (e.g. 'n' inverts all N bits).
               - Logical ops in a chain still need a pattern (e.g. [nx:101]8).

EXAMPLES:
  1. Extract 1 byte from every 3 bytes:
     bitedit -e \"s16t8\" -i in.dat -o out.dat

  2. Change endianness of a file with 32-bit words:
     bitedit -e \"b32\" -i in.dat -o out.dat

  3. Reverse and invert each byte, logging every pass:
     bitedit -e \"[vn]8\" --verbose -i in.dat -o out.dat

  4. Check the output size of an operation without writing it:
     bitedit -e \"[a:11110000]16[b]16\" --dry-run -i in.dat";

#[derive(Parser)]
#[command(name = "bitedit")]
#[command(version)]
#[command(about = "Bit Editor - bit-level file manipulation", long_about = None)]
#[command(after_long_help = COMMANDS_HELP)]
struct Cli {
    /// The repeating string of edit commands (e.g. "s16t8")
    #[arg(
        short = 'e',
        long = "edit",
        value_name = "PROGRAM",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    program: String,

    /// Input file path; standard input when absent or "-"
    #[arg(short, long, value_name = "IN_FILE")]
    input: Option<PathBuf>,

    /// Output file path; standard output when absent or "-"
    #[arg(short, long, value_name = "OUT_FILE")]
    output: Option<PathBuf>,

    /// Bit position to start editing from (inclusive)
    #[arg(long, value_name = "BIT", default_value_t = 0)]
    start: usize,

    /// Bit position to stop editing at (exclusive); 0 means the end of the data
    #[arg(long, value_name = "BIT", default_value_t = 0)]
    end: usize,

    /// Log every pass over the command sequence
    #[arg(long)]
    verbose: bool,

    /// Log the first pass over the command sequence only
    #[arg(long)]
    verbose_once: bool,

    /// Run the edit and report the output size without writing data
    #[arg(long)]
    dry_run: bool,

    /// Print the decoded program as JSON and exit
    #[arg(long)]
    explain: bool,
}

impl Cli {
    fn options(&self) -> EditOptions {
        let mut options = EditOptions::new();
        options
            .set_start(self.start)
            .set_end(self.end)
            .set_verbosity(Verbosity::from_flags(self.verbose, self.verbose_once));
        options
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose || cli.verbose_once);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so they never mix with edited bytes on stdout.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    if cli.explain {
        let program = Program::compile(&cli.program).context("invalid edit program")?;
        let def = ProgramDef::from(&program);
        println!("{}", serde_json::to_string_pretty(&def)?);
        return Ok(());
    }

    let input = read_input(cli.input.as_deref())?;
    debug!(bytes = input.len(), program = %cli.program, "read input");

    let output = bitedit::apply(&input, &cli.program, &cli.options())
        .context("error applying edits")?;

    if cli.dry_run {
        println!(
            "Dry run complete. Output would be {} bytes.",
            output.len()
        );
        return Ok(());
    }

    write_output(cli.output.as_deref(), &output)?;
    info!(input = input.len(), output = output.len(), "edit complete");
    Ok(())
}

fn is_stdio(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) if !is_stdio(path) => {
            fs::read(p).with_context(|| format!("cannot read input file {}", p.display()))
        }
        _ => {
            let mut data = Vec::new();
            io::stdin()
                .read_to_end(&mut data)
                .context("cannot read standard input")?;
            Ok(data)
        }
    }
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(p) if !is_stdio(path) => {
            fs::write(p, data).with_context(|| format!("cannot write output file {}", p.display()))
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(data)
                .and_then(|()| stdout.flush())
                .context("cannot write standard output")
        }
    }
}
