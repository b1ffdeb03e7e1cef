// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Run an Intcode program, feeding it inputs from the command line and optionally from stdin

use intcode::prelude::*;
use intcode::program::{Endianness, ParseProgramError, from_bytes, parse_program};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{self, Display};
use std::fs::{self, read_to_string};
use std::io::{self, Write, stdin, stdout};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;

#[derive(PartialEq, Clone, Copy, ValueEnum)]
enum CodeFormat {
    /// comma-separated ASCII-encoded decimal numbers
    #[value(alias("text"))]
    #[value(alias("aoc"))]
    Ascii,
    /// little-endian 64-bit integers
    #[cfg_attr(target_endian = "little", value(alias("binary-native")))]
    #[value(name("binary-little-endian"), alias("binle"))]
    LittleEndian,
    /// big-endian 64-bit integers
    #[cfg_attr(target_endian = "big", value(alias("binary-native")))]
    #[value(name("binary-big-endian"), alias("binbe"))]
    BigEndian,
}

const VERSION: &str = concat!(env!("CARGO_CRATE_NAME"), '-', env!("CARGO_PKG_VERSION"));

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = VERSION)]
#[command(about = "Intcode runner", long_about = None)]
struct Args {
    #[arg(help = "The program to run")]
    source: PathBuf,
    #[arg(help = "Input format for the program")]
    #[arg(short, long)]
    #[arg(default_value = "ascii")]
    format: CodeFormat,
    #[arg(short, long = "input", value_delimiter = ',', allow_hyphen_values = true)]
    #[arg(help = "Values to feed the program, in order, before reading stdin")]
    inputs: Vec<i64>,
    #[arg(short, long)]
    #[arg(help = "Read more input from stdin once the provided inputs run out")]
    interactive: bool,
    #[arg(short, long)]
    #[arg(help = "Treat stdin lines and program output as ASCII text")]
    ascii: bool,
    #[arg(short, long)]
    #[arg(help = "Print every executed instruction to stderr after the run")]
    trace: bool,
    #[arg(short, long, action = ArgAction::Count)]
    #[arg(help = "Log more detail (repeat for more)")]
    verbose: u8,
}

macro_rules! to_ascii_char {
    ($e: expr) => {{
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "in macro to make it explicit"
        )]
        {
            $e as u8 as char
        }
    }};
}

/// Read a line from stdin, returning the ints it encodes, or [`None`] at end of file
fn get_line(ascii: bool) -> Result<Option<Vec<i64>>, RunError> {
    let mut buf = String::new();
    if stdin().read_line(&mut buf).map_err(RunError::IoError)? == 0 {
        return Ok(None);
    }
    if !ascii {
        return Ok(Some(parse_program(&buf)?));
    }
    if let Some(bad_char) = buf.chars().find(|c| !c.is_ascii()) {
        return Err(RunError::InvalidAsciiChar(bad_char));
    }
    Ok(Some(buf.into_bytes().into_iter().map(i64::from).collect()))
}

fn print_output(value: i64, ascii: bool) -> Result<(), RunError> {
    let mut out = stdout().lock();
    let written = match value {
        c @ 0..128 if ascii => write!(out, "{}", to_ascii_char!(c)),
        // anything outside of ASCII is a result, so print it as a number
        n => writeln!(out, "{n}"),
    };
    written.map_err(RunError::IoError)
}

fn drive(machine: &mut Machine, args: &Args) -> Result<(), RunError> {
    let mut queue: VecDeque<i64> = args.inputs.iter().copied().collect();
    loop {
        match machine.run_until_suspend() {
            Event::NeedsInput => {
                if queue.is_empty() && args.interactive {
                    stdout().flush().map_err(RunError::IoError)?;
                    if let Some(line) = get_line(args.ascii)? {
                        queue.extend(line);
                    }
                }
                let input = queue.pop_front().ok_or(RunError::EndOfInput)?;
                machine.provide_input(input).map_err(MachineError::from)?;
            }
            Event::Output(value) => print_output(value, args.ascii)?,
            Event::Halted => break Ok(()),
            Event::Fault(err) => break Err(err.into()),
        }
    }
}

fn load(args: &Args) -> Result<Vec<i64>, Box<dyn Error>> {
    let prog = match args.format {
        CodeFormat::Ascii => parse_program(&read_to_string(&args.source)?)?,
        CodeFormat::LittleEndian => from_bytes(&fs::read(&args.source)?, Endianness::Little)?,
        CodeFormat::BigEndian => from_bytes(&fs::read(&args.source)?, Endianness::Big)?,
    };
    Ok(prog)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    let prog = load(&args).map_err(|e| format!("failed to load {}: {e}", args.source.display()))?;
    log::info!("loaded {} ints from {}", prog.len(), args.source.display());

    let mut machine = Machine::new(prog);
    if args.trace {
        machine.start_trace();
    }
    let result = drive(&mut machine, &args);

    if let Some(trace) = machine.end_trace() {
        let mut err = io::stderr().lock();
        for instr in trace {
            writeln!(err, "{instr}")?;
        }
    }
    if let Err(e) = &result {
        log::error!("stopped at ip {} in state {:?}: {e}", machine.ip(), machine.state());
    }
    Ok(result?)
}

#[derive(Debug)]
enum RunError {
    IoError(io::Error),
    InvalidAsciiChar(char),
    InvalidInput(ParseProgramError),
    EndOfInput,
    MachineError(MachineError),
}

impl Error for RunError {}
impl Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::IoError(e) => write!(f, "an I/O error occured: {e}"),
            RunError::InvalidAsciiChar(c) => write!(f, "{c:?} is not a valid ASCII character"),
            RunError::InvalidInput(e) => write!(f, "invalid input: {e}"),
            RunError::EndOfInput => write!(f, "the program needs more input than was provided"),
            RunError::MachineError(e) => Display::fmt(e, f),
        }
    }
}

impl From<MachineError> for RunError {
    fn from(e: MachineError) -> Self {
        Self::MachineError(e)
    }
}

impl From<ParseProgramError> for RunError {
    fn from(e: ParseProgramError) -> Self {
        Self::InvalidInput(e)
    }
}
