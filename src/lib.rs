// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD
#![warn(missing_docs)]

//! A resumable Intcode virtual machine
//!
//! [`Machine`] implements the complete instruction set and [parameter modes] of the Intcode
//! computer from [Day 9] of Advent of Code 2019. It never blocks and never runs on its own; a
//! driver calls [`Machine::run_until_suspend`], which executes instructions until the program
//! needs input, produces output, halts, or faults, and reports which with an [`Event`].
//!
//! # Example
//!
//! ```rust
//! use intcode::prelude::*;
//! // echo a single input back out
//! let mut machine = Machine::new([3, 0, 4, 0, 99]);
//!
//! assert_eq!(machine.run_until_suspend(), Event::NeedsInput);
//! machine.provide_input(7).unwrap();
//! assert_eq!(machine.run_until_suspend(), Event::Output(7));
//! assert_eq!(machine.run_until_suspend(), Event::Halted);
//! ```
//!
//! For the common case of feeding a known list of inputs, [`Machine::run_with_inputs`] does the
//! event loop for you:
//!
//! ```rust
//! use intcode::prelude::*;
//! let mut machine = Machine::new([104, 1024, 99]);
//! assert_eq!(machine.run_with_inputs(empty()).unwrap(), (vec![1024], Stop::Halted));
//! ```
//!
//! Chaining several machines, each feeding the next, is handled by the [`pipeline`] module.
//!
//! [parameter modes]: ParamMode
//! [Day 9]: https://adventofcode.com/2019/day/9

/// Execution helpers shared by several opcodes
mod internals;

mod decode;
pub mod memory;
pub mod pipeline;
pub mod program;
pub mod trace;

pub use decode::{Instruction, OpCode, ParamMode};
pub use memory::{AddressError, Memory, Parameter};

use log::{debug, trace, warn};
use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::ops::{Index, Range};

/// A small module that re-exports items useful when working with the machine
pub mod prelude {
    pub use crate::{Event, Machine, MachineError, ProtocolError, RunState, StepOutcome, Stop};
    pub use std::iter::empty;
}

/// Where a [`Machine`] is in its lifecycle
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RunState {
    /// Constructed, but no instruction has been executed yet
    Ready,
    /// Between instructions, with nothing holding it up
    Running,
    /// Stopped at an `IN` instruction until [`Machine::provide_input`] is called
    AwaitingInput,
    /// Stopped just after an `OUT` instruction, whose value was reported in an [`Event::Output`]
    HasOutput,
    /// A `HALT` instruction was executed. Terminal.
    Halted,
    /// An instruction failed. Terminal.
    Faulted,
}

impl RunState {
    /// Whether no more instructions will ever be executed
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Halted | Self::Faulted)
    }
}

/// The reason [`Machine::run_until_suspend`] returned control to its caller
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Event {
    /// The program is at an `IN` instruction and needs a value through [`Machine::provide_input`]
    NeedsInput,
    /// The program output the contained value
    Output(i64),
    /// The program executed a `HALT` instruction
    Halted,
    /// Something went wrong. Unless it's a [`MachineError::Protocol`] error, the machine is now
    /// [faulted](RunState::Faulted).
    Fault(MachineError),
}

/// The outcome when a [`Machine`] executes a single instruction
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum StepOutcome {
    /// The instruction ran, and the next one can run right away
    Running,
    /// The machine suspended, with the [`Event`] representing why
    Suspended(Event),
}

/// Why [`Machine::run_with_inputs`] stopped
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Stop {
    /// The program needs more input than was provided
    AwaitingInput,
    /// The program halted
    Halted,
}

/// A caller misused the suspend/resume interface
///
/// These are never fatal to the machine; it stays in whatever state it was in.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProtocolError {
    /// Input was provided, but the machine isn't waiting for any
    InputNotRequested,
    /// The machine was resumed after halting
    MachineHalted,
    /// The machine was resumed after faulting
    MachineFaulted,
}

impl Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputNotRequested => write!(f, "input provided when none was requested"),
            Self::MachineHalted => write!(f, "tried to resume a halted machine"),
            Self::MachineFaulted => write!(f, "tried to resume a machine after a fatal error"),
        }
    }
}

impl Error for ProtocolError {}

/// An error occurred when executing an Intcode instruction, or when driving the [`Machine`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum MachineError {
    /// A parameter or jump resolved to a negative memory address, or a write went further than
    /// memory can grow
    Address(AddressError),
    /// A mode digit was not one of 0, 1, or 2, or a destination parameter was in immediate mode.
    InvalidAddressingMode {
        /// the opcode word, with digits above the ten thousands place stripped
        word: i64,
        /// the offending mode digit
        digit: i64,
    },
    /// The opcode word didn't select a known operation
    UnknownOpcode(i64),
    /// An arithmetic result didn't fit in an [`i64`]
    Overflow {
        /// address of the instruction that overflowed
        ip: i64,
        /// the operation that overflowed
        opcode: OpCode,
    },
    /// The caller violated the suspend/resume protocol
    Protocol(ProtocolError),
}

impl MachineError {
    /// Whether the error left the [`Machine`] [faulted](RunState::Faulted)
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Protocol(_))
    }
}

impl Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(err) => Display::fmt(err, f),
            Self::InvalidAddressingMode { word, digit: 1 } => {
                write!(f, "instruction {word} tried to write to an immediate parameter")
            }
            Self::InvalidAddressingMode { word, digit } => {
                write!(f, "instruction {word} has unknown parameter mode {digit}")
            }
            Self::UnknownOpcode(n) => write!(f, "encountered unrecognized opcode {n}"),
            Self::Overflow { ip, opcode } => {
                write!(f, "{opcode} at address {ip} overflowed")
            }
            Self::Protocol(err) => Display::fmt(err, f),
        }
    }
}

impl Error for MachineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Address(err) => Some(err),
            Self::Protocol(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AddressError> for MachineError {
    fn from(err: AddressError) -> Self {
        Self::Address(err)
    }
}

impl From<ProtocolError> for MachineError {
    fn from(err: ProtocolError) -> Self {
        Self::Protocol(err)
    }
}

#[derive(Clone)]
/// An Intcode machine, which provides optional tracing of executed instructions.
pub struct Machine {
    ip: i64,
    rel_base: i64,
    memory: Memory,
    state: RunState,
    pending_input: Option<i64>,
    trace: Option<trace::Trace>,
}

// ignore the trace
impl PartialEq for Machine {
    fn eq(&self, other: &Self) -> bool {
        self.ip == other.ip
            && self.rel_base == other.rel_base
            && self.state == other.state
            && self.pending_input == other.pending_input
            && self.memory == other.memory
    }
}

impl Debug for Machine {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Machine")
            .field("memory", &self.memory)
            .field("rbo", &self.rel_base)
            .field("ip", &self.ip)
            .field("state", &self.state)
            .field("pending_input", &self.pending_input)
            .field("tracing", &self.trace.is_some())
            .finish()
    }
}

impl Index<i64> for Machine {
    type Output = i64;

    fn index(&self, i: i64) -> &Self::Output {
        let i = usize::try_from(i).expect("intcode memory cannot be at a negative index");
        &self.memory[i]
    }
}

impl Machine {
    /// Create a new machine. Collects `program` into the starting memory image.
    pub fn new(program: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ip: 0,
            rel_base: 0,
            memory: program.into_iter().collect(),
            state: RunState::Ready,
            pending_input: None,
            trace: None,
        }
    }

    /// The current [`RunState`]
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// The address of the next opcode word to decode
    #[must_use]
    pub const fn ip(&self) -> i64 {
        self.ip
    }

    /// The offset added to relative-mode parameters
    #[must_use]
    pub const fn relative_base(&self) -> i64 {
        self.rel_base
    }

    /// View the machine's memory
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Consume the machine, returning its memory
    #[must_use]
    pub fn into_memory(self) -> Memory {
        self.memory
    }

    /// Get the memory at `address`.
    ///
    /// # Errors
    ///
    /// if `address` is negative, returns an [`AddressError`]
    #[doc(alias = "peek")]
    pub fn mem_get(&self, address: i64) -> Result<i64, AddressError> {
        self.memory.read(address)
    }

    /// Manually set a memory location to a provided value
    ///
    /// # Errors
    ///
    /// if `address` is negative, returns an [`AddressError`]
    #[doc(alias("poke", "write"))]
    pub fn mem_override(&mut self, address: i64, value: i64) -> Result<(), AddressError> {
        self.memory.write(address, value)
    }

    /// Get a range of memory addresses, with `0` for anything never written
    ///
    /// # Errors
    ///
    /// If the range starts with a negative index, returns an [`AddressError`] containing that
    /// index.
    pub fn get_range(&self, range: Range<i64>) -> Result<Vec<i64>, AddressError> {
        self.memory.get_range(range)
    }

    /// Supply the value requested by the most recent [`Event::NeedsInput`]
    ///
    /// The value is stored when the machine is next resumed.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InputNotRequested`] unless the machine is
    /// [awaiting input](RunState::AwaitingInput), which also means a 2nd call before resuming
    /// fails. The machine's state is not changed on error.
    pub fn provide_input(&mut self, value: i64) -> Result<(), ProtocolError> {
        if self.state != RunState::AwaitingInput {
            warn!("input {value} provided in state {:?}", self.state);
            return Err(ProtocolError::InputNotRequested);
        }
        debug!("received input {value} at ip {}", self.ip);
        self.pending_input = Some(value);
        self.state = RunState::Running;
        Ok(())
    }

    /// Execute instructions until the machine suspends
    ///
    /// Calling this again while the machine is [awaiting input](RunState::AwaitingInput) returns
    /// [`Event::NeedsInput`] again without executing anything.
    ///
    /// Resuming a [halted](RunState::Halted) or [faulted](RunState::Faulted) machine returns a
    /// [`Event::Fault`] with the appropriate [`ProtocolError`], and changes nothing.
    pub fn run_until_suspend(&mut self) -> Event {
        loop {
            match self.step() {
                Ok(StepOutcome::Running) => (),
                Ok(StepOutcome::Suspended(event)) => break event,
                Err(err) => break Event::Fault(err),
            }
        }
    }

    /// Run a single instruction
    ///
    /// On an error, returns an [Err] containing the appropriate [`MachineError`]
    /// Otherwise, returns an [Ok] containing the [`StepOutcome`]
    ///
    /// # Example
    ///
    /// ```
    /// use intcode::prelude::*;
    /// let mut machine = Machine::new([1101, 90, 9, 8, 3, 7, 4, -1]);
    ///
    /// // the first instruction is `ADD #90, #9, 8`
    /// assert_eq!(machine.step(), Ok(StepOutcome::Running));
    /// // the second instruction is `IN 7`, but no input was provided.
    /// assert_eq!(machine.step(), Ok(StepOutcome::Suspended(Event::NeedsInput)));
    /// machine.provide_input(8).unwrap();
    /// assert_eq!(machine.step(), Ok(StepOutcome::Running));
    ///
    /// // the third instruction was originally OUT -1, but the address was overwritten by the
    /// // previous instruction, so it will now read from address 8, where the 1st instruction
    /// // inserted 99.
    /// assert_eq!(machine.step(), Ok(StepOutcome::Suspended(Event::Output(99))));
    ///
    /// // finally, the halt instruction
    /// assert_eq!(machine.step(), Ok(StepOutcome::Suspended(Event::Halted)));
    /// ```
    ///
    /// # Errors
    ///
    /// If the machine has already halted or faulted, returns the matching
    /// [`MachineError::Protocol`] error before attempting to do anything.
    ///
    /// Otherwise, if any of the following conditions occur, it marks itself as faulted and
    /// returns the listed [`MachineError`] variant:
    ///
    /// | Condition                                           | Error type                |
    /// |-----------------------------------------------------|---------------------------|
    /// | Opcode is unrecognized                              | [`UnknownOpcode`]         |
    /// | Mode digit is unrecognized                          | [`InvalidAddressingMode`] |
    /// | Add, Mul, In, Lt, or Eq output is in immediate mode | [`InvalidAddressingMode`] |
    /// | Instruction accesses a negative address             | [`Address`]               |
    /// | Jump instruction would jump to a negative address   | [`Address`]               |
    /// | Add, Mul, or Rbo overflows an `i64`                 | [`Overflow`]              |
    ///
    /// [`UnknownOpcode`]: MachineError::UnknownOpcode
    /// [`InvalidAddressingMode`]: MachineError::InvalidAddressingMode
    /// [`Address`]: MachineError::Address
    /// [`Overflow`]: MachineError::Overflow
    #[doc(alias("exec_instruction", "run"))]
    pub fn step(&mut self) -> Result<StepOutcome, MachineError> {
        match self.state {
            RunState::Halted => return Err(ProtocolError::MachineHalted.into()),
            RunState::Faulted => return Err(ProtocolError::MachineFaulted.into()),
            RunState::AwaitingInput => return Ok(StepOutcome::Suspended(Event::NeedsInput)),
            RunState::Ready | RunState::Running | RunState::HasOutput => (),
        }
        self.state = RunState::Running;

        let outcome = self.exec_instruction();
        if let Err(err) = &outcome {
            warn!("machine faulted at ip {}: {err}", self.ip);
            self.state = RunState::Faulted;
        }
        outcome
    }

    fn exec_instruction(&mut self) -> Result<StepOutcome, MachineError> {
        let word = self.memory.read(self.ip)?;
        let instr = Instruction::decode(word)?;
        trace!(
            "ip: {:>8} | rbo: {:>5} | {word:05} [{}]",
            self.ip, self.rel_base, instr.opcode
        );

        match instr.opcode {
            OpCode::Add => self.op3(instr, i64::checked_add),
            OpCode::Mul => self.op3(instr, i64::checked_mul),
            OpCode::Lt => self.op3(instr, |a, b| Some(i64::from(a < b))),
            OpCode::Eq => self.op3(instr, |a, b| Some(i64::from(a == b))),
            OpCode::In => {
                if self.pending_input.is_none() {
                    debug!("awaiting input at ip {}", self.ip);
                    self.state = RunState::AwaitingInput;
                    return Ok(StepOutcome::Suspended(Event::NeedsInput));
                }
                let (raw, dest) = self.resolve_dest(instr, 0)?;
                let input = self.pending_input.take().unwrap_or_default();
                self.memory.write(dest, input)?;
                self.record(instr, &[(raw, input)]);
                self.advance(instr)?;
                Ok(StepOutcome::Running)
            }
            OpCode::Out => {
                let (raw, value) = self.resolve_param(instr, 0)?;
                self.record(instr, &[(raw, value)]);
                self.advance(instr)?;
                debug!("output {value}");
                self.state = RunState::HasOutput;
                Ok(StepOutcome::Suspended(Event::Output(value)))
            }
            OpCode::Jnz => self.jump(instr, |i| i != 0),
            OpCode::Jz => self.jump(instr, |i| i == 0),
            OpCode::Rbo => {
                let (raw, offset) = self.resolve_param(instr, 0)?;
                let rel_base = self.rel_base.checked_add(offset).ok_or(MachineError::Overflow {
                    ip: self.ip,
                    opcode: OpCode::Rbo,
                })?;
                self.record(instr, &[(raw, offset)]);
                self.rel_base = rel_base;
                self.advance(instr)?;
                Ok(StepOutcome::Running)
            }
            OpCode::Halt => {
                self.record(instr, &[]);
                debug!("halted at ip {}", self.ip);
                self.state = RunState::Halted;
                Ok(StepOutcome::Suspended(Event::Halted))
            }
        }
    }

    /// Execute until either the program halts, or it needs input that `inputs` can't provide.
    /// Returns `Ok((v, s))`, where `v` is a [`Vec<i64>`] containing all outputs that it found, and
    /// `s` is the [`Stop`] reason.
    ///
    /// # Errors
    ///
    /// Any [`Event::Fault`] is returned as its [`MachineError`], and the outputs that preceded it
    /// are discarded.
    pub fn run_with_inputs(
        &mut self,
        inputs: impl IntoIterator<Item = i64>,
    ) -> Result<(Vec<i64>, Stop), MachineError> {
        let mut outputs = Vec::new();
        let mut inputs = inputs.into_iter();
        loop {
            match self.run_until_suspend() {
                Event::NeedsInput => match inputs.next() {
                    Some(i) => self.provide_input(i)?,
                    None => break Ok((outputs, Stop::AwaitingInput)),
                },
                Event::Output(i) => outputs.push(i),
                Event::Halted => break Ok((outputs, Stop::Halted)),
                Event::Fault(err) => break Err(err),
            }
        }
    }

    /// Lazily iterate over the program's outputs, feeding it values from `inputs` as it asks for
    /// them.
    ///
    /// The iterator ends when the program halts or `inputs` runs dry. A fault is yielded once as
    /// an [`Err`], after which the iterator ends.
    ///
    /// # Example
    ///
    /// ```
    /// use intcode::prelude::*;
    /// // outputs 1 more than each input until it sees 0
    /// let mut machine = Machine::new([3, 15, 1006, 15, 14, 101, 1, 15, 15, 4, 15, 1105, 1, 0, 99]);
    /// let incremented: Vec<i64> = machine
    ///     .outputs([1, 2, 3, 0])
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    /// assert_eq!(incremented, vec![2, 3, 4]);
    /// assert_eq!(machine.state(), RunState::Halted);
    /// ```
    pub fn outputs<I: IntoIterator<Item = i64>>(&mut self, inputs: I) -> Outputs<'_, I::IntoIter> {
        Outputs {
            machine: self,
            inputs: inputs.into_iter(),
            done: false,
        }
    }
}

/// Lazy output stream of a [`Machine`]
///
/// See [`Machine::outputs`]
pub struct Outputs<'a, I> {
    machine: &'a mut Machine,
    inputs: I,
    done: bool,
}

impl<I: Iterator<Item = i64>> Iterator for Outputs<'_, I> {
    type Item = Result<i64, MachineError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.machine.run_until_suspend() {
                Event::NeedsInput => match self.inputs.next() {
                    Some(i) => {
                        if let Err(err) = self.machine.provide_input(i) {
                            self.done = true;
                            return Some(Err(err.into()));
                        }
                    }
                    None => self.done = true,
                },
                Event::Output(i) => return Some(Ok(i)),
                Event::Halted => self.done = true,
                Event::Fault(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter::empty;

    /// Example program from day 9, which takes no input and outputs its own code
    #[test]
    fn quine() {
        let quine_code = vec![
            109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
        ];
        let mut machine = Machine::new(quine_code.clone());
        let (outputs, Stop::Halted) = machine.run_with_inputs(empty()).unwrap() else {
            panic!("Did not halt");
        };
        assert_eq!(quine_code, outputs);
    }

    #[test]
    fn lone_halt() {
        let mut machine = Machine::new([99]);
        assert_eq!(machine.state(), RunState::Ready);
        assert_eq!(machine.run_until_suspend(), Event::Halted);
        assert_eq!(machine.state(), RunState::Halted);
        assert_eq!(machine.memory(), &Memory::from(vec![99]));
        assert_eq!(machine.ip(), 0);
    }

    #[test]
    fn resuming_halted_machine() {
        let mut machine = Machine::new([99]);
        machine.run_until_suspend();
        let halted = machine.clone();
        assert_eq!(
            machine.run_until_suspend(),
            Event::Fault(MachineError::Protocol(ProtocolError::MachineHalted))
        );
        assert_eq!(machine, halted);
        assert_eq!(machine.provide_input(1), Err(ProtocolError::InputNotRequested));
        assert_eq!(machine.state(), RunState::Halted);
    }

    #[test]
    fn resuming_faulted_machine() {
        let mut machine = Machine::new([42]);
        assert_eq!(
            machine.run_until_suspend(),
            Event::Fault(MachineError::UnknownOpcode(42))
        );
        assert_eq!(machine.state(), RunState::Faulted);
        assert_eq!(
            machine.run_until_suspend(),
            Event::Fault(MachineError::Protocol(ProtocolError::MachineFaulted))
        );
        assert_eq!(machine.state(), RunState::Faulted);
    }

    /// Ensure that asking for input repeatedly without providing it changes nothing
    #[test]
    fn awaiting_input_is_idempotent() {
        let mut machine = Machine::new(vec![3, 10, 4, 10, 99]);
        assert_eq!(machine.run_until_suspend(), Event::NeedsInput);
        let waiting = machine.clone();
        for _ in 0..3 {
            assert_eq!(machine.run_until_suspend(), Event::NeedsInput);
            assert_eq!(machine, waiting);
        }
        assert_eq!(machine.ip(), 0);

        // make sure that the machine can still be used
        assert_eq!(machine.run_with_inputs([1]), Ok((vec![1], Stop::Halted)));
    }

    #[test]
    fn input_protocol_violations() {
        let mut machine = Machine::new([3, 0, 99]);
        assert_eq!(machine.provide_input(5), Err(ProtocolError::InputNotRequested));
        assert_eq!(machine.state(), RunState::Ready);

        assert_eq!(machine.run_until_suspend(), Event::NeedsInput);
        machine.provide_input(5).unwrap();
        assert_eq!(machine.provide_input(6), Err(ProtocolError::InputNotRequested));
        assert_eq!(machine.run_until_suspend(), Event::Halted);
        assert_eq!(machine[0], 5);
    }

    #[test]
    fn output_suspends_after_advancing() {
        let mut machine = Machine::new([104, 1, 104, 2, 99]);
        assert_eq!(machine.run_until_suspend(), Event::Output(1));
        assert_eq!(machine.state(), RunState::HasOutput);
        assert_eq!(machine.ip(), 2);
        assert_eq!(machine.run_until_suspend(), Event::Output(2));
        assert_eq!(machine.run_until_suspend(), Event::Halted);
    }

    #[test]
    fn write_to_immediate_faults() {
        let mut machine = Machine::new([11101, 1, 1, 0, 99]);
        assert_eq!(
            machine.run_until_suspend(),
            Event::Fault(MachineError::InvalidAddressingMode { word: 11101, digit: 1 })
        );
    }

    #[test]
    fn negative_access_faults() {
        // ADD -1, 0, 0
        let mut machine = Machine::new([1, -1, 0, 0, 99]);
        assert_eq!(
            machine.run_until_suspend(),
            Event::Fault(MachineError::Address(AddressError(-1)))
        );
        // JNZ #1, #-4
        let mut machine = Machine::new([1105, 1, -4]);
        assert_eq!(
            machine.run_until_suspend(),
            Event::Fault(MachineError::Address(AddressError(-4)))
        );
    }

    #[test]
    fn far_writes_fault() {
        // ADD #1, #1, 9223372036854775807
        let mut machine = Machine::new([1101, 1, 1, i64::MAX, 99]);
        assert_eq!(
            machine.run_until_suspend(),
            Event::Fault(MachineError::Address(AddressError(i64::MAX)))
        );
        assert_eq!(machine.state(), RunState::Faulted);
        assert_eq!(machine.memory().len(), 5);

        // RBO #2305843009213693952; IN @0
        let mut machine = Machine::new([109, 1 << 61, 203, 0, 99]);
        assert_eq!(machine.run_until_suspend(), Event::NeedsInput);
        machine.provide_input(1).unwrap();
        assert_eq!(
            machine.run_until_suspend(),
            Event::Fault(MachineError::Address(AddressError(1 << 61)))
        );
        assert_eq!(machine.state(), RunState::Faulted);
    }

    #[test]
    fn overflow_faults() {
        let mut machine = Machine::new([1102, i64::MAX, 2, 0, 99]);
        assert_eq!(
            machine.run_until_suspend(),
            Event::Fault(MachineError::Overflow { ip: 0, opcode: OpCode::Mul })
        );
        assert_eq!(machine.state(), RunState::Faulted);
        assert_eq!(machine[0], 1102);
    }

    #[test]
    fn lazy_outputs_stop_on_fault() {
        let mut machine = Machine::new([104, 5, 42]);
        let outputs: Vec<_> = machine.outputs(empty()).collect();
        assert_eq!(outputs, vec![Ok(5), Err(MachineError::UnknownOpcode(42))]);
    }
}
