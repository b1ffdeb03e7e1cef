// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Opt-in record of executed instructions
//!
//! See [`Machine::start_trace`]
use std::fmt::{self, Display};

use super::{Instruction, Machine, OpCode, ParamMode};

/// A parameter as it was encoded, paired with what it resolved to
///
/// For a destination, the resolved value is the value that was stored.
type Resolved = (i64, i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TracedOp {
    Add(Resolved, Resolved, Resolved),
    Mul(Resolved, Resolved, Resolved),
    In(Resolved),
    Out(Resolved),
    Jnz(Resolved, Resolved),
    Jz(Resolved, Resolved),
    Lt(Resolved, Resolved, Resolved),
    Eq(Resolved, Resolved, Resolved),
    Rbo(Resolved),
    Halt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Information about an instruction that was executed, which can be queried with its various
/// methods, or converted into a [String] using its [Display] impl.
pub struct TracedInstr {
    op: TracedOp,
    op_int: i64,
    instr_ptr: i64,
    rel_base: i64,
    instr: Instruction,
}

impl TracedInstr {
    /// Return the relative base at the time the traced instruction was executed
    #[must_use]
    pub fn rel_base(&self) -> i64 {
        self.rel_base
    }

    /// Return the instruction pointer's position when the traced instruction was executed
    #[must_use]
    pub fn instr_ptr(&self) -> i64 {
        self.instr_ptr
    }

    /// Return the actual integer of the traced instruction
    #[must_use]
    pub fn op_int(&self) -> i64 {
        self.op_int
    }

    /// Return the opcode of the traced instruction
    #[must_use]
    pub fn op_code(&self) -> OpCode {
        self.instr.opcode
    }

    /// If the instruction stored a value, return that value
    #[must_use]
    pub fn stored_val(&self) -> Option<i64> {
        match self.op {
            TracedOp::Add(_, _, (_, v))
            | TracedOp::Mul(_, _, (_, v))
            | TracedOp::Lt(_, _, (_, v))
            | TracedOp::Eq(_, _, (_, v))
            | TracedOp::In((_, v)) => Some(v),
            _ => None,
        }
    }

    /// Return the parameter modes of the traced instruction, with [`None`] for parameters it
    /// doesn't take
    #[must_use]
    pub fn param_modes(&self) -> [Option<ParamMode>; 3] {
        self.instr.modes
    }

    fn build(
        instr: Instruction,
        instr_ptr: i64,
        rel_base: i64,
        resolved: &[Resolved],
    ) -> Self {
        debug_assert_eq!(resolved.len(), instr.opcode.param_count());
        let p = |n: usize| resolved.get(n).copied().unwrap_or_default();
        let op = match instr.opcode {
            OpCode::Add => TracedOp::Add(p(0), p(1), p(2)),
            OpCode::Mul => TracedOp::Mul(p(0), p(1), p(2)),
            OpCode::In => TracedOp::In(p(0)),
            OpCode::Out => TracedOp::Out(p(0)),
            OpCode::Jnz => TracedOp::Jnz(p(0), p(1)),
            OpCode::Jz => TracedOp::Jz(p(0), p(1)),
            OpCode::Lt => TracedOp::Lt(p(0), p(1), p(2)),
            OpCode::Eq => TracedOp::Eq(p(0), p(1), p(2)),
            OpCode::Rbo => TracedOp::Rbo(p(0)),
            OpCode::Halt => TracedOp::Halt,
        };
        Self {
            op,
            op_int: instr.word,
            instr_ptr,
            rel_base,
            instr,
        }
    }
}

impl Machine {
    /// Begin a [Trace] of executed instructions. If a trace is already running, this replaces that
    /// trace and returns it in a [`Some`], otherwise, it returns [`None`].
    ///
    /// # Example
    /// ```
    /// # use intcode::prelude::*;
    /// let mut machine = Machine::new([1101, 90, 9, 4]);
    /// assert!(machine.start_trace().is_none());
    /// assert_eq!(machine.run_until_suspend(), Event::Halted);
    ///
    /// let trace = machine.end_trace().unwrap();
    /// assert_eq!(trace.0.len(), 2);
    /// assert_eq!(trace.0[0].stored_val(), Some(99));
    /// ```
    pub fn start_trace(&mut self) -> Option<Trace> {
        self.trace.replace(Trace::new())
    }

    /// Stop tracing executed instructions into a [Trace]. If no trace was active, returns [`None`]
    ///
    /// see [`Machine::start_trace`]
    pub fn end_trace(&mut self) -> Option<Trace> {
        self.trace.take()
    }

    /// Get a view of the current trace
    #[must_use]
    pub fn show_trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// Add the current instruction to the trace, if one is running. Must be called after the
    /// instruction can no longer fail, but before it moves `ip` or changes the relative base.
    pub(crate) fn record(&mut self, instr: Instruction, resolved: &[Resolved]) {
        if let Some(trace) = self.trace.as_mut() {
            trace.0.push(TracedInstr::build(
                instr,
                self.ip,
                self.rel_base,
                resolved,
            ));
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// A log of instructions that a [Machine] has executed since a call to
/// [`Machine::start_trace`]
pub struct Trace(pub Vec<TracedInstr>);

impl Trace {
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }
}

impl IntoIterator for Trace {
    type Item = TracedInstr;
    type IntoIter = std::vec::IntoIter<TracedInstr>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for TracedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ran instruction at {:0>4}: op int {: <5} | ",
            self.instr_ptr, self.op_int
        )?;
        let mode = |n: usize| self.instr.modes[n].map_or(String::new(), |m| m.to_string());
        let opcode = self.instr.opcode;

        match self.op {
            TracedOp::Add((pa, va), (pb, vb), (dest, val))
            | TracedOp::Mul((pa, va), (pb, vb), (dest, val))
            | TracedOp::Lt((pa, va), (pb, vb), (dest, val))
            | TracedOp::Eq((pa, va), (pb, vb), (dest, val)) => {
                write!(
                    f,
                    "[{opcode} {}{pa} (resolves to {va}), {}{pb} (resolves to {vb}), {}{dest} (stored {val})]",
                    mode(0),
                    mode(1),
                    mode(2),
                )
            }
            TracedOp::Jnz((p_cond, v_cond), (p_dest, v_dest))
            | TracedOp::Jz((p_cond, v_cond), (p_dest, v_dest)) => {
                let jumped = (v_cond != 0) == (opcode == OpCode::Jnz);
                write!(
                    f,
                    "[{opcode} {}{p_cond} (resolves to {v_cond}), {}{p_dest} ({} to {v_dest})]",
                    mode(0),
                    mode(1),
                    if jumped { "jumped" } else { "didn't jump" }
                )
            }
            TracedOp::In((p, v)) => write!(f, "[{opcode} {}{p} (stored {v})]", mode(0)),
            TracedOp::Out((p, v)) => write!(f, "[{opcode} {}{p} (resolves to {v})]", mode(0)),
            TracedOp::Rbo((p, v)) => write!(
                f,
                "[{opcode} {}{p} (resolved to {v}) (went from {} to {})]",
                mode(0),
                self.rel_base,
                self.rel_base.saturating_add(v),
            ),
            TracedOp::Halt => write!(f, "[{opcode}]"),
        }
    }
}
