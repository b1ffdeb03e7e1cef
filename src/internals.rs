// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use super::*;

impl Machine {
    /// The raw int of the `n`th parameter (0-indexed) of the current instruction
    fn raw_param(&self, n: usize) -> Result<i64, AddressError> {
        #[allow(clippy::cast_possible_wrap, reason = "n is at most 2")]
        let offset = 1 + n as i64;
        self.memory.read(self.ip.saturating_add(offset))
    }

    /// Resolve the `n`th parameter of `instr` into a concrete value using the method appropriate
    /// for its mode. Returns the raw int alongside the resolved value.
    pub(crate) fn resolve_param(
        &self,
        instr: Instruction,
        n: usize,
    ) -> Result<(i64, i64), AddressError> {
        let raw = self.raw_param(n)?;
        let value = Parameter::new(instr.mode(n), raw).value(&self.memory, self.rel_base)?;
        Ok((raw, value))
    }

    /// Resolve the `n`th parameter of `instr` into a destination address. Returns the raw int
    /// alongside the address.
    pub(crate) fn resolve_dest(
        &self,
        instr: Instruction,
        n: usize,
    ) -> Result<(i64, i64), MachineError> {
        let raw = self.raw_param(n)?;
        match Parameter::new(instr.mode(n), raw).address(self.rel_base)? {
            Some(address) => Ok((raw, address)),
            None => Err(MachineError::InvalidAddressingMode {
                word: instr.word % 100_000,
                digit: ParamMode::Immediate as i64,
            }),
        }
    }

    /// Move the instruction pointer past `instr`
    pub(crate) fn advance(&mut self, instr: Instruction) -> Result<(), MachineError> {
        self.ip = self
            .ip
            .checked_add(instr.width())
            .ok_or(MachineError::Overflow {
                ip: self.ip,
                opcode: instr.opcode,
            })?;
        Ok(())
    }

    /// common logic of all 4 instructions that take 3 parameters
    ///
    /// `operation` returns [`None`] on overflow
    pub(crate) fn op3(
        &mut self,
        instr: Instruction,
        operation: impl Fn(i64, i64) -> Option<i64>,
    ) -> Result<StepOutcome, MachineError> {
        let (raw_a, a) = self.resolve_param(instr, 0)?;
        let (raw_b, b) = self.resolve_param(instr, 1)?;
        let (raw_dest, dest) = self.resolve_dest(instr, 2)?;
        let val = operation(a, b).ok_or(MachineError::Overflow {
            ip: self.ip,
            opcode: instr.opcode,
        })?;
        self.memory.write(dest, val)?;
        self.record(instr, &[(raw_a, a), (raw_b, b), (raw_dest, val)]);
        self.advance(instr)?;
        Ok(StepOutcome::Running)
    }

    /// common logic of both conditional jumps
    pub(crate) fn jump(
        &mut self,
        instr: Instruction,
        func: impl Fn(i64) -> bool,
    ) -> Result<StepOutcome, MachineError> {
        let (raw_expr, expr) = self.resolve_param(instr, 0)?;
        let (raw_dest, dest) = self.resolve_param(instr, 1)?;
        let taken = func(expr);
        if taken && dest < 0 {
            return Err(AddressError(dest).into());
        }
        self.record(instr, &[(raw_expr, expr), (raw_dest, dest)]);
        if taken {
            self.ip = dest;
        } else {
            self.advance(instr)?;
        }
        Ok(StepOutcome::Running)
    }
}
