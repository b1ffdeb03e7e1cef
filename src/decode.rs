// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Opcode word decoding

use std::fmt::{self, Display};

use crate::MachineError;

/// An Intcode `OpCode`
///
/// The discriminant of each variant is the two-digit number that selects it.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[allow(missing_docs, reason = "trivial")]
pub enum OpCode {
    Add = 1,
    Mul = 2,
    In = 3,
    Out = 4,
    Jnz = 5,
    Jz = 6,
    Lt = 7,
    Eq = 8,
    Rbo = 9,
    Halt = 99,
}

impl OpCode {
    /// The number of parameters that follow the opcode word in memory
    #[must_use]
    pub const fn param_count(self) -> usize {
        match self {
            Self::Add | Self::Mul | Self::Lt | Self::Eq => 3,
            Self::Jnz | Self::Jz => 2,
            Self::In | Self::Out | Self::Rbo => 1,
            Self::Halt => 0,
        }
    }

    /// Whether the `n`th parameter (0-indexed) is a destination that gets written to
    #[must_use]
    pub const fn writes_param(self, n: usize) -> bool {
        match self {
            Self::Add | Self::Mul | Self::Lt | Self::Eq => n == 2,
            Self::In => n == 0,
            _ => false,
        }
    }
}

impl TryFrom<i64> for OpCode {
    type Error = i64;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            1 => Ok(Self::Add),
            2 => Ok(Self::Mul),
            3 => Ok(Self::In),
            4 => Ok(Self::Out),
            5 => Ok(Self::Jnz),
            6 => Ok(Self::Jz),
            7 => Ok(Self::Lt),
            8 => Ok(Self::Eq),
            9 => Ok(Self::Rbo),
            99 => Ok(Self::Halt),
            _ => Err(i),
        }
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Mul => write!(f, "MUL"),
            Self::In => write!(f, "IN"),
            Self::Out => write!(f, "OUT"),
            Self::Jnz => write!(f, "JNZ"),
            Self::Jz => write!(f, "JZ"),
            Self::Lt => write!(f, "LT"),
            Self::Eq => write!(f, "EQ"),
            Self::Rbo => write!(f, "RBO"),
            Self::Halt => write!(f, "HALT"),
        }
    }
}

/// Parameter mode for Intcode instruction
///
/// Intcode instruction parameters each have a mode:  [positional], [immediate], or [relative].
///
/// When executing an intcode instruction, the instruction's parameters are interpreted in
/// accordance with their associated modes.
///
/// [positional]: ParamMode::Positional
/// [immediate]: ParamMode::Immediate
/// [relative]: ParamMode::Relative
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum ParamMode {
    /// Positional Mode
    ///
    /// A parameter in positional mode evaluates to the value at the address specified by the
    /// parameter.
    Positional = 0,
    /// Immediate Mode
    ///
    /// A parameter in immediate mode evaluates directly to the value specified. Instructions which
    /// write to memory may not use immediate mode for their destinations.
    #[doc(alias = "#")]
    Immediate = 1,
    /// Relative Mode
    ///
    /// A parameter in relative mode evaluates to the value at the address specified by the
    /// parameter added to the relative base, which starts out as `0` and is changed with `RBO`.
    #[doc(alias = "@")]
    Relative = 2,
}

impl TryFrom<i64> for ParamMode {
    type Error = i64;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            0 => Ok(Self::Positional),
            1 => Ok(Self::Immediate),
            2 => Ok(Self::Relative),
            _ => Err(i),
        }
    }
}

impl Display for ParamMode {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamMode::Positional => Ok(()),
            ParamMode::Immediate => write!(fmt, "#"),
            ParamMode::Relative => write!(fmt, "@"),
        }
    }
}

/// A decoded opcode word
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Instruction {
    /// The opcode word exactly as it was read from memory
    pub word: i64,
    /// The selected operation
    pub opcode: OpCode,
    /// Modes for the parameters the operation actually takes. Unused slots are [`None`].
    pub modes: [Option<ParamMode>; 3],
}

impl Instruction {
    /// Decode an opcode word
    ///
    /// Given a 5 digit number, digits ABCDE are used as follows:
    /// DE is the two-digit opcode, C is the 1st parameter's mode, B is the 2nd parameter's mode,
    /// and A is the 3rd parameter's mode. Digits above the ten thousands place are ignored, as are
    /// mode digits for parameters the opcode doesn't take.
    ///
    /// So `1202` decodes as `MUL` with the 1st parameter in relative mode, the 2nd in immediate
    /// mode, and the 3rd in positional mode.
    ///
    /// # Errors
    ///
    /// | Condition                                     | Error type                  |
    /// |-----------------------------------------------|-----------------------------|
    /// | word is negative, or DE is not a known opcode | [`UnknownOpcode`]           |
    /// | mode digit for a used parameter is not 0-2    | [`InvalidAddressingMode`]   |
    /// | a destination parameter is in immediate mode  | [`InvalidAddressingMode`]   |
    ///
    /// [`UnknownOpcode`]: MachineError::UnknownOpcode
    /// [`InvalidAddressingMode`]: MachineError::InvalidAddressingMode
    pub fn decode(word: i64) -> Result<Self, MachineError> {
        if word < 0 {
            return Err(MachineError::UnknownOpcode(word));
        }
        let raw = word;
        let word = word % 100_000;
        let opcode = OpCode::try_from(word % 100).map_err(MachineError::UnknownOpcode)?;

        let mut modes = [None; 3];
        let mut digits = word / 100;
        for (n, slot) in modes.iter_mut().enumerate().take(opcode.param_count()) {
            let mode = ParamMode::try_from(digits % 10)
                .map_err(|digit| MachineError::InvalidAddressingMode { word, digit })?;
            if mode == ParamMode::Immediate && opcode.writes_param(n) {
                return Err(MachineError::InvalidAddressingMode { word, digit: 1 });
            }
            *slot = Some(mode);
            digits /= 10;
        }

        Ok(Self {
            word: raw,
            opcode,
            modes,
        })
    }

    /// The number of ints the instruction occupies, including the opcode word
    #[must_use]
    pub const fn width(&self) -> i64 {
        #[allow(clippy::cast_possible_wrap, reason = "param_count is at most 3")]
        let params = self.opcode.param_count() as i64;
        1 + params
    }

    /// The mode of the `n`th parameter (0-indexed)
    ///
    /// # Panics
    ///
    /// Panics if the instruction's opcode does not take an `n`th parameter
    #[must_use]
    pub fn mode(&self, n: usize) -> ParamMode {
        self.modes[n].expect("parameter index checked against param_count")
    }
}
