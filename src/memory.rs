// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Growable Intcode memory and parameter resolution
//!
//! [`Memory`] is a single contiguous buffer. Reads past the end see `0` without allocating,
//! writes past the end extend the buffer, zero-filling the gap.

use itertools::Itertools;
use std::error::Error;
use std::fmt::{self, Display};
use std::ops::{Index, Range};

use crate::ParamMode;

/// Attempted to access the contained memory address, which is negative or otherwise
/// unrepresentable as an index
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct AddressError(pub i64);

impl Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not convert {} to a memory address", self.0)
    }
}

impl Error for AddressError {}

/// Try to turn an Intcode integer into an index into [`Memory`]
fn to_index(address: i64) -> Result<usize, AddressError> {
    usize::try_from(address).map_err(|_| AddressError(address))
}

/// The memory image of a single machine
#[derive(Clone, Default)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    /// Read the int at `address`, or `0` if it's beyond the current extent
    ///
    /// # Errors
    ///
    /// If `address` is negative, returns an [`AddressError`] containing it.
    #[doc(alias = "peek")]
    pub fn read(&self, address: i64) -> Result<i64, AddressError> {
        let index = to_index(address)?;
        Ok(self.cells.get(index).copied().unwrap_or_default())
    }

    /// Store `value` at `address`, growing memory if needed
    ///
    /// # Errors
    ///
    /// If `address` is negative, or memory can't grow far enough to reach it, returns an
    /// [`AddressError`] containing it. Memory is unchanged on error.
    #[doc(alias("poke", "store"))]
    pub fn write(&mut self, address: i64, value: i64) -> Result<(), AddressError> {
        let index = to_index(address)?;
        if index >= self.cells.len() {
            self.cells
                .try_reserve(index - self.cells.len() + 1)
                .map_err(|_| AddressError(address))?;
            self.cells.resize(index + 1, 0);
        }
        self.cells[index] = value;
        Ok(())
    }

    /// The number of ints currently backed by storage
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing at all is backed by storage
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// View the stored ints
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// Copy out a range of memory, filling in `0` for anything past the current extent
    ///
    /// # Errors
    ///
    /// If the range starts at a negative address, returns an [`AddressError`] containing it.
    pub fn get_range(&self, range: Range<i64>) -> Result<Vec<i64>, AddressError> {
        let start = to_index(range.start)?;
        let end = to_index(range.end.max(range.start))?;
        Ok((start..end)
            .map(|i| self.cells.get(i).copied().unwrap_or_default())
            .collect())
    }

    /// The stored ints with any trailing zeroes stripped off
    fn significant(&self) -> &[i64] {
        let end = self
            .cells
            .iter()
            .rposition(|&i| i != 0)
            .map_or(0, |i| i + 1);
        &self.cells[..end]
    }
}

impl PartialEq for Memory {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Memory {}

impl FromIterator<i64> for Memory {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<i64>> for Memory {
    fn from(cells: Vec<i64>) -> Self {
        Self { cells }
    }
}

impl From<Memory> for Vec<i64> {
    fn from(mem: Memory) -> Self {
        mem.cells
    }
}

impl Index<usize> for Memory {
    type Output = i64;
    fn index(&self, i: usize) -> &i64 {
        self.cells.get(i).unwrap_or(&0)
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let significant = self.significant();
        write!(
            fmt,
            "Memory({} of {} ints) [{}]",
            significant.len(),
            self.cells.len(),
            significant.iter().join(",")
        )
    }
}

/// A decoded instruction parameter
///
/// The contained int is the raw value read from the word following the opcode.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Parameter {
    /// The raw int is an address
    Position(i64),
    /// The raw int is the value
    Immediate(i64),
    /// The raw int is an offset from the relative base
    Relative(i64),
}

impl Parameter {
    /// Pair a raw int with the mode it was encoded with
    #[must_use]
    pub const fn new(mode: ParamMode, raw: i64) -> Self {
        match mode {
            ParamMode::Positional => Self::Position(raw),
            ParamMode::Immediate => Self::Immediate(raw),
            ParamMode::Relative => Self::Relative(raw),
        }
    }

    /// The int as it appears in memory, before resolution
    #[must_use]
    pub const fn raw(self) -> i64 {
        match self {
            Self::Position(i) | Self::Immediate(i) | Self::Relative(i) => i,
        }
    }

    /// The mode the parameter was encoded with
    #[must_use]
    pub const fn mode(self) -> ParamMode {
        match self {
            Self::Position(_) => ParamMode::Positional,
            Self::Immediate(_) => ParamMode::Immediate,
            Self::Relative(_) => ParamMode::Relative,
        }
    }

    /// Resolve the parameter as a source operand
    ///
    /// # Errors
    ///
    /// Returns an [`AddressError`] if the parameter refers to a negative address, or if adding the
    /// relative base overflows.
    pub fn value(self, mem: &Memory, rel_base: i64) -> Result<i64, AddressError> {
        match self {
            Self::Immediate(i) => Ok(i),
            Self::Position(i) => mem.read(i),
            Self::Relative(i) => mem.read(relative(i, rel_base)?),
        }
    }

    /// Resolve the parameter as a destination address
    ///
    /// Returns [`None`] for [`Parameter::Immediate`], which is never a valid destination.
    ///
    /// # Errors
    ///
    /// Returns an [`AddressError`] if the parameter refers to a negative address, or if adding the
    /// relative base overflows.
    pub fn address(self, rel_base: i64) -> Result<Option<i64>, AddressError> {
        let address = match self {
            Self::Immediate(_) => return Ok(None),
            Self::Position(i) => i,
            Self::Relative(i) => relative(i, rel_base)?,
        };
        to_index(address)?;
        Ok(Some(address))
    }
}

fn relative(offset: i64, rel_base: i64) -> Result<i64, AddressError> {
    offset
        .checked_add(rel_base)
        .ok_or(AddressError(if rel_base < 0 { i64::MIN } else { i64::MAX }))
}

impl Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(i) => write!(f, "{i}"),
            Self::Immediate(i) => write!(f, "#{i}"),
            Self::Relative(i) => write!(f, "@{i}"),
        }
    }
}
