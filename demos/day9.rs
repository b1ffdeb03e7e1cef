// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 9 built using the `intcode` library.

use intcode::prelude::*;
use intcode::program::parse_program;
use std::error::Error;

/// The BOOST program outputs a single keycode, unless one of its self-tests failed, in which case
/// it outputs the failing opcodes instead.
fn boost(program: &[i64], mode: i64) -> Result<i64, Box<dyn Error>> {
    let mut machine = Machine::new(program.iter().copied());
    let (output, stop) = machine.run_with_inputs([mode])?;
    if stop != Stop::Halted {
        return Err("BOOST wanted more input".into());
    }
    match output[..] {
        [keycode] => Ok(keycode),
        _ => Err(format!("BOOST reported malfunctioning opcodes: {output:?}").into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    use std::env::args_os;
    use std::fs::read_to_string;
    let input = read_to_string(args_os().nth(1).ok_or("missing file name")?)?;
    let program = parse_program(&input)?;

    println!("part 1: {}", boost(&program, 1)?);
    println!("part 2: {}", boost(&program, 2)?);
    Ok(())
}
