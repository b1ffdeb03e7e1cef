// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 2 built using the `intcode` library.

use intcode::prelude::*;
use intcode::program::parse_program;
use std::error::Error;

/// Patch in the noun and verb, run to completion, and report what ends up at address 0
fn run_patched(program: &[i64], noun: i64, verb: i64) -> Result<i64, MachineError> {
    let mut machine = Machine::new(program.iter().copied());
    machine.mem_override(1, noun)?;
    machine.mem_override(2, verb)?;
    let (output, stop) = machine.run_with_inputs(empty())?;
    assert_eq!(stop, Stop::Halted, "intcode did not run to completion");
    assert!(output.is_empty(), "intcode had unexpected output");
    Ok(machine.mem_get(0)?)
}

fn part1(program: &[i64]) -> Result<i64, MachineError> {
    run_patched(program, 12, 2)
}

fn part2(program: &[i64]) -> Result<Option<i64>, MachineError> {
    for noun in 0..=99 {
        for verb in 0..=99 {
            #[allow(clippy::unreadable_literal, reason = "from Advent of Code")]
            if run_patched(program, noun, verb)? == 19690720 {
                return Ok(Some(100 * noun + verb));
            }
        }
    }
    Ok(None)
}

fn main() -> Result<(), Box<dyn Error>> {
    use std::env::args_os;
    use std::fs::read_to_string;
    let input = read_to_string(args_os().nth(1).ok_or("missing file name")?)?;
    let program = parse_program(&input)?;

    println!("part 1: {}", part1(&program)?);
    match part2(&program)? {
        Some(answer) => println!("part 2: {answer}"),
        None => println!("part 2: no noun and verb produce 19690720"),
    }
    Ok(())
}
