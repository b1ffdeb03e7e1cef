// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 5 built using the `intcode` library.

use intcode::prelude::*;
use intcode::program::parse_program;
use std::error::Error;

/// Run the diagnostic program for the system with the given ID. Every output but the last is a
/// test result, which must be 0.
fn diagnostic(program: &[i64], system_id: i64) -> Result<i64, Box<dyn Error>> {
    let mut machine = Machine::new(program.iter().copied());
    let (mut outputs, Stop::Halted) = machine.run_with_inputs([system_id])? else {
        return Err("diagnostic program wanted more than one input".into());
    };
    let code = outputs.pop().ok_or("diagnostic program produced no output")?;
    if let Some(failed) = outputs.iter().position(|&i| i != 0) {
        return Err(format!("diagnostic test {failed} failed").into());
    }
    Ok(code)
}

fn main() -> Result<(), Box<dyn Error>> {
    use std::env::args_os;
    use std::fs::read_to_string;
    let input = read_to_string(args_os().nth(1).ok_or("missing file name")?)?;
    let program = parse_program(&input)?;

    println!("part 1: {}", diagnostic(&program, 1)?);
    println!("part 2: {}", diagnostic(&program, 5)?);
    Ok(())
}
