// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 7 built using the `intcode` library.

use intcode::pipeline::{Wiring, max_signal};
use intcode::program::parse_program;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    use std::env::args_os;
    use std::fs::read_to_string;
    let input = read_to_string(args_os().nth(1).ok_or("missing file name")?)?;
    let program = parse_program(&input)?;

    let (signal, phases) = max_signal(&program, &[0, 1, 2, 3, 4], Wiring::Serial)?;
    println!("part 1: {signal} (phases {phases:?})");
    let (signal, phases) = max_signal(&program, &[5, 6, 7, 8, 9], Wiring::Feedback)?;
    println!("part 2: {signal} (phases {phases:?})");
    Ok(())
}
