// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 11 built using the `intcode` library.

use intcode::prelude::*;
use intcode::program::parse_program;

use std::collections::HashMap;
use std::error::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
enum PanelColor {
    Black { repainted: bool },
    White,
}

impl PanelColor {
    fn report(self) -> i64 {
        i64::from(self == Self::White)
    }

    fn paint(&mut self, color: i64) -> Result<(), String> {
        *self = match color {
            0 => Self::Black { repainted: true },
            1 => Self::White,
            c => return Err(format!("invalid paint color: {c}")),
        };
        Ok(())
    }
}

impl Default for PanelColor {
    fn default() -> Self {
        Self::Black { repainted: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn turn(&mut self, code: i64) -> Result<(), String> {
        *self = match (code, *self) {
            (0, Self::Up) | (1, Self::Down) => Self::Left,
            (0, Self::Right) | (1, Self::Left) => Self::Up,
            (0, Self::Down) | (1, Self::Up) => Self::Right,
            (0, Self::Left) | (1, Self::Right) => Self::Down,
            (i, _) => return Err(format!("invalid direction code: {i}")),
        };
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
struct Location {
    x: i32,
    y: i32,
}

impl std::ops::AddAssign<Direction> for Location {
    fn add_assign(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.y -= 1,
            Direction::Right => self.x += 1,
            Direction::Down => self.y += 1,
            Direction::Left => self.x -= 1,
        }
    }
}

/// Drive the painting robot until its program halts
///
/// Every input is the color under the robot. Outputs come in pairs: a color to paint, then a
/// direction to turn before moving forward one panel.
fn paint(
    program: &[i64],
    start: PanelColor,
) -> Result<HashMap<Location, PanelColor>, Box<dyn Error>> {
    let mut robot = Machine::new(program.iter().copied());
    let mut panels = HashMap::from([(Location::default(), start)]);
    let mut location = Location::default();
    let mut direction = Direction::Up;
    let mut painted = false;

    loop {
        match robot.run_until_suspend() {
            Event::NeedsInput => {
                robot.provide_input(panels.entry(location).or_default().report())?;
            }
            Event::Output(color) if !painted => {
                panels.entry(location).or_default().paint(color)?;
                painted = true;
            }
            Event::Output(turn) => {
                direction.turn(turn)?;
                location += direction;
                painted = false;
            }
            Event::Halted => break Ok(panels),
            Event::Fault(err) => break Err(err.into()),
        }
    }
}

fn part1(program: &[i64]) -> Result<usize, Box<dyn Error>> {
    Ok(paint(program, PanelColor::default())?
        .into_values()
        .filter(|v| *v != PanelColor::default())
        .count())
}

fn part2(program: &[i64]) -> Result<String, Box<dyn Error>> {
    let panels = paint(program, PanelColor::White)?;

    let xs = panels.keys().map(|l| l.x);
    let ys = panels.keys().map(|l| l.y);
    let (Some(min_x), Some(max_x)) = (xs.clone().min(), xs.max()) else {
        return Ok(String::new());
    };
    let (Some(min_y), Some(max_y)) = (ys.clone().min(), ys.max()) else {
        return Ok(String::new());
    };

    let mut image = String::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            image.push(
                match panels.get(&Location { x, y }).copied().unwrap_or_default() {
                    PanelColor::Black { .. } => ' ',
                    PanelColor::White => '#',
                },
            );
        }
        image.push('\n');
    }
    Ok(image)
}

fn main() -> Result<(), Box<dyn Error>> {
    use std::env::args_os;
    use std::fs::read_to_string;
    let input = read_to_string(args_os().nth(1).ok_or("missing file name")?)?;
    let program = parse_program(&input)?;

    println!("part 1: {}", part1(&program)?);
    print!("part 2:\n{}", part2(&program)?);
    Ok(())
}
