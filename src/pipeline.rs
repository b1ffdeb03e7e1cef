// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Chains of machines feeding one another
//!
//! A [`Pipeline`] is a row of [`Machine`]s running the same program, like the amplifiers from
//! [Day 7] of Advent of Code 2019. Each machine is given a phase setting as its first input, the
//! first machine is given a signal, and each output is passed along as input to the next machine.
//!
//! The machines know nothing of one another; [`Pipeline::run`] resumes them one at a time,
//! round-robin, moving values between their input queues.
//!
//! # Example
//!
//! ```rust
//! use intcode::pipeline::{Pipeline, Wiring, max_signal};
//! const PROGRAM: [i64; 17] = [3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0];
//!
//! let mut pipeline = Pipeline::new(&PROGRAM, [4, 3, 2, 1, 0]);
//! assert_eq!(pipeline.run(0, Wiring::Serial).unwrap(), 43210);
//!
//! assert_eq!(
//!     max_signal(&PROGRAM, &[0, 1, 2, 3, 4], Wiring::Serial).unwrap(),
//!     (43210, vec![4, 3, 2, 1, 0])
//! );
//! ```
//!
//! [Day 7]: https://adventofcode.com/2019/day/7

use itertools::Itertools;
use log::{debug, warn};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{self, Display};

use crate::{Event, Machine, MachineError, RunState};

/// How the last stage of a [`Pipeline`] is connected
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Wiring {
    /// The last stage's output leaves the pipeline
    Serial,
    /// The last stage's output is also fed back into the first stage
    Feedback,
}

/// An error that stopped a [`Pipeline`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PipelineError {
    /// The machine at index `stage` faulted
    Machine {
        /// index of the stage within the pipeline
        stage: usize,
        /// the error the machine faulted with
        error: MachineError,
    },
    /// Every unhalted stage is waiting for input that will never come. `stage` is the first of
    /// them.
    EndOfInput {
        /// index of the stage within the pipeline
        stage: usize,
    },
    /// Every stage halted without the last one producing any output
    NoOutput,
    /// The pipeline has no stages
    Empty,
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Machine { stage, error } => write!(f, "stage {stage} faulted: {error}"),
            Self::EndOfInput { stage } => {
                write!(f, "stage {stage} is waiting for input that will never arrive")
            }
            Self::NoOutput => write!(f, "the last stage halted without any output"),
            Self::Empty => write!(f, "the pipeline has no stages"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Machine { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Stage {
    machine: Machine,
    queue: VecDeque<i64>,
}

/// A row of machines, each feeding its output to the next
#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Build one fresh machine running `program` for each of `phases`, with its phase setting
    /// queued up as its first input
    pub fn new(program: &[i64], phases: impl IntoIterator<Item = i64>) -> Self {
        let stages = phases
            .into_iter()
            .map(|phase| Stage {
                machine: Machine::new(program.iter().copied()),
                queue: VecDeque::from([phase]),
            })
            .collect();
        Self { stages }
    }

    /// The number of stages
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether there are no stages at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// View the machine at each stage, in order
    pub fn machines(&self) -> impl Iterator<Item = &Machine> {
        self.stages.iter().map(|stage| &stage.machine)
    }

    /// Feed `signal` to the first stage, then resume the stages round-robin until every one of
    /// them has halted. Returns the last value output by the last stage.
    ///
    /// Each stage is resumed until it halts or needs input while its queue is empty. Once every
    /// machine has halted they stay that way, so calling this again returns
    /// [`PipelineError::NoOutput`].
    ///
    /// # Errors
    ///
    /// | Condition                                         | Error type         |
    /// |---------------------------------------------------|--------------------|
    /// | There are no stages                               | [`Empty`]          |
    /// | A machine faulted                                 | [`Machine`]        |
    /// | A full round passed with no stage making progress | [`EndOfInput`]     |
    /// | Everything halted with no output from the end     | [`NoOutput`]       |
    ///
    /// [`Empty`]: PipelineError::Empty
    /// [`Machine`]: PipelineError::Machine
    /// [`EndOfInput`]: PipelineError::EndOfInput
    /// [`NoOutput`]: PipelineError::NoOutput
    pub fn run(&mut self, signal: i64, wiring: Wiring) -> Result<i64, PipelineError> {
        let Some(last) = self.stages.len().checked_sub(1) else {
            return Err(PipelineError::Empty);
        };
        self.stages[0].queue.push_back(signal);
        let mut final_output = None;

        loop {
            let mut progressed = false;
            for i in 0..=last {
                if self.stages[i].machine.state() == RunState::Halted {
                    continue;
                }
                debug!("resuming stage {i}");
                loop {
                    let event = self.stages[i].machine.run_until_suspend();
                    match event {
                        Event::NeedsInput => {
                            let Some(input) = self.stages[i].queue.pop_front() else {
                                break;
                            };
                            self.stages[i]
                                .machine
                                .provide_input(input)
                                .map_err(|err| PipelineError::Machine {
                                    stage: i,
                                    error: err.into(),
                                })?;
                        }
                        Event::Output(value) => {
                            if i == last {
                                final_output = Some(value);
                                if wiring == Wiring::Feedback {
                                    self.stages[0].queue.push_back(value);
                                }
                            } else {
                                self.stages[i + 1].queue.push_back(value);
                            }
                        }
                        Event::Halted => {
                            debug!("stage {i} halted");
                            progressed = true;
                            break;
                        }
                        Event::Fault(error) => {
                            return Err(PipelineError::Machine { stage: i, error });
                        }
                    }
                    progressed = true;
                }
            }

            if self.machines().all(|m| m.state() == RunState::Halted) {
                break;
            }
            if !progressed {
                let stage = self
                    .machines()
                    .position(|m| m.state() == RunState::AwaitingInput)
                    .unwrap_or_default();
                return Err(PipelineError::EndOfInput { stage });
            }
        }

        final_output.ok_or(PipelineError::NoOutput)
    }
}

/// Try every ordering of `phases`, returning the highest signal produced by a [`Pipeline`] fed
/// an initial signal of `0`, along with the phase order that produced it.
///
/// A permutation whose pipeline fails is abandoned and the search carries on.
///
/// # Errors
///
/// If `phases` is empty, returns [`PipelineError::Empty`]. If every permutation failed, returns
/// the error from the last one.
pub fn max_signal(
    program: &[i64],
    phases: &[i64],
    wiring: Wiring,
) -> Result<(i64, Vec<i64>), PipelineError> {
    let mut best: Option<(i64, Vec<i64>)> = None;
    let mut last_err = PipelineError::Empty;

    for order in phases.iter().copied().permutations(phases.len()) {
        if order.is_empty() {
            break;
        }
        match Pipeline::new(program, order.iter().copied()).run(0, wiring) {
            Ok(signal) => {
                if best.as_ref().is_none_or(|(top, _)| signal > *top) {
                    best = Some((signal, order));
                }
            }
            Err(err) => {
                warn!("abandoning phase order {order:?}: {err}");
                last_err = err;
            }
        }
    }

    best.ok_or(last_err)
}
