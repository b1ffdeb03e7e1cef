//! Test that examples from Advent of Code problem descriptions behave as described.
// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use either::Either;
use intcode::prelude::*;
use intcode::trace::{Trace, TracedInstr};
use intcode::{OpCode, ParamMode};
use itertools::Itertools;

// first, some groundwork for common elements of different tests

/// Construct a new machine with the given starting program
macro_rules! machine {
    [$($i:expr),*] => {{
        Machine::new([$($i),*])
    }}
}

/// Run a machine to the end, returning its output.
/// Borrows the machine in case its trace or memory is useful
fn run_to_end(
    machine: &mut Machine,
    inputs: impl IntoIterator<Item = i64>,
) -> Result<Vec<i64>, Either<MachineError, Awaiting>> {
    let (output, stop) = machine.run_with_inputs(inputs).map_err(Either::Left)?;
    if stop == Stop::Halted {
        Ok(output)
    } else {
        Err(Either::Right(Awaiting { output }))
    }
}

/// A struct with the information about expected traced instruction
struct ExpectedOp {
    op_int: i64,
    instr_ptr: i64,
    stored_val: Option<i64>,
}

impl ExpectedOp {
    const fn new(op_int: i64, instr_ptr: i64, stored_val: Option<i64>) -> Self {
        Self {
            op_int,
            instr_ptr,
            stored_val,
        }
    }

    fn validate(self, traced: TracedInstr) {
        assert_eq!(self.op_int, traced.op_int());
        assert_eq!(self.instr_ptr, traced.instr_ptr());
        assert_eq!(self.stored_val, traced.stored_val());
    }
}

fn validate_trace(expected: impl IntoIterator<Item = ExpectedOp>, Trace(trace): Trace) {
    expected
        .into_iter()
        .zip_eq(trace)
        .for_each(|(op, instr)| op.validate(instr))
}

mod day2_examples {
    use crate::*;

    /// the extended example used to help illustrate the basics
    #[test]
    fn extended_example() {
        let mut machine = machine![1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50];
        machine.start_trace();
        let output = run_to_end(&mut machine, empty()).unwrap();
        assert!(output.is_empty());
        const EXPECTED: [ExpectedOp; 3] = [
            ExpectedOp::new(1, 0, Some(70)),
            ExpectedOp::new(2, 4, Some(3500)),
            ExpectedOp::new(99, 8, None),
        ];
        validate_trace(EXPECTED, machine.end_trace().unwrap());
        assert_eq!(machine[0], 3500);
    }

    /// the extra, smaller examples that are listed after the extended example
    #[test]
    fn small_examples() {
        macro_rules! example {
            ($($code: literal),+ becomes $($output: literal),+) => {{
                let mut machine = machine![$($code),*];
                run_to_end(&mut machine, []).unwrap();
                let expected = [$($output),+];
                assert_eq!(machine.get_range(0..expected.len() as i64).unwrap(), expected);
            }}
        }
        example!(1,0,0,0,99 becomes 2,0,0,0,99);
        example!(2,3,0,3,99 becomes 2,3,0,6,99);
        example!(2,4,4,5,99,0 becomes 2,4,4,5,99,9801);
        example!(1,1,1,4,99,5,6,0,99 becomes 30,1,1,4,2,5,6,0,99);
    }
}

mod day5_examples {
    mod part1 {
        use crate::*;

        #[test]
        fn echo_input() {
            let template = machine![3, 0, 4, 0, 99];
            for i in -128..128 {
                assert_eq!(run_to_end(&mut template.clone(), [i]).unwrap(), vec![i]);
            }
        }

        #[test]
        fn immediate_mode_example() {
            let mut machine = machine![1002, 4, 3, 4, 33];
            machine.start_trace();
            let output = run_to_end(&mut machine, []).unwrap();
            assert!(output.is_empty());
            const EXPECTED: [ExpectedOp; 2] = [
                ExpectedOp::new(1002, 0, Some(99)),
                ExpectedOp::new(99, 4, None),
            ];
            let trace = machine.end_trace().unwrap();
            assert_eq!(
                trace.0[0].param_modes(),
                [
                    Some(ParamMode::Positional),
                    Some(ParamMode::Immediate),
                    Some(ParamMode::Positional)
                ]
            );
            validate_trace(EXPECTED, trace);
            assert_eq!(machine[4], 99);
        }

        #[test]
        fn negative_literal() {
            let mut machine = machine![1101, 100, -1, 4, 0];
            run_to_end(&mut machine, []).unwrap();
            assert_eq!(machine[4], 99);
        }
    }

    mod part2 {
        use crate::*;

        #[test]
        fn comparison_examples() {
            let templates = [
                machine![3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8],
                machine![3, 9, 7, 9, 10, 9, 4, 9, 99, -1, 8],
                machine![3, 3, 1108, -1, 8, 3, 4, 3, 99],
                machine![3, 3, 1107, -1, 8, 3, 4, 3, 99],
            ];

            let expected_builder = |mode, cmp_op, input| {
                let val = i64::from(if cmp_op == OpCode::Lt {
                    input < 8
                } else {
                    input == 8
                });
                let expected = [
                    ExpectedOp::new(OpCode::In as i64, 0, Some(input)),
                    ExpectedOp::new(cmp_op as i64 + (mode as i64 * 1100), 2, Some(val)),
                    ExpectedOp::new(OpCode::Out as i64, 6, None),
                    ExpectedOp::new(OpCode::Halt as i64, 8, None),
                ];
                (expected, val)
            };

            let expected = |i: i64| {
                [
                    expected_builder(ParamMode::Positional, OpCode::Eq, i),
                    expected_builder(ParamMode::Positional, OpCode::Lt, i),
                    expected_builder(ParamMode::Immediate, OpCode::Eq, i),
                    expected_builder(ParamMode::Immediate, OpCode::Lt, i),
                ]
            };

            for input in [7, 8, 9] {
                let mut machines = templates.clone();
                let expected_traces = expected(input);
                for (machine, (trace, out)) in machines.iter_mut().zip(expected_traces) {
                    machine.start_trace();
                    let output = run_to_end(machine, [input]).unwrap();
                    assert_eq!(output, vec![out]);
                    validate_trace(trace, machine.end_trace().unwrap());
                }
            }
        }

        #[test]
        fn jump_examples() {
            let templates = [
                machine![3, 12, 6, 12, 15, 1, 13, 14, 13, 4, 13, 99, -1, 0, 1, 9],
                machine![3, 3, 1105, -1, 9, 1101, 0, 0, 12, 4, 12, 99, 1],
            ];

            for i in [0, 1] {
                let mut machines = templates.clone();
                for machine in &mut machines {
                    assert_eq!(machine.step(), Ok(StepOutcome::Suspended(Event::NeedsInput)));
                    machine.provide_input(i).unwrap();
                    assert_eq!(machine.step(), Ok(StepOutcome::Running));
                    machine.start_trace();
                    assert_eq!(machine.step(), Ok(StepOutcome::Running));
                }
                let modes: [[Option<ParamMode>; 3]; 2] = core::array::from_fn(|i| {
                    let Trace(trace) = machines[i].end_trace().unwrap();
                    assert_eq!(trace.len(), 1);
                    trace[0].param_modes()
                });
                for mut machine in machines {
                    assert_eq!(run_to_end(&mut machine, empty()).unwrap(), vec![i]);
                }
                assert_eq!(
                    modes,
                    [
                        [Some(ParamMode::Positional), Some(ParamMode::Positional), None],
                        [Some(ParamMode::Immediate), Some(ParamMode::Immediate), None]
                    ]
                );
            }
        }

        /// > uses an input instruction to ask for a single number. The program will then output
        /// > 999 if the input value is below 8, output 1000 if the input value is equal to 8, or
        /// > output 1001 if the input value is greater than 8.
        #[test]
        fn larger_example() {
            let template = machine![
                3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36,
                98, 0, 0, 1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1101,
                1000, 1, 20, 4, 20, 1105, 1, 46, 98, 99
            ];
            for (input, expected) in [(5, 999), (7, 999), (8, 1000), (9, 1001), (100, 1001)] {
                assert_eq!(
                    run_to_end(&mut template.clone(), [input]).unwrap(),
                    vec![expected]
                );
            }
        }
    }
}

mod day7_examples {
    use intcode::pipeline::{Pipeline, Wiring, max_signal};

    #[test]
    fn serial_examples() {
        let examples: [(&[i64], [i64; 5], i64); 3] = [
            (
                &[3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0],
                [4, 3, 2, 1, 0],
                43210,
            ),
            (
                &[
                    3, 23, 3, 24, 1002, 24, 10, 24, 1002, 23, -1, 23, 101, 5, 23, 23, 1, 24, 23,
                    23, 4, 23, 99, 0, 0,
                ],
                [0, 1, 2, 3, 4],
                54321,
            ),
            (
                &[
                    3, 31, 3, 32, 1002, 32, 10, 32, 1001, 31, -2, 31, 1007, 31, 0, 33, 1002, 33, 7,
                    33, 1, 33, 31, 31, 1, 32, 31, 31, 4, 31, 99, 0, 0, 0,
                ],
                [1, 0, 4, 3, 2],
                65210,
            ),
        ];
        for (program, phases, signal) in examples {
            assert_eq!(
                Pipeline::new(program, phases).run(0, Wiring::Serial),
                Ok(signal)
            );
            assert_eq!(
                max_signal(program, &[0, 1, 2, 3, 4], Wiring::Serial),
                Ok((signal, phases.to_vec()))
            );
        }
    }

    #[test]
    fn feedback_examples() {
        let examples: [(&[i64], [i64; 5], i64); 2] = [
            (
                &[
                    3, 26, 1001, 26, -4, 26, 3, 27, 1002, 27, 2, 27, 1, 27, 26, 27, 4, 27, 1001,
                    28, -1, 28, 1005, 28, 6, 99, 0, 0, 5,
                ],
                [9, 8, 7, 6, 5],
                139_629_729,
            ),
            (
                &[
                    3, 52, 1001, 52, -5, 52, 3, 53, 1, 52, 56, 54, 1007, 54, 5, 55, 1005, 55, 26,
                    1001, 54, -5, 54, 1105, 1, 12, 1, 53, 54, 53, 1008, 54, 0, 55, 1001, 55, 1,
                    55, 2, 53, 55, 53, 4, 53, 1001, 56, -1, 56, 1005, 56, 6, 99, 0, 0, 0, 0, 10,
                ],
                [9, 7, 8, 5, 6],
                18216,
            ),
        ];
        for (program, phases, signal) in examples {
            assert_eq!(
                Pipeline::new(program, phases).run(0, Wiring::Feedback),
                Ok(signal)
            );
            assert_eq!(
                max_signal(program, &[5, 6, 7, 8, 9], Wiring::Feedback),
                Ok((signal, phases.to_vec()))
            );
        }
    }
}

mod day9_examples {
    use crate::*;
    /// > takes no input and produces a copy of itself as output.
    #[test]
    fn quine() {
        let quine_code = [
            109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
        ];
        let mut machine = Machine::new(quine_code);
        let output = run_to_end(&mut machine, empty()).unwrap();
        assert_eq!(output.as_slice(), quine_code.as_slice());
        // the program's scratch space is well past its own end
        assert!(machine.memory().len() > quine_code.len());
    }

    /// > should output a 16-digit number
    #[test]
    fn output_sixteen_digit() {
        let mut machine = machine![1102, 34915192, 34915192, 7, 4, 7, 99, 0];
        let output = run_to_end(&mut machine, empty()).unwrap();
        assert_eq!(output.len(), 1, "{output:?}");
        assert_eq!(output[0].to_string().len(), 16, "{output:?}");
    }

    /// > should output the large number in the middle
    #[test]
    fn large_number() {
        let mut machine = machine![104, 1125899906842624, 99];
        let output = run_to_end(&mut machine, empty()).unwrap();
        assert_eq!(output, vec![1125899906842624]);
    }
}

mod protocol {
    use crate::*;

    /// write through a relative-mode parameter, then read the same cell back in position mode
    #[test]
    fn relative_round_trip() {
        // RBO #100; IN @7; RBO #-50; OUT 107; HALT
        let mut machine = machine![109, 100, 203, 7, 109, -50, 4, 107, 99];
        assert_eq!(machine.run_until_suspend(), Event::NeedsInput);
        machine.provide_input(-31337).unwrap();
        assert_eq!(machine.run_until_suspend(), Event::Output(-31337));
        assert_eq!(machine.relative_base(), 50);
        assert_eq!(machine.run_until_suspend(), Event::Halted);
        assert_eq!(machine[107], -31337);
    }

    #[test]
    fn needs_more_input_than_given() {
        let mut machine = machine![3, 0, 3, 1, 4, 0, 4, 1, 99];
        let Err(Either::Right(Awaiting { output })) = run_to_end(&mut machine, [5]) else {
            panic!("should be waiting for input");
        };
        assert!(output.is_empty());
        assert_eq!(machine.state(), RunState::AwaitingInput);
        assert_eq!(run_to_end(&mut machine, [6]).unwrap(), vec![5, 6]);
    }

    #[test]
    fn many_outputs_between_inputs() {
        // OUT #1; OUT #2; OUT #3; IN 0; HALT
        let mut machine = machine![104, 1, 104, 2, 104, 3, 3, 0, 99];
        assert_eq!(machine.run_with_inputs(empty()), Ok((vec![1, 2, 3], Stop::AwaitingInput)));
        assert_eq!(machine.run_with_inputs([0]), Ok((vec![], Stop::Halted)));
    }

    #[test]
    fn faults_reported_as_errors() {
        let mut machine = machine![104, 7, 3, 0, 1, 0, 0, 0, 0];
        assert_eq!(
            run_to_end(&mut machine, [2]).unwrap_err().left(),
            Some(MachineError::UnknownOpcode(0))
        );
        assert_eq!(machine.state(), RunState::Faulted);
    }
}

#[derive(Debug)]
struct Awaiting {
    output: Vec<i64>,
}
