//! Reading sweep scripts.
//!
//! A script starts with a line holding the number of curves, `n`. Each of the
//! next `n` lines describes a curve `y = a x^2 + b x + c` on `t1 <= x <= t2` as
//! five whitespace-separated numbers `a b c t1 t2`. Every line after that is
//! an [`Instruction`]. Blank lines are ignored everywhere.
//!
//! ```text
//! 2
//! 0 1 0 -5 5
//! 0 -1 0 -5 5
//! step -p
//! status
//! run
//! ```

use std::str::FromStr;

use crate::{curve::CurveDesc, InvalidCurve};

/// Something to do with a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Instruction {
    /// Process one event quietly.
    Step,
    /// Process one event and print what happened.
    StepPrint,
    /// Print the active curves.
    Status,
    /// Process every remaining event and print a summary.
    Run,
}

impl FromStr for Instruction {
    type Err = ();

    /// Parses an instruction, ignoring case and extra whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<String> = s.split_whitespace().map(str::to_lowercase).collect();
        match words.as_slice() {
            [w] if w == "step" => Ok(Instruction::Step),
            [w, p] if w == "step" && p == "-p" => Ok(Instruction::StepPrint),
            [w] if w == "status" => Ok(Instruction::Status),
            [w] if w == "run" => Ok(Instruction::Run),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Instruction::Step => "step",
            Instruction::StepPrint => "step -p",
            Instruction::Status => "status",
            Instruction::Run => "run",
        };
        f.write_str(s)
    }
}

/// A parsed script.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    /// The curves, in input order. Their positions are their ids.
    pub curves: Vec<CurveDesc>,
    /// The instructions, in the order they should run.
    pub instructions: Vec<Instruction>,
}

/// The ways in which a script can be malformed.
///
/// Line numbers start at 1.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The script has no curve count.
    #[error("the input is empty")]
    Empty,
    /// The first line wasn't a non-negative integer.
    #[error("line {line}: unable to parse the number of curves from {text:?}")]
    BadCount {
        /// The line number.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// The script ended before all the curves were described.
    #[error("expected {expected} curves, but found {found}")]
    MissingCurves {
        /// The number of curves announced on the first line.
        expected: usize,
        /// The number of curves actually present.
        found: usize,
    },
    /// A curve line didn't have exactly five fields.
    #[error("line {line}: 5 numbers expected, {found} found")]
    WrongFieldCount {
        /// The line number.
        line: usize,
        /// The number of fields on the line.
        found: usize,
    },
    /// A curve field wasn't a number.
    #[error("line {line}: {text:?} is not a number")]
    BadNumber {
        /// The line number.
        line: usize,
        /// The offending field.
        text: String,
    },
    /// A curve was well-formed but unusable.
    #[error("line {line}: {reason}")]
    InvalidCurve {
        /// The line number.
        line: usize,
        /// What was wrong with the curve.
        reason: InvalidCurve,
    },
    /// An instruction line wasn't recognized.
    #[error("line {line}: unknown instruction {text:?}")]
    UnknownInstruction {
        /// The line number.
        line: usize,
        /// The offending text.
        text: String,
    },
}

fn parse_curve(line: usize, text: &str) -> Result<CurveDesc, ParseError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [a, b, c, t1, t2] = fields.as_slice() else {
        return Err(ParseError::WrongFieldCount {
            line,
            found: fields.len(),
        });
    };

    let num = |field: &str| {
        field.parse::<f64>().map_err(|_| ParseError::BadNumber {
            line,
            text: field.to_owned(),
        })
    };
    let desc = CurveDesc::new(num(*a)?, num(*b)?, num(*c)?, num(*t1)?, num(*t2)?);
    desc.validate()
        .map_err(|reason| ParseError::InvalidCurve { line, reason })?;
    Ok(desc)
}

/// Parses a script.
pub fn parse(text: &str) -> Result<Script, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line, count) = lines.next().ok_or(ParseError::Empty)?;
    let expected: usize = count.parse().map_err(|_| ParseError::BadCount {
        line,
        text: count.to_owned(),
    })?;

    let mut script = Script::default();
    for found in 0..expected {
        let (line, text) = lines
            .next()
            .ok_or(ParseError::MissingCurves { expected, found })?;
        script.curves.push(parse_curve(line, text)?);
    }

    for (line, text) in lines {
        let instruction = text
            .parse::<Instruction>()
            .map_err(|()| ParseError::UnknownInstruction {
                line,
                text: text.to_owned(),
            })?;
        script.instructions.push(instruction);
    }

    tracing::debug!(
        curves = script.curves.len(),
        instructions = script.instructions.len(),
        "parsed script"
    );
    Ok(script)
}
