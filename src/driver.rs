//! Running scripts against a sweep, and printing what happens.
//!
//! The output is line-oriented:
//!
//! ```text
//! event: S -5.00 0
//! event: S -5.00 1
//! event: I  0.00 0
//! status: 2: 0 1
//! error: no more events
//! summary: 2 segments, 1 intersections
//! ```
//!
//! An `event:` line has the event kind (`S`, `I`, `M` or `E`), the sweep
//! position, and the number of crossings that were scheduled. A `status:` line
//! has the number of active curves, followed by their ids from top to bottom.

use std::io::{self, Write};

use crate::{
    input::{self, Instruction, ParseError},
    sweep::{StepReport, Sweeper},
    Error,
};

/// Anything that can go wrong while running a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script didn't parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The curves couldn't be swept.
    #[error(transparent)]
    Sweep(#[from] Error),
    /// Writing the output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Executes instructions against a [`Sweeper`], writing the results to `out`.
#[derive(Debug)]
pub struct Driver<W> {
    sweeper: Sweeper,
    out: W,
}

impl<W: Write> Driver<W> {
    /// Creates a driver that writes to `out`.
    pub fn new(sweeper: Sweeper, out: W) -> Self {
        Driver { sweeper, out }
    }

    /// The sweep being driven.
    pub fn sweeper(&self) -> &Sweeper {
        &self.sweeper
    }

    /// The output.
    pub fn output(&mut self) -> &mut W {
        &mut self.out
    }

    /// Takes apart the driver.
    pub fn into_parts(self) -> (Sweeper, W) {
        (self.sweeper, self.out)
    }

    /// Executes a single instruction.
    pub fn execute(&mut self, instruction: Instruction) -> io::Result<()> {
        tracing::trace!(%instruction, "executing");
        match instruction {
            Instruction::Step => {
                if let Err(e) = self.sweeper.step() {
                    writeln!(self.out, "error: {e}")?;
                }
            }
            Instruction::StepPrint => match self.sweeper.step() {
                Ok(report) => self.write_report(&report)?,
                Err(e) => writeln!(self.out, "error: {e}")?,
            },
            Instruction::Status => {
                let active = self.sweeper.active();
                write!(self.out, "status: {}:", active.len())?;
                for idx in active {
                    write!(self.out, " {idx}")?;
                }
                writeln!(self.out)?;
            }
            Instruction::Run => {
                let summary = self.sweeper.run();
                writeln!(
                    self.out,
                    "summary: {} segments, {} intersections",
                    summary.curves, summary.intersections
                )?;
            }
        }
        Ok(())
    }

    fn write_report(&mut self, report: &StepReport) -> io::Result<()> {
        writeln!(
            self.out,
            "event: {}{:6.2} {}",
            report.kind.tag(),
            report.x,
            report.scheduled
        )
    }

    /// Executes a sequence of instructions.
    pub fn execute_all(
        &mut self,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> io::Result<()> {
        for instruction in instructions {
            self.execute(instruction)?;
        }
        Ok(())
    }
}

/// Parses and runs a script, returning the sweep in its final state.
pub fn run_script(text: &str, out: impl Write) -> Result<Sweeper, ScriptError> {
    let script = input::parse(text)?;
    let mut driver = Driver::new(Sweeper::from_descs(script.curves)?, out);
    driver.execute_all(script.instructions)?;
    Ok(driver.into_parts().0)
}
