//! Runs a sweep script and prints what happens.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use curvesweep::{driver::Driver, input, Sweeper};

#[derive(Parser)]
#[command(about = "Finds intersections between line segments and parabolic arcs, one event at a time")]
struct Cli {
    /// The script to run.
    input: PathBuf,

    /// After each instruction, also print the sweep state as a line of JSON.
    #[arg(long)]
    json: bool,

    /// Draw the final state of the sweep to this file.
    #[cfg(feature = "debug-svg")]
    #[arg(long)]
    svg: Option<PathBuf>,
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("unable to read {}", args.input.display()))?;
    let script = input::parse(&text)?;
    let sweeper = Sweeper::from_descs(script.curves)?;

    let stdout = io::stdout().lock();
    let mut driver = Driver::new(sweeper, stdout);
    for instruction in script.instructions {
        driver.execute(instruction)?;
        if args.json {
            let snapshot = driver.sweeper().snapshot();
            let out = driver.output();
            serde_json::to_writer(&mut *out, &snapshot)?;
            writeln!(out)?;
        }
    }
    let (sweeper, mut stdout) = driver.into_parts();
    stdout.flush()?;

    write_svg(&args, &sweeper)
}

#[cfg(feature = "debug-svg")]
fn write_svg(args: &Cli, sweeper: &Sweeper) -> anyhow::Result<()> {
    if let Some(path) = &args.svg {
        svg::save(path, &sweeper.dump_svg())
            .with_context(|| format!("unable to write {}", path.display()))?;
    }
    Ok(())
}

#[cfg(not(feature = "debug-svg"))]
fn write_svg(_args: &Cli, _sweeper: &Sweeper) -> anyhow::Result<()> {
    Ok(())
}
