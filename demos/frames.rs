//! Draws a sweep one event at a time, writing one SVG file per step.

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use curvesweep::{generators, input, Sweeper};

#[derive(Parser)]
struct Cli {
    /// Where to put the pictures.
    #[arg(long)]
    output_dir: PathBuf,

    /// A script to take the curves from. Its instructions are ignored.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Which generated example to draw, if there's no input script.
    #[arg(long, default_value = "bowls")]
    example: String,

    /// The size of the generated example.
    #[arg(long, default_value_t = 4)]
    size: usize,
}

pub fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let descs = if let Some(path) = &args.input {
        input::parse(&std::fs::read_to_string(path)?)?.curves
    } else {
        match args.example.as_str() {
            "slanties" => generators::slanties(args.size),
            "row" => generators::parabola_row(args.size),
            "bowls" => generators::bowls_and_bars(args.size),
            other => bail!("unknown example {other}"),
        }
    };

    std::fs::create_dir_all(&args.output_dir)?;
    let mut sweeper = Sweeper::from_descs(descs)?;
    let mut frame = 0;
    svg::save(args.output_dir.join(format!("{frame:04}.svg")), &sweeper.dump_svg())?;
    while let Ok(report) = sweeper.step() {
        frame += 1;
        println!("{frame:4}: {}{:8.3} {}", report.kind.tag(), report.x, report.scheduled);
        svg::save(args.output_dir.join(format!("{frame:04}.svg")), &sweeper.dump_svg())?;
    }

    let summary = sweeper.summary();
    println!(
        "{} curves, {} intersections, {} unresolved",
        summary.curves,
        summary.intersections,
        sweeper.unresolved().len()
    );
    Ok(())
}
