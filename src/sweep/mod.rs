//! The sweep-line implementation.
//!
//! The main entry point is [`Sweeper`], which moves a vertical line from left
//! to right across a collection of curves, one event at a time. Between
//! events, it keeps the curves that cross the line ordered from top to
//! bottom, and it only ever tests neighboring curves for crossings.

mod sweeper;

#[cfg(feature = "debug-svg")]
mod svg;

pub use sweeper::{Snapshot, StepReport, Summary, Sweeper};
