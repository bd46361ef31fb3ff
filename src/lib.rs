#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod active;
#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
pub mod curve;
pub mod driver;
pub mod event;
mod geom;
pub mod input;
pub mod intersect;
mod num;
pub mod queue;
pub mod sweep;

#[cfg(feature = "generators")]
pub mod generators;

pub use curve::{Curve, CurveDesc, CurveIdx, Curves};
pub use event::{Event, EventKind};
pub use geom::Point;
pub use sweep::{Snapshot, StepReport, Summary, Sweeper};

/// The ways in which a curve description can be unusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum InvalidCurve {
    /// One of the coefficients or domain bounds was infinite or NaN.
    #[error("a coefficient or bound is not finite")]
    NonFinite,
    /// The domain was empty or a single point (`t1 >= t2`).
    #[error("the domain is empty (t1 must be less than t2)")]
    EmptyDomain,
}

/// Errors from building or stepping a sweep.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// [`Sweeper::step`] was called with no events left.
    #[error("no more events")]
    EmptyQueue,
    /// One of the input curves was rejected.
    #[error("curve {idx} is invalid: {reason}")]
    InvalidCurve {
        /// The position of the offending curve in the input.
        idx: usize,
        /// What was wrong with it.
        reason: InvalidCurve,
    },
}

/// Finds all the intersections between a collection of curves.
///
/// This is a shortcut for building a [`Sweeper`] and running it to the end.
pub fn intersections(
    descs: impl IntoIterator<Item = CurveDesc>,
) -> Result<Vec<Point>, Error> {
    let mut sweeper = Sweeper::from_descs(descs)?;
    sweeper.run();
    Ok(sweeper.intersections().to_vec())
}
