//! Sweep events.

use crate::{curve::CurveIdx, geom::Point};

/// The different kinds of events, without their payload.
///
/// The derived order is the order in which simultaneous events are processed:
/// curves enter first, then crossings are resolved, then curves leave. In
/// particular, a crossing at a curve's right endpoint happens while the curve
/// is still active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum EventKind {
    /// A curve enters the sweep line.
    Start,
    /// Two curves cross.
    Intersection,
    /// Three or more curves meet at a single point.
    MultiIntersection,
    /// A curve leaves the sweep line.
    End,
}

impl EventKind {
    /// The one-letter tag used in step transcripts.
    pub fn tag(self) -> char {
        match self {
            EventKind::Start => 'S',
            EventKind::End => 'E',
            EventKind::Intersection => 'I',
            EventKind::MultiIntersection => 'M',
        }
    }

    // Intersections and multi-intersections at the same x are interleaved by
    // insertion order, so they share a rank.
    pub(crate) fn rank(self) -> u8 {
        match self {
            EventKind::Start => 0,
            EventKind::Intersection | EventKind::MultiIntersection => 1,
            EventKind::End => 2,
        }
    }
}

/// Something that happens at a specific sweep position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Event {
    /// The curve's domain begins here.
    Start {
        /// The curve's leftmost point.
        at: Point,
        /// The entering curve.
        curve: CurveIdx,
    },
    /// The curve's domain ends here.
    End {
        /// The curve's rightmost point.
        at: Point,
        /// The leaving curve.
        curve: CurveIdx,
    },
    /// Two adjacent curves cross here.
    Intersection {
        /// The crossing point.
        at: Point,
        /// The crossing curves. Their order carries no meaning.
        curves: [CurveIdx; 2],
    },
    /// Three or more curves meet here.
    ///
    /// The sweep doesn't know how to reorder more than two curves at once, so
    /// these events are reported as unresolved instead of being processed.
    MultiIntersection {
        /// The meeting point.
        at: Point,
        /// All the curves involved, sorted and without duplicates.
        curves: Vec<CurveIdx>,
    },
}

impl Event {
    /// The position of this event.
    pub fn at(&self) -> Point {
        match self {
            Event::Start { at, .. }
            | Event::End { at, .. }
            | Event::Intersection { at, .. }
            | Event::MultiIntersection { at, .. } => *at,
        }
    }

    /// The sweep position of this event.
    pub fn x(&self) -> f64 {
        self.at().x
    }

    /// What kind of event is this?
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Start { .. } => EventKind::Start,
            Event::End { .. } => EventKind::End,
            Event::Intersection { .. } => EventKind::Intersection,
            Event::MultiIntersection { .. } => EventKind::MultiIntersection,
        }
    }

    /// All the curves this event concerns.
    pub fn curves(&self) -> &[CurveIdx] {
        match self {
            Event::Start { curve, .. } | Event::End { curve, .. } => std::slice::from_ref(curve),
            Event::Intersection { curves, .. } => curves,
            Event::MultiIntersection { curves, .. } => curves,
        }
    }

    /// Does this event concern `curve`?
    pub fn involves(&self, curve: CurveIdx) -> bool {
        match self {
            Event::Start { curve: c, .. } | Event::End { curve: c, .. } => *c == curve,
            Event::Intersection { curves, .. } => curves.contains(&curve),
            Event::MultiIntersection { curves, .. } => curves.contains(&curve),
        }
    }

    /// Is this a crossing event between exactly the (unordered) pair `c0`, `c1`?
    pub fn is_crossing_of(&self, c0: CurveIdx, c1: CurveIdx) -> bool {
        match self {
            Event::Intersection { curves, .. } => *curves == [c0, c1] || *curves == [c1, c0],
            _ => false,
        }
    }
}
