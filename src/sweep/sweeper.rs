use arrayvec::ArrayVec;

use crate::{
    active::ActiveSet,
    curve::{Curve, CurveDesc, CurveIdx, Curves},
    event::{Event, EventKind},
    geom::Point,
    intersect::{crossings, meeting_point, touches},
    queue::EventQueue,
    Error,
};

/// What happened during a single call to [`Sweeper::step`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StepReport {
    /// The kind of event that was processed.
    pub kind: EventKind,
    /// The sweep position of the event.
    pub x: f64,
    /// The number of new crossing events that were scheduled while processing it.
    pub scheduled: usize,
}

/// Totals after a complete sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    /// The number of input curves.
    pub curves: usize,
    /// The number of intersection points found.
    pub intersections: usize,
}

/// A serializable copy of the sweep state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Snapshot {
    /// The current sweep position.
    pub x: f64,
    /// The active curves, from top to bottom.
    pub active: Vec<CurveIdx>,
    /// The pending events, in the order they'll be processed.
    pub pending: Vec<Event>,
    /// The intersection points found so far.
    pub intersections: Vec<Point>,
    /// The events that couldn't be processed.
    pub unresolved: Vec<Event>,
}

/// Finds intersections between curves, one event at a time.
///
/// A freshly created sweeper is positioned to the left of every curve, with
/// a start and an end event for each curve in its queue. Each call to
/// [`Sweeper::step`] takes the leftmost pending event, moves the sweep line
/// to it, and processes it:
///
/// - when a curve starts, it's inserted into the active set and checked
///   against its new neighbors;
/// - when a curve ends, it's removed and its former neighbors are checked
///   against one another;
/// - when two curves cross, they change places and each one is checked
///   against its new neighbor.
///
/// Crossings are only ever scheduled between curves that are adjacent in the
/// active set, and they're removed from the queue as soon as the curves stop
/// being adjacent.
#[derive(Clone, Debug)]
pub struct Sweeper {
    x: f64,
    curves: Curves,
    active: ActiveSet,
    events: EventQueue,
    intersections: Vec<Point>,
    unresolved: Vec<Event>,
}

impl Sweeper {
    /// Creates a new sweeper for a collection of curves.
    pub fn new(curves: Curves) -> Self {
        let mut events = EventQueue::new();
        for c in curves.iter() {
            events.push(Event::Start {
                at: c.start(),
                curve: c.id(),
            });
            events.push(Event::End {
                at: c.end(),
                curve: c.id(),
            });
        }
        tracing::debug!(curves = curves.len(), "initialized sweep");

        Sweeper {
            x: f64::NEG_INFINITY,
            curves,
            active: ActiveSet::new(),
            events,
            intersections: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    /// Creates a new sweeper, validating a collection of curve descriptions.
    pub fn from_descs(descs: impl IntoIterator<Item = CurveDesc>) -> Result<Self, Error> {
        Ok(Self::new(Curves::from_descs(descs)?))
    }

    /// Processes the next event.
    ///
    /// If there are no more events, returns [`Error::EmptyQueue`] and leaves
    /// the sweep state untouched.
    pub fn step(&mut self) -> Result<StepReport, Error> {
        let ev = self.events.pop().ok_or(Error::EmptyQueue)?;
        debug_assert!(ev.x() >= self.x, "event {ev:?} is behind the sweep line");
        self.x = ev.x();
        let kind = ev.kind();

        let (kind, scheduled) = match ev {
            Event::Start { curve, .. } => (kind, self.process_start(curve)),
            Event::End { curve, .. } => (kind, self.process_end(curve)),
            Event::Intersection { at, curves } => self.process_intersection(at, curves),
            ev @ Event::MultiIntersection { .. } => {
                self.give_up(ev);
                (kind, 0)
            }
        };

        tracing::debug!(?kind, x = self.x, scheduled, "processed event");
        Ok(StepReport {
            kind,
            x: self.x,
            scheduled,
        })
    }

    /// Processes all the remaining events.
    pub fn run(&mut self) -> Summary {
        while let Ok(report) = self.step() {
            tracing::trace!(?report);
        }
        self.summary()
    }

    fn process_start(&mut self, idx: CurveIdx) -> usize {
        let x = self.x;
        // Heights are only refreshed here, so that the new curve is compared
        // against up-to-date values.
        self.active.refresh_all(x, &mut self.curves);
        let y = self.curves.get_mut(idx).refresh(x);
        let pos = self.active.insert(idx, x, &self.curves);

        // Starting in the middle of a pending crossing makes it a meeting of
        // three or more curves. This has to happen before the purge below,
        // which might otherwise drop the crossing.
        for other in self.meeting_neighbors(pos, pos, y) {
            if self.events.has_crossing_at(x, other) {
                tracing::debug!(curve = ?idx, ?other, x, "curve starts on a crossing");
                self.events.push(Event::Intersection {
                    at: Point::new(x, y + 0.0),
                    curves: [idx, other],
                });
            }
        }

        let above = self.active.predecessor(idx);
        let below = self.active.successor(idx);
        let mut scheduled = 0;
        if let Some(above) = above {
            scheduled += self.schedule_crossings(above, idx);
        }
        if let Some(below) = below {
            scheduled += self.schedule_crossings(idx, below);
        }
        if let (Some(above), Some(below)) = (above, below) {
            self.purge_crossings(above, below);
        }
        scheduled
    }

    fn process_end(&mut self, idx: CurveIdx) -> usize {
        let mut scheduled = 0;
        if let (Some(above), Some(below)) =
            (self.active.predecessor(idx), self.active.successor(idx))
        {
            scheduled += self.schedule_crossings(above, below);
        }
        if !self.active.remove(idx) {
            tracing::warn!(curve = ?idx, "ending a curve that isn't active");
        }
        scheduled
    }

    fn process_intersection(
        &mut self,
        at: Point,
        [c0, c1]: [CurveIdx; 2],
    ) -> (EventKind, usize) {
        let (Some(p0), Some(p1)) = (self.active.position(c0), self.active.position(c1)) else {
            tracing::warn!(x = self.x, ?c0, ?c1, "crossing between inactive curves");
            self.unresolved.push(Event::Intersection {
                at,
                curves: [c0, c1],
            });
            return (EventKind::Intersection, 0);
        };

        // A neighbor passing through the same point (for example, one that
        // overlaps with `c0` or `c1`) wasn't merged into this event by the
        // queue, because it doesn't cross its overlapping partner.
        let others = self.meeting_neighbors(p0.min(p1), p0.max(p1), at.y);
        if !others.is_empty() {
            let mut curves = vec![c0, c1];
            curves.extend(others);
            curves.sort();
            curves.dedup();
            self.give_up(Event::MultiIntersection { at, curves });
            return (EventKind::MultiIntersection, 0);
        }

        if touches(&self.curves[c0], &self.curves[c1]) {
            // The curves meet without crossing, so their order doesn't change.
            tracing::debug!(?at, ?c0, ?c1, "curves touch");
            self.intersections.push(at);
            return (EventKind::Intersection, 0);
        }

        let y0 = self.curves[c0].current_y();
        let y1 = self.curves[c1].current_y();
        self.curves.get_mut(c0).set_current_y(y1);
        self.curves.get_mut(c1).set_current_y(y0);
        self.active.swap(c0, c1);

        let (upper, lower) = if self.active.position(c0) < self.active.position(c1) {
            (c0, c1)
        } else {
            (c1, c0)
        };

        let mut scheduled = 0;
        if let Some(above) = self.active.predecessor(upper) {
            scheduled += self.schedule_crossings(above, upper);
            self.purge_crossings(above, lower);
        }
        if let Some(below) = self.active.successor(lower) {
            scheduled += self.schedule_crossings(lower, below);
            self.purge_crossings(below, upper);
        }

        tracing::debug!(?at, ?upper, ?lower, "curves crossed");
        self.intersections.push(at);
        (EventKind::Intersection, scheduled)
    }

    fn give_up(&mut self, ev: Event) {
        tracing::warn!(x = self.x, curves = ?ev.curves(), "three or more curves meet");
        self.unresolved.push(ev);
    }

    /// The active curves just above position `top` and just below position
    /// `bottom` that pass through height `y` at the sweep position.
    fn meeting_neighbors(&self, top: usize, bottom: usize, y: f64) -> Vec<CurveIdx> {
        let order = self.active.as_slice();
        let meets = |idx: &&CurveIdx| self.curves[**idx].eval(self.x) == y;
        let above = order[..top].iter().rev().take_while(meets);
        let below = order[bottom + 1..].iter().take_while(meets);
        above.chain(below).copied().collect()
    }

    /// Queues every crossing between `c0` and `c1` that's ahead of the sweep
    /// line, returning the number that were actually added.
    fn schedule_crossings(&mut self, c0: CurveIdx, c1: CurveIdx) -> usize {
        let (curve0, curve1) = (&self.curves[c0], &self.curves[c1]);
        let points: ArrayVec<Point, 2> = crossings(curve0, curve1, self.x)
            .into_iter()
            .map(|t| meeting_point(curve0, curve1, t))
            .collect();

        let mut count = 0;
        for at in points {
            if self.events.push(Event::Intersection {
                at,
                curves: [c0, c1],
            }) {
                tracing::trace!(?at, ?c0, ?c1, "scheduled crossing");
                count += 1;
            }
        }
        count
    }

    fn purge_crossings(&mut self, c0: CurveIdx, c1: CurveIdx) {
        let removed = self.events.remove_crossings(c0, c1);
        if removed > 0 {
            tracing::trace!(?c0, ?c1, removed, "dropped crossings between separated curves");
        }
    }

    /// The current sweep position.
    ///
    /// This is negative infinity before the first step.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// All the curves, active or not.
    pub fn curves(&self) -> &Curves {
        &self.curves
    }

    /// The curve with the given index.
    pub fn curve(&self, idx: CurveIdx) -> &Curve {
        &self.curves[idx]
    }

    /// The curves currently crossing the sweep line, from top to bottom.
    pub fn active(&self) -> &[CurveIdx] {
        self.active.as_slice()
    }

    /// The pending events, in the order they'll be processed.
    pub fn pending(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter()
    }

    /// The next event to be processed.
    pub fn peek(&self) -> Option<&Event> {
        self.events.peek()
    }

    /// The intersection points found so far, in the order they were found.
    pub fn intersections(&self) -> &[Point] {
        &self.intersections
    }

    /// Events that were dequeued but couldn't be processed.
    pub fn unresolved(&self) -> &[Event] {
        &self.unresolved
    }

    /// Have all the events been processed?
    pub fn is_done(&self) -> bool {
        self.events.is_empty()
    }

    /// The number of curves and the number of intersections found so far.
    pub fn summary(&self) -> Summary {
        Summary {
            curves: self.curves.len(),
            intersections: self.intersections.len(),
        }
    }

    /// Copies out the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            x: self.x,
            active: self.active.as_slice().to_vec(),
            pending: self.events.iter().cloned().collect(),
            intersections: self.intersections.clone(),
            unresolved: self.unresolved.clone(),
        }
    }

    /// Panics if the sweep state is inconsistent.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        for idx in self.active.iter() {
            let c = &self.curves[idx];
            assert!(
                c.domain_contains(self.x),
                "{idx:?} is active outside its domain at x={}",
                self.x
            );
        }

        // A curve is active exactly when it has started but hasn't ended.
        for idx in self.curves.indices() {
            let started = !self
                .events
                .iter()
                .any(|ev| ev.kind() == EventKind::Start && ev.involves(idx));
            let ending = self
                .events
                .iter()
                .any(|ev| ev.kind() == EventKind::End && ev.involves(idx));
            assert_eq!(
                self.active.contains(idx),
                started && ending,
                "{idx:?} has the wrong activity at x={}",
                self.x
            );
        }

        for ev in self.events.iter() {
            assert!(ev.x() >= self.x, "{ev:?} is behind x={}", self.x);
            if let Event::Intersection { curves: [c0, c1], .. } = ev {
                assert!(
                    self.active.adjacent(*c0, *c1),
                    "{ev:?} is pending but its curves aren't adjacent"
                );
            }
        }

        for w in self.intersections.windows(2) {
            assert!(w[0].x <= w[1].x, "intersections out of order: {w:?}");
        }
    }
}
