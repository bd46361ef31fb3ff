//! The queue of pending sweep events.

use std::{collections::BTreeMap, ops::RangeInclusive};

use crate::{
    curve::CurveIdx,
    event::{Event, EventKind},
    num::CheapOrderedFloat,
};

// Events are ordered by x, then by kind (see `EventKind::rank`), then by the
// order they were pushed in. The sequence number makes every key unique, so
// simultaneous events are never collapsed by accident.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct EventKey {
    x: CheapOrderedFloat,
    rank: u8,
    seq: u64,
}

/// Pending events, ordered by sweep position.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: BTreeMap<EventKey, Event>,
    next_seq: u64,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(&mut self, x: f64, kind: EventKind) -> EventKey {
        let seq = self.next_seq;
        self.next_seq += 1;
        EventKey {
            x: x.into(),
            rank: kind.rank(),
            seq,
        }
    }

    // All the crossing events at exactly `x`.
    fn crossing_keys(x: f64) -> RangeInclusive<EventKey> {
        let lo = EventKey {
            x: x.into(),
            rank: EventKind::Intersection.rank(),
            seq: 0,
        };
        lo..=EventKey { seq: u64::MAX, ..lo }
    }

    /// Adds an event to the queue.
    ///
    /// Returns `false` if the event was dropped because the same crossing is
    /// already pending.
    ///
    /// A crossing that happens at exactly the same `x` as another pending
    /// crossing that shares one of its curves must be at the same point (because
    /// curves are graphs of functions), so the two are merged into a single
    /// [`Event::MultiIntersection`].
    pub fn push(&mut self, ev: Event) -> bool {
        let kind = ev.kind();
        if kind.rank() != EventKind::Intersection.rank() {
            let key = self.key(ev.x(), kind);
            self.events.insert(key, ev);
            return true;
        }

        let keys = Self::crossing_keys(ev.x());
        let new_curves = ev.curves();
        let already_pending = self.events.range(keys.clone()).any(|(_, pending)| {
            new_curves
                .iter()
                .all(|c| pending.curves().contains(c))
        });
        if already_pending {
            return false;
        }

        // Collect every simultaneous crossing that's connected to this one
        // through shared curves.
        let mut curves = new_curves.to_vec();
        let mut merged = Vec::new();
        loop {
            let next = self
                .events
                .range(keys.clone())
                .find(|(key, pending)| {
                    !merged.contains(*key) && pending.curves().iter().any(|c| curves.contains(c))
                })
                .map(|(key, _)| *key);
            let Some(key) = next else {
                break;
            };
            merged.push(key);
            curves.extend_from_slice(self.events[&key].curves());
        }

        if merged.is_empty() {
            let key = self.key(ev.x(), kind);
            self.events.insert(key, ev);
            return true;
        }

        curves.sort();
        curves.dedup();
        // unwrap: `merged` is non-empty
        let first_key = *merged.iter().min().unwrap();
        for key in &merged {
            self.events.remove(key);
        }
        tracing::debug!(x = ev.x(), ?curves, "merged simultaneous crossings");
        self.events.insert(
            first_key,
            Event::MultiIntersection {
                at: ev.at(),
                curves,
            },
        );
        true
    }

    /// Is there a pending crossing at exactly `x` that involves `curve`?
    pub fn has_crossing_at(&self, x: f64, curve: CurveIdx) -> bool {
        self.events
            .range(Self::crossing_keys(x))
            .any(|(_, ev)| ev.involves(curve))
    }

    /// Removes and returns the first event, or `None` if there are none left.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_first().map(|(_, ev)| ev)
    }

    /// The first event, without removing it.
    pub fn peek(&self) -> Option<&Event> {
        self.events.first_key_value().map(|(_, ev)| ev)
    }

    /// Removes all pending crossings between `c0` and `c1`, returning how many were removed.
    ///
    /// The relative order of the remaining events doesn't change.
    pub fn remove_crossings(&mut self, c0: CurveIdx, c1: CurveIdx) -> usize {
        let before = self.events.len();
        self.events.retain(|_, ev| !ev.is_crossing_of(c0, c1));
        before - self.events.len()
    }

    /// Iterates over the pending events, in the order they'll be processed.
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.values()
    }

    /// The number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Are there no more events?
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::geom::Point;

    fn start(x: f64, c: usize) -> Event {
        Event::Start {
            at: Point::new(x, 0.0),
            curve: CurveIdx(c),
        }
    }

    fn end(x: f64, c: usize) -> Event {
        Event::End {
            at: Point::new(x, 0.0),
            curve: CurveIdx(c),
        }
    }

    fn cross(x: f64, c0: usize, c1: usize) -> Event {
        Event::Intersection {
            at: Point::new(x, 0.0),
            curves: [CurveIdx(c0), CurveIdx(c1)],
        }
    }

    fn drain(q: &mut EventQueue) -> Vec<Event> {
        std::iter::from_fn(|| q.pop()).collect()
    }

    #[test]
    fn order() {
        let mut q = EventQueue::new();
        q.push(end(1.0, 0));
        q.push(cross(1.0, 2, 3));
        q.push(start(1.0, 1));
        q.push(start(-1.0, 0));
        q.push(start(1.0, 4));

        assert_eq!(
            drain(&mut q),
            vec![
                start(-1.0, 0),
                start(1.0, 1),
                start(1.0, 4),
                cross(1.0, 2, 3),
                end(1.0, 0),
            ]
        );
        assert!(q.pop().is_none());
    }

    #[test]
    fn duplicates() {
        let mut q = EventQueue::new();
        assert!(q.push(cross(1.0, 0, 1)));
        assert!(!q.push(cross(1.0, 1, 0)));
        // The same pair can cross more than once.
        assert!(q.push(cross(2.0, 0, 1)));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn remove_crossings() {
        let mut q = EventQueue::new();
        q.push(start(0.0, 5));
        q.push(cross(1.0, 0, 1));
        q.push(cross(2.0, 1, 2));
        q.push(cross(3.0, 1, 0));
        q.push(end(4.0, 0));

        assert_eq!(q.remove_crossings(CurveIdx(1), CurveIdx(0)), 2);
        assert_eq!(q.remove_crossings(CurveIdx(1), CurveIdx(0)), 0);
        assert_eq!(
            drain(&mut q),
            vec![start(0.0, 5), cross(2.0, 1, 2), end(4.0, 0)]
        );
    }

    #[test]
    fn simultaneous_crossings_merge() {
        let mut q = EventQueue::new();
        q.push(cross(0.0, 4, 5));
        q.push(cross(0.0, 2, 1));
        assert!(q.push(cross(0.0, 2, 3)));
        // Already part of the merged event.
        assert!(!q.push(cross(0.0, 1, 3)));

        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(cross(0.0, 4, 5)));
        assert_matches!(
            q.pop(),
            Some(Event::MultiIntersection { curves, .. })
                if curves == vec![CurveIdx(1), CurveIdx(2), CurveIdx(3)]
        );
    }

    #[test]
    fn crossings_at() {
        let mut q = EventQueue::new();
        q.push(start(1.0, 0));
        q.push(cross(1.0, 1, 2));
        q.push(cross(2.0, 0, 3));
        q.push(end(1.0, 3));

        assert!(q.has_crossing_at(1.0, CurveIdx(1)));
        assert!(q.has_crossing_at(1.0, CurveIdx(2)));
        // Starts and ends aren't crossings.
        assert!(!q.has_crossing_at(1.0, CurveIdx(0)));
        assert!(!q.has_crossing_at(1.0, CurveIdx(3)));
        assert!(!q.has_crossing_at(2.0, CurveIdx(1)));

        q.push(cross(1.0, 2, 4));
        assert!(q.has_crossing_at(1.0, CurveIdx(4)));
    }

    #[test]
    fn merge_is_transitive() {
        let mut q = EventQueue::new();
        q.push(cross(0.0, 0, 1));
        q.push(cross(0.0, 2, 3));
        q.push(cross(0.0, 1, 2));
        assert_eq!(q.len(), 1);
        assert_eq!(
            q.peek().map(Event::curves),
            Some([0, 1, 2, 3].map(CurveIdx).as_slice())
        );
    }
}
