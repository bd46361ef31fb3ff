//! The active set: curves crossing the sweep line, from top to bottom.

use std::cmp::Ordering;

use crate::{
    curve::{CurveIdx, Curves},
    num::CheapOrderedFloat,
};

/// Compares two curves at the sweep position `x`; `Less` means that `p` is above `q`.
///
/// Curves are compared by their cached heights. Curves that meet at `x` are
/// compared by what they do just after `x`: the one that rises faster is on
/// top. If they agree to second order as well, the lower index goes first,
/// so that the result is a strict order.
fn cmp_at(curves: &Curves, x: f64, p: CurveIdx, q: CurveIdx) -> Ordering {
    let (cp, cq) = (&curves[p], &curves[q]);
    let desc = |p: f64, q: f64| CheapOrderedFloat::from(q).cmp(&CheapOrderedFloat::from(p));
    desc(cp.current_y(), cq.current_y())
        .then_with(|| desc(cp.slope(x), cq.slope(x)))
        .then_with(|| desc(cp.a(), cq.a()))
        .then_with(|| p.cmp(&q))
}

/// The curves crossing the sweep line, ordered from top to bottom.
///
/// The ordering key (each curve's `current_y`) changes as the sweep moves,
/// so we don't keep the curves in a search tree. Instead, the vector order is
/// the source of truth: it's established by comparison when a curve is
/// inserted (after refreshing all the heights) and afterwards only changes by
/// explicit swaps when curves cross.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct ActiveSet {
    order: Vec<CurveIdx>,
}

impl ActiveSet {
    /// Creates an empty active set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the cached height of every active curve at `x`.
    pub fn refresh_all(&self, x: f64, curves: &mut Curves) {
        for &idx in &self.order {
            curves.get_mut(idx).refresh(x);
        }
    }

    /// Inserts a curve, returning its position.
    ///
    /// The cached heights of `idx` and of every active curve should be
    /// current as of `x`.
    pub fn insert(&mut self, idx: CurveIdx, x: f64, curves: &Curves) -> usize {
        debug_assert!(!self.contains(idx), "{idx:?} is already active");
        let pos = self
            .order
            .partition_point(|&other| cmp_at(curves, x, other, idx) == Ordering::Less);
        self.order.insert(pos, idx);
        pos
    }

    /// Removes a curve, returning false if it wasn't there.
    pub fn remove(&mut self, idx: CurveIdx) -> bool {
        if let Some(pos) = self.position(idx) {
            self.order.remove(pos);
            true
        } else {
            false
        }
    }

    /// Exchanges the positions of two active curves.
    ///
    /// Returns false (and does nothing) unless both curves are active.
    pub fn swap(&mut self, c0: CurveIdx, c1: CurveIdx) -> bool {
        match (self.position(c0), self.position(c1)) {
            (Some(i), Some(j)) => {
                self.order.swap(i, j);
                true
            }
            _ => false,
        }
    }

    /// The position of `idx`, counting from the top.
    pub fn position(&self, idx: CurveIdx) -> Option<usize> {
        self.order.iter().position(|&c| c == idx)
    }

    /// Is `idx` currently crossing the sweep line?
    pub fn contains(&self, idx: CurveIdx) -> bool {
        self.order.contains(&idx)
    }

    /// The curve immediately above `idx`.
    pub fn predecessor(&self, idx: CurveIdx) -> Option<CurveIdx> {
        let pos = self.position(idx)?;
        pos.checked_sub(1).map(|p| self.order[p])
    }

    /// The curve immediately below `idx`.
    pub fn successor(&self, idx: CurveIdx) -> Option<CurveIdx> {
        let pos = self.position(idx)?;
        self.order.get(pos + 1).copied()
    }

    /// Are `c0` and `c1` next to each other (in either order)?
    pub fn adjacent(&self, c0: CurveIdx, c1: CurveIdx) -> bool {
        self.order
            .windows(2)
            .any(|w| (w[0] == c0 && w[1] == c1) || (w[0] == c1 && w[1] == c0))
    }

    /// The active curves, from top to bottom.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = CurveIdx> + '_ {
        self.order.iter().copied()
    }

    /// The active curves, from top to bottom.
    pub fn as_slice(&self) -> &[CurveIdx] {
        &self.order
    }

    /// The number of active curves.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Is the sweep line empty?
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveDesc;

    fn curves(descs: &[CurveDesc]) -> Curves {
        Curves::from_descs(descs.iter().copied()).unwrap()
    }

    fn insert_all(curves: &mut Curves, x: f64) -> ActiveSet {
        let mut active = ActiveSet::new();
        for idx in curves.indices().collect::<Vec<_>>() {
            curves.get_mut(idx).refresh(x);
            active.insert(idx, x, curves);
        }
        active
    }

    #[test]
    fn top_to_bottom() {
        let mut cs = curves(&[
            CurveDesc::line(0.0, 1.0, -1.0, 1.0),
            CurveDesc::line(0.0, 3.0, -1.0, 1.0),
            CurveDesc::line(0.0, 2.0, -1.0, 1.0),
        ]);
        let active = insert_all(&mut cs, 0.0);
        assert_eq!(active.as_slice(), &[CurveIdx(1), CurveIdx(2), CurveIdx(0)]);
        assert_eq!(active.predecessor(CurveIdx(2)), Some(CurveIdx(1)));
        assert_eq!(active.successor(CurveIdx(2)), Some(CurveIdx(0)));
        assert_eq!(active.predecessor(CurveIdx(1)), None);
        assert_eq!(active.successor(CurveIdx(0)), None);
        assert!(active.adjacent(CurveIdx(0), CurveIdx(2)));
        assert!(!active.adjacent(CurveIdx(0), CurveIdx(1)));
    }

    #[test]
    fn ties_look_ahead() {
        // All three pass through the origin. Just to the right of it, the
        // steep line is on top, then the parabola, then the flat line.
        let mut cs = curves(&[
            CurveDesc::line(0.0, 0.0, 0.0, 1.0),
            CurveDesc::new(1.0, 0.0, 0.0, 0.0, 1.0),
            CurveDesc::line(1.0, 0.0, 0.0, 1.0),
        ]);
        let active = insert_all(&mut cs, 0.0);
        assert_eq!(active.as_slice(), &[CurveIdx(2), CurveIdx(1), CurveIdx(0)]);

        // Identical curves fall back to their indices.
        let mut cs = curves(&[
            CurveDesc::line(1.0, 0.0, 0.0, 1.0),
            CurveDesc::line(1.0, 0.0, 0.0, 1.0),
        ]);
        let active = insert_all(&mut cs, 0.5);
        assert_eq!(active.as_slice(), &[CurveIdx(0), CurveIdx(1)]);
    }

    #[test]
    fn swap_and_remove() {
        let mut cs = curves(&[
            CurveDesc::line(0.0, 1.0, -1.0, 1.0),
            CurveDesc::line(0.0, 0.0, -1.0, 1.0),
            CurveDesc::line(0.0, -1.0, -1.0, 1.0),
        ]);
        let mut active = insert_all(&mut cs, 0.0);
        assert!(active.swap(CurveIdx(1), CurveIdx(2)));
        assert_eq!(active.as_slice(), &[CurveIdx(0), CurveIdx(2), CurveIdx(1)]);

        assert!(active.remove(CurveIdx(2)));
        assert!(!active.remove(CurveIdx(2)));
        assert!(!active.swap(CurveIdx(2), CurveIdx(0)));
        assert_eq!(active.as_slice(), &[CurveIdx(0), CurveIdx(1)]);
        assert_eq!(active.successor(CurveIdx(2)), None);
    }

    #[test]
    fn refresh_before_insert() {
        // The first curve starts above the second, but they cross at x = 0.
        let mut cs = curves(&[
            CurveDesc::line(-1.0, 0.0, -2.0, 2.0),
            CurveDesc::line(0.0, -0.5, -2.0, 2.0),
            CurveDesc::line(0.0, -0.75, -2.0, 2.0),
        ]);
        let mut active = ActiveSet::new();
        for idx in [CurveIdx(0), CurveIdx(1)] {
            cs.get_mut(idx).refresh(-2.0);
            active.insert(idx, -2.0, &cs);
        }
        assert_eq!(active.as_slice(), &[CurveIdx(0), CurveIdx(1)]);

        // Pretend the crossing of 0 and 1 was processed, then insert 2 at x = 1.
        active.swap(CurveIdx(0), CurveIdx(1));
        active.refresh_all(1.0, &mut cs);
        cs.get_mut(CurveIdx(2)).refresh(1.0);
        assert_eq!(active.insert(CurveIdx(2), 1.0, &cs), 1);
        assert_eq!(active.as_slice(), &[CurveIdx(1), CurveIdx(2), CurveIdx(0)]);
    }
}
