//! Finding where two curves cross.

use arrayvec::ArrayVec;

use crate::{
    curve::{Curve, Quadratic},
    geom::Point,
};

/// Finds the places strictly to the right of `x` where two curves meet.
///
/// Both curves must be defined at a meeting place (domains are closed
/// intervals). Curves that have the same quadratic and linear coefficients are
/// parallel, or else they overlap on an interval; in either case there are no
/// isolated meeting places, and we return nothing.
///
/// The result is sorted, and it doesn't depend on the order of the arguments.
pub fn crossings(c0: &Curve, c1: &Curve, x: f64) -> ArrayVec<f64, 2> {
    let mut ret = ArrayVec::new();
    let accept = |t: f64| t > x && c0.domain_contains(t) && c1.domain_contains(t);
    // Adding zero turns -0.0 into 0.0, which prints more nicely.
    let mut push = |t: f64| {
        if accept(t) {
            ret.push(t + 0.0);
        }
    };

    if c0.a() == c1.a() {
        if c0.b() == c1.b() {
            return ret;
        }
        push((c1.c() - c0.c()) / (c0.b() - c1.b()));
    } else {
        for t in Quadratic::difference(c0, c1).roots() {
            push(t);
        }
    }
    ret
}

/// Do two curves meet without crossing?
///
/// This happens when one of them is a parabola and the other is tangent to
/// it, which is when their difference has a repeated root. Where they touch,
/// the curves don't change places in the active set.
pub fn touches(c0: &Curve, c1: &Curve) -> bool {
    c0.a() != c1.a() && Quadratic::difference(c0, c1).roots().len() == 1
}

/// The point where two curves meet at `x`.
///
/// The height is evaluated on the curve with the smaller index, so that the
/// point doesn't depend on the order of the arguments.
pub fn meeting_point(c0: &Curve, c1: &Curve, x: f64) -> Point {
    let c = if c0.id() <= c1.id() { c0 } else { c1 };
    Point::new(x, c.eval(x) + 0.0)
}
