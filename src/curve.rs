//! Input curves: line segments and parabolic arcs that are graphs of functions of `x`.

use arrayvec::ArrayVec;
use kurbo::QuadBez;

use crate::{geom::Point, Error, InvalidCurve};

/// An index into our curve arena.
///
/// Curves are identified by their position in the input, so two curves with
/// identical coefficients are still different curves. The index doubles as
/// the curve id reported by the `status` instruction.
#[derive(
    Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct CurveIdx(pub usize);

impl std::fmt::Debug for CurveIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c_{}", self.0)
    }
}

impl std::fmt::Display for CurveIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five numbers describing a curve: `y = a x^2 + b x + c` for `x` in `t1..=t2`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveDesc {
    /// Quadratic coefficient. Zero for line segments.
    pub a: f64,
    /// Linear coefficient.
    pub b: f64,
    /// Constant coefficient.
    pub c: f64,
    /// Start of the domain.
    pub t1: f64,
    /// End of the domain. Must be strictly larger than `t1`.
    pub t2: f64,
}

impl CurveDesc {
    /// A parabolic arc (or a line segment, if `a` is zero).
    pub fn new(a: f64, b: f64, c: f64, t1: f64, t2: f64) -> Self {
        CurveDesc { a, b, c, t1, t2 }
    }

    /// The line segment `y = b x + c` over `t1..=t2`.
    pub fn line(b: f64, c: f64, t1: f64, t2: f64) -> Self {
        CurveDesc::new(0.0, b, c, t1, t2)
    }

    /// Checks that all the numbers are finite and that the domain is non-empty.
    pub fn validate(&self) -> Result<(), InvalidCurve> {
        let CurveDesc { a, b, c, t1, t2 } = *self;
        if ![a, b, c, t1, t2].iter().all(|v| v.is_finite()) {
            return Err(InvalidCurve::NonFinite);
        }
        if t1 >= t2 {
            return Err(InvalidCurve::EmptyDomain);
        }
        Ok(())
    }
}

/// A curve taking part in the sweep.
///
/// Everything but `current_y` is fixed at construction. `current_y` caches
/// the curve's height at the sweep position where it was last refreshed, and
/// it's what the active set is ordered by.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Curve {
    id: CurveIdx,
    desc: CurveDesc,
    current_y: f64,
}

impl Curve {
    fn new(id: CurveIdx, desc: CurveDesc) -> Self {
        let current_y = eval(&desc, desc.t1);
        Curve {
            id,
            desc,
            current_y,
        }
    }

    /// This curve's index in its arena.
    pub fn id(&self) -> CurveIdx {
        self.id
    }

    /// The numbers this curve was built from.
    pub fn desc(&self) -> &CurveDesc {
        &self.desc
    }

    /// Quadratic coefficient.
    pub fn a(&self) -> f64 {
        self.desc.a
    }

    /// Linear coefficient.
    pub fn b(&self) -> f64 {
        self.desc.b
    }

    /// Constant coefficient.
    pub fn c(&self) -> f64 {
        self.desc.c
    }

    /// Start of the domain.
    pub fn t1(&self) -> f64 {
        self.desc.t1
    }

    /// End of the domain.
    pub fn t2(&self) -> f64 {
        self.desc.t2
    }

    /// The cached height, as of the last refresh.
    pub fn current_y(&self) -> f64 {
        self.current_y
    }

    pub(crate) fn set_current_y(&mut self, y: f64) {
        self.current_y = y;
    }

    /// Our `y` coordinate at the given `x` coordinate.
    ///
    /// This doesn't check the domain.
    pub fn eval(&self, x: f64) -> f64 {
        eval(&self.desc, x)
    }

    /// Evaluates at `x` and caches the result as the current height.
    pub fn refresh(&mut self, x: f64) -> f64 {
        self.current_y = self.eval(x);
        self.current_y
    }

    /// The derivative `dy/dx` at `x`.
    pub fn slope(&self, x: f64) -> f64 {
        2.0 * self.desc.a * x + self.desc.b
    }

    /// Is `x` in the closed interval `t1..=t2`?
    pub fn domain_contains(&self, x: f64) -> bool {
        (self.desc.t1..=self.desc.t2).contains(&x)
    }

    /// Is this a straight line segment?
    pub fn is_linear(&self) -> bool {
        self.desc.a == 0.0
    }

    /// The leftmost point of this curve.
    pub fn start(&self) -> Point {
        Point::new(self.desc.t1, self.eval(self.desc.t1))
    }

    /// The rightmost point of this curve.
    pub fn end(&self) -> Point {
        Point::new(self.desc.t2, self.eval(self.desc.t2))
    }

    /// The quadratic Bézier tracing exactly this curve.
    ///
    /// The middle control point sits above the middle of the domain, on the
    /// tangent line at the start, so the Bézier is parametrized linearly in `x`.
    pub fn to_kurbo(&self) -> QuadBez {
        let t1 = self.desc.t1;
        let mid = (t1 + self.desc.t2) / 2.0;
        let p1 = Point::new(mid, self.eval(t1) + self.slope(t1) * (mid - t1));
        QuadBez::new(
            self.start().to_kurbo(),
            p1.to_kurbo(),
            self.end().to_kurbo(),
        )
    }
}

fn eval(desc: &CurveDesc, x: f64) -> f64 {
    desc.a * x * x + desc.b * x + desc.c
}

/// A quadratic polynomial `c2 x^2 + c1 x + c0`.
///
/// We use this for the difference between two curves, whose roots are the
/// places where the curves meet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadratic {
    /// The coefficient of `x^2`.
    pub c2: f64,
    /// The coefficient of `x`.
    pub c1: f64,
    /// The constant coefficient.
    pub c0: f64,
}

impl Quadratic {
    /// The difference `first - second`, normalized so that the leading coefficient
    /// is non-negative.
    ///
    /// Because IEEE subtraction is antisymmetric, `difference(p, q)` and
    /// `difference(q, p)` are bit-for-bit the same (up to the sign of zero).
    pub fn difference(first: &Curve, second: &Curve) -> Self {
        let q = Quadratic {
            c2: first.a() - second.a(),
            c1: first.b() - second.b(),
            c0: first.c() - second.c(),
        };
        if q.c2 < 0.0 {
            -q
        } else {
            q
        }
    }

    /// Evaluate at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        self.c2 * x * x + self.c1 * x + self.c0
    }

    /// The discriminant `c1^2 - 4 c2 c0`.
    pub fn discriminant(&self) -> f64 {
        self.c1 * self.c1 - 4.0 * self.c2 * self.c0
    }

    /// The real roots of a genuinely quadratic polynomial, smallest first.
    ///
    /// A repeated root is only returned once. If `c2` is zero the results
    /// are infinite or NaN; linear polynomials are the caller's job.
    pub fn roots(&self) -> ArrayVec<f64, 2> {
        let mut ret = ArrayVec::new();
        let d = self.discriminant();
        if d < 0.0 {
            return ret;
        }

        let sqrt_d = d.sqrt();
        let x0 = (-self.c1 - sqrt_d) / (2.0 * self.c2);
        let x1 = (-self.c1 + sqrt_d) / (2.0 * self.c2);
        ret.push(x0);
        if x0 != x1 {
            ret.push(x1);
        }
        ret
    }
}

impl std::ops::Neg for Quadratic {
    type Output = Quadratic;

    fn neg(self) -> Self::Output {
        Quadratic {
            c2: -self.c2,
            c1: -self.c1,
            c0: -self.c0,
        }
    }
}

/// An arena of curves.
///
/// Curves are indexed by [`CurveIdx`] and can be retrieved by indexing (i.e. with square brackets).
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct Curves {
    curves: Vec<Curve>,
}

impl Curves {
    /// Builds an arena from curve descriptions, checking each of them.
    pub fn from_descs(descs: impl IntoIterator<Item = CurveDesc>) -> Result<Self, Error> {
        let mut ret = Curves::default();
        for desc in descs {
            ret.push(desc)?;
        }
        Ok(ret)
    }

    /// Adds a curve, returning its index.
    pub fn push(&mut self, desc: CurveDesc) -> Result<CurveIdx, Error> {
        let idx = CurveIdx(self.curves.len());
        desc.validate()
            .map_err(|reason| Error::InvalidCurve { idx: idx.0, reason })?;
        self.curves.push(Curve::new(idx, desc));
        Ok(idx)
    }

    /// The number of curves in this arena.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Are there no curves at all?
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Iterate over all indices that can be used to index into this arena.
    pub fn indices(&self) -> impl Iterator<Item = CurveIdx> {
        (0..self.curves.len()).map(CurveIdx)
    }

    /// Iterate over all curves in this arena.
    pub fn iter(&self) -> impl Iterator<Item = &Curve> {
        self.curves.iter()
    }

    pub(crate) fn get_mut(&mut self, idx: CurveIdx) -> &mut Curve {
        &mut self.curves[idx.0]
    }
}

impl std::ops::Index<CurveIdx> for Curves {
    type Output = Curve;

    fn index(&self, index: CurveIdx) -> &Self::Output {
        &self.curves[index.0]
    }
}
