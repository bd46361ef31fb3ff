//! Ordering for floats.

/// A wrapper for `f64` that implements `Ord`.
///
/// Unlike the more principled wrappers in the `ordered_float` crate, this
/// one doesn't order NaNs (they compare equal to everything) and doesn't guard
/// against them on construction. Curve inputs are validated up front, so any
/// NaNs we see come from overflowing arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheapOrderedFloat(f64);

// Now comes the fishy stuff.
impl Eq for CheapOrderedFloat {}

impl PartialOrd for CheapOrderedFloat {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CheapOrderedFloat {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 < other.0 {
            std::cmp::Ordering::Less
        } else if self.0 > other.0 {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    }
}

impl From<f64> for CheapOrderedFloat {
    fn from(value: f64) -> Self {
        CheapOrderedFloat(value)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    // Kind of like Arbitrary, but
    // - it's a local trait, so we can impl it for whatever we want, and
    // - it only returns "reasonable" values.
    pub trait Reasonable {
        type Strategy: Strategy<Value = Self>;
        fn reasonable() -> Self::Strategy;
    }

    impl<S: Reasonable, T: Reasonable> Reasonable for (S, T) {
        type Strategy = (S::Strategy, T::Strategy);

        fn reasonable() -> Self::Strategy {
            (S::reasonable(), T::reasonable())
        }
    }

    impl Reasonable for f64 {
        type Strategy = BoxedStrategy<f64>;

        fn reasonable() -> Self::Strategy {
            (-1e3..1e3).boxed()
        }
    }

    #[test]
    fn infinities() {
        let neg = CheapOrderedFloat::from(f64::NEG_INFINITY);
        let zero = CheapOrderedFloat::from(0.0);
        assert!(neg < zero);
        assert_eq!(
            CheapOrderedFloat::from(-0.0).cmp(&zero),
            std::cmp::Ordering::Equal
        );
    }

    proptest! {
        #[test]
        fn agrees_with_partial_cmp(x in f64::reasonable(), y in f64::reasonable()) {
            let ord = CheapOrderedFloat::from(x).cmp(&CheapOrderedFloat::from(y));
            prop_assert_eq!(Some(ord), x.partial_cmp(&y));
        }
    }
}
