use derive_more::Display;
use num_traits::Zero;
use ordered_float::OrderedFloat;

/// A totally ordered, nonnegative path cost.
///
/// Edge weights are `f64`, but frontier ranks need `Ord`. `OrderedFloat`
/// gives us that while keeping plain float arithmetic.
#[derive(Copy, Clone, Default, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[display("{_0}")]
pub struct Cost(pub OrderedFloat<f64>);

impl Cost {
    #[inline(always)]
    #[must_use]
    pub fn new(f: f64) -> Self {
        Self(OrderedFloat(f))
    }

    #[inline(always)]
    #[must_use]
    pub fn get(&self) -> f64 {
        self.0.into_inner()
    }

    #[inline(always)]
    #[must_use]
    pub fn infinity() -> Self {
        Self(OrderedFloat(f64::INFINITY))
    }
}

impl std::ops::Add for Cost {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Zero for Cost {
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.0 == OrderedFloat(0.0)
    }
    #[inline(always)]
    fn zero() -> Self {
        Self(OrderedFloat(0.0))
    }
}
