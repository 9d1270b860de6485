use std::{cmp::Ordering, fmt};

use derive_more::IsVariant;
use num_integer::Integer;
use num_rational::Ratio;

/// A ratio extended with positive infinity.
///
/// `Inf` compares greater than every finite value and equal to itself, so the type has a
/// total order. A running minimum that starts at `Inf` is replaced by the first finite candidate.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum RatioExt<T: Clone + Integer> {
    Finite(Ratio<T>),
    Inf,
}

impl<T, U> From<T> for RatioExt<U>
where
    Ratio<U>: From<T>,
    U: Clone + Integer,
{
    fn from(value: T) -> Self {
        Self::Finite(value.into())
    }
}

impl<T> Ord for RatioExt<T>
where
    T: Clone + Integer,
{
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RatioExt::Finite(lhs), RatioExt::Finite(rhs)) => lhs.cmp(rhs),
            (RatioExt::Inf, RatioExt::Inf) => Ordering::Equal,
            (RatioExt::Inf, RatioExt::Finite(_)) => Ordering::Greater,
            (RatioExt::Finite(_), RatioExt::Inf) => Ordering::Less,
        }
    }
}

impl<T> PartialOrd for RatioExt<T>
where
    T: Clone + Integer,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> fmt::Display for RatioExt<T>
where
    T: fmt::Display + Integer + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(ratio) => write!(f, "{ratio}"),
            Self::Inf => write!(f, "Inf"),
        }
    }
}
