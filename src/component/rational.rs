use std::fmt;

use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

lazy_static! {
    static ref ZERO: BigInt = Zero::zero();
}

/// Exact rational for text output: `7/3`, or `2 1/3` in mixed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rational<'a> {
    pub ratio: &'a BigRational,
    pub mixed: bool,
}

impl<'a> Rational<'a> {
    pub fn new(ratio: &'a BigRational) -> Self {
        Self {
            ratio,
            mixed: false,
        }
    }

    pub fn mixed(ratio: &'a BigRational) -> Self {
        Self { ratio, mixed: true }
    }
}

impl fmt::Display for Rational<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ratio = self.ratio;
        let text = if ratio.is_integer() {
            ratio.to_integer().to_string()
        } else if self.mixed && !ratio.trunc().is_zero() {
            let whole = ratio.trunc().to_integer();
            let frac = ratio.fract();
            format!(
                "{whole} {numer}/{denom}",
                numer = frac.numer().abs(),
                denom = frac.denom()
            )
        } else {
            format!(
                "{sign}{numer}/{denom}",
                sign = if ratio.numer() < &ZERO { "-" } else { "" },
                numer = ratio.numer().abs(),
                denom = ratio.denom()
            )
        };
        f.pad(&text)
    }
}
