use std::{fmt, ops::Deref, str::FromStr};

use derive_more::{Display, Error};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{pow, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseRatioError {
    #[display(fmt = "empty rational literal")]
    Empty,
    #[display(fmt = "invalid rational literal: {:?}", text)]
    Invalid { text: String },
    #[display(fmt = "zero denominator in {:?}", text)]
    ZeroDenominator { text: String },
}

/// Parses `"7"`, `"-6/5"` or `"1.25"` into an exact rational.
pub fn parse_ratio(text: &str) -> Result<BigRational, ParseRatioError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseRatioError::Empty);
    }
    let invalid = || ParseRatioError::Invalid {
        text: text.to_owned(),
    };

    if let Some((whole, frac)) = trimmed.split_once('.') {
        let (negative, whole) = match whole.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, whole.strip_prefix('+').unwrap_or(whole)),
        };
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) || whole.len() + frac.len() == 0 {
            return Err(invalid());
        }
        let digits = BigInt::from_str(&format!("{whole}{frac}")).map_err(|_| invalid())?;
        let value = BigRational::new(digits, pow(BigInt::from(10u8), frac.len()));
        return Ok(if negative { -value } else { value });
    }

    BigRational::from_str(trimmed).map_err(|_| match trimmed.split_once('/') {
        Some((_, denom)) if BigInt::from_str(denom).map_or(false, |denom| denom.is_zero()) => {
            ParseRatioError::ZeroDenominator {
                text: text.to_owned(),
            }
        }
        _ => invalid(),
    })
}

/// Anything that converts into an exact rational without loss.
///
/// Integer pairs are read as `(numer, denom)` and panic on a zero denominator, like `Ratio::new`.
pub trait IntoRatio {
    fn into_ratio(self) -> BigRational;
}

impl IntoRatio for BigRational {
    fn into_ratio(self) -> BigRational {
        self
    }
}

impl IntoRatio for &BigRational {
    fn into_ratio(self) -> BigRational {
        self.clone()
    }
}

impl IntoRatio for BigInt {
    fn into_ratio(self) -> BigRational {
        BigRational::from_integer(self)
    }
}

impl IntoRatio for ExactRatio {
    fn into_ratio(self) -> BigRational {
        self.0
    }
}

macro_rules! into_ratio_for_primitive {
    ($($int: ty),+) => {
        $(
            impl IntoRatio for $int {
                fn into_ratio(self) -> BigRational {
                    BigRational::from_integer(BigInt::from(self))
                }
            }

            impl IntoRatio for ($int, $int) {
                fn into_ratio(self) -> BigRational {
                    BigRational::new(BigInt::from(self.0), BigInt::from(self.1))
                }
            }
        )+
    };
}

into_ratio_for_primitive!(i32, i64, u32, u64);

/// `BigRational` that travels through serde as text (`"3/4"`).
///
/// Integer JSON numbers are accepted on input; floating point numbers are rejected because
/// they are not exact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ExactRatio(pub BigRational);

impl ExactRatio {
    pub fn into_inner(self) -> BigRational {
        self.0
    }
}

impl Deref for ExactRatio {
    type Target = BigRational;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<BigRational> for ExactRatio {
    fn from(value: BigRational) -> Self {
        Self(value)
    }
}

impl FromStr for ExactRatio {
    type Err = ParseRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_ratio(s).map(Self)
    }
}

impl fmt::Display for ExactRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ExactRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ExactRatio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExactRatioVisitor)
    }
}

struct ExactRatioVisitor;

impl<'de> de::Visitor<'de> for ExactRatioVisitor {
    type Value = ExactRatio;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a rational literal such as \"3/4\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ExactRatio(v.into_ratio()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ExactRatio(v.into_ratio()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Err(E::custom(format!(
            "floating point value {v} is not exact, write it as a string such as \"1/10\""
        )))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_ratio(v).map(ExactRatio).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ratio(numer: i64, denom: i64) -> BigRational {
        (numer, denom).into_ratio()
    }

    #[test]
    fn parses_integers_fractions_and_decimals() {
        assert_eq!(parse_ratio("16"), Ok(ratio(16, 1)));
        assert_eq!(parse_ratio(" -7 "), Ok(ratio(-7, 1)));
        assert_eq!(parse_ratio("6/5"), Ok(ratio(6, 5)));
        assert_eq!(parse_ratio("-34/20"), Ok(ratio(-17, 10)));
        assert_eq!(parse_ratio("1.25"), Ok(ratio(5, 4)));
        assert_eq!(parse_ratio("-0.5"), Ok(ratio(-1, 2)));
        assert_eq!(parse_ratio(".5"), Ok(ratio(1, 2)));
    }

    #[test]
    fn rejects_malformed_literals() {
        assert_eq!(parse_ratio("  "), Err(ParseRatioError::Empty));
        assert_eq!(
            parse_ratio("3/0"),
            Err(ParseRatioError::ZeroDenominator {
                text: "3/0".to_owned()
            })
        );
        for text in ["x1", "1/2/3", "1.-5", ".", "1e3"] {
            assert!(
                matches!(parse_ratio(text), Err(ParseRatioError::Invalid { .. })),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn fractions_and_integers_follow_bigrational_syntax() {
        for text in ["12", "-6/5", "+3/4", "100/-8"] {
            assert_eq!(parse_ratio(text).ok(), BigRational::from_str(text).ok(), "{text}");
        }
        assert_eq!(parse_ratio(" 9/12 "), Ok(ratio(3, 4)));
        assert_eq!(
            parse_ratio("-5/0"),
            Err(ParseRatioError::ZeroDenominator {
                text: "-5/0".to_owned()
            })
        );
        assert!(matches!(
            parse_ratio("1/x"),
            Err(ParseRatioError::Invalid { .. })
        ));
    }

    #[test]
    fn serde_uses_text_form() {
        let values: Vec<ExactRatio> = serde_json::from_str(r#"[12, "-6/5", "0.1", -3]"#).unwrap();
        assert_eq!(
            values,
            vec![
                ExactRatio(ratio(12, 1)),
                ExactRatio(ratio(-6, 5)),
                ExactRatio(ratio(1, 10)),
                ExactRatio(ratio(-3, 1)),
            ]
        );
        assert_eq!(
            serde_json::to_string(&values).unwrap(),
            r#"["12","-6/5","1/10","-3"]"#
        );
    }

    #[test]
    fn serde_rejects_floats() {
        let err = serde_json::from_str::<ExactRatio>("0.1").unwrap_err();
        assert!(err.to_string().contains("not exact"));
    }
}
