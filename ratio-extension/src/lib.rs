mod ratio_ext;
mod text;

use num_bigint::BigInt;
pub use ratio_ext::RatioExt;
pub use text::{parse_ratio, ExactRatio, IntoRatio, ParseRatioError};

pub type BigRationalExt = RatioExt<BigInt>;
