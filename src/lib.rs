pub mod error;
pub mod macros;
pub mod integers;
pub mod full_math;
pub mod q128;

pub use error::FixedPointError;
pub use full_math::{div_rounding_up, mul_div, mul_div_rounding_up};
pub use integers::{I256, MASK_256, U256, U512};
pub use q128::SQ128;
