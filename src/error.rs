use thiserror::Error;

/// Errors returned by the fixed-point and full-precision math operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedPointError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("result does not fit in 256 bits")]
    Overflow,

    #[error("value is outside the representable Q128.128 range")]
    OutOfRange,

    #[error("input float is NaN or infinite")]
    InvalidFloat,

    #[error("integer conversion out of range")]
    IntegerConversionError,
}
