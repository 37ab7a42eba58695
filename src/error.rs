use core::fmt;

/// Error type for the library.
///
/// Every failure is local to a single engine invocation: a call that returns
/// one of these has left the calculator state exactly as it was before the
/// call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Division or inversion where the divisor is zero. Also raised for a
    /// zero modulus.
    DivisionByZero,
    /// Square root of a negative value.
    SquareRootOfNegative(String),
    /// A bitwise or shift operation was applied to a value with a fractional
    /// part. Operands are never truncated implicitly.
    NonIntegralOperand(String),
    /// A shift amount that is negative or too large to represent.
    ShiftAmountOutOfRange(String),
    /// A string that could not be parsed as a decimal number.
    InvalidDecimalString(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::SquareRootOfNegative(ref num) => {
                write!(f, "Square root is undefined for negative value: {}", num)
            }
            Self::NonIntegralOperand(ref num) => {
                write!(f, "Operation requires an integral operand: {}", num)
            }
            Self::ShiftAmountOutOfRange(ref num) => {
                write!(f, "Shift amount out of range: {}", num)
            }
            Self::InvalidDecimalString(ref s) => write!(f, "Invalid decimal string: {}", s),
        }
    }
}
