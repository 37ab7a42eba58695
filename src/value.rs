use crate::Error;
use bigdecimal::rounding::RoundingMode;
use bigdecimal::BigDecimal;
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use core::str::FromStr;
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};

/// Number of fractional digits kept by inexact divisions (divide, invert,
/// square root). Results are rounded half-up to this scale and then have any
/// trailing zeros stripped.
pub const DIVISION_SCALE: i64 = 16;

/// `Value` is an immutable, arbitrary-precision, arbitrary-scale signed
/// decimal number. It is the numeric currency of the whole engine: digit
/// entry accumulates into one, the operation stack captures them as left
/// operands, and the display engine renders them.
///
/// Exact operations (addition, subtraction, multiplication, negation,
/// remainder, percent) never round. Inexact operations round half-up to
/// [`DIVISION_SCALE`] fractional digits and strip trailing zeros.
///
/// A value that compares equal to zero is always stored as an unsigned zero
/// with scale 0, so a display can never show `-0`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Value(BigDecimal);

impl Value {
    /// Returns the additive identity.
    pub fn zero() -> Value {
        Value(BigDecimal::zero())
    }

    /// Returns the multiplicative identity.
    pub fn one() -> Value {
        Value(BigDecimal::from(1))
    }

    /// The number of fractional digits in this value's representation.
    /// Negative when the representation carries implied trailing zeros
    /// (e.g. a normalized `100` may be held as `1e2`).
    pub fn scale(&self) -> i64 {
        self.0.as_bigint_and_exponent().1
    }

    /// True when the representation carries fractional digits. Note that
    /// this inspects the representation, not the numeric value: a typed
    /// `2.0` has a fraction even though it is numerically integral.
    pub fn has_fraction(&self) -> bool {
        self.scale() > 0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// Collapses the representation: zero becomes the unsigned scale-0 zero,
    /// anything else has trailing fractional zeros stripped. The scale never
    /// drops below zero, so an integer stays a plain integer rather than a
    /// mantissa-with-exponent form. Applied to every arithmetic result;
    /// digit entry deliberately bypasses it so a typed `2.50` keeps its
    /// scale for backspace to walk.
    pub(crate) fn normalize(self) -> Value {
        if self.0.is_zero() {
            return Value(BigDecimal::zero());
        }
        let (mantissa, scale) = self.0.normalized().as_bigint_and_exponent();
        if scale < 0 {
            Value(BigDecimal::new(mantissa * pow10((-scale) as u64), 0))
        } else {
            Value(BigDecimal::new(mantissa, scale))
        }
    }

    /// Exact multiplication by a power of ten via a scale adjustment.
    pub(crate) fn mul_pow10(&self, exp: i64) -> Value {
        let (mantissa, scale) = self.0.as_bigint_and_exponent();
        Value(BigDecimal::new(mantissa, scale - exp))
    }

    /// Rounds toward negative infinity to the given number of fractional
    /// digits. Used by backspace, which the engine defines as a floor.
    pub(crate) fn floor_to_scale(&self, scale: i64) -> Value {
        Value(self.0.with_scale_round(scale, RoundingMode::Floor))
    }

    /// Division rounded half-up to [`DIVISION_SCALE`] fractional digits,
    /// with trailing zeros stripped from the result.
    ///
    /// The quotient is computed from the operands' mantissas so precision
    /// never depends on the operands' magnitude.
    pub fn div(&self, divisor: &Value) -> Result<Value, Error> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let (a_mantissa, a_scale) = self.0.as_bigint_and_exponent();
        let (b_mantissa, b_scale) = divisor.0.as_bigint_and_exponent();

        // self / divisor scaled to DIVISION_SCALE fractional digits:
        //   a * 10^(DIVISION_SCALE + b_scale - a_scale) / b
        let shift = DIVISION_SCALE + b_scale - a_scale;
        let (numerator, denominator) = if shift >= 0 {
            (a_mantissa * pow10(shift as u64), b_mantissa)
        } else {
            (a_mantissa, b_mantissa * pow10((-shift) as u64))
        };

        let negative = (numerator.sign() == Sign::Minus) != (denominator.sign() == Sign::Minus);
        let numerator = numerator.magnitude().clone();
        let denominator = denominator.magnitude().clone();
        let mut quotient = &numerator / &denominator;
        let remainder = numerator - &quotient * &denominator;
        if remainder * 2u32 >= denominator {
            quotient += 1u32;
        }
        let mut mantissa = BigInt::from(quotient);
        if negative {
            mantissa = -mantissa;
        }
        Ok(Value(BigDecimal::new(mantissa, DIVISION_SCALE)).normalize())
    }

    /// The multiplicative inverse `1 / self`.
    pub fn invert(&self) -> Result<Value, Error> {
        Value::one().div(self)
    }

    /// The decimal remainder of `self / divisor`. The sign follows the
    /// dividend.
    pub fn modulo(&self, divisor: &Value) -> Result<Value, Error> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Value(&self.0 % &divisor.0).normalize())
    }

    /// `(self * other) / 100`, exact.
    pub fn percent(&self, other: &Value) -> Value {
        (self * other).mul_pow10(-2).normalize()
    }

    /// `self * self`, exact.
    pub fn square(&self) -> Value {
        (self * self).normalize()
    }

    /// The principal non-negative square root, rounded half-up to
    /// [`DIVISION_SCALE`] fractional digits with trailing zeros stripped.
    pub fn sqrt(&self) -> Result<Value, Error> {
        if self.is_negative() {
            return Err(Error::SquareRootOfNegative(self.to_string()));
        }
        // `sqrt` only returns None for negative input, which is ruled out
        // above; fall back to zero rather than panic if that ever changes.
        let root = self.0.sqrt().unwrap_or_else(BigDecimal::zero);
        Ok(Value(root.with_scale_round(DIVISION_SCALE, RoundingMode::HalfUp)).normalize())
    }

    /// The exact integer this value represents. Values with a fractional
    /// part are rejected, never truncated.
    pub(crate) fn to_bigint(&self) -> Result<BigInt, Error> {
        let (mantissa, scale) = self.0.normalized().as_bigint_and_exponent();
        if scale > 0 && !mantissa.is_zero() {
            return Err(Error::NonIntegralOperand(self.to_string()));
        }
        if scale < 0 {
            Ok(mantissa * pow10((-scale) as u64))
        } else {
            Ok(mantissa)
        }
    }

    pub(crate) fn from_bigint(int: BigInt) -> Value {
        Value(BigDecimal::new(int, 0))
    }

    /// Bitwise AND over the integer plane (two's complement for negatives).
    pub fn bit_and(&self, other: &Value) -> Result<Value, Error> {
        Ok(Value::from_bigint(self.to_bigint()? & other.to_bigint()?))
    }

    /// Bitwise OR over the integer plane.
    pub fn bit_or(&self, other: &Value) -> Result<Value, Error> {
        Ok(Value::from_bigint(self.to_bigint()? | other.to_bigint()?))
    }

    /// Bitwise XOR over the integer plane.
    pub fn bit_xor(&self, other: &Value) -> Result<Value, Error> {
        Ok(Value::from_bigint(self.to_bigint()? ^ other.to_bigint()?))
    }

    /// Bitwise NOT over the integer plane: `!x == -x - 1` in two's
    /// complement.
    pub fn bit_not(&self) -> Result<Value, Error> {
        Ok(Value::from_bigint(-self.to_bigint()? - 1))
    }

    /// Arithmetic left shift of the integer plane by `amount` bits.
    pub fn shift_left(&self, amount: &Value) -> Result<Value, Error> {
        Ok(Value::from_bigint(self.to_bigint()? << shift_amount(amount)?))
    }

    /// Arithmetic right shift of the integer plane by `amount` bits
    /// (rounds toward negative infinity for negative values).
    pub fn shift_right(&self, amount: &Value) -> Result<Value, Error> {
        Ok(Value::from_bigint(self.to_bigint()? >> shift_amount(amount)?))
    }
}

fn pow10(exp: u64) -> BigInt {
    BigInt::from(10u32).pow(exp as u32)
}

fn shift_amount(amount: &Value) -> Result<u64, Error> {
    amount
        .to_bigint()?
        .to_u64()
        .ok_or_else(|| Error::ShiftAmountOutOfRange(amount.to_string()))
}

impl Default for Value {
    fn default() -> Value {
        Value::zero()
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Value {
        Value(BigDecimal::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value(BigDecimal::from(n))
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Value, Error> {
        BigDecimal::from_str(s)
            .map(Value)
            .map_err(|_| Error::InvalidDecimalString(s.to_string()))
    }
}

/// Plain decimal notation, always: digits, an optional leading `-` and an
/// embedded point when the scale calls for one. Scientific notation is never
/// produced, whatever the magnitude.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mantissa, scale) = self.0.as_bigint_and_exponent();
        let digits = mantissa.magnitude().to_str_radix(10);
        let mut rep = String::with_capacity(digits.len() + 2);
        if mantissa.sign() == Sign::Minus {
            rep.push('-');
        }
        if scale <= 0 {
            rep.push_str(&digits);
            for _ in 0..-scale {
                rep.push('0');
            }
        } else {
            let scale = scale as usize;
            if digits.len() > scale {
                rep.push_str(&digits[..digits.len() - scale]);
                rep.push('.');
                rep.push_str(&digits[digits.len() - scale..]);
            } else {
                rep.push_str("0.");
                for _ in 0..scale - digits.len() {
                    rep.push('0');
                }
                rep.push_str(&digits);
            }
        }
        f.pad(&rep)
    }
}

impl Add for &Value {
    type Output = Value;

    fn add(self, other: &Value) -> Value {
        Value(&self.0 + &other.0)
    }
}

impl Sub for &Value {
    type Output = Value;

    fn sub(self, other: &Value) -> Value {
        Value(&self.0 - &other.0)
    }
}

impl Mul for &Value {
    type Output = Value;

    fn mul(self, other: &Value) -> Value {
        Value(&self.0 * &other.0)
    }
}

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value(-&self.0)
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, other: Value) -> Value {
        &self + &other
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, other: Value) -> Value {
        &self - &other
    }
}

impl Mul for Value {
    type Output = Value;

    fn mul(self, other: Value) -> Value {
        &self * &other
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        -&self
    }
}
