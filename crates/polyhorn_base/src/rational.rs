use num_bigint::BigInt;

/// Exact arbitrary-precision rational used for every coefficient constant in
/// the system. Never a float: canonicalization and equality elimination both
/// rely on exact cancellation.
pub type Rational = num_rational::BigRational;

/// Convenience constructor for a rational from a plain `i64`, used pervasively
/// by the witness generators when minting constants like `-1` or `0`.
pub fn from_i64(n: i64) -> Rational {
    Rational::from_integer(BigInt::from(n))
}
