//! Exact modular arithmetic on `u64`.
//!
//! All channel state lives in `Z/MZ` for some modulus `M < 2^63`. Sums are
//! computed natively (they cannot overflow below that bound); products widen
//! to `u128`.

/// Greatest common divisor (Euclid). `gcd(0, 0) = 0`.
///
/// # Example
///
/// ```
/// use sturmwalk::ring::gcd;
///
/// assert_eq!(gcd(12, 18), 6);
/// assert_eq!(gcd(7, 0), 7);
/// assert_eq!(gcd(3, 4), 1);
/// ```
#[inline]
#[must_use]
pub const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let tmp = a % b;
        a = b;
        b = tmp;
    }
    a
}

/// Returns true if `gcd(a, b) = 1`.
#[inline]
#[must_use]
pub const fn coprime(a: u64, b: u64) -> bool {
    gcd(a, b) == 1
}

/// `(a + b) mod m` for `a, b < m < 2^63`.
///
/// # Example
///
/// ```
/// use sturmwalk::ring::add_mod;
///
/// assert_eq!(add_mod(5, 4, 7), 2);
/// assert_eq!(add_mod(0, 0, 1), 0);
/// ```
#[inline]
#[must_use]
pub const fn add_mod(a: u64, b: u64, m: u64) -> u64 {
    let sum = a + b;
    if sum >= m {
        sum - m
    } else {
        sum
    }
}

/// `(a · b) mod m` through a 128-bit product. `m` must be non-zero.
///
/// # Example
///
/// ```
/// use sturmwalk::ring::mul_mod;
///
/// assert_eq!(mul_mod(6, 7, 10), 2);
/// assert_eq!(mul_mod(u64::MAX, 2, 1 << 61), (1 << 61) - 2);
/// ```
#[inline]
#[must_use]
pub const fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

/// Period of the orbit `x ← x + p (mod m)`, i.e. `m / gcd(m, p)`.
///
/// An increment of zero (or a multiple of `m`) has period 1.
#[inline]
#[must_use]
pub const fn orbit_period(p: u64, m: u64) -> u64 {
    m / gcd(m, p % m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(0, 9), 9);
        assert_eq!(gcd(9, 0), 9);
        assert_eq!(gcd(48, 36), 12);
        assert_eq!(gcd(17, 5), 1);
    }

    #[test]
    fn test_coprime() {
        assert!(coprime(3, 4));
        assert!(coprime(1, 1));
        assert!(!coprime(2, 4));
        assert!(coprime(0, 1));
    }

    #[test]
    fn test_add_mod_wraps_once() {
        for m in 1..20u64 {
            for a in 0..m {
                for b in 0..m {
                    assert_eq!(add_mod(a, b, m), (a + b) % m);
                }
            }
        }
    }

    #[test]
    fn test_add_mod_near_bound() {
        let m = (1u64 << 62) + 3;
        assert_eq!(add_mod(m - 1, m - 1, m), m - 2);
    }

    #[test]
    fn test_mul_mod_matches_wide() {
        let m = crate::core::constants::MERSENNE_61;
        let a = m - 1;
        // (−1)² ≡ 1
        assert_eq!(mul_mod(a, a, m), 1);
        assert_eq!(mul_mod(0, a, m), 0);
    }

    #[test]
    fn test_orbit_period() {
        assert_eq!(orbit_period(0, 10), 1);
        assert_eq!(orbit_period(10, 10), 1);
        assert_eq!(orbit_period(3, 10), 10);
        assert_eq!(orbit_period(4, 10), 5);
        assert_eq!(orbit_period(5, 10), 2);
    }
}
