//! Prime sizing shared by both table layouts
//!
//! Table capacities are kept prime so that `hash % capacity` spreads keys with common factors
//! and quadratic probing visits at least half of the slots before repeating.

/// Returns true if `n` is prime.
///
/// Trial division by odd factors up to `sqrt(n)`. Zero, one and even numbers other than two are
/// not prime.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    while factor.saturating_mul(factor) <= n {
        if n % factor == 0 {
            return false;
        }
        factor = factor.saturating_add(2);
    }
    true
}

/// Returns the smallest odd prime that is `>= n`.
///
/// Even inputs are bumped to `n + 1` before stepping by two, so `next_prime(2)` is 3.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n.saturating_add(1) } else { n };
    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }
    candidate
}

/// Keeps `n` if it is already prime, otherwise rounds it up with [`next_prime`].
///
/// Unlike [`next_prime`], this keeps 2 as a valid capacity.
#[must_use]
pub fn prime_at_least(n: usize) -> usize {
    if is_prime(n) { n } else { next_prime(n) }
}
