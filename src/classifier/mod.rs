//! Number classification module
//!
//! Pure predicates over `i64`:
//! - Primality and perfection (evaluated on the signed value)
//! - Armstrong check and digit sum (evaluated on the magnitude)
//! - Derived property list (armstrong + parity)

mod digits;

pub use digits::{digit_sum, is_armstrong};

use serde::Serialize;

/// Named property attached to a classified number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Armstrong,
    Even,
    Odd,
}

/// Everything computed for a number except its fun fact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u32,
}

/// Run every predicate against `n`
pub fn classify(n: i64) -> Classification {
    Classification {
        number: n,
        is_prime: is_prime(n),
        is_perfect: is_perfect(n),
        properties: properties(n),
        digit_sum: digit_sum(n),
    }
}

pub const fn is_even(n: i64) -> bool {
    n % 2 == 0
}

/// Trial division over the 6k±1 candidates up to `⌊√n⌋`
pub const fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // `i <= n / i` is `i * i <= n` without the overflow near i64::MAX
    let mut i = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// True when `n` equals the sum of its proper divisors
pub fn is_perfect(n: i64) -> bool {
    if n <= 1 {
        return false;
    }

    let mut sum: i128 = 1;
    let mut i = 2;
    while i <= n / i {
        if n % i == 0 {
            let pair = n / i;
            sum += i128::from(i);
            if pair != i {
                sum += i128::from(pair);
            }
        }
        i += 1;
    }
    sum == i128::from(n)
}

/// Ordered property list: `armstrong` first when it applies, then parity
pub fn properties(n: i64) -> Vec<Property> {
    let mut props = Vec::with_capacity(2);
    if is_armstrong(n) {
        props.push(Property::Armstrong);
    }
    props.push(if is_even(n) { Property::Even } else { Property::Odd });
    props
}
