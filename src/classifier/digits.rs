// Decimal digit helpers
// Both functions work on |n| so negative input is classified by magnitude

/// Decimal digits of `|n|`, most significant first
fn digits(n: i64) -> Vec<u32> {
    let mut magnitude = n.unsigned_abs();
    if magnitude == 0 {
        return vec![0];
    }

    let mut out = Vec::with_capacity(20);
    while magnitude > 0 {
        // Remainder is always < 10
        #[allow(clippy::cast_possible_truncation)]
        out.push((magnitude % 10) as u32);
        magnitude /= 10;
    }
    out.reverse();
    out
}

/// Sum of the decimal digits of `|n|`
pub fn digit_sum(n: i64) -> u32 {
    digits(n).iter().sum()
}

/// True when `|n|` equals the sum of its digits each raised to the digit count
pub fn is_armstrong(n: i64) -> bool {
    let digits = digits(n);
    #[allow(clippy::cast_possible_truncation)]
    let power = digits.len() as u32;

    // 20 * 9^20 still fits in u128
    let sum: u128 = digits.iter().map(|&d| u128::from(d).pow(power)).sum();
    sum == u128::from(n.unsigned_abs())
}
