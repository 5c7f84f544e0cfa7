//! Fixed-point helpers for proportional reward distribution.
//!
//! All results are floored (truncated toward zero). Any dust left by the
//! rounding stays in contract custody, so the sum of payouts computed
//! against the same raised total never exceeds the pool.

/// `floor(pool * grant / raised)` without forming the full product.
///
/// Splits `pool = q * raised + r` so the only multiplications are
/// `q * grant` and `r * grant`, with `r < raised`. Returns `None` on
/// overflow or when `raised` is not positive.
pub fn proportional_share(pool: i128, grant: i128, raised: i128) -> Option<i128> {
    if raised <= 0 {
        return None;
    }
    if pool <= 0 || grant <= 0 {
        return Some(0);
    }

    let q = pool / raised;
    let r = pool % raised;

    let whole = q.checked_mul(grant)?;
    let fraction = r.checked_mul(grant)? / raised;
    whole.checked_add(fraction)
}
