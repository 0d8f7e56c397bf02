//! Even mark distribution.

/// Split `total` into `count` whole-mark shares.
///
/// Every share is `total / count`; the first `total % count` shares get one extra mark, so
/// the shares always sum to `total`. Returns an empty vec when `count` is zero.
pub fn even_split(total: u32, count: usize) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }
    let count_u32 = u32::try_from(count).unwrap_or(u32::MAX);
    let base = total / count_u32;
    let remainder = (total % count_u32) as usize;
    (0..count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}
