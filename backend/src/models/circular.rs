//! Month arithmetic on the 12-month wheel.
//!
//! December (11) and January (0) are neighbours. Both the detector's
//! separation checks and the transition midpoints go through these helpers.

/// Number of points in one seasonal cycle.
pub const MONTHS_PER_YEAR: usize = 12;

/// Month index following `month`, wrapping December to January.
pub fn next_month(month: usize) -> usize {
    (month + 1) % MONTHS_PER_YEAR
}

/// Month index preceding `month`, wrapping January to December.
pub fn prev_month(month: usize) -> usize {
    (month + MONTHS_PER_YEAR - 1) % MONTHS_PER_YEAR
}

/// Shorter of the forward and backward gap between two month indices.
///
/// ```
/// use calls_inflection::models::circular_distance;
///
/// assert_eq!(circular_distance(11, 0), 1);
/// assert_eq!(circular_distance(2, 8), 6);
/// assert_eq!(circular_distance(1, 10), 3);
/// ```
pub fn circular_distance(a: usize, b: usize) -> usize {
    let gap = a.abs_diff(b) % MONTHS_PER_YEAR;
    gap.min(MONTHS_PER_YEAR - gap)
}

/// Months walked forward from `from` to reach `to`.
pub fn forward_gap(from: usize, to: usize) -> usize {
    (to % MONTHS_PER_YEAR + MONTHS_PER_YEAR - from % MONTHS_PER_YEAR) % MONTHS_PER_YEAR
}

/// Midpoint of the forward walk from `from` to `to`, reduced modulo 12.
///
/// When the walk crosses the year boundary the later index is shifted by 12
/// before averaging, so `circular_midpoint(9, 0)` is `10.5`, not `4.5`.
pub fn circular_midpoint(from: usize, to: usize) -> f64 {
    let start = (from % MONTHS_PER_YEAR) as f64;
    let end = start + forward_gap(from, to) as f64;
    ((start + end) / 2.0) % MONTHS_PER_YEAR as f64
}

/// Circular mean of a set of month positions that lie within one arc.
///
/// Positions are unwrapped relative to the first one before averaging.
pub fn arc_mean(months: &[usize]) -> Option<f64> {
    let first = *months.first()?;
    let sum: f64 = months
        .iter()
        .map(|&m| (first + forward_gap(first, m)) as f64)
        .sum();
    Some((sum / months.len() as f64) % MONTHS_PER_YEAR as f64)
}
