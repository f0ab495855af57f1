//! Numeric primitives with defined behavior on missing input.
//!
//! Measurements are carried as [`Measure`] (`Option<f64>`): `None` means the
//! value could not be computed because its input was absent or empty. A
//! measurement is flattened to a number only when it is written into a
//! feature vector, where `None` becomes [`SENTINEL`]. One convention holds
//! for every primitive in this module:
//!
//! - absent or empty input is undefined (`-1` once flattened)
//! - present input that counts nothing is a real `0`
//! - ratios need both sides `> 0`, differences need both sides `>= 0`
//!
//! The `*_raw` variants flatten the undefined branch to `0` instead.

use crate::field::TextField;

/// Value written for an undefined measurement.
pub const SENTINEL: f64 = -1.0;

/// A measurement that may be undefined.
pub type Measure = Option<f64>;

/// Flattens a measurement, mapping undefined to [`SENTINEL`].
pub fn value(measure: Measure) -> f64 {
    measure.unwrap_or(SENTINEL)
}

/// Arithmetic mean of the defined measurements, undefined if there are none.
pub fn mean_defined<I>(measures: I) -> Measure
where
    I: IntoIterator<Item = Measure>,
{
    let (sum, n) = measures
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), m| (sum + m, n + 1));

    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Number of non-whitespace characters in one string.
pub fn stripped_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Character count of a field.
///
/// Whitespace does not count. A sequence yields the mean count of its items.
pub fn count(field: Option<&TextField>) -> Measure {
    field?.reduce(|text| Some(stripped_len(text) as f64))
}

/// Total occurrences of `needle` across a field.
///
/// Sequences are summed, not averaged. Absent input counts `0`.
pub fn count_occurrences(field: Option<&TextField>, needle: &str) -> f64 {
    match field {
        Some(field) if !needle.is_empty() => {
            field.items().iter().map(|item| item.matches(needle).count()).sum::<usize>() as f64
        }
        _ => 0.0,
    }
}

/// `|a / b|` when both sides are strictly positive.
pub fn ratio(a: Measure, b: Measure) -> Measure {
    match (a, b) {
        (Some(a), Some(b)) if a > 0.0 && b > 0.0 => Some((a / b).abs()),
        _ => None,
    }
}

/// `|a - b|` when both sides are non-negative.
pub fn diff(a: Measure, b: Measure) -> Measure {
    match (a, b) {
        (Some(a), Some(b)) if a >= 0.0 && b >= 0.0 => Some((a - b).abs()),
        _ => None,
    }
}

/// [`ratio`] flattened with `0` on the undefined branch.
pub fn ratio_raw(a: Measure, b: Measure) -> f64 {
    ratio(a, b).unwrap_or(0.0)
}

/// [`diff`] flattened with `0` on the undefined branch.
pub fn diff_raw(a: Measure, b: Measure) -> f64 {
    diff(a, b).unwrap_or(0.0)
}
