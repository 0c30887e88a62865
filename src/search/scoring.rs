//! Similarity scoring for fuzzy matching.
//!
//! Field similarities are in `[0, 1]` with 1 meaning identical. Record scores
//! invert that so lower is better and 0 is an exact match.

use rapidfuzz::distance::levenshtein;

/// Scale applied to substring alignments, keeping them strictly below an exact match.
pub(crate) const PARTIAL_MATCH_DISCOUNT: f64 = 0.9;

/// Similarity between a case-folded query and a case-folded field value.
///
/// Returns:
/// - 1.0: exact match
/// - otherwise the better of the whole-string Levenshtein similarity and the
///   best alignment of the query against any equal-length window of the value,
///   the latter scaled by [`PARTIAL_MATCH_DISCOUNT`]
/// - 0.0: either side empty
pub fn field_similarity(query: &[char], value: &[char]) -> f64 {
    if query.is_empty() || value.is_empty() {
        return 0.0;
    }
    if query == value {
        return 1.0;
    }

    let full = levenshtein::normalized_similarity(query.iter().copied(), value.iter().copied());
    let partial = partial_similarity(query, value) * PARTIAL_MATCH_DISCOUNT;
    full.max(partial)
}

/// Best normalized similarity of `query` against every window of `value` with the query's length.
///
/// Only meaningful when the value is longer than the query; otherwise the
/// whole-string comparison already covers it and this returns 0.
fn partial_similarity(query: &[char], value: &[char]) -> f64 {
    if query.len() >= value.len() {
        return 0.0;
    }

    let mut best = 0.0_f64;
    for window in value.windows(query.len()) {
        let similarity =
            levenshtein::normalized_similarity(query.iter().copied(), window.iter().copied());
        if similarity > best {
            best = similarity;
            if best >= 1.0 {
                break;
            }
        }
    }
    best
}

/// Similarity of one weighted field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldScore {
    pub similarity: f64,
    pub weight: f64,
}

/// Weighted average of field similarities: Σ(similarity × weight) / Σ(weight).
///
/// Fields with a non-positive weight are ignored. Returns 0.0 when nothing contributes.
pub fn weighted_average(scores: &[FieldScore]) -> f64 {
    let (total, weight) = scores
        .iter()
        .filter(|score| score.weight > 0.0)
        .fold((0.0, 0.0), |(total, weight), score| {
            (total + score.similarity * score.weight, weight + score.weight)
        });

    if weight > 0.0 {
        (total / weight).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Converts a combined similarity into a record score (lower is better).
///
/// Only an exact primary match scores 0; this is never called for one, so the
/// result is kept strictly positive even when the average rounds to 1.0.
pub fn record_score(scores: &[FieldScore]) -> f64 {
    (1.0 - weighted_average(scores)).max(f64::EPSILON)
}
