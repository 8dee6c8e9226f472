//! Linear-kernel similarity over L2-normalized term rows.
//!
//! Rows coming out of the vectorizer are non-negative and unit length, so a
//! plain dot product is their cosine similarity. Scores are clamped to
//! `[0, 1]` to absorb rounding, and any pair involving a zero row scores 0.

use crate::vectorizer::TermMatrix;
use crate::vector::Vector;
use rayon::prelude::*;

#[inline]
fn score(a: &Vector, b: &Vector) -> f32 {
    let s = a.dot(b);
    if s.is_finite() {
        s.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Similarity of row `query` against every row, in row order.
/// Returns `None` if `query` is out of range.
pub fn similarity_row(matrix: &TermMatrix, query: usize) -> Option<Vec<f32>> {
    let query_vec = matrix.row(query)?;
    Some(
        matrix
            .rows()
            .par_iter()
            .map(|other| score(query_vec, other))
            .collect(),
    )
}

/// Full symmetric similarity matrix
pub fn similarity_matrix(matrix: &TermMatrix) -> Vec<Vec<f32>> {
    let rows = matrix.rows();
    rows.par_iter()
        .map(|a| rows.iter().map(|b| score(a, b)).collect())
        .collect()
}
