use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Rank candidate positions by score, highest first.
///
/// `exclude` (the query's own position) is removed before truncation, and
/// equal scores keep their original position order, so the output is fully
/// determined by the scores and the catalog order.
pub fn rank(scores: &[f32], exclude: Option<usize>, top_n: usize) -> Vec<(usize, f32)> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(usize, f32)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(idx, _)| Some(*idx) != exclude)
        .collect();

    // stable: ties stay in catalog order
    candidates.sort_by_key(|&(_, score)| Reverse(OrderedFloat(score)));
    candidates.truncate(top_n);
    candidates
}
