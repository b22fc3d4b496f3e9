//! Embedding similarity scoring.
//!
//! The single scoring function used by cluster assignment. Degenerate
//! inputs score 0.0 ("no match") so a malformed embedding can never abort
//! a clustering pass.

/// Cosine similarity between two embeddings, bounded in `[-1, 1]`.
///
/// Returns 0.0 when the vectors differ in length, either is empty, or
/// either has zero norm. Symmetric and free of side effects.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_identical_vector_scores_one() {
        let v = vec![0.3, -1.2, 4.0];
        assert_relative_eq!(cosine_similarity(&v, &v), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        assert_relative_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_opposite_vectors_score_negative_one() {
        assert_relative_eq!(
            cosine_similarity(&[2.0, 1.0], &[-2.0, -1.0]),
            -1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_scale_invariant() {
        let a = [1.0, 2.0, 3.0];
        let b = [10.0, 20.0, 30.0];
        assert_relative_eq!(cosine_similarity(&a, &b), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let a = [0.7, 0.1, -0.4];
        let b = [0.2, 0.9, 0.3];
        assert_relative_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    // ── Degenerate inputs ────────────────────────────────────────────

    #[rstest]
    #[case::length_mismatch(vec![1.0, 0.0], vec![1.0, 0.0, 0.0])]
    #[case::left_empty(vec![], vec![1.0])]
    #[case::both_empty(vec![], vec![])]
    #[case::zero_norm(vec![0.0, 0.0], vec![1.0, 0.0])]
    fn test_degenerate_inputs_score_zero(#[case] a: Vec<f32>, #[case] b: Vec<f32>) {
        assert_relative_eq!(cosine_similarity(&a, &b), 0.0);
    }
}
