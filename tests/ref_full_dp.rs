use lazy_march::{
    matchers::ExactMatcher, reference::full_flcs, LazyMatrixMarch, LazyMatrixMarchBuilder,
    MarchResult, PrunePolicy,
};
use proptest::prelude::*;

const TOLERANCE: f32 = 1e-4;

/// Match values on a quarter grid are exact in binary floating point.
fn quarter_grid(width: usize, height: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(0u8..=4, width * height)
        .prop_map(|v| v.into_iter().map(|q| q as f32 / 4.0).collect())
}

fn lattice() -> impl Strategy<Value = (usize, usize, Vec<f32>)> {
    (1usize..8, 1usize..8).prop_flat_map(|(w, h)| (Just(w), Just(h), quarter_grid(w, h)))
}

fn table(values: &[f32], height: usize) -> impl FnMut(u32, u32) -> f32 + '_ {
    move |i, j| values[i as usize * height + j as usize]
}

/// Matches are monotone, positive, agree with the matcher and sum to the total.
fn consistent(result: &MarchResult, values: &[f32], height: usize) -> bool {
    result.is_monotone()
        && result
            .matches
            .iter()
            .all(|m| values[m.i as usize * height + m.j as usize] == m.match_val)
        && (result.match_sum() - result.total_match).abs() <= TOLERANCE
}

proptest! {
    #[test]
    fn exact_lcs_matches_full_dp(a in "[ACGT]{1,12}", b in "[ACGT]{1,12}") {
        let (s, t) = (a.as_bytes(), b.as_bytes());
        let matcher = ExactMatcher::new(s, t);
        let (w, h) = matcher.dims();
        let expected = full_flcs(w, h, matcher);
        let got = LazyMatrixMarch::with_branch_threshold(w, h, matcher, 1.0).run();
        prop_assert_eq!(got.total_match, expected.total_match);
        prop_assert_eq!(got.len(), expected.len());
        prop_assert!(got.is_monotone());
        for m in &got.matches {
            prop_assert_eq!(s[m.i as usize], t[m.j as usize]);
        }
    }

    #[test]
    fn binary_matches_are_exact_at_default_threshold(a in "[AB]{1,10}", b in "[AB]{1,10}") {
        // 0/1 values never land in [0.95, 1), so the default behaves like 1.0.
        let (s, t) = (a.as_bytes(), b.as_bytes());
        let matcher = ExactMatcher::new(s, t);
        let (w, h) = matcher.dims();
        let expected = full_flcs(w, h, matcher);
        let got = LazyMatrixMarch::new(w, h, matcher).run();
        prop_assert_eq!(got.total_match, expected.total_match);
    }

    #[test]
    fn fuzzy_optimal_with_full_branching((w, h, values) in lattice()) {
        let expected = full_flcs(w as u32, h as u32, table(&values, h));
        for policy in [PrunePolicy::ScoreGuarded, PrunePolicy::BoundOrdered] {
            let got = LazyMatrixMarchBuilder::new(w as u32, h as u32, table(&values, h))
                .with_branch_threshold(1.0)
                .with_prune_policy(policy)
                .build()
                .run();
            prop_assert!(
                (got.total_match - expected.total_match).abs() <= TOLERANCE,
                "{:?}: {} vs {}", policy, got.total_match, expected.total_match
            );
            prop_assert!(consistent(&got, &values, h));
        }
    }

    #[test]
    fn heuristic_threshold_never_overshoots((w, h, values) in lattice(), threshold in 0.1f32..1.0) {
        let expected = full_flcs(w as u32, h as u32, table(&values, h));
        let got = LazyMatrixMarch::with_branch_threshold(w as u32, h as u32, table(&values, h), threshold).run();
        prop_assert!(got.total_match <= expected.total_match + TOLERANCE);
        prop_assert!(got.total_match >= 0.0);
        prop_assert!(consistent(&got, &values, h));
    }
}
