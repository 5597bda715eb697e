//! Example: aligning numeric series with a graded similarity.
//!
//! Run with:
//! `cargo run --example fuzzy`

use lazy_march::{matchers::ScoredMatcher, LazyMatrixMarchBuilder};

fn main() {
    let recorded = [1.0f32, 2.0, 4.0, 8.0, 16.0, 32.0];
    let replayed = [1.1f32, 4.2, 7.0, 9.0, 15.5, 33.0, 64.0];

    // Relative closeness: 1 for identical values, 0 once they differ by 50%.
    let similarity = |a: &f32, b: &f32| 1.0 - 2.0 * (a - b).abs() / a.abs().max(b.abs());
    let matcher = ScoredMatcher::new(&recorded, &replayed, similarity);
    let (w, h) = matcher.dims();

    let mut march = LazyMatrixMarchBuilder::new(w, h, matcher)
        .with_branch_threshold(1.0)
        .build();
    let result = march.run();

    println!("total match: {:.3}", result.total_match);
    for m in &result.matches {
        println!(
            "  recorded[{}] = {:>5} <-> replayed[{}] = {:>5}  ({:.3})",
            m.i, recorded[m.i as usize], m.j, replayed[m.j as usize], m.match_val
        );
    }
    println!("{:?}", march.stats());
}
