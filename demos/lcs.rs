//! Example: classic LCS through the lazy matrix march.
//!
//! Run with:
//! `cargo run --example lcs`

use lazy_march::{matchers::ExactMatcher, LazyMatrixMarch};

fn main() {
    let s = b"ACCGGTCGAGTGCGCGGAAGCCGGCCGAA";
    let t = b"GTCGTTCGGAATGCCGTTGCTCTGTAAA";

    let matcher = ExactMatcher::new(s.as_slice(), t.as_slice());
    let (w, h) = matcher.dims();
    // Binary matches with threshold 1.0: exact LCS.
    let mut march = LazyMatrixMarch::with_branch_threshold(w, h, matcher, 1.0);
    let result = march.run();

    println!("LCS length: {}", result.total_match);
    println!(
        "Matcher calls: {} of {} cells ({} steps)",
        march.num_evals(),
        w * h,
        march.num_steps()
    );

    let lcs: Vec<u8> = result.matches.iter().map(|m| s[m.i as usize]).collect();
    println!("LCS: {}", String::from_utf8_lossy(&lcs));
}
