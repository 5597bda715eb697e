//! Example: line-level alignment of two text snippets, where lines that were
//! only edited still count as partial matches.
//!
//! Run with:
//! `cargo run --example align_lines`

use lazy_march::{matchers::ScoredMatcher, LazyMatrixMarch};

/// Dice coefficient over character bigrams.
fn bigram_similarity(a: &&str, b: &&str) -> f32 {
    fn bigrams(s: &str) -> Vec<(char, char)> {
        let chars: Vec<char> = s.chars().collect();
        chars.windows(2).map(|w| (w[0], w[1])).collect()
    }
    if a == b {
        return 1.0;
    }
    let (x, mut y) = (bigrams(a), bigrams(b));
    if x.is_empty() || y.is_empty() {
        return 0.0;
    }
    let total = (x.len() + y.len()) as f32;
    let mut shared = 0usize;
    for g in &x {
        if let Some(pos) = y.iter().position(|h| h == g) {
            y.swap_remove(pos);
            shared += 1;
        }
    }
    2.0 * shared as f32 / total
}

fn main() {
    let before = [
        "fn main() {",
        "    let x = compute(1, 2);",
        "    println!(\"{x}\");",
        "    cleanup();",
        "}",
    ];
    let after = [
        "use std::io;",
        "fn main() {",
        "    let x = compute(1, 3);",
        "    log(x);",
        "    println!(\"{x}\");",
        "}",
    ];

    let matcher = ScoredMatcher::new(&before, &after, |a: &&str, b: &&str| {
        // Ignore weak resemblance so unrelated lines stay unmatched.
        let s = bigram_similarity(a, b);
        if s < 0.5 {
            0.0
        } else {
            s
        }
    });
    let (w, h) = matcher.dims();
    let mut march = LazyMatrixMarch::new(w, h, matcher);
    let result = march.run();

    println!("alignment score {:.2} ({} matcher calls)", result.total_match, march.num_evals());
    for m in &result.matches {
        let tag = if m.match_val >= 1.0 { "=" } else { "~" };
        println!(
            "{tag} {:<28} | {:<28} {:.2}",
            before[m.i as usize], after[m.j as usize], m.match_val
        );
    }
}
