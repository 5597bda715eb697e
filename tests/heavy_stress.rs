#![cfg(feature = "heavy")]
use lazy_march::{matchers::ExactMatcher, reference::full_flcs, LazyMatrixMarch};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx]
        })
        .collect()
}

/// Copy of `seq` with roughly `rate` of positions substituted, deleted or inserted.
fn mutate(rng: &mut StdRng, seq: &[u8], rate: f64) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &c in seq {
        if rng.gen_bool(rate) {
            match rng.gen_range(0..3) {
                0 => out.push(b"ACGT"[rng.gen_range(0..4)]),
                1 => {}
                _ => {
                    out.push(c);
                    out.push(b"ACGT"[rng.gen_range(0..4)]);
                }
            }
        } else {
            out.push(c);
        }
    }
    if out.is_empty() {
        out.push(b'A');
    }
    out
}

#[test]
fn heavy_similar_sequences_match_reference() {
    let mut rng = StdRng::seed_from_u64(123);
    for _ in 0..20 {
        let s = random_dna(&mut rng, 1_500);
        let t = mutate(&mut rng, &s, 0.02);
        let matcher = ExactMatcher::new(&s, &t);
        let (w, h) = matcher.dims();
        let expected = full_flcs(w, h, matcher);
        let mut march = LazyMatrixMarch::with_branch_threshold(w, h, matcher, 1.0);
        let got = march.run();
        assert_eq!(got.total_match, expected.total_match);
        assert!(got.is_monotone());
        assert!((march.num_evals() as usize) < s.len() * t.len());
    }
}

#[test]
fn heavy_long_identity() {
    let n = 4_000u32;
    let mut march = LazyMatrixMarch::new(n, n, |i: u32, j: u32| if i == j { 1.0 } else { 0.0 });
    let result = march.run();
    assert_eq!(result.total_match, n as f32);
    assert_eq!(march.num_evals(), n);
}
