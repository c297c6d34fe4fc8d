// the reason this is named mod.rs has to do with some complexities of how
// testing is handled
//
// we are following the advice of the rust book
// https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests

// not every test binary uses every helper
#![allow(dead_code)]

use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

// based on numpy!
// https://numpy.org/doc/stable/reference/generated/numpy.isclose.html
pub fn isclose(actual: f64, ref_val: f64, rtol: f64, atol: f64) -> bool {
    let actual_nan = actual.is_nan();
    let ref_nan = ref_val.is_nan();
    if actual_nan || ref_nan {
        actual_nan && ref_nan
    } else {
        (actual - ref_val).abs() <= (atol + rtol * ref_val.abs())
    }
}

pub fn assert_allclose(actual: &Array1<f64>, expected: &Array1<f64>, rtol: f64, atol: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            isclose(a, e, rtol, atol),
            "entry {i}: {a} is not close to {e}"
        );
    }
}

/// a reproducible random field with entries in (-1, 1)
pub fn random_field(shape: (usize, usize), seed: u64) -> Array2<f64> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    Array2::from_shape_fn(shape, |_| rng.random_range(-1.0..1.0))
}
