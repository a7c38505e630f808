use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use robust_shift::{PermutationTest, ShiftTest, TwoSampleShiftTest};

proptest! {
    #[test]
    fn prop_p_value_in_unit_interval(
        left in prop::collection::vec(-1e3f64..1e3, 0..40),
        right in prop::collection::vec(-1e3f64..1e3, 0..40),
    ) {
        let p = ShiftTest::default().two_sample(&left, &right).p_value();
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn prop_swapping_sides_flips_sign(
        left in prop::collection::vec(-50f64..50.0, 3..30),
        right in prop::collection::vec(-50f64..50.0, 3..30),
    ) {
        let test = ShiftTest::default();
        let a = test.two_sample(&left, &right);
        let b = test.two_sample(&right, &left);
        prop_assert!((a.statistic + b.statistic).abs() <= 1e-9 * (1.0 + a.statistic.abs()));
        prop_assert!((a.p_value() - b.p_value()).abs() < 1e-9);
    }

    #[test]
    fn prop_permutation_p_value_positive(
        left in prop::collection::vec(-10f64..10.0, 1..15),
        right in prop::collection::vec(-10f64..10.0, 1..15),
        seed in any::<u64>(),
    ) {
        let outcome = PermutationTest::new(49).unwrap().with_seed(seed).run(&left, &right);
        prop_assert!(outcome.p_value > 0.0 && outcome.p_value <= 1.0);
    }
}

#[test]
fn test_injected_rng_matches_seed() {
    let left = [3.0, 3.4, 2.9, 3.8, 3.1, 3.3];
    let right = [3.5, 3.9, 4.1, 3.7, 4.4, 3.6];
    let test = PermutationTest::new(250).unwrap().with_seed(11);

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    assert_eq!(test.run(&left, &right), test.run_with_rng(&left, &right, &mut rng));
}

#[test]
fn test_null_samples_rarely_reject() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let test = ShiftTest::default();

    let mut rejections = 0;
    for _ in 0..200 {
        let left: Vec<f64> = (0..30).map(|_| normal.sample(&mut rng)).collect();
        let right: Vec<f64> = (0..30).map(|_| normal.sample(&mut rng)).collect();
        if test.two_sample(&left, &right).p_value() < 0.001 {
            rejections += 1;
        }
    }
    assert!(rejections <= 3, "{rejections} rejections at alpha 0.001");
}

#[test]
fn test_both_tests_agree_on_clear_shift() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let normal = Normal::new(0.0, 0.5).unwrap();
    let left: Vec<f64> = (0..25).map(|_| 5.0 + normal.sample(&mut rng)).collect();
    let right: Vec<f64> = (0..25).map(|_| 8.0 + normal.sample(&mut rng)).collect();

    let tests: Vec<Box<dyn TwoSampleShiftTest>> = vec![
        Box::new(ShiftTest::default()),
        Box::new(PermutationTest::new(199).unwrap().with_seed(1)),
    ];
    for test in &tests {
        let outcome = test.test(&left, &right);
        assert!(outcome.statistic < 0.0, "{}", test.name());
        assert!(outcome.is_significant(0.01), "{}", test.name());
    }
}
