//! Structural properties of the detectors on random series

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use robust_changepoint::{
    CandidateVote, ChangePointDetector, CusumDetector, DetectorConfig, RegimeSummary,
    SequentialDetector, VoteConsensus,
};
use robust_spread::OutlierTrim;

fn noisy_steps(seed: u64, levels: &[(f64, usize)], sigma: f64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, sigma).unwrap();
    levels
        .iter()
        .flat_map(|&(c, len)| std::iter::repeat(c).take(len))
        .map(|c| c + noise.sample(&mut rng))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_changepoints_well_formed(
        series in prop::collection::vec(-100f64..100.0, 0..80),
    ) {
        let detectors: Vec<Box<dyn ChangePointDetector>> = vec![
            Box::new(SequentialDetector::new(DetectorConfig::default()).unwrap()),
            Box::new(CusumDetector::default()),
        ];
        for detector in &detectors {
            let result = detector.detect_changepoints(&series).unwrap();
            let cps = result.changepoints();
            prop_assert_eq!(cps[0], 0);
            prop_assert!(cps.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(cps.iter().all(|&c| c == 0 || c < series.len()));
            prop_assert_eq!(cps.len(), result.detection_points().len());
            for cp in result.iter() {
                prop_assert!(cp.detected_at >= cp.index);
            }
        }
    }

    #[test]
    fn prop_detection_is_idempotent(
        seed in any::<u64>(),
        shift in 0.0f64..20.0,
        at in 5usize..40,
    ) {
        let series = noisy_steps(seed, &[(10.0, at), (10.0 + shift, 40)], 0.5);
        let detector = SequentialDetector::new(DetectorConfig::default()).unwrap();
        let first = detector.detect(&series);
        let second = detector.detect(&series);
        prop_assert_eq!(first.result, second.result);
        prop_assert_eq!(first.votes, second.votes);
    }

    #[test]
    fn prop_consensus_requires_every_slot(
        snapshots in prop::collection::vec(
            prop::collection::btree_map(0usize..6, -5f64..5.0, 0..4),
            1..8,
        ),
        min_agree in 1usize..4,
    ) {
        let mut votes = VoteConsensus::new(min_agree);
        for snapshot in &snapshots {
            votes.push(snapshot.clone());
        }
        if let Some(index) = votes.result() {
            let recent: Vec<&CandidateVote> = snapshots.iter().rev().take(min_agree).collect();
            prop_assert_eq!(recent.len(), min_agree);
            prop_assert!(recent.iter().all(|s| s.contains_key(&index)));
        }
    }

    #[test]
    fn prop_summary_has_series_length(
        series in prop::collection::vec(-10f64..10.0, 1..60),
    ) {
        let result = SequentialDetector::new(DetectorConfig::default())
            .unwrap()
            .detect(&series)
            .result;
        let summary = RegimeSummary::compute(
            &series,
            result.changepoints(),
            &OutlierTrim::default(),
            Default::default(),
        )
        .unwrap();
        prop_assert_eq!(summary.mean.len(), series.len());
        prop_assert!(summary.lower.iter().zip(&summary.upper).all(|(l, u)| l <= u));
    }
}

#[test]
fn test_large_shift_found_within_lookback() {
    let series = noisy_steps(17, &[(100.0, 60), (80.0, 60)], 1.0);
    let config = DetectorConfig::default();
    let result = SequentialDetector::new(config.clone()).unwrap().detect(&series).result;
    assert!(result.has_changepoints(), "{result}");
    let cp = result.changepoints()[1];
    assert!((58..=62).contains(&cp), "changepoint at {cp}");
    assert!(result.detection_points()[1] < 60 + config.lookback);
}

#[test]
fn test_noise_alone_rarely_triggers() {
    let detector = SequentialDetector::new(DetectorConfig::default()).unwrap();
    let triggered = (0..20)
        .filter(|&seed| {
            detector
                .detect(&noisy_steps(seed, &[(50.0, 80)], 2.0))
                .result
                .has_changepoints()
        })
        .count();
    assert!(triggered <= 1, "{triggered} of 20 pure-noise series triggered");
}
