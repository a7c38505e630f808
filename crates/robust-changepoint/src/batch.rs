//! Analysis of many independent series
//!
//! Each `(key, series)` pair is an independent task. With the `parallel`
//! feature the tasks run on rayon, either on the global pool or on a
//! dedicated pool with a fixed number of workers. Output order always matches
//! input order.

use crate::config::DetectorConfig;
use crate::decision::{RegressionAssessor, Verdict};
use crate::detector::SequentialDetector;
use crate::types::ChangePointResult;
use robust_core::{Error, Result};
use tracing::{debug, instrument};

/// Runs the detector or the assessor over keyed series
#[derive(Debug, Clone)]
pub struct BatchAnalyzer {
    assessor: RegressionAssessor,
    #[cfg(feature = "parallel")]
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

impl BatchAnalyzer {
    /// Use the global rayon pool
    pub fn new(config: DetectorConfig) -> Result<Self> {
        Ok(Self {
            assessor: RegressionAssessor::new(config)?,
            #[cfg(feature = "parallel")]
            thread_pool: None,
        })
    }

    /// Use a dedicated pool of `workers` threads
    ///
    /// Without the `parallel` feature the worker count is validated and the
    /// series are processed on the calling thread.
    pub fn with_workers(config: DetectorConfig, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::too_small("workers", 1, workers));
        }
        #[cfg(feature = "parallel")]
        {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map_err(|e| Error::Execution(format!("Failed to create thread pool: {e}")))?;
            Ok(Self {
                assessor: RegressionAssessor::new(config)?,
                thread_pool: Some(std::sync::Arc::new(pool)),
            })
        }
        #[cfg(not(feature = "parallel"))]
        {
            Self::new(config)
        }
    }

    pub fn detector(&self) -> &SequentialDetector {
        self.assessor.detector()
    }

    /// Changepoints of every series
    #[instrument(skip(self, series), fields(count = series.len()))]
    pub fn detect_all<K, S>(&self, series: &[(K, S)]) -> Vec<(K, ChangePointResult)>
    where
        K: Clone + Send + Sync,
        S: AsRef<[f64]> + Sync,
    {
        let detector = self.detector();
        let results = self.map_batch(series, |s| detector.detect(s).result);
        debug!("detected changepoints for {} series", results.len());
        results
    }

    /// Verdict for the newest point of every series
    #[instrument(skip(self, series), fields(count = series.len()))]
    pub fn assess_all<K, S>(&self, series: &[(K, S)]) -> Vec<(K, Verdict)>
    where
        K: Clone + Send + Sync,
        S: AsRef<[f64]> + Sync,
    {
        let results = self.map_batch(series, |s| self.assessor.assess(s));
        debug!("assessed {} series", results.len());
        results
    }

    #[cfg(feature = "parallel")]
    fn map_batch<K, S, R, F>(&self, series: &[(K, S)], f: F) -> Vec<(K, R)>
    where
        K: Clone + Send + Sync,
        S: AsRef<[f64]> + Sync,
        R: Send,
        F: Fn(&[f64]) -> R + Sync + Send,
    {
        use rayon::prelude::*;

        let run = || -> Vec<(K, R)> {
            series
                .par_iter()
                .map(|(key, s)| (key.clone(), f(s.as_ref())))
                .collect()
        };
        match &self.thread_pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn map_batch<K, S, R, F>(&self, series: &[(K, S)], f: F) -> Vec<(K, R)>
    where
        K: Clone + Send + Sync,
        S: AsRef<[f64]> + Sync,
        R: Send,
        F: Fn(&[f64]) -> R + Sync + Send,
    {
        series
            .iter()
            .map(|(key, s)| (key.clone(), f(s.as_ref())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::VerdictStatus;

    fn jitter(i: usize) -> f64 {
        (i as f64 * 0.618_033_988_749_894_9).fract() * 0.2 - 0.1
    }

    fn series(levels: &[(f64, usize)]) -> Vec<f64> {
        let mut out = Vec::new();
        for &(c, len) in levels {
            let start = out.len();
            out.extend((start..start + len).map(|i| c + jitter(i)));
        }
        out
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(BatchAnalyzer::with_workers(DetectorConfig::default(), 0).is_err());
    }

    #[test]
    fn test_order_and_results_match_sequential() {
        let batch = BatchAnalyzer::with_workers(DetectorConfig::default(), 2).unwrap();
        let input: Vec<(String, Vec<f64>)> = (0..8)
            .map(|k| {
                let s = if k % 2 == 0 {
                    series(&[(10.0, 40)])
                } else {
                    series(&[(10.0, 20), (20.0, 20)])
                };
                (format!("case-{k}"), s)
            })
            .collect();

        let results = batch.detect_all(&input);
        assert_eq!(results.len(), input.len());
        for ((key, s), (out_key, result)) in input.iter().zip(&results) {
            assert_eq!(key, out_key);
            assert_eq!(result, &batch.detector().detect(s).result);
        }
        assert_eq!(results[1].1.changepoints(), &[0, 20]);
    }

    #[test]
    fn test_assess_all() {
        let batch = BatchAnalyzer::new(DetectorConfig::default()).unwrap();
        let input = vec![
            ("flat", series(&[(10.0, 30)])),
            ("drop", series(&[(20.0, 30), (10.0, 4)])),
        ];
        let verdicts = batch.assess_all(&input);
        assert_eq!(verdicts[0].0, "flat");
        assert_eq!(verdicts[0].1.status, VerdictStatus::Pass);
        assert_eq!(verdicts[1].1.status, VerdictStatus::Fail);
    }

    #[test]
    fn test_empty_batch() {
        let batch = BatchAnalyzer::new(DetectorConfig::default()).unwrap();
        let input: Vec<(u32, Vec<f64>)> = Vec::new();
        assert!(batch.detect_all(&input).is_empty());
    }
}
