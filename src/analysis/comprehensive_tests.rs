//! Property-based tests for sample splitting, throughput statistics and
//! histogram binning

use super::{histogram, parse_samples, split_valid, summarize};
use crate::models::DataSize;
use proptest::collection::vec;
use proptest::prelude::*;

mod generators {
    use super::*;

    /// Raw timings including zero and negative noise
    pub fn raw_samples() -> impl Strategy<Value = Vec<i64>> {
        vec(-1_000i64..5_000_000, 0..200)
    }

    /// Valid, ascending timings
    pub fn valid_samples() -> impl Strategy<Value = Vec<i64>> {
        vec(1i64..50_000_000, 1..200).prop_map(|mut samples| {
            samples.sort_unstable();
            samples
        })
    }

    pub fn test_name() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("batchWrite"),
            Just("simpleWrite"),
            Just("simpleQuery"),
            Just("count"),
        ]
    }

    pub fn data_size() -> impl Strategy<Value = DataSize> {
        (1u64..100_000).prop_map(|rows| DataSize::parse(&rows.to_string()).unwrap())
    }
}

proptest! {
    #[test]
    fn split_partitions_every_sample(raw in generators::raw_samples()) {
        let split = split_valid(&raw);
        prop_assert_eq!(split.bogus + split.valid.len(), raw.len());
        prop_assert_eq!(split.bogus, raw.iter().filter(|&&v| v <= 0).count());
        prop_assert!(split.valid.iter().all(|&v| v > 0));
        prop_assert!(split.valid.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn throughput_bounds_hold(
        valid in generators::valid_samples(),
        test in generators::test_name(),
        size in generators::data_size(),
    ) {
        let summary = summarize(&valid, test, &size).unwrap();
        let tolerance = summary.maximum * 1e-12;
        prop_assert!(summary.minimum <= summary.average + tolerance);
        prop_assert!(summary.average <= summary.maximum + tolerance);
    }

    #[test]
    fn samples_round_trip_through_text(raw in vec(any::<i64>(), 0..100)) {
        let text: String = raw.iter().map(|v| format!("{}\n", v)).collect();
        let parsed = parse_samples(text.as_bytes(), "generated").unwrap();
        prop_assert_eq!(parsed, raw);
    }

    #[test]
    fn histogram_counts_every_value(values in vec(0.0f64..1e9, 2..300), bins in 1usize..20) {
        let histogram = histogram(&values, bins).unwrap();
        prop_assert_eq!(histogram.bins.len(), bins);
        prop_assert_eq!(histogram.total(), values.len());
    }
}

#[test]
fn round_trip_through_file() {
    use std::io::Write;

    let samples = vec![1200, -3, 0, 987_654_321, 42];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for sample in &samples {
        writeln!(file, "{}", sample).unwrap();
    }

    assert_eq!(super::read_samples(file.path()).unwrap(), samples);
}
