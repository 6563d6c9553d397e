use chrono::Duration;

use crate::req::{Measurement, Threshold};

/// A selectable lookback window of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScope {
    pub name: &'static str,
    pub scope: Duration,
    pub average_to: Option<Duration>, // bucket width, raw samples if none
}

impl TimeScope {
    pub fn new(name: &'static str, scope: Duration, average_to: Option<Duration>) -> Self {
        Self {
            name,
            scope,
            average_to,
        }
    }

    pub fn standard() -> Vec<TimeScope> {
        vec![
            TimeScope::new("last hour", Duration::hours(1), None),
            TimeScope::new("6 hours", Duration::hours(6), None),
            TimeScope::new("12 hours", Duration::hours(12), None),
            TimeScope::new("day", Duration::days(1), Some(Duration::hours(1))),
            TimeScope::new("week", Duration::weeks(1), Some(Duration::hours(6))),
            TimeScope::new("month", Duration::days(30), Some(Duration::days(1))),
        ]
    }

    /// Unknown names select the first scope.
    pub fn by_name(scopes: &[TimeScope], name: &str) -> Option<TimeScope> {
        scopes
            .iter()
            .find(|s| s.name == name)
            .or_else(|| scopes.first())
            .cloned()
    }

    /// Window filter followed by averaging, `now_ms` is only used for empty input.
    pub fn apply(&self, measurements: &[Measurement], now_ms: i64) -> Vec<Measurement> {
        let windowed = filter_window(measurements, self.scope, now_ms);
        match self.average_to {
            Some(bucket) => average_measurements(&windowed, bucket),
            None => windowed,
        }
    }
}

/// Newest timestamp (or now) minus the scope.
pub fn cutoff(measurements: &[Measurement], scope: Duration, now_ms: i64) -> i64 {
    let newest = measurements.last().map_or(now_ms, |m| m.timestamp);
    newest - scope.num_milliseconds()
}

pub fn filter_window(measurements: &[Measurement], scope: Duration, now_ms: i64) -> Vec<Measurement> {
    let cutoff = cutoff(measurements, scope, now_ms);
    measurements
        .iter()
        .filter(|m| m.timestamp >= cutoff)
        .copied()
        .collect()
}

/// Mean value per fixed-width bucket.
///
/// Buckets start at the first sample: bucket `k` covers
/// `[t0 + k * width, t0 + (k + 1) * width)` and the averaged sample is stamped
/// with the bucket start. Buckets without samples produce nothing. A
/// non-positive width returns the input unchanged.
pub fn average_measurements(measurements: &[Measurement], bucket: Duration) -> Vec<Measurement> {
    let width = bucket.num_milliseconds();
    let Some(first) = measurements.first() else {
        return vec![];
    };
    if width <= 0 {
        return measurements.to_vec();
    }

    let origin = first.timestamp;
    let mut averaged = Vec::new();
    let mut current: Option<(i64, f64, u32)> = None; // (bucket start, sum, count)

    for m in measurements {
        let start = origin + (m.timestamp - origin).div_euclid(width) * width;
        match current.as_mut() {
            Some((bucket_start, sum, count)) if *bucket_start == start => {
                *sum += m.value as f64;
                *count += 1;
            }
            _ => {
                if let Some(done) = current.take() {
                    averaged.push(bucket_mean(done));
                }
                current = Some((start, m.value as f64, 1));
            }
        }
    }
    if let Some(done) = current {
        averaged.push(bucket_mean(done));
    }

    averaged
}

fn bucket_mean((timestamp, sum, count): (i64, f64, u32)) -> Measurement {
    Measurement {
        timestamp,
        value: (sum / count as f64) as f32,
    }
}

/// Acceptable range drawn over a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdBand {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl ThresholdBand {
    pub fn from_threshold(threshold: Option<&Threshold>) -> Self {
        let finite = |v: f32| v.is_finite().then_some(v);
        Self {
            min: threshold.and_then(|t| finite(t.min)),
            max: threshold.and_then(|t| finite(t.max)),
        }
    }

    /// Bounds left after the min/max legend toggles.
    pub fn visible(&self, show_min: bool, show_max: bool) -> Self {
        Self {
            min: self.min.filter(|_| show_min),
            max: self.max.filter(|_| show_max),
        }
    }

    /// Constant line at `bound` over the timestamps of `series`.
    pub fn line(bound: f32, series: &[Measurement]) -> Vec<Measurement> {
        series
            .iter()
            .map(|m| Measurement {
                timestamp: m.timestamp,
                value: bound,
            })
            .collect()
    }

    pub fn contains(&self, value: f32) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::req::SensorType;

    const MINUTE: i64 = 60 * 1000;
    const HOUR: i64 = 60 * MINUTE;

    fn series(points: &[(i64, f32)]) -> Vec<Measurement> {
        points
            .iter()
            .map(|(timestamp, value)| Measurement {
                timestamp: *timestamp,
                value: *value,
            })
            .collect()
    }

    #[test]
    fn cutoff_is_relative_to_the_newest_sample() {
        let data = series(&[(0, 1.0), (30 * MINUTE, 2.0), (2 * HOUR, 3.0)]);
        assert_eq!(cutoff(&data, Duration::hours(1), 99 * HOUR), HOUR);

        let kept = filter_window(&data, Duration::hours(1), 99 * HOUR);
        assert_eq!(kept, series(&[(2 * HOUR, 3.0)]));
    }

    #[test]
    fn sample_exactly_at_the_cutoff_is_kept() {
        let data = series(&[(0, 1.0), (HOUR, 2.0)]);
        assert_eq!(filter_window(&data, Duration::hours(1), 0), data);
    }

    #[test]
    fn scope_longer_than_the_data_keeps_everything() {
        let data = series(&[(0, 1.0), (HOUR, 2.0), (3 * HOUR, 4.0)]);
        assert_eq!(filter_window(&data, Duration::days(1), 0), data);
    }

    #[test]
    fn empty_input_uses_now_and_yields_nothing() {
        assert_eq!(cutoff(&[], Duration::hours(1), 5 * HOUR), 4 * HOUR);
        for scope in TimeScope::standard() {
            assert!(scope.apply(&[], 5 * HOUR).is_empty());
        }
    }

    #[test]
    fn buckets_average_and_use_the_start_timestamp() {
        let data = series(&[
            (0, 1.0),
            (20 * MINUTE, 2.0),
            (40 * MINUTE, 3.0),
            (HOUR, 10.0),
            (HOUR + 30 * MINUTE, 20.0),
            (4 * HOUR + 5 * MINUTE, 7.0),
        ]);

        let averaged = average_measurements(&data, Duration::hours(1));

        assert_eq!(
            averaged,
            series(&[(0, 2.0), (HOUR, 15.0), (4 * HOUR, 7.0)])
        );
    }

    #[test]
    fn buckets_are_aligned_to_the_first_sample() {
        let data = series(&[(10 * MINUTE, 1.0), (65 * MINUTE, 3.0), (75 * MINUTE, 5.0)]);
        let averaged = average_measurements(&data, Duration::hours(1));
        assert_eq!(averaged, series(&[(10 * MINUTE, 2.0), (70 * MINUTE, 5.0)]));
    }

    #[test]
    fn averaging_never_grows_and_stays_ordered() {
        let data: Vec<_> = (0..500)
            .map(|i| Measurement {
                timestamp: i * 7 * MINUTE,
                value: (i % 13) as f32,
            })
            .collect();

        for scope in TimeScope::standard() {
            let windowed = filter_window(&data, scope.scope, 0);
            let out = scope.apply(&data, 0);
            assert!(out.len() <= windowed.len(), "{}", scope.name);
            assert!(out.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
            if scope.average_to.is_some() {
                assert!(out.len() < windowed.len(), "{}", scope.name);
            }
        }
    }

    #[test]
    fn non_positive_bucket_keeps_samples() {
        let data = series(&[(0, 1.0), (MINUTE, 2.0)]);
        assert_eq!(average_measurements(&data, Duration::zero()), data);
    }

    #[test]
    fn unknown_scope_falls_back_to_the_first() {
        let scopes = TimeScope::standard();
        assert_eq!(TimeScope::by_name(&scopes, "week").unwrap().name, "week");
        assert_eq!(TimeScope::by_name(&scopes, "decade").unwrap().name, "last hour");
        assert_eq!(
            TimeScope::by_name(&scopes, "month").unwrap().average_to,
            Some(Duration::days(1))
        );
    }

    #[test]
    fn band_skips_unset_bounds() {
        let band = ThresholdBand::from_threshold(Some(&Threshold {
            kind: SensorType::Co2,
            min: f32::NAN,
            max: 1200.0,
        }));
        assert_eq!(band.min, None);
        assert_eq!(band.max, Some(1200.0));
        assert!(band.contains(300.0));
        assert!(!band.contains(1500.0));

        assert_eq!(band.visible(true, false).max, None);
        assert_eq!(ThresholdBand::from_threshold(None).visible(true, true).min, None);
    }

    #[test]
    fn band_line_follows_the_series_timestamps() {
        let data = series(&[(0, 1.0), (HOUR, 2.0)]);
        assert_eq!(ThresholdBand::line(25.0, &data), series(&[(0, 25.0), (HOUR, 25.0)]));
    }
}
