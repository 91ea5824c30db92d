use serde::Serialize;

/// One labeled benchmark measurement: GPU-accelerated lookup time against the
/// CPU baseline, both in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSample {
    pub label: String,
    pub cuda_ms: f64,
    pub cpu_ms: f64,
}

/// One entry of the chart series consumed by the display surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub cuda_ms: f64,
    pub cpu_ms: f64,
}

/// The fixed benchmark set shown after a plot-performance run.
pub fn benchmark_samples() -> Vec<BenchmarkSample> {
    [
        ("1K", 2.0, 156.0),
        ("5K", 8.0, 780.0),
        ("10K", 14.0, 1420.0),
        ("50K", 52.0, 7100.0),
        ("100K", 98.0, 14200.0),
    ]
    .into_iter()
    .map(|(label, cuda_ms, cpu_ms)| BenchmarkSample {
        label: label.to_string(),
        cuda_ms,
        cpu_ms,
    })
    .collect()
}

/// Project benchmark samples into chart series, preserving order. Identity
/// mapping at this scale; empty input yields an empty series and the display
/// renders its "no data yet" placeholder instead of an empty chart.
pub fn project(samples: &[BenchmarkSample]) -> Vec<ChartPoint> {
    samples
        .iter()
        .map(|s| ChartPoint {
            label: s.label.clone(),
            cuda_ms: s.cuda_ms,
            cpu_ms: s.cpu_ms,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(project(&[]).is_empty());
    }

    #[test]
    fn projection_preserves_order_and_values() {
        let samples = benchmark_samples();
        let series = project(&samples);
        assert_eq!(series.len(), 5);
        assert_eq!(series[0].label, "1K");
        assert_eq!(series[0].cuda_ms, 2.0);
        assert_eq!(series[0].cpu_ms, 156.0);
        assert_eq!(series[4].label, "100K");
        assert_eq!(series[4].cpu_ms, 14200.0);
    }

    #[test]
    fn fixed_sample_set_has_five_entries() {
        assert_eq!(benchmark_samples().len(), 5);
    }
}
