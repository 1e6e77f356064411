use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::time::Instant;

/// Samples kept per histogram; older samples are dropped first
pub const MAX_SAMPLES: usize = 10_000;

static METRICS: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

/// The process-wide registry
pub fn metrics() -> &'static MetricsRegistry {
    &METRICS
}

#[derive(Default)]
struct Series {
    counters: BTreeMap<String, u64>,
    gauges: BTreeMap<String, u64>,
    histograms: BTreeMap<String, VecDeque<f64>>,
}

/// Named counters, gauges and bounded histograms
pub struct MetricsRegistry {
    series: Mutex<Series>,
    started: Instant,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    /// An empty registry; most callers want [`metrics`]
    pub fn new() -> Self {
        Self {
            series: Mutex::new(Series::default()),
            started: Instant::now(),
        }
    }

    fn with_series<R>(&self, f: impl FnOnce(&mut Series) -> R) -> R {
        let mut series = self.series.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut series)
    }

    /// Add one to a counter
    pub fn increment(&self, name: &str) {
        self.increment_by(name, 1);
    }

    /// Add `value` to a counter
    pub fn increment_by(&self, name: &str, value: u64) {
        self.with_series(|s| {
            let counter = s.counters.entry(name.to_string()).or_default();
            *counter = counter.saturating_add(value);
        });
    }

    /// Current counter value, zero if never touched
    pub fn counter(&self, name: &str) -> u64 {
        self.with_series(|s| s.counters.get(name).copied().unwrap_or(0))
    }

    /// Overwrite a gauge
    pub fn gauge(&self, name: &str, value: u64) {
        self.with_series(|s| {
            s.gauges.insert(name.to_string(), value);
        });
    }

    /// Append a sample to a histogram
    pub fn histogram(&self, name: &str, value: f64) {
        self.with_series(|s| {
            let samples = s.histograms.entry(name.to_string()).or_default();
            if samples.len() == MAX_SAMPLES {
                samples.pop_front();
            }
            samples.push_back(value);
        });
    }

    /// Seconds since the registry was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    /// Point-in-time copy of every series
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.with_series(|s| MetricsSnapshot {
            session_id: crate::session_id().to_string(),
            uptime_secs: self.uptime_secs(),
            counters: s.counters.clone(),
            gauges: s.gauges.clone(),
            histograms: s
                .histograms
                .iter()
                .map(|(name, samples)| (name.clone(), HistogramSummary::of(samples.iter().copied())))
                .collect(),
        })
    }
}

/// What `/metrics` returns
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub session_id: String,
    pub uptime_secs: u64,
    pub counters: BTreeMap<String, u64>,
    pub gauges: BTreeMap<String, u64>,
    pub histograms: BTreeMap<String, HistogramSummary>,
}

/// Distribution of a histogram's retained samples
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistogramSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

impl HistogramSummary {
    fn of(samples: impl Iterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = samples.collect();
        if sorted.is_empty() {
            return Self::default();
        }
        sorted.sort_by(f64::total_cmp);

        // nearest-rank on the sorted samples
        let rank = |p: f64| sorted[((p * (sorted.len() - 1) as f64).round() as usize).min(sorted.len() - 1)];

        Self {
            count: sorted.len(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
            p50: rank(0.50),
            p95: rank(0.95),
            p99: rank(0.99),
        }
    }
}
