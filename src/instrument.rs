//! Wraps one search call with runtime and peak-memory measurements.

use hrsw::Stopwatch;

use crate::error::SearchError;
use crate::graph::Node;
use crate::metrics::Metrics;
use crate::metrics::keys;
use crate::profiling::ProfilingScope;

/// Frontier sizes observed while searching.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontierLog {
    peak: usize,
    samples: usize,
}

impl FrontierLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn record(&mut self, len: usize) {
        self.samples += 1;
        self.peak = self.peak.max(len);
    }

    /// Largest recorded size, if anything was recorded.
    #[must_use]
    pub fn peak(&self) -> Option<usize> {
        (self.samples > 0).then_some(self.peak)
    }

    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }
}

/// What an algorithm hands back before instrumentation.
#[derive(Clone, Debug)]
pub struct SearchRun<N>
where
    N: Node,
{
    pub path: Vec<N>,
    pub metrics: Metrics,
    pub frontier: FrontierLog,
}

/// A route (empty when the goal can't be reached) and its metrics.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SearchResult<N>
where
    N: Node,
{
    pub path: Vec<N>,
    pub metrics: Metrics,
}

impl<N> SearchResult<N>
where
    N: Node,
{
    /// Whether a route was found.
    #[must_use]
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Runs `search` measuring its wall time and peak heap usage.
///
/// `runtime_sec` and `peak_memory_bytes` are only added when the search did
/// not set them itself. `frontier_peak_size` comes from the run's
/// [`FrontierLog`].
///
/// The profiling scope is released before any error is returned.
pub fn run_with_metrics<N, F>(search: F) -> Result<SearchResult<N>, SearchError>
where
    N: Node,
    F: FnOnce() -> Result<SearchRun<N>, SearchError>,
{
    let scope = ProfilingScope::begin()?;
    let mut stopwatch = Stopwatch::new_started();

    let run = search();

    stopwatch.stop();
    let peak = scope.end();

    let SearchRun {
        path,
        mut metrics,
        frontier,
    } = run?;
    let peak = peak?;

    let elapsed = stopwatch.elapsed();
    metrics.set_if_absent(keys::RUNTIME_SEC, elapsed.as_secs_f64());
    metrics.set_if_absent(keys::PEAK_MEMORY_BYTES, peak as i64);
    if let Some(frontier_peak) = frontier.peak() {
        metrics.insert(keys::FRONTIER_PEAK_SIZE, frontier_peak as i64);
    }

    Ok(SearchResult { path, metrics })
}
