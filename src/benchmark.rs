//! Side-by-side comparison of all the searches on one route.

use serde::Serialize;

use crate::algorithms::Algorithm;
use crate::algorithms::SearchConfig;
use crate::algorithms::search;
use crate::error::BenchmarkError;
use crate::graph::WeightedGraph;
use crate::heuristic::Heuristic;
use crate::metrics::Metrics;

/// Aggregated metrics of one algorithm over several repetitions.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchmarkRow {
    pub algorithm: Algorithm,
    pub runtime_mean_sec: f64,
    /// Population standard deviation.
    pub runtime_std_sec: f64,
    pub peak_memory_mean_bytes: f64,
    pub nodes_expanded_mean: f64,
    pub path_cost_mean: f64,
    pub solution_depth_mean: f64,
}

/// Runs every algorithm `repeats` times from `start` to `goal`.
///
/// Rows come back sorted by mean runtime, fastest first.
pub fn compare_algorithms<G, H>(
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
    heuristic: &H,
    config: &SearchConfig,
    repeats: usize,
) -> Result<Vec<BenchmarkRow>, BenchmarkError>
where
    G: WeightedGraph,
    H: Heuristic<G::Node>,
{
    let mut rows = Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            benchmark_algorithm(algorithm, graph, start, goal, heuristic, config, repeats)
        })
        .collect::<Result<Vec<_>, _>>()?;
    sort_by_runtime(&mut rows);
    Ok(rows)
}

/// Runs one algorithm `repeats` times and aggregates its metrics.
pub fn benchmark_algorithm<G, H>(
    algorithm: Algorithm,
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
    heuristic: &H,
    config: &SearchConfig,
    repeats: usize,
) -> Result<BenchmarkRow, BenchmarkError>
where
    G: WeightedGraph,
    H: Heuristic<G::Node>,
{
    if repeats == 0 {
        return Err(BenchmarkError::NoRepeats);
    }
    log::info!("Benchmarking {algorithm} from {start} to {goal} ({repeats} runs)");

    let mut runs: Vec<Metrics> = Vec::with_capacity(repeats);
    for _ in 0..repeats {
        runs.push(search(algorithm, graph, start, goal, heuristic, config)?.metrics);
    }

    let column = |get: fn(&Metrics) -> Option<f64>| -> Vec<f64> {
        runs.iter().map(|m| get(m).unwrap_or(f64::NAN)).collect()
    };
    let runtimes = column(Metrics::runtime_sec);
    Ok(BenchmarkRow {
        algorithm,
        runtime_mean_sec: mean(&runtimes),
        runtime_std_sec: population_std(&runtimes),
        peak_memory_mean_bytes: mean(&column(|m| m.peak_memory_bytes().map(|b| b as f64))),
        nodes_expanded_mean: mean(&column(|m| m.nodes_expanded().map(|n| n as f64))),
        path_cost_mean: mean(&column(Metrics::path_cost)),
        solution_depth_mean: mean(&column(|m| m.solution_depth().map(|d| d as f64))),
    })
}

/// Fastest first.
pub fn sort_by_runtime(rows: &mut [BenchmarkRow]) {
    rows.sort_by(|a, b| a.runtime_mean_sec.total_cmp(&b.runtime_mean_sec));
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn population_std(xs: &[f64]) -> f64 {
    let mu = mean(xs);
    (xs.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / xs.len() as f64).sqrt()
}
